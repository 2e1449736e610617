//! The ordered site list and its prefix-match lookup.

use serde::{Deserialize, Serialize};

/// Minimum number of configured sites for a relay chain to be meaningful.
pub const MIN_NETWORK_SIZE: usize = 2;

/// The ordered collection of cooperating sites in one SSO relay chain.
///
/// Entries are bare hostnames without a scheme. A path suffix such as
/// `"firstsite.com/sso"` is allowed for deployments that serve the relay
/// endpoint from inside a site's own directory, which is why lookups use a
/// prefix comparison rather than equality.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Network(Vec<String>);

impl Network {
    /// Create a network from an ordered site list.
    pub fn new(sites: Vec<String>) -> Self {
        Self(sites)
    }

    /// Number of configured sites.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no sites are configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Site at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Iterate over the configured sites in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Index of the first entry that starts with `needle`.
    ///
    /// An ordered linear scan with first-match-wins semantics: multiple
    /// entries may share a prefix, and configuration order breaks the tie.
    /// Comparison is case-sensitive; callers normalize beforehand.
    pub fn position_of(&self, needle: &str) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        self.0.iter().position(|entry| entry.starts_with(needle))
    }

    /// Working copy for one traversal: the origin site removed, relative
    /// order preserved, indices contiguous from zero.
    ///
    /// When the direct prefix search misses, the origin is looked up again
    /// as `"a." + origin_host`, accommodating sites whose relay endpoint
    /// lives on an `a.` subdomain while their canonical identity omits it.
    /// If both searches miss, the list is returned unchanged.
    pub fn without_origin(&self, origin_host: &str) -> Network {
        let delta = self
            .position_of(origin_host)
            .or_else(|| self.position_of(&format!("a.{origin_host}")));

        match delta {
            Some(index) => {
                let mut sites = self.0.clone();
                sites.remove(index);
                Network(sites)
            }
            None => self.clone(),
        }
    }
}
