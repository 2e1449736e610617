//! Relay configuration
//!
//! The site list is deploy-time configuration: read once at startup, never
//! modified per-request.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RelayError, Result};
use crate::network::{Network, MIN_NETWORK_SIZE};

/// Deploy-time relay configuration.
///
/// On disk this is a JSON document of the form
/// `{"network": ["a.firstsite.com", "a.shop.secondsite.com"]}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelayConfig {
    /// The ordered list of participating sites.
    pub network: Network,
}

impl RelayConfig {
    /// Build a configuration from a plain host list.
    pub fn new(sites: Vec<String>) -> Self {
        Self {
            network: Network::new(sites),
        }
    }

    /// Load and validate a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| RelayError::Config(format!("read {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| RelayError::Config(format!("parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.network.len() < MIN_NETWORK_SIZE {
            return Err(RelayError::InsufficientNetwork(self.network.len()));
        }
        Ok(())
    }
}
