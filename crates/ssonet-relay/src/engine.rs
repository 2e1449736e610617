//! The redirect-chain traversal state machine.
//!
//! One invocation per HTTP request, fully determined by its inputs plus the
//! static network configuration. A hop either forwards the browser to the
//! next network site or terminates the chain; exactly one of the two happens
//! per request, and a validation failure produces neither (no cookies, no
//! redirect).

use chrono::{DateTime, Utc};

use crate::cookie::{trim_relay_prefix, CookieSignal};
use crate::error::{RelayError, Result};
use crate::network::{Network, MIN_NETWORK_SIZE};
use crate::request::{Operation, SignalRequest};

/// HTTP status used for every relay redirect.
pub const REDIRECT_STATUS: u16 = 302;

/// Where to send the browser next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectDecision {
    pub location: String,
    pub status: u16,
}

/// Everything the HTTP layer must apply to the response for one hop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayOutcome {
    /// Cookie pair to emit. Absent on the very first hop, where the origin
    /// site already handled its own login/logout.
    pub cookies: Option<CookieSignal>,
    pub redirect: RedirectDecision,
}

/// Decide the cookies and redirect for one hop of the relay chain.
///
/// The working site list is the configured network with the origin site
/// removed. When the current host (minus the relay's `a.` label) is the
/// origin itself, this is the first hop: no cookie, redirect to the head of
/// the working list. Otherwise a marker cookie is emitted and the browser is
/// forwarded to the site after the current one, or released to its terminal
/// destination when no site follows.
pub fn handle_signal(
    request: &SignalRequest,
    network: &Network,
    now: DateTime<Utc>,
) -> Result<RelayOutcome> {
    if network.len() < MIN_NETWORK_SIZE {
        return Err(RelayError::InsufficientNetwork(network.len()));
    }

    let remaining = network.without_origin(request.origin_host());

    if trim_relay_prefix(request.host()) == request.origin_host() {
        // The origin already handled its own login/logout before invoking
        // the relay; start the chain at the head of the working list.
        let first = remaining
            .get(0)
            .ok_or_else(|| RelayError::InsufficientNetwork(network.len()))?;
        return Ok(RelayOutcome {
            cookies: None,
            redirect: redirect_to(hop_url(first, request)?),
        });
    }

    let cookies = CookieSignal::for_operation(request.op(), request.host(), now);

    // A host missing from the working list yields no position, which lands
    // in the terminal branch rather than an out-of-bounds index.
    let next = remaining
        .position_of(request.host())
        .and_then(|delta| remaining.get(delta + 1));

    let location = match next {
        Some(entry) => hop_url(entry, request)?,
        None => terminal_url(request)?,
    };

    Ok(RelayOutcome {
        cookies: Some(cookies),
        redirect: redirect_to(location),
    })
}

/// URL of an intermediate hop, echoing the inbound parameters verbatim.
///
/// No percent-encoding is applied, for parity with the wire format the
/// member sites already consume. Validating `destination` and `origin_host`
/// against the configured network before use remains a known hardening
/// opportunity.
fn hop_url(entry: &str, request: &SignalRequest) -> Result<String> {
    let mut url = format!(
        "http://{}?op={}&origin_host={}",
        entry,
        request.op(),
        request.origin_host()
    );
    if request.op() == Operation::Login {
        url.push_str("&destination=");
        url.push_str(destination_of(request)?);
    }
    Ok(url)
}

/// Final target once the last network site has been visited: the caller's
/// destination for a login, the origin site itself for a logout.
fn terminal_url(request: &SignalRequest) -> Result<String> {
    match request.op() {
        Operation::Login => Ok(destination_of(request)?.to_string()),
        Operation::Logout => Ok(format!("http://{}", request.origin_host())),
    }
}

fn destination_of(request: &SignalRequest) -> Result<&str> {
    request.destination().ok_or_else(|| {
        RelayError::InvalidParameters("login requires a destination".to_string())
    })
}

fn redirect_to(location: String) -> RedirectDecision {
    RedirectDecision {
        location,
        status: REDIRECT_STATUS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::{SSO_LOGIN_COOKIE, SSO_LOGOUT_COOKIE};
    use chrono::TimeZone;

    fn network(sites: &[&str]) -> Network {
        Network::new(sites.iter().map(|s| s.to_string()).collect())
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn login(host: &str, origin: &str, destination: &str) -> SignalRequest {
        SignalRequest::parse(Some(host), Some("login"), Some(origin), Some(destination)).unwrap()
    }

    fn logout(host: &str, origin: &str) -> SignalRequest {
        SignalRequest::parse(Some(host), Some("logout"), Some(origin), None).unwrap()
    }

    #[test]
    fn test_insufficient_network_aborts() {
        let request = login("a.firstsite.com", "firstsite.com", "http://firstsite.com/");

        let err = handle_signal(&request, &network(&["a.firstsite.com"]), fixed_now()).unwrap_err();
        assert!(matches!(err, RelayError::InsufficientNetwork(1)));

        let err = handle_signal(&request, &network(&[]), fixed_now()).unwrap_err();
        assert!(matches!(err, RelayError::InsufficientNetwork(0)));
    }

    #[test]
    fn test_first_hop_emits_no_cookie() {
        let net = network(&["a.firstsite.com", "a.secondsite.com", "a.thirdsite.com"]);
        let request = login("a.firstsite.com", "firstsite.com", "http://firstsite.com/done");

        let outcome = handle_signal(&request, &net, fixed_now()).unwrap();

        assert!(outcome.cookies.is_none());
        assert_eq!(outcome.redirect.status, 302);
        assert_eq!(
            outcome.redirect.location,
            "http://a.secondsite.com?op=login&origin_host=firstsite.com\
             &destination=http://firstsite.com/done"
        );
    }

    #[test]
    fn test_chain_continues_to_next_site() {
        let net = network(&["a.firstsite.com", "a.secondsite.com", "a.thirdsite.com"]);
        let request = login("a.secondsite.com", "firstsite.com", "http://firstsite.com/done");

        let outcome = handle_signal(&request, &net, fixed_now()).unwrap();

        let cookies = outcome.cookies.expect("relay hop sets cookies");
        assert_eq!(cookies.set.name, SSO_LOGIN_COOKIE);
        assert_eq!(cookies.set.domain, "secondsite.com");
        assert_eq!(
            outcome.redirect.location,
            "http://a.thirdsite.com?op=login&origin_host=firstsite.com\
             &destination=http://firstsite.com/done"
        );
    }

    #[test]
    fn test_terminal_login_uses_destination_verbatim() {
        let net = network(&["a.firstsite.com", "a.secondsite.com", "a.thirdsite.com"]);
        let request = login("a.thirdsite.com", "firstsite.com", "http://firstsite.com/welcome");

        let outcome = handle_signal(&request, &net, fixed_now()).unwrap();

        assert!(outcome.cookies.is_some());
        assert_eq!(outcome.redirect.location, "http://firstsite.com/welcome");
    }

    #[test]
    fn test_terminal_logout_returns_to_origin() {
        let net = network(&["a.firstsite.com", "a.secondsite.com"]);
        let request = logout("a.secondsite.com", "firstsite.com");

        let outcome = handle_signal(&request, &net, fixed_now()).unwrap();

        let cookies = outcome.cookies.expect("relay hop sets cookies");
        assert_eq!(cookies.set.name, SSO_LOGOUT_COOKIE);
        assert_eq!(cookies.clear.name, SSO_LOGIN_COOKIE);
        assert_eq!(outcome.redirect.location, "http://firstsite.com");
    }

    #[test]
    fn test_logout_hop_url_omits_destination() {
        let net = network(&["a.firstsite.com", "a.secondsite.com", "a.thirdsite.com"]);
        let request = logout("a.secondsite.com", "firstsite.com");

        let outcome = handle_signal(&request, &net, fixed_now()).unwrap();

        assert_eq!(
            outcome.redirect.location,
            "http://a.thirdsite.com?op=logout&origin_host=firstsite.com"
        );
    }

    #[test]
    fn test_unknown_host_treated_as_terminal() {
        // A host absent from the working list must not produce an
        // out-of-bounds lookup; the hop terminates instead.
        let net = network(&["a.firstsite.com", "a.secondsite.com"]);
        let request = logout("a.unrelated.org", "firstsite.com");

        let outcome = handle_signal(&request, &net, fixed_now()).unwrap();

        assert!(outcome.cookies.is_some());
        assert_eq!(outcome.redirect.location, "http://firstsite.com");
    }

    #[test]
    fn test_path_suffixed_entries_match_by_prefix() {
        let net = network(&["firstsite.com/sso", "secondsite.com/sso"]);
        let request = logout("firstsite.com", "secondsite.com");

        let outcome = handle_signal(&request, &net, fixed_now()).unwrap();

        // firstsite.com matches the path-suffixed entry; nothing follows
        // it in the working list, so the hop is terminal.
        assert_eq!(outcome.redirect.location, "http://secondsite.com");
    }

    #[test]
    fn test_untrimmed_origin_scenario() {
        // Origin passed with its relay label intact: the trimmed current
        // host no longer equals it, so even the originating site takes the
        // relay branch, sets its cookie, and terminates.
        let net = network(&["a.firstsite.com", "a.shop.secondsite.com"]);
        let request = login(
            "a.firstsite.com",
            "a.firstsite.com",
            "http://a.firstsite.com/welcome",
        );

        let outcome = handle_signal(&request, &net, fixed_now()).unwrap();

        let cookies = outcome.cookies.expect("relay branch sets cookies");
        assert_eq!(cookies.set.name, SSO_LOGIN_COOKIE);
        assert_eq!(cookies.set.domain, "firstsite.com");
        assert_eq!(outcome.redirect.location, "http://a.firstsite.com/welcome");
    }
}
