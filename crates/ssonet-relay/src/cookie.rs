//! Marker-cookie signal emission.
//!
//! The markers are pure signal flags ("this site has seen a login/logout"),
//! not session tokens. Each hop clears the opposite-operation marker and
//! sets the current one, so a site never carries both at once.

use chrono::{DateTime, Duration, Utc};

use crate::request::Operation;

/// Marker set when a login is being propagated.
pub const SSO_LOGIN_COOKIE: &str = "SSOLogin";
/// Marker set when a logout is being propagated.
pub const SSO_LOGOUT_COOKIE: &str = "SSOLogout";

/// Marker lifetime. The most common session garbage-collection window on
/// the member sites is 200000 seconds; the marker expires half a minute
/// before that so it never outlives the session it signals about.
pub const MARKER_TTL_SECS: i64 = 200_000 - 30;

/// How far in the past a cleared cookie's expiry is backdated.
pub const CLEAR_BACKDATE_SECS: i64 = 3_600;

/// One Set-Cookie instruction, expressed independently of any HTTP library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieInstruction {
    pub name: &'static str,
    pub value: String,
    pub domain: String,
    pub path: &'static str,
    pub expires_at: DateTime<Utc>,
}

/// The cookie pair for one relay hop: clear the opposite-operation marker,
/// then set the current one. Applied by the HTTP layer in that order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieSignal {
    pub clear: CookieInstruction,
    pub set: CookieInstruction,
}

impl CookieSignal {
    /// Build the cookie pair for `op` on the site reached as `host`.
    ///
    /// Clearing is modeled as setting the same-named cookie with an empty
    /// value and an expiry in the past. Both cookies are scoped to path `/`
    /// and to the host with the relay's `a.` label removed, so they land on
    /// the member site's own domain.
    pub fn for_operation(op: Operation, host: &str, now: DateTime<Utc>) -> Self {
        let (to_clear, to_set) = match op {
            Operation::Login => (SSO_LOGOUT_COOKIE, SSO_LOGIN_COOKIE),
            Operation::Logout => (SSO_LOGIN_COOKIE, SSO_LOGOUT_COOKIE),
        };

        let domain = trim_relay_prefix(host).to_string();

        Self {
            clear: CookieInstruction {
                name: to_clear,
                value: String::new(),
                domain: domain.clone(),
                path: "/",
                expires_at: now - Duration::seconds(CLEAR_BACKDATE_SECS),
            },
            set: CookieInstruction {
                name: to_set,
                value: "1".to_string(),
                domain,
                path: "/",
                expires_at: now + Duration::seconds(MARKER_TTL_SECS),
            },
        }
    }
}

/// Strip the relay's own `a.` subdomain label from a host.
///
/// A single prefix removal: `"a.firstsite.com"` becomes `"firstsite.com"`,
/// anything else passes through unchanged. This deliberately corrects the
/// historical behavior of trimming the character set `{a, .}`, which could
/// over-strip hosts such as `"aa.example.com"`.
pub fn trim_relay_prefix(host: &str) -> &str {
    host.strip_prefix("a.").unwrap_or(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_login_signal() {
        let signal = CookieSignal::for_operation(Operation::Login, "a.firstsite.com", fixed_now());

        assert_eq!(signal.clear.name, SSO_LOGOUT_COOKIE);
        assert_eq!(signal.clear.value, "");
        assert_eq!(signal.set.name, SSO_LOGIN_COOKIE);
        assert_eq!(signal.set.value, "1");
        assert_eq!(signal.set.domain, "firstsite.com");
        assert_eq!(signal.set.path, "/");
    }

    #[test]
    fn test_logout_signal_reverses_pair() {
        let signal = CookieSignal::for_operation(Operation::Logout, "a.firstsite.com", fixed_now());

        assert_eq!(signal.clear.name, SSO_LOGIN_COOKIE);
        assert_eq!(signal.set.name, SSO_LOGOUT_COOKIE);
    }

    #[test]
    fn test_expiry_window() {
        let now = fixed_now();
        let signal = CookieSignal::for_operation(Operation::Login, "a.firstsite.com", now);

        assert_eq!(signal.clear.expires_at, now - Duration::seconds(3_600));
        assert_eq!(signal.set.expires_at, now + Duration::seconds(199_970));
    }

    #[test]
    fn test_trim_relay_prefix() {
        assert_eq!(trim_relay_prefix("a.firstsite.com"), "firstsite.com");
        assert_eq!(trim_relay_prefix("firstsite.com"), "firstsite.com");
        // Single removal only: no character-set over-stripping.
        assert_eq!(trim_relay_prefix("aa.example.com"), "aa.example.com");
        assert_eq!(trim_relay_prefix("a.a.example.com"), "a.example.com");
    }
}
