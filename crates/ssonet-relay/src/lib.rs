//! Redirect-chain traversal engine for the SSONet cross-domain SSO relay.
//!
//! A login or logout on one member site is propagated to every other site in
//! the network by walking the browser through a chain of 302 redirects. Each
//! hop lands on one site, drops a short-lived marker cookie there, and sends
//! the browser on to the next site, until the chain is exhausted and the
//! browser is released to its final destination.
//!
//! The engine is stateless: every decision is derived from the inbound query
//! parameters, the current host, and the static network configuration. It
//! never touches HTTP itself; it returns a [`RelayOutcome`] describing the
//! cookies to emit and the redirect to issue, and the HTTP layer applies it.

pub mod config;
pub mod cookie;
pub mod engine;
pub mod error;
pub mod network;
pub mod request;

pub use config::RelayConfig;
pub use cookie::{
    CookieInstruction, CookieSignal, CLEAR_BACKDATE_SECS, MARKER_TTL_SECS, SSO_LOGIN_COOKIE,
    SSO_LOGOUT_COOKIE,
};
pub use engine::{handle_signal, RedirectDecision, RelayOutcome, REDIRECT_STATUS};
pub use error::{RelayError, Result};
pub use network::{Network, MIN_NETWORK_SIZE};
pub use request::{Operation, SignalRequest};
