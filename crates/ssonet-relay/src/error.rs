//! Error types for the relay engine

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, RelayError>;

/// Relay engine errors.
///
/// Every variant is terminal for the current hop: the engine produces no
/// cookies and no redirect, and the HTTP layer answers with an empty
/// response. Nothing is retried; the browser's own redirect-following is the
/// only retry mechanism in this protocol.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The inbound request carried no Host metadata.
    #[error("request has no Host header")]
    MissingHost,

    /// A required query parameter is missing or malformed.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The configured network is too small for a relay chain.
    #[error("network has {0} site(s), need at least 2")]
    InsufficientNetwork(usize),

    /// Configuration could not be loaded or failed validation.
    #[error("config error: {0}")]
    Config(String),
}
