//! Per-request context parsed from the inbound request.

use std::fmt;

use crate::error::{RelayError, Result};

/// The operation being propagated across the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Login,
    Logout,
}

impl Operation {
    /// Wire representation, as it appears in the `op` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Login => "login",
            Operation::Logout => "logout",
        }
    }

    /// Parse the `op` query parameter. Only the exact strings `"login"`
    /// and `"logout"` are accepted.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "login" => Ok(Operation::Login),
            "logout" => Ok(Operation::Logout),
            other => Err(RelayError::InvalidParameters(format!(
                "op must be login or logout, got {other:?}"
            ))),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable context for one relay hop.
///
/// Built once per request by [`SignalRequest::parse`]; all validation
/// happens there, so a constructed value is known-good for the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignalRequest {
    host: String,
    op: Operation,
    origin_host: String,
    destination: Option<String>,
}

impl SignalRequest {
    /// Validate the raw request pieces and build the context.
    ///
    /// Rules:
    /// - `host` (the Host header) is required; it is normalized to
    ///   lowercase. Some pre-HTTP/1.1 clients omit it, in which case the
    ///   relay cannot work at all.
    /// - `op` is required and must parse as an [`Operation`].
    /// - `origin_host` is required and non-empty.
    /// - `destination` is required when the operation is a login. An empty
    ///   string is accepted; the value is otherwise unconstrained.
    pub fn parse(
        host: Option<&str>,
        op: Option<&str>,
        origin_host: Option<&str>,
        destination: Option<&str>,
    ) -> Result<Self> {
        let host = match host {
            Some(h) if !h.is_empty() => h.to_lowercase(),
            _ => return Err(RelayError::MissingHost),
        };

        let op = match op {
            Some(raw) if !raw.is_empty() => Operation::parse(raw)?,
            _ => return Err(RelayError::InvalidParameters("missing op".to_string())),
        };

        let origin_host = match origin_host {
            Some(o) if !o.is_empty() => o.to_string(),
            _ => {
                return Err(RelayError::InvalidParameters(
                    "missing origin_host".to_string(),
                ))
            }
        };

        if op == Operation::Login && destination.is_none() {
            return Err(RelayError::InvalidParameters(
                "login requires a destination".to_string(),
            ));
        }
        let destination = destination.map(str::to_string);

        Ok(Self {
            host,
            op,
            origin_host,
            destination,
        })
    }

    /// Current request's host, lowercased.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The operation being propagated.
    pub fn op(&self) -> Operation {
        self.op
    }

    /// The site where the login/logout originated.
    pub fn origin_host(&self) -> &str {
        &self.origin_host
    }

    /// Final destination URL; always present for logins.
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }
}
