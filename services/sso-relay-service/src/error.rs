//! HTTP-facing error adapter.
//!
//! Every engine failure aborts the hop with an empty response: the browser
//! is mid-redirect-chain and there is nobody to show an error page to, so
//! the relay simply stops relaying. The failure itself is recorded in the
//! service log, never surfaced to the client.

use std::fmt;

use actix_web::{HttpResponse, ResponseError};
use ssonet_relay::RelayError;
use tracing::debug;

/// Wraps [`RelayError`] for use as an actix handler error.
#[derive(Debug)]
pub struct RelayRejection(RelayError);

impl From<RelayError> for RelayRejection {
    fn from(err: RelayError) -> Self {
        Self(err)
    }
}

impl fmt::Display for RelayRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for RelayRejection {}

impl ResponseError for RelayRejection {
    fn error_response(&self) -> HttpResponse {
        debug!("Aborting relay hop: {}", self.0);
        HttpResponse::Ok().finish()
    }
}
