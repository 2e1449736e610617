//! HTTP handlers for the relay endpoint.

use actix_web::cookie::time::OffsetDateTime;
use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

use ssonet_relay::{handle_signal, CookieInstruction, SignalRequest};

use crate::error::RelayRejection;
use crate::AppState;

/// Configure API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(relay))
        .route("/health", web::get().to(health_check));
}

/// Raw query parameters for the relay endpoint.
///
/// Everything is optional at this layer so that a malformed query reaches
/// the engine's own validation (and its silent-abort policy) instead of the
/// framework's 400 response.
#[derive(Debug, Deserialize)]
pub struct SignalQuery {
    op: Option<String>,
    origin_host: Option<String>,
    destination: Option<String>,
}

/// One hop of the relay chain.
async fn relay(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<SignalQuery>,
) -> Result<HttpResponse, RelayRejection> {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok());

    let request = SignalRequest::parse(
        host,
        query.op.as_deref(),
        query.origin_host.as_deref(),
        query.destination.as_deref(),
    )?;

    let outcome = handle_signal(&request, &state.config.network, chrono::Utc::now())?;

    debug!(
        "Relaying {} from {} to {}",
        request.op(),
        request.host(),
        outcome.redirect.location
    );

    let mut response = HttpResponse::Found();
    response.insert_header((header::LOCATION, outcome.redirect.location.clone()));
    if let Some(signal) = &outcome.cookies {
        response.cookie(build_cookie(&signal.clear));
        response.cookie(build_cookie(&signal.set));
    }
    Ok(response.finish())
}

/// Translate an engine cookie instruction into a Set-Cookie header.
fn build_cookie(instruction: &CookieInstruction) -> Cookie<'static> {
    let expires = OffsetDateTime::from_unix_timestamp(instruction.expires_at.timestamp())
        .unwrap_or(OffsetDateTime::UNIX_EPOCH);

    Cookie::build(instruction.name, instruction.value.clone())
        .domain(instruction.domain.clone())
        .path(instruction.path)
        .expires(expires)
        .finish()
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
    network_size: usize,
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "sso-relay-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        network_size: state.config.network.len(),
    })
}
