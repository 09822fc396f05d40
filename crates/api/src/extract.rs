//! Client-origin resolution for rate limiting and request provenance.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// Placeholder when neither a forwarding header nor the socket address is
/// available (e.g. in-process test requests).
const UNKNOWN_ORIGIN: &str = "unknown";

/// The network origin of a request, as a best-effort string key.
///
/// Resolution order: the first hop of `X-Forwarded-For` (set by a reverse
/// proxy), then the peer socket address, then a fixed fallback. Never fails.
#[derive(Debug, Clone)]
pub struct ClientOrigin(pub String);

impl FromRequestParts<AppState> for ClientOrigin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(forwarded) = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
        {
            if let Some(first_hop) = forwarded.split(',').next() {
                let first_hop = first_hop.trim();
                if !first_hop.is_empty() {
                    return Ok(ClientOrigin(first_hop.to_string()));
                }
            }
        }

        let origin = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| UNKNOWN_ORIGIN.to_string());

        Ok(ClientOrigin(origin))
    }
}
