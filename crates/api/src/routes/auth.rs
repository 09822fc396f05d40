//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login   -> login (public, rate-limited)
/// GET  /logout  -> logout (requires auth)
/// GET  /me      -> current principal (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/me", get(auth::me))
}
