//! Route definitions for the `/messages` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::message;
use crate::state::AppState;

/// Routes mounted at `/messages`.
///
/// ```text
/// POST /  -> create (public contact form)
/// GET  /  -> list (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(message::list).post(message::create))
}
