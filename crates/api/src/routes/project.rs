//! Route definitions for the `/projects` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, put};
use axum::Router;

use crate::config::ServerConfig;
use crate::handlers::project;
use crate::state::AppState;

/// Headroom on top of the image ceiling for multipart framing and the text
/// fields that travel alongside the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /              -> list (public)
/// POST   /              -> create (admin, multipart)
/// GET    /slug/{slug}   -> get by slug (public)
/// PUT    /{id}          -> update (admin, multipart)
/// DELETE /{id}          -> delete (admin)
/// ```
///
/// Oversized multipart bodies are rejected by the body limit before the
/// handlers run.
pub fn router(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/slug/{slug}", get(project::get_by_slug))
        .route("/{id}", put(project::update).delete(project::delete))
        .layer(DefaultBodyLimit::max(
            config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
        ))
}
