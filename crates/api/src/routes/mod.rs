pub mod auth;
pub mod health;
pub mod message;
pub mod project;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                 login (public, rate-limited)
/// /auth/logout                logout (requires auth)
/// /auth/me                    current principal (requires auth)
///
/// /projects                   list (public), create (admin, multipart)
/// /projects/slug/{slug}       get by slug (public)
/// /projects/{id}              update (admin, multipart), delete (admin)
///
/// /messages                   create (public), list (admin)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router(config))
        .nest("/messages", message::router())
}
