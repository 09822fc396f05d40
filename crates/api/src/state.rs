use std::sync::Arc;

use crate::config::ServerConfig;
use crate::mail::Mailer;
use crate::media::MediaStore;
use crate::ratelimit::LoginRateLimiter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: folio_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Sliding-window limiter guarding the login endpoint.
    pub login_limiter: Arc<LoginRateLimiter>,
    /// On-disk store for project cover images.
    pub media: Arc<MediaStore>,
    /// Outbound SMTP mailer; `None` when SMTP is not configured.
    pub mailer: Option<Arc<Mailer>>,
}
