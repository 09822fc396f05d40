use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the uniform JSON error envelope
/// `{success:false, error, message, [errors]}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `folio-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::BadRequest(format!("Malformed multipart body: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self {
            AppError::Core(core) => (
                StatusCode::from_u16(core.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                core.kind(),
                core.to_string(),
            ),

            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "StorageError",
                    sanitized_detail("Storage error", &err.to_string()),
                )
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BadRequest", msg.clone()),

            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "StorageError",
                    sanitized_detail("An internal error occurred", msg),
                )
            }
        };

        let mut body = json!({
            "success": false,
            "error": kind,
            "message": message,
        });

        // Validation failures additionally carry the field-level list.
        if let AppError::Core(core) = &self {
            if let Some(violations) = core.violations() {
                body["errors"] = json!(violations);
            }
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Include underlying detail only in non-production builds; release builds
/// return the generic message alone.
fn sanitized_detail(generic: &str, detail: &str) -> String {
    if cfg!(debug_assertions) {
        format!("{generic}: {detail}")
    } else {
        generic.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::error::FieldViolation;

    #[test]
    fn core_errors_map_to_their_taxonomy_status() {
        let resp = AppError::Core(CoreError::NotFound { entity: "Project" }).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = AppError::Core(CoreError::InvalidCredentials).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = AppError::Core(CoreError::RateLimited {
            retry_after_secs: 60,
        })
        .into_response();
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn validation_failures_are_unprocessable() {
        let err = AppError::Core(CoreError::Validation(vec![FieldViolation::new(
            "title",
            "too short",
        )]));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn database_errors_are_internal() {
        let err = AppError::Database(sqlx::Error::PoolClosed);
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
