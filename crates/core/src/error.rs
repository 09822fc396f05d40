//! The closed error taxonomy.
//!
//! Every component signals failure through [`CoreError`] rather than raw
//! underlying errors; the HTTP boundary maps each kind to a status code and a
//! uniform JSON envelope. The kind-to-status mapping is a pure function over
//! the tag, so it can be tested without constructing responses.

use serde::Serialize;

/// A single field-level validation violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Name of the offending input field.
    pub field: &'static str,
    /// Human-readable explanation, safe to show to clients.
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// One or more input fields failed validation. All violations for a
    /// request are aggregated before this is returned, never just the first.
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    /// Login failed. Deliberately carries no detail: the same error is
    /// produced for an unknown username and a wrong password so usernames
    /// cannot be enumerated.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No token was presented on a protected route.
    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    /// A token was presented but is malformed, expired, or no longer
    /// resolves to a live principal.
    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),

    /// The authenticated principal lacks the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// Too many attempts from one origin inside the rate-limit window.
    #[error("Too many attempts, try again in {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },

    /// The storage layer rejected an insert because the chosen slug was
    /// claimed concurrently. The caller retries allocation once; a second
    /// collision propagates this error.
    #[error("Slug '{slug}' is already taken")]
    DuplicateSlug { slug: String },

    /// Upload rejected before any disk write: not on the image allow-list.
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Generic persistence failure, sanitized for clients.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// Convenience constructor for a single-field validation failure.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        CoreError::Validation(vec![FieldViolation::new(field, message)])
    }

    /// Stable machine-readable kind name used in the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::Validation(_) => "ValidationFailed",
            CoreError::InvalidCredentials => "InvalidCredentials",
            CoreError::Unauthenticated(_) => "Unauthenticated",
            CoreError::InvalidToken(_) => "InvalidToken",
            CoreError::Forbidden(_) => "Forbidden",
            CoreError::NotFound { .. } => "NotFound",
            CoreError::RateLimited { .. } => "RateLimited",
            CoreError::DuplicateSlug { .. } => "DuplicateSlug",
            CoreError::UnsupportedMediaType(_) => "UnsupportedMediaType",
            CoreError::Storage(_) => "StorageError",
        }
    }

    /// HTTP status for this kind. Kept in core (as a plain `u16`) so the
    /// mapping stays a pure, independently testable function.
    pub fn status_code(&self) -> u16 {
        match self {
            CoreError::Validation(_) => 422,
            CoreError::InvalidCredentials
            | CoreError::Unauthenticated(_)
            | CoreError::InvalidToken(_) => 401,
            CoreError::Forbidden(_) => 403,
            CoreError::NotFound { .. } => 404,
            CoreError::RateLimited { .. } => 429,
            CoreError::UnsupportedMediaType(_) => 400,
            CoreError::DuplicateSlug { .. } | CoreError::Storage(_) => 500,
        }
    }

    /// Field-level violations, if this is a validation failure.
    pub fn violations(&self) -> Option<&[FieldViolation]> {
        match self {
            CoreError::Validation(v) => Some(v),
            _ => None,
        }
    }
}
