//! Shared response envelope types for API handlers.
//!
//! All success responses carry `"success": true` alongside their payload.
//! Use these instead of ad-hoc `serde_json::json!` to get compile-time type
//! safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "success": true, "message": ... }` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Standard `{ "success": true, "data": T }` payload envelope.
#[derive(Debug, Serialize)]
pub struct DataBody<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataBody<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
