//! Handlers for the `/messages` resource (public contact form).

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use folio_core::contact;
use folio_db::models::message::{ContactMessage, CreateMessage};
use folio_db::repositories::MessageRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::ClientOrigin;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{ApiMessage, DataBody};
use crate::state::AppState;

/// Subject stored when the sender leaves it blank.
const DEFAULT_SUBJECT: &str = "No Subject";

/// Request body for `POST /messages`.
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// POST /api/messages (public)
///
/// Validates and stores an incoming contact message with its request
/// provenance, then dispatches the admin notification and sender auto-reply
/// in background tasks. Mail failures are logged and never block or alter
/// the HTTP response.
pub async fn create(
    State(state): State<AppState>,
    ClientOrigin(origin): ClientOrigin,
    headers: HeaderMap,
    Json(input): Json<CreateMessageRequest>,
) -> AppResult<(StatusCode, Json<ApiMessage>)> {
    let subject = input
        .subject
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SUBJECT)
        .to_string();

    contact::validate(
        &input.name,
        &input.email,
        &subject,
        &input.message,
        input.phone.as_deref(),
    )
    .map_err(AppError::Core)?;

    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let create = CreateMessage {
        name: input.name.trim().to_string(),
        email: contact::normalize_email(&input.email),
        phone: input
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()),
        subject,
        body: input.message.trim().to_string(),
        ip_address: Some(origin),
        user_agent,
    };

    let stored = MessageRepo::create(&state.pool, &create).await?;
    tracing::info!(message_id = stored.id, "Contact message received");

    // Best-effort notifications, off the response path.
    if let Some(mailer) = &state.mailer {
        let mailer = mailer.clone();
        let message = stored.clone();
        tokio::spawn(async move {
            mailer.notify_admin(&message).await;
            mailer.auto_reply(&message).await;
        });
    }

    Ok((
        StatusCode::CREATED,
        Json(ApiMessage::new("Your message has been received")),
    ))
}

/// GET /api/messages (admin)
///
/// Full message list, newest first.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataBody<Vec<ContactMessage>>>> {
    let messages = MessageRepo::list(&state.pool).await?;
    Ok(Json(DataBody::new(messages)))
}
