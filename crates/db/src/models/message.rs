//! Contact message entity model and create DTO.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Contact message row from the `messages` table.
///
/// The `body` column is exposed as `message` in API responses.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    #[serde(rename = "message")]
    pub body: String,
    pub read: bool,
    pub replied: bool,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for storing an incoming contact message.
#[derive(Debug)]
pub struct CreateMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub body: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
