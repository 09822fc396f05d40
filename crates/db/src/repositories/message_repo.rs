//! Repository for the `messages` table.

use sqlx::SqlitePool;

use crate::models::message::{ContactMessage, CreateMessage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, subject, body, read, replied, \
                       ip_address, user_agent, created_at, updated_at";

/// Provides storage operations for contact messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a new contact message, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateMessage,
    ) -> Result<ContactMessage, sqlx::Error> {
        let now = chrono::Utc::now();
        let query = format!(
            "INSERT INTO messages
                (name, email, phone, subject, body, ip_address, user_agent,
                 created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.subject)
            .bind(&input.body)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// List all messages, newest first.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<ContactMessage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messages ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, ContactMessage>(&query)
            .fetch_all(pool)
            .await
    }
}
