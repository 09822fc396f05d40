//! Principal entity model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full principal row from the `principals` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`PrincipalResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Principal {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe principal representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalResponse {
    pub id: DbId,
    pub username: String,
    pub role: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<Principal> for PrincipalResponse {
    fn from(p: Principal) -> Self {
        Self {
            id: p.id,
            username: p.username,
            role: p.role,
            last_login_at: p.last_login_at,
            created_at: p.created_at,
        }
    }
}

/// DTO for creating a new principal. Only the seeding CLI constructs this;
/// there is no public registration endpoint.
#[derive(Debug)]
pub struct CreatePrincipal {
    pub username: String,
    pub password_hash: String,
    pub role: String,
}
