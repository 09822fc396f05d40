//! Repository for the `principals` table.

use folio_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::principal::{CreatePrincipal, Principal};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, role, last_login_at, created_at, updated_at";

/// Provides CRUD operations for principals.
pub struct PrincipalRepo;

impl PrincipalRepo {
    /// Insert a new principal, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreatePrincipal,
    ) -> Result<Principal, sqlx::Error> {
        let now = chrono::Utc::now();
        let query = format!(
            "INSERT INTO principals (username, password_hash, role, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Principal>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a principal by internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Principal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM principals WHERE id = $1");
        sqlx::query_as::<_, Principal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a principal by normalized username, restricted to the given role.
    ///
    /// Login uses this with the admin role so non-admin accounts fail the
    /// same way unknown usernames do.
    pub async fn find_by_username_with_role(
        pool: &SqlitePool,
        username: &str,
        role: &str,
    ) -> Result<Option<Principal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM principals WHERE username = $1 AND role = $2");
        sqlx::query_as::<_, Principal>(&query)
            .bind(username)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Record a successful login by stamping `last_login_at`.
    pub async fn record_login(pool: &SqlitePool, id: DbId) -> Result<(), sqlx::Error> {
        let now = chrono::Utc::now();
        sqlx::query("UPDATE principals SET last_login_at = $2, updated_at = $2 WHERE id = $1")
            .bind(id)
            .bind(now)
            .execute(pool)
            .await?;
        Ok(())
    }
}
