//! Project entity model and DTOs.

use folio_core::pagination::{Page, SortKey};
use folio_core::project::Screenshot;
use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// Full project row from the `projects` table.
///
/// `technologies` and `screenshots` are JSON text columns; response keys are
/// camelCase to match the public API contract.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub cover_image: String,
    pub technologies: Json<Vec<String>>,
    pub screenshots: Json<Vec<Screenshot>>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. The slug is allocated by the caller
/// before the insert.
#[derive(Debug)]
pub struct CreateProject {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub cover_image: String,
    pub technologies: Vec<String>,
    pub screenshots: Vec<Screenshot>,
    pub created_by: DbId,
}

/// DTO for updating a project. Only non-`None` fields are applied; the slug
/// is never touched.
#[derive(Debug, Default)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub screenshots: Option<Vec<Screenshot>>,
    pub updated_by: Option<DbId>,
}

/// Filter, pagination and ordering for project lists.
#[derive(Debug, Default)]
pub struct ProjectQuery {
    pub search: Option<String>,
    pub page: Page,
    pub sort: SortKey,
}
