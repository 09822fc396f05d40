//! Repository for the `projects` table.

use folio_core::slug;
use folio_core::types::DbId;
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::models::project::{CreateProject, Project, ProjectQuery, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, description, cover_image, technologies, \
                       screenshots, created_by, updated_by, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// The UNIQUE constraints on `slug` and `title` are the final arbiter of
    /// uniqueness; callers classify violations via
    /// [`crate::is_unique_violation`].
    pub async fn create(pool: &SqlitePool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let now = chrono::Utc::now();
        let query = format!(
            "INSERT INTO projects
                (title, slug, description, cover_image, technologies, screenshots,
                 created_by, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.cover_image)
            .bind(Json(&input.technologies))
            .bind(Json(&input.screenshots))
            .bind(input.created_by)
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a project by internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by its slug (exact match).
    pub async fn find_by_slug(
        pool: &SqlitePool,
        slug: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE slug = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Whether any project already owns the given slug.
    pub async fn slug_exists(pool: &SqlitePool, slug: &str) -> Result<bool, sqlx::Error> {
        let row: Option<i64> = sqlx::query_scalar("SELECT 1 FROM projects WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    /// Find the first unused slug: `base`, then `base-1`, `base-2`, ...
    ///
    /// The probe is not atomic across concurrent creates; [`Self::create`]
    /// can still collide and the caller retries allocation once.
    pub async fn next_free_slug(pool: &SqlitePool, base: &str) -> Result<String, sqlx::Error> {
        if !Self::slug_exists(pool, base).await? {
            return Ok(base.to_string());
        }
        let mut counter = 1;
        loop {
            let candidate = slug::numbered(base, counter);
            if !Self::slug_exists(pool, &candidate).await? {
                return Ok(candidate);
            }
            counter += 1;
        }
    }

    /// List projects with optional case-insensitive substring search over
    /// title and description, plus pagination and ordering.
    ///
    /// Returns the page of rows and the total match count.
    pub async fn list(
        pool: &SqlitePool,
        params: &ProjectQuery,
    ) -> Result<(Vec<Project>, i64), sqlx::Error> {
        let pattern = params.search.as_ref().map(|s| format!("%{s}%"));
        let direction = if params.sort.descending() { "DESC" } else { "ASC" };
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1 IS NULL OR title LIKE $1 OR description LIKE $1)
             ORDER BY {column} {direction}, id {direction}
             LIMIT $2 OFFSET $3",
            column = params.sort.column(),
        );
        let rows = sqlx::query_as::<_, Project>(&query)
            .bind(&pattern)
            .bind(params.page.size)
            .bind(params.page.offset())
            .fetch_all(pool)
            .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM projects
             WHERE ($1 IS NULL OR title LIKE $1 OR description LIKE $1)",
        )
        .bind(&pattern)
        .fetch_one(pool)
        .await?;

        Ok((rows, total))
    }

    /// Update a project. Only non-`None` fields in `input` are applied; the
    /// slug is never re-derived.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let now = chrono::Utc::now();
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                cover_image = COALESCE($4, cover_image),
                technologies = COALESCE($5, technologies),
                screenshots = COALESCE($6, screenshots),
                updated_by = COALESCE($7, updated_by),
                updated_at = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.cover_image)
            .bind(input.technologies.as_ref().map(Json))
            .bind(input.screenshots.as_ref().map(Json))
            .bind(input.updated_by)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
