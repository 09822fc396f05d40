//! Handlers for the `/projects` resource.
//!
//! Reads are public; every mutation is admin-gated via [`RequireAdmin`].
//! Mutations arrive as multipart forms with one optional `coverImage` file
//! slot alongside the text fields.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::media::extension_for;
use folio_core::pagination::{Page, SortKey};
use folio_core::project::{self, Screenshot, DEFAULT_COVER_IMAGE};
use folio_core::slug::slugify;
use folio_core::types::DbId;
use folio_db::models::project::{CreateProject, Project, ProjectQuery, UpdateProject};
use folio_db::repositories::ProjectRepo;
use folio_db::{is_unique_violation, DbPool};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{ApiMessage, DataBody};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /projects`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
}

/// Paginated project list response.
#[derive(Debug, Serialize)]
pub struct ProjectPage {
    pub success: bool,
    /// Rows on this page.
    pub count: usize,
    /// Total rows matching the filter.
    pub total: i64,
    /// Total pages at this page size (`ceil(total / limit)`).
    pub pages: i64,
    #[serde(rename = "currentPage")]
    pub current_page: i64,
    pub data: Vec<Project>,
}

/// Text and file fields collected from a project multipart form.
#[derive(Debug, Default)]
struct ProjectForm {
    title: Option<String>,
    description: Option<String>,
    technologies: Option<Vec<String>>,
    screenshots: Option<Vec<Screenshot>>,
    /// `(content_type, body)` of the uploaded cover image, if any.
    image: Option<(String, Vec<u8>)>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/projects
///
/// Public list with optional case-insensitive substring search over title
/// and description, clamped pagination, and a whitelisted sort key.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ProjectPage>> {
    let page = Page::clamped(params.page, params.limit);
    let query = ProjectQuery {
        search: params
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        page,
        sort: SortKey::parse(params.sort.as_deref()),
    };

    let (rows, total) = ProjectRepo::list(&state.pool, &query).await?;

    Ok(Json(ProjectPage {
        success: true,
        count: rows.len(),
        total,
        pages: page.page_count(total),
        current_page: page.number,
        data: rows,
    }))
}

/// GET /api/projects/slug/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataBody<Project>>> {
    let project = ProjectRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Project" }))?;
    Ok(Json(DataBody::new(project)))
}

/// POST /api/projects (admin, multipart)
///
/// Validates all fields at once, allocates a unique slug from the title,
/// binds the uploaded cover image (or the sentinel default), and persists
/// the record with the creator's identity.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataBody<Project>>)> {
    let form = read_form(multipart).await?;

    let title = form.title.unwrap_or_default().trim().to_string();
    let description = form.description.unwrap_or_default().trim().to_string();
    let technologies = form.technologies.unwrap_or_default();
    project::validate_new(&title, &description, &technologies).map_err(AppError::Core)?;

    let cover_image = match &form.image {
        Some((content_type, bytes)) => {
            state
                .media
                .save(content_type, bytes, state.config.max_upload_bytes)
                .await?
        }
        None => DEFAULT_COVER_IMAGE.to_string(),
    };

    let base = slugify(&title);
    let mut input = CreateProject {
        title,
        slug: String::new(), // allocated below
        description,
        cover_image: cover_image.clone(),
        technologies,
        screenshots: form.screenshots.unwrap_or_default(),
        created_by: admin.id,
    };

    match insert_with_slug_retry(&state.pool, &mut input, &base).await {
        Ok(created) => {
            tracing::info!(slug = %created.slug, "Project created");
            Ok((StatusCode::CREATED, Json(DataBody::new(created))))
        }
        Err(e) => {
            // The record is the source of truth; without it the stored
            // upload is an orphan.
            state.media.remove_owned(&cover_image).await;
            Err(e)
        }
    }
}

/// PUT /api/projects/{id} (admin, multipart)
///
/// Applies partial field updates. The slug is never re-derived, so project
/// URLs survive title edits. A new cover image replaces the old file: the
/// update is persisted first, then the previous non-sentinel file is deleted
/// best-effort.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(raw_id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<DataBody<Project>>> {
    let id = parse_id(&raw_id)?;
    let existing = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Project" }))?;

    let form = read_form(multipart).await?;
    project::validate_update(
        form.title.as_deref(),
        form.description.as_deref(),
        form.technologies.as_deref(),
    )
    .map_err(AppError::Core)?;

    let new_image = match &form.image {
        Some((content_type, bytes)) => Some(
            state
                .media
                .save(content_type, bytes, state.config.max_upload_bytes)
                .await?,
        ),
        None => None,
    };

    let input = UpdateProject {
        title: form.title.map(|t| t.trim().to_string()),
        description: form.description.map(|d| d.trim().to_string()),
        cover_image: new_image.clone(),
        technologies: form.technologies,
        screenshots: form.screenshots,
        updated_by: Some(admin.id),
    };

    let result = ProjectRepo::update(&state.pool, id, &input)
        .await
        .map_err(classify_project_write)
        .and_then(|row| row.ok_or(AppError::Core(CoreError::NotFound { entity: "Project" })));

    let updated = match result {
        Ok(updated) => updated,
        Err(e) => {
            // The row was not updated, so the freshly stored replacement
            // image is an orphan.
            if let Some(path) = &new_image {
                state.media.remove_owned(path).await;
            }
            return Err(e);
        }
    };

    // The update has already succeeded; losing the old file is logged, not
    // surfaced.
    if new_image.is_some() {
        state.media.remove_owned(&existing.cover_image).await;
    }

    tracing::info!(slug = %updated.slug, "Project updated");
    Ok(Json(DataBody::new(updated)))
}

/// DELETE /api/projects/{id} (admin)
///
/// Removes the record, then deletes its owned media file best-effort.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiMessage>> {
    let id = parse_id(&raw_id)?;
    let existing = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Project" }))?;

    let removed = ProjectRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound { entity: "Project" }));
    }

    state.media.remove_owned(&existing.cover_image).await;
    for shot in existing.screenshots.0.iter() {
        // Only locally-hosted screenshots are owned files; external urls
        // are left alone.
        if shot.url.starts_with(crate::media::PUBLIC_PREFIX) {
            state.media.remove_owned(&shot.url).await;
        }
    }

    tracing::info!(slug = %existing.slug, "Project deleted");
    Ok(Json(ApiMessage::new("Project deleted")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A syntactically invalid record identifier is a validation failure, not a
/// 404.
fn parse_id(raw: &str) -> AppResult<DbId> {
    raw.parse()
        .map_err(|_| AppError::Core(CoreError::invalid("id", "Project id must be a number")))
}

/// Insert with the bounded slug-retry contract.
///
/// The probe in `next_free_slug` is not atomic across concurrent creates,
/// so the schema's UNIQUE constraint is the final arbiter: on a slug
/// collision at insert time, allocation is retried exactly once; a second
/// collision surfaces `DuplicateSlug`.
async fn insert_with_slug_retry(
    pool: &DbPool,
    input: &mut CreateProject,
    base: &str,
) -> AppResult<Project> {
    input.slug = ProjectRepo::next_free_slug(pool, base).await?;
    let first_try = ProjectRepo::create(pool, input).await;

    let err = match first_try {
        Ok(project) => return Ok(project),
        Err(e) if is_unique_violation(&e, "projects.slug") => {
            tracing::warn!(slug = %input.slug, "Slug claimed concurrently, retrying allocation");
            input.slug = ProjectRepo::next_free_slug(pool, base).await?;
            match ProjectRepo::create(pool, input).await {
                Ok(project) => return Ok(project),
                Err(e2) if is_unique_violation(&e2, "projects.slug") => {
                    return Err(AppError::Core(CoreError::DuplicateSlug {
                        slug: input.slug.clone(),
                    }))
                }
                Err(e2) => e2,
            }
        }
        Err(e) => e,
    };

    Err(classify_project_write(err))
}

/// Map a title-uniqueness violation to the sanitized storage error; pass
/// everything else through as a database error.
fn classify_project_write(err: sqlx::Error) -> AppError {
    if is_unique_violation(&err, "projects.title") {
        AppError::Core(CoreError::Storage(
            "A project with this title already exists".into(),
        ))
    } else {
        AppError::Database(err)
    }
}

/// Collect the known fields of a project multipart form.
///
/// Unknown fields are ignored. The cover image's content type is checked
/// against the allow-list before its body is read, so rejected uploads never
/// buffer or touch the disk.
async fn read_form(mut multipart: Multipart) -> AppResult<ProjectForm> {
    let mut form = ProjectForm::default();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("title") => form.title = Some(field.text().await?),
            Some("description") => form.description = Some(field.text().await?),
            Some("technologies") => {
                let raw = field.text().await?;
                let parsed: Vec<String> = serde_json::from_str(&raw).map_err(|_| {
                    AppError::Core(CoreError::invalid(
                        "technologies",
                        "technologies must be a JSON array of strings",
                    ))
                })?;
                form.technologies = Some(parsed);
            }
            Some("screenshots") => {
                let raw = field.text().await?;
                let parsed: Vec<Screenshot> = serde_json::from_str(&raw).map_err(|_| {
                    AppError::Core(CoreError::invalid(
                        "screenshots",
                        "screenshots must be a JSON array of {url, caption} objects",
                    ))
                })?;
                form.screenshots = Some(parsed);
            }
            Some("coverImage") => {
                let content_type = field
                    .content_type()
                    .ok_or_else(|| {
                        AppError::BadRequest("coverImage part must declare a content type".into())
                    })?
                    .to_string();
                if extension_for(&content_type).is_none() {
                    return Err(AppError::Core(CoreError::UnsupportedMediaType(format!(
                        "Unsupported image type: {content_type}"
                    ))));
                }
                let bytes = field.bytes().await?;
                form.image = Some((content_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    Ok(form)
}
