//! On-disk media store for project cover images.
//!
//! Uploads are written under a single public-served directory with generated
//! names; the client filename is never used, so uploads cannot traverse out
//! of the root or overwrite unrelated files. Deletion is idempotent and
//! best-effort: a missing file or the shared sentinel must never block a
//! record mutation that already succeeded in the database.

use std::path::{Path, PathBuf};

use folio_core::error::CoreError;
use folio_core::media;

use crate::error::{AppError, AppResult};

/// URL prefix the upload directory is served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Writes, replaces, and deletes files owned by project records.
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Validate and persist an uploaded image, returning its public path
    /// (e.g. `/uploads/project-1712345-ab12cd34.png`).
    ///
    /// The content type is checked against the allow-list before any disk
    /// write; the size ceiling is re-checked here even though the transport
    /// layer already enforces a body limit.
    pub async fn save(
        &self,
        content_type: &str,
        bytes: &[u8],
        max_bytes: usize,
    ) -> AppResult<String> {
        // Rejects unsupported types before touching the disk.
        let filename = media::generate_filename(content_type).map_err(AppError::Core)?;

        if bytes.len() > max_bytes {
            return Err(AppError::Core(CoreError::invalid(
                "coverImage",
                format!("Image must be at most {max_bytes} bytes"),
            )));
        }

        let target = self.root.join(&filename);
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store upload: {e}")))?;

        tracing::debug!(path = %target.display(), "Stored uploaded image");
        Ok(format!("{PUBLIC_PREFIX}/{filename}"))
    }

    /// Delete the file backing `public_path`, best-effort.
    ///
    /// The sentinel default and already-missing files are logged no-ops.
    /// Only the basename is used, so nothing outside the upload root can be
    /// unlinked. Failures are logged at `warn` and never surfaced.
    pub async fn remove_owned(&self, public_path: &str) {
        if media::is_sentinel(public_path) {
            tracing::debug!("Skipping deletion of sentinel cover image");
            return;
        }

        let Some(filename) = Path::new(public_path).file_name() else {
            tracing::warn!(public_path, "Cover image path has no filename, skipping deletion");
            return;
        };

        let target = self.root.join(filename);
        match tokio::fs::remove_file(&target).await {
            Ok(()) => tracing::debug!(path = %target.display(), "Deleted orphaned image"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %target.display(), "Image already gone, nothing to delete");
            }
            Err(e) => {
                tracing::warn!(path = %target.display(), error = %e, "Failed to delete image");
            }
        }
    }
}
