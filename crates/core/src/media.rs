//! Upload constraints: accepted image types, size ceiling, stored names.

use crate::error::CoreError;
use crate::project::DEFAULT_COVER_IMAGE;

/// Hard cap on an uploaded image body.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Accepted content types and the extension each is stored under.
pub const ALLOWED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

/// Extension for an accepted content type, `None` if the type is not allowed.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(mime, _)| *mime == content_type)
        .map(|(_, ext)| *ext)
}

/// Produce a collision-resistant stored filename for an accepted upload.
///
/// Names embed the upload instant and a random token so two uploads in the
/// same millisecond still get distinct files.
pub fn generate_filename(content_type: &str) -> Result<String, CoreError> {
    let ext = extension_for(content_type).ok_or_else(|| {
        CoreError::UnsupportedMediaType(format!("Unsupported image type: {content_type}"))
    })?;
    let millis = chrono::Utc::now().timestamp_millis();
    let token = uuid::Uuid::new_v4().simple().to_string();
    Ok(format!("project-{millis}-{}.{ext}", &token[..8]))
}

/// Whether a stored path is the shared placeholder rather than an owned file.
pub fn is_sentinel(path: &str) -> bool {
    path == DEFAULT_COVER_IMAGE
}
