//! Project field validation and media sentinel.
//!
//! Validation aggregates every violation into a single
//! [`CoreError::Validation`] so a client fixing a form sees all problems at
//! once, not just the first.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, FieldViolation};

/// Reserved "no image" marker, distinct from any real uploaded path.
pub const DEFAULT_COVER_IMAGE: &str = "/uploads/default.jpg";

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 100;
pub const DESCRIPTION_MIN: usize = 10;
pub const DESCRIPTION_MAX: usize = 500;

/// A gallery entry attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screenshot {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

fn check_title(title: &str, out: &mut Vec<FieldViolation>) {
    let trimmed = title.trim();
    // Bounds are in characters, not bytes, so multibyte input is not
    // over-counted.
    let length = trimmed.chars().count();
    if length < TITLE_MIN {
        out.push(FieldViolation::new(
            "title",
            format!("Title must be at least {TITLE_MIN} characters"),
        ));
    } else if length > TITLE_MAX {
        out.push(FieldViolation::new(
            "title",
            format!("Title must be at most {TITLE_MAX} characters"),
        ));
    }
}

fn check_description(description: &str, out: &mut Vec<FieldViolation>) {
    let trimmed = description.trim();
    let length = trimmed.chars().count();
    if length < DESCRIPTION_MIN {
        out.push(FieldViolation::new(
            "description",
            format!("Description must be at least {DESCRIPTION_MIN} characters"),
        ));
    } else if length > DESCRIPTION_MAX {
        out.push(FieldViolation::new(
            "description",
            format!("Description must be at most {DESCRIPTION_MAX} characters"),
        ));
    }
}

fn check_technologies(technologies: &[String], out: &mut Vec<FieldViolation>) {
    if technologies.is_empty() {
        out.push(FieldViolation::new(
            "technologies",
            "Select at least 1 technology",
        ));
    } else if technologies.iter().any(|t| t.trim().is_empty()) {
        out.push(FieldViolation::new(
            "technologies",
            "Technology tags must not be blank",
        ));
    }
}

/// Validate the full field set of a new project.
///
/// Every failing check contributes a violation; the result is `Err` with the
/// complete list if any check failed.
pub fn validate_new(
    title: &str,
    description: &str,
    technologies: &[String],
) -> Result<(), CoreError> {
    let mut violations = Vec::new();
    check_title(title, &mut violations);
    check_description(description, &mut violations);
    check_technologies(technologies, &mut violations);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(violations))
    }
}

/// Validate only the fields present in a partial update.
pub fn validate_update(
    title: Option<&str>,
    description: Option<&str>,
    technologies: Option<&[String]>,
) -> Result<(), CoreError> {
    let mut violations = Vec::new();
    if let Some(title) = title {
        check_title(title, &mut violations);
    }
    if let Some(description) = description {
        check_description(description, &mut violations);
    }
    if let Some(technologies) = technologies {
        check_technologies(technologies, &mut violations);
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(violations))
    }
}
