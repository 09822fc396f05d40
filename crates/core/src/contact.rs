//! Contact message validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CoreError, FieldViolation};

pub const NAME_MAX: usize = 50;
pub const SUBJECT_MAX: usize = 100;
pub const MESSAGE_MAX: usize = 1000;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-\s]+$").expect("phone regex"));

/// Lowercase and trim an email so duplicates are comparable.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn check_required_max(
    field: &'static str,
    value: &str,
    max: usize,
    out: &mut Vec<FieldViolation>,
) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        out.push(FieldViolation::new(field, format!("{field} is required")));
    } else if trimmed.chars().count() > max {
        out.push(FieldViolation::new(
            field,
            format!("{field} must be at most {max} characters"),
        ));
    }
}

/// Validate an incoming contact message, aggregating every violation.
///
/// `phone` is optional; when present it must look like a phone number.
pub fn validate(
    name: &str,
    email: &str,
    subject: &str,
    message: &str,
    phone: Option<&str>,
) -> Result<(), CoreError> {
    let mut violations = Vec::new();

    check_required_max("name", name, NAME_MAX, &mut violations);

    let email = email.trim();
    if email.is_empty() {
        violations.push(FieldViolation::new("email", "email is required"));
    } else if !EMAIL_RE.is_match(email) {
        violations.push(FieldViolation::new("email", "Enter a valid email address"));
    }

    check_required_max("subject", subject, SUBJECT_MAX, &mut violations);
    check_required_max("message", message, MESSAGE_MAX, &mut violations);

    if let Some(phone) = phone {
        let phone = phone.trim();
        if !phone.is_empty() && !PHONE_RE.is_match(phone) {
            violations.push(FieldViolation::new("phone", "Enter a valid phone number"));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(violations))
    }
}
