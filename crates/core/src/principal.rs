//! Username and password rules for admin principals.

use crate::error::{CoreError, FieldViolation};

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 30;
pub const PASSWORD_MIN: usize = 8;

/// Lowercase and trim a username so lookups are case-insensitive.
pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn username_charset_ok(username: &str) -> bool {
    username
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Validate a normalized username: 3 to 30 chars from `[a-z0-9_]`.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    let mut violations = Vec::new();
    let length = username.chars().count();
    if length < USERNAME_MIN || length > USERNAME_MAX {
        violations.push(FieldViolation::new(
            "username",
            format!("Username must be {USERNAME_MIN} to {USERNAME_MAX} characters"),
        ));
    }
    if !username_charset_ok(username) {
        violations.push(FieldViolation::new(
            "username",
            "Username may only contain lowercase letters, digits and underscores",
        ));
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(violations))
    }
}

/// Validate a candidate password. Only length is enforced; composition
/// rules are deliberately not.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    // A character floor, not a byte floor.
    if password.chars().count() < PASSWORD_MIN {
        return Err(CoreError::invalid(
            "password",
            format!("Password must be at least {PASSWORD_MIN} characters"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_lowercases_and_trims() {
        assert_eq!(normalize_username("  Admin "), "admin");
        assert_eq!(normalize_username("JDoe_42"), "jdoe_42");
    }

    #[test]
    fn accepts_valid_usernames() {
        for name in ["admin", "j_doe", "user123", "a_1"] {
            assert!(validate_username(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_bad_lengths_and_charsets() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(USERNAME_MAX + 1)).is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("UPPER").is_err());
        assert!(validate_username("dash-ed").is_err());
    }

    #[test]
    fn short_and_invalid_usernames_report_both_violations() {
        let err = validate_username("A!").unwrap_err();
        assert_eq!(err.violations().unwrap().len(), 2);
    }

    #[test]
    fn password_length_floor() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
    }

    #[test]
    fn password_floor_counts_characters_not_bytes() {
        // 7 characters in 14 bytes still fails the 8-char floor.
        assert!(validate_password(&"é".repeat(7)).is_err());
        assert!(validate_password(&"é".repeat(8)).is_ok());
    }
}
