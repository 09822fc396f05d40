//! Well-known role name constants.
//!
//! These must match the `role` CHECK constraint in the principals migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
