//! Request guard extractors: authentication first, then role checks.

pub mod auth;
pub mod rbac;
