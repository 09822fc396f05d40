//! Domain logic for the portfolio backend.
//!
//! This crate has no internal dependencies so the same rules can be used by
//! the API handlers, the repository layer, and the admin seeding CLI.

pub mod contact;
pub mod error;
pub mod media;
pub mod pagination;
pub mod principal;
pub mod project;
pub mod roles;
pub mod slug;
pub mod types;
