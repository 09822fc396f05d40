//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod message_repo;
pub mod principal_repo;
pub mod project_repo;

pub use message_repo::MessageRepo;
pub use principal_repo::PrincipalRepo;
pub use project_repo::ProjectRepo;
