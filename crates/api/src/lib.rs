//! Portfolio API server library.
//!
//! Exposes the building blocks (config, state, error handling, guards,
//! routes) so integration tests, the server binary, and the admin seeding
//! CLI can all access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod mail;
pub mod media;
pub mod middleware;
pub mod ratelimit;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
