//! # collabtrack-entity
//!
//! Domain entities mapped to the PostgreSQL schema. Every model derives
//! `sqlx::FromRow` so repositories can use `query_as` directly.

pub mod project;
pub mod user;
pub mod version;

pub use project::{CreateProject, Project};
pub use user::{CreateUser, User};
pub use version::{CreateVersion, Version};
