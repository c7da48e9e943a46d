//! # collabtrack-database
//!
//! PostgreSQL access layer: connection pool management, migrations, and
//! one repository per entity.

pub mod pool;
pub mod repositories;

pub use pool::{connect, run_migrations};
