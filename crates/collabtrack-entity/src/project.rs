//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A project owned by a single user. Owns zero or more versions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique project identifier.
    pub id: Uuid,
    /// Project display name.
    pub name: String,
    /// The owning user's ID.
    pub owner_id: Uuid,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    /// Project display name.
    pub name: String,
    /// The owning user's ID.
    pub owner_id: Uuid,
}
