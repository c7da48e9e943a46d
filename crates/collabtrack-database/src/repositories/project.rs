//! Project repository implementation.
//!
//! Project lookups are ownership-scoped: a query for a project the caller
//! does not own returns `None`, exactly like a query for a project that
//! does not exist. Existence is never leaked.

use sqlx::PgPool;
use uuid::Uuid;

use collabtrack_core::error::{AppError, ErrorKind};
use collabtrack_core::result::AppResult;
use collabtrack_entity::project::{CreateProject, Project};

/// Repository for project rows.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new project and return the stored row.
    pub async fn create(&self, input: &CreateProject) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (id, name, owner_id) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(input.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create project", e))
    }

    /// Fetch a project by id, scoped to its owner.
    pub async fn find_by_id_and_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find project", e))
    }

    /// List all projects owned by a user, newest first.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Project>> {
        sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list projects", e))
    }
}
