//! Version repository — owns the version-number allocator.
//!
//! The allocator computes `max(version_number) + 1` for the project (1 when
//! no versions exist). The read runs inside the same transaction as the
//! insert, and `UNIQUE(project_id, version_number)` backstops the remaining
//! race window: a concurrent allocation of the same number fails the insert
//! with a `Conflict` error the caller can retry.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use collabtrack_core::error::{AppError, ErrorKind};
use collabtrack_core::result::AppResult;
use collabtrack_entity::version::{CreateVersion, Version};

use super::user::is_unique_violation;

/// Repository for version rows. Insert-only; versions are never updated
/// or deleted.
#[derive(Debug, Clone)]
pub struct VersionRepository {
    pool: PgPool,
}

impl VersionRepository {
    /// Create a new version repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all versions of a project, newest first.
    pub async fn list_for_project(&self, project_id: Uuid) -> AppResult<Vec<Version>> {
        sqlx::query_as::<_, Version>(
            "SELECT * FROM versions WHERE project_id = $1 ORDER BY version_number DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list versions", e))
    }

    /// Fetch a single version by project and version number.
    pub async fn find_by_project_and_number(
        &self,
        project_id: Uuid,
        version_number: i32,
    ) -> AppResult<Option<Version>> {
        sqlx::query_as::<_, Version>(
            "SELECT * FROM versions WHERE project_id = $1 AND version_number = $2",
        )
        .bind(project_id)
        .bind(version_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find version", e))
    }

    /// Allocate the next version number and insert the row, atomically.
    ///
    /// Returns a `Conflict` error if a concurrent upload claimed the same
    /// number first; any other failure surfaces as a `Database` error.
    pub async fn create_next(&self, input: &CreateVersion) -> AppResult<Version> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let version_number = Self::next_version_number(&mut tx, input.project_id).await?;

        let version = sqlx::query_as::<_, Version>(
            "INSERT INTO versions \
               (id, project_id, uploader_id, version_number, storage_key, file_name, version_note) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(input.project_id)
        .bind(input.uploader_id)
        .bind(version_number)
        .bind(&input.storage_key)
        .bind(&input.file_name)
        .bind(&input.version_note)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict(format!(
                    "Version {version_number} was concurrently allocated for project {}",
                    input.project_id
                ))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to insert version", e)
            }
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit version insert", e)
        })?;

        Ok(version)
    }

    /// Compute `max(version_number) + 1` for the project within `tx`.
    async fn next_version_number(
        tx: &mut Transaction<'_, Postgres>,
        project_id: Uuid,
    ) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(version_number), 0) + 1 FROM versions WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to allocate version number", e)
        })
    }
}
