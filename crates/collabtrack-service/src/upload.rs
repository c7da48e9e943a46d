//! Upload commit workflow — the store-then-record sequence.
//!
//! This is the only multi-step operation with partial-failure exposure.
//! Ordering matters: the object is stored first, then the version row is
//! inserted. A storage failure leaves no metadata behind. A database
//! failure after a successful store leaves an orphaned object, which is
//! logged but deliberately not rolled back.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use collabtrack_core::config::storage::StorageConfig;
use collabtrack_core::error::{AppError, ErrorKind};
use collabtrack_core::traits::ObjectStore;
use collabtrack_database::repositories::{ProjectRepository, VersionRepository};
use collabtrack_entity::version::{CreateVersion, Version};
use collabtrack_storage::key::{generate_storage_key, has_allowed_extension, sanitize_file_name};

use crate::context::RequestContext;

/// How many times the version insert is retried when a concurrent upload
/// claims the same version number.
const MAX_COMMIT_ATTEMPTS: u32 = 3;

/// Parameters for an upload.
#[derive(Debug, Clone)]
pub struct UploadParams {
    /// Target project.
    pub project_id: Uuid,
    /// Original file name as supplied by the client.
    pub file_name: String,
    /// Optional note describing the version.
    pub note: Option<String>,
    /// File content.
    pub data: Bytes,
}

/// Confirmation returned after a successful upload.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UploadReceipt {
    /// The created version's id.
    pub version_id: Uuid,
    /// Sanitized file name stored on the version.
    pub file_name: String,
    /// Allocated version number.
    pub version_number: i32,
    /// Key the content was stored under.
    pub storage_key: String,
}

/// Orchestrates the upload commit workflow.
#[derive(Debug, Clone)]
pub struct UploadService {
    project_repo: Arc<ProjectRepository>,
    version_repo: Arc<VersionRepository>,
    store: Arc<dyn ObjectStore>,
    config: StorageConfig,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        project_repo: Arc<ProjectRepository>,
        version_repo: Arc<VersionRepository>,
        store: Arc<dyn ObjectStore>,
        config: StorageConfig,
    ) -> Self {
        Self {
            project_repo,
            version_repo,
            store,
            config,
        }
    }

    /// Uploads a new version of a file into a project.
    ///
    /// Steps: validate → ownership check → sanitize + key generation →
    /// object store write → transactional version-number allocation and
    /// insert (bounded retry on concurrent allocation).
    pub async fn upload_version(
        &self,
        ctx: &RequestContext,
        params: UploadParams,
    ) -> Result<UploadReceipt, AppError> {
        // Validation happens before any storage or database call.
        if params.file_name.trim().is_empty() {
            return Err(AppError::validation("No file name supplied"));
        }
        if params.data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if params.data.len() as u64 > self.config.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.config.max_upload_size_bytes
            )));
        }
        if !has_allowed_extension(&params.file_name, &self.config.allowed_extensions) {
            return Err(AppError::validation(format!(
                "File type of '{}' is not allowed",
                params.file_name
            )));
        }

        // Ownership-scoped fetch: a project owned by someone else looks
        // exactly like a missing one.
        let project = self
            .project_repo
            .find_by_id_and_owner(params.project_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;

        let file_name = sanitize_file_name(&params.file_name);
        let storage_key = generate_storage_key(
            &self.config.key_prefix,
            project.id,
            ctx.user_id,
            &file_name,
        );

        // Store first. On failure the operation aborts with no row written.
        self.store.put(&storage_key, params.data.clone()).await?;

        let version = self
            .commit_version(&CreateVersion {
                project_id: project.id,
                uploader_id: ctx.user_id,
                storage_key: storage_key.clone(),
                file_name: file_name.clone(),
                version_note: params.note,
            })
            .await
            .inspect_err(|_| {
                // The stored object is now orphaned. Accepted inconsistency:
                // log the key for operators, do not attempt cleanup.
                warn!(
                    storage_key = %storage_key,
                    project_id = %project.id,
                    "Version insert failed after storage write; object is orphaned"
                );
            })?;

        info!(
            project_id = %project.id,
            uploader_id = %ctx.user_id,
            version_number = version.version_number,
            file_name = %version.file_name,
            "Version uploaded"
        );

        Ok(UploadReceipt {
            version_id: version.id,
            file_name: version.file_name,
            version_number: version.version_number,
            storage_key: version.storage_key,
        })
    }

    /// Runs the allocate-and-insert transaction, retrying a bounded number
    /// of times when a concurrent upload wins the same version number.
    async fn commit_version(&self, input: &CreateVersion) -> Result<Version, AppError> {
        let repo = &self.version_repo;
        retry_version_conflicts(MAX_COMMIT_ATTEMPTS, move || repo.create_next(input)).await
    }
}

/// Retry `op` while it fails with [`ErrorKind::Conflict`], up to
/// `max_attempts` calls in total. Any other error, and the conflict on the
/// final attempt, is returned unchanged.
async fn retry_version_conflicts<T, F, Fut>(max_attempts: u32, mut op: F) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Err(e) if e.kind == ErrorKind::Conflict && attempt < max_attempts => {
                warn!(attempt, "Version number conflict, retrying allocation");
                attempt += 1;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::future::ready;

    use super::*;

    fn taken() -> AppError {
        AppError::conflict("Version number already taken")
    }

    #[tokio::test]
    async fn test_conflicts_retry_until_success() {
        let calls = Cell::new(0u32);
        let result = retry_version_conflicts(3, || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            ready(if n < 3 { Err(taken()) } else { Ok(n) })
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_retries_surface_conflict() {
        let calls = Cell::new(0u32);
        let result: Result<(), _> = retry_version_conflicts(3, || {
            calls.set(calls.get() + 1);
            ready(Err(taken()))
        })
        .await;

        assert_eq!(result.unwrap_err().kind, ErrorKind::Conflict);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_other_errors_are_not_retried() {
        let calls = Cell::new(0u32);
        let result: Result<(), _> = retry_version_conflicts(3, || {
            calls.set(calls.get() + 1);
            ready(Err(AppError::database("insert failed")))
        })
        .await;

        assert_eq!(result.unwrap_err().kind, ErrorKind::Database);
        assert_eq!(calls.get(), 1);
    }
}
