//! File version entity model.
//!
//! Version rows are created only by the upload workflow and are never
//! mutated or deleted afterwards. Within a project, `version_number` forms
//! a gapless ascending sequence starting at 1, enforced by the
//! `UNIQUE(project_id, version_number)` constraint plus the allocator's
//! transactional max+1 read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One uploaded file version within a project.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Version {
    /// Unique version identifier.
    pub id: Uuid,
    /// The project this version belongs to.
    pub project_id: Uuid,
    /// The user who uploaded this version.
    pub uploader_id: Uuid,
    /// Sequential version number, unique within the project.
    pub version_number: i32,
    /// Globally unique object-storage key.
    pub storage_key: String,
    /// Sanitized original file name.
    pub file_name: String,
    /// Optional note describing the change.
    pub version_note: Option<String>,
    /// Attestation flag; stored but unused by core logic today.
    pub attestation_status: bool,
    /// When the version was uploaded.
    pub uploaded_at: DateTime<Utc>,
}

/// Data required to insert a new version row.
///
/// The version number is not part of this struct; the repository allocates
/// it inside the insert transaction.
#[derive(Debug, Clone)]
pub struct CreateVersion {
    /// Target project.
    pub project_id: Uuid,
    /// Uploading user.
    pub uploader_id: Uuid,
    /// Object-storage key the content was written under.
    pub storage_key: String,
    /// Sanitized file name.
    pub file_name: String,
    /// Optional note.
    pub version_note: Option<String>,
}
