//! Project directory service — creation, ownership-scoped lookup, and
//! version listing/download.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use collabtrack_core::error::AppError;
use collabtrack_core::traits::ObjectStore;
use collabtrack_database::repositories::{ProjectRepository, VersionRepository};
use collabtrack_entity::project::{CreateProject, Project};
use collabtrack_entity::version::Version;

use crate::context::RequestContext;

/// Content and metadata of a downloaded version.
#[derive(Debug, Clone)]
pub struct VersionDownload {
    /// Original (sanitized) file name, for content-disposition.
    pub file_name: String,
    /// File content.
    pub data: Bytes,
}

/// Directory operations over projects and their versions.
#[derive(Debug, Clone)]
pub struct ProjectService {
    project_repo: Arc<ProjectRepository>,
    version_repo: Arc<VersionRepository>,
    store: Arc<dyn ObjectStore>,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(
        project_repo: Arc<ProjectRepository>,
        version_repo: Arc<VersionRepository>,
        store: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            project_repo,
            version_repo,
            store,
        }
    }

    /// Creates a project owned by the calling user.
    pub async fn create_project(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<Project, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Project name is required"));
        }

        let project = self
            .project_repo
            .create(&CreateProject {
                name: name.to_string(),
                owner_id: ctx.user_id,
            })
            .await?;

        info!(project_id = %project.id, owner_id = %ctx.user_id, "Project created");
        Ok(project)
    }

    /// Lists the calling user's projects, newest first.
    pub async fn list_projects(&self, ctx: &RequestContext) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_by_owner(ctx.user_id).await
    }

    /// Fetches a project by id, scoped to the calling user.
    ///
    /// Non-existent and non-owned projects are indistinguishable: both
    /// return `NotFound`.
    pub async fn get_project(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> Result<Project, AppError> {
        self.project_repo
            .find_by_id_and_owner(project_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))
    }

    /// Lists a project's versions, newest first.
    pub async fn list_versions(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> Result<Vec<Version>, AppError> {
        let project = self.get_project(ctx, project_id).await?;
        self.version_repo.list_for_project(project.id).await
    }

    /// Downloads the content of one version of a project.
    pub async fn download_version(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
        version_number: i32,
    ) -> Result<VersionDownload, AppError> {
        let project = self.get_project(ctx, project_id).await?;

        let version = self
            .version_repo
            .find_by_project_and_number(project.id, version_number)
            .await?
            .ok_or_else(|| AppError::not_found("Version not found"))?;

        let data = self.store.get(&version.storage_key).await?;

        Ok(VersionDownload {
            file_name: version.file_name,
            data,
        })
    }
}
