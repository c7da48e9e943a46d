//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use collabtrack_auth::jwt::JwtKeys;
use collabtrack_auth::password::PasswordHasher;
use collabtrack_core::config::AppConfig;
use collabtrack_core::traits::ObjectStore;
use collabtrack_database::repositories::{ProjectRepository, UserRepository, VersionRepository};
use collabtrack_service::project::ProjectService;
use collabtrack_service::upload::UploadService;
use collabtrack_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Object store backend.
    pub store: Arc<dyn ObjectStore>,
    /// Access token keys.
    pub jwt_keys: Arc<JwtKeys>,
    /// User directory service.
    pub user_service: Arc<UserService>,
    /// Project directory service.
    pub project_service: Arc<ProjectService>,
    /// Upload commit workflow.
    pub upload_service: Arc<UploadService>,
}

impl AppState {
    /// Wire repositories and services from the infrastructure pieces.
    pub fn new(config: AppConfig, db_pool: PgPool, store: Arc<dyn ObjectStore>) -> Self {
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let project_repo = Arc::new(ProjectRepository::new(db_pool.clone()));
        let version_repo = Arc::new(VersionRepository::new(db_pool.clone()));

        let hasher = Arc::new(PasswordHasher::new());
        let jwt_keys = Arc::new(JwtKeys::new(&config.auth));

        let user_service = Arc::new(UserService::new(user_repo, hasher, &config.auth));
        let project_service = Arc::new(ProjectService::new(
            project_repo.clone(),
            version_repo.clone(),
            store.clone(),
        ));
        let upload_service = Arc::new(UploadService::new(
            project_repo,
            version_repo,
            store.clone(),
            config.storage.clone(),
        ));

        Self {
            config: Arc::new(config),
            db_pool,
            store,
            jwt_keys,
            user_service,
            project_service,
            upload_service,
        }
    }
}
