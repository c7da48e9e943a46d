//! Object store providers, selected by configuration.

pub mod local;
pub mod s3;

use std::sync::Arc;

use collabtrack_core::config::storage::StorageConfig;
use collabtrack_core::error::AppError;
use collabtrack_core::result::AppResult;
use collabtrack_core::traits::ObjectStore;

pub use local::LocalObjectStore;
pub use s3::S3ObjectStore;

/// Initialize the object store named by `config.provider`.
pub async fn init_provider(config: &StorageConfig) -> AppResult<Arc<dyn ObjectStore>> {
    match config.provider.as_str() {
        "local" => {
            let store = LocalObjectStore::new(&config.local.root_path).await?;
            Ok(Arc::new(store))
        }
        "s3" => {
            let store = S3ObjectStore::new(&config.s3).await?;
            Ok(Arc::new(store))
        }
        other => Err(AppError::configuration(format!(
            "Unknown storage provider '{other}' (expected 'local' or 's3')"
        ))),
    }
}
