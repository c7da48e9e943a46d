//! Object store trait for pluggable storage backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for object storage backends.
///
/// Stores opaque byte payloads under caller-generated keys. Implementations
/// exist for the local filesystem and S3-compatible services; the trait is
/// defined here in `collabtrack-core` and implemented in
/// `collabtrack-storage`.
///
/// Keys are forward-slash separated paths; objects are never overwritten in
/// practice because upload keys embed a freshly generated UUID.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Persist `data` under `key` and return the key on success.
    async fn put(&self, key: &str, data: Bytes) -> AppResult<String>;

    /// Read the object stored under `key` into memory.
    async fn get(&self, key: &str) -> AppResult<Bytes>;

    /// Check whether an object exists under `key`.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}
