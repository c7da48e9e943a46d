//! # collabtrack-storage
//!
//! [`ObjectStore`](collabtrack_core::traits::ObjectStore) implementations
//! (local filesystem, S3) plus storage-key generation and filename
//! sanitization.

pub mod key;
pub mod providers;

pub use providers::init_provider;
