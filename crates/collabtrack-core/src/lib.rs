//! # collabtrack-core
//!
//! Core crate for CollabTrack. Contains the unified error system,
//! configuration schemas, and the object-store trait.
//!
//! This crate has **no** internal dependencies on other CollabTrack crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
