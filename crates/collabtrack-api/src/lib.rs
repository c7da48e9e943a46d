//! # collabtrack-api
//!
//! HTTP boundary: axum handlers, request/response DTOs, the `AuthUser`
//! extractor, error-to-status mapping, and the router.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
