//! # collabtrack-service
//!
//! Business logic services. `UserService` and `ProjectService` cover the
//! project/user directory; `UploadService` implements the upload commit
//! workflow that allocates version numbers and links stored objects to
//! version rows.

pub mod context;
pub mod project;
pub mod upload;
pub mod user;

pub use context::RequestContext;
pub use project::ProjectService;
pub use upload::{UploadReceipt, UploadService};
pub use user::UserService;
