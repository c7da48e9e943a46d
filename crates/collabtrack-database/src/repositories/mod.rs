//! One repository per entity. Each repository owns a cloned `PgPool` and
//! exposes only the queries the services actually run.

pub mod project;
pub mod user;
pub mod version;

pub use project::ProjectRepository;
pub use user::UserRepository;
pub use version::VersionRepository;
