//! # collabtrack-auth
//!
//! Authentication primitives: Argon2id password hashing and stateless JWT
//! access tokens. The rest of the application only ever sees an
//! authenticated user id; these primitives live at the session boundary.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtKeys};
pub use password::PasswordHasher;
