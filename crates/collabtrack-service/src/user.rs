//! User directory service — registration and credential verification.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use collabtrack_auth::password::PasswordHasher;
use collabtrack_core::config::auth::AuthConfig;
use collabtrack_core::error::AppError;
use collabtrack_database::repositories::UserRepository;
use collabtrack_entity::user::{CreateUser, User};

/// Handles user registration and login verification.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    password_min_length: usize,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            password_min_length: config.password_min_length,
        }
    }

    /// Registers a new user.
    ///
    /// The email must not already be registered; a duplicate surfaces as a
    /// `Conflict` error from the repository.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = email.trim().to_ascii_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("A valid email address is required"));
        }
        if password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "User registered");
        Ok(user)
    }

    /// Verifies login credentials and returns the user on success.
    ///
    /// Unknown email and wrong password produce the same error, so account
    /// existence does not leak through login responses.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User, AppError> {
        let invalid = || AppError::authentication("Invalid email or password");

        let user = self
            .user_repo
            .find_by_email(email.trim())
            .await?
            .ok_or_else(invalid)?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(invalid());
        }

        info!(user_id = %user.id, "Credentials verified");
        Ok(user)
    }

    /// Fetches a user profile by id.
    pub async fn get_profile(&self, user_id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
