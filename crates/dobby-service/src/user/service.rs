//! Administrative user operations used by the CLI.

use std::sync::Arc;

use tracing::info;

use dobby_auth::password::PasswordHasher;
use dobby_core::error::AppError;
use dobby_database::store::UserStore;
use dobby_entity::user::{CreateUser, User};

/// Result of [`UserService::seed_user`].
#[derive(Debug, Clone)]
pub enum SeedOutcome {
    /// A new user was created.
    Created(User),
    /// A user with that email already existed and was left unchanged.
    Existing(User),
}

impl SeedOutcome {
    /// The created or existing user.
    pub fn user(&self) -> &User {
        match self {
            Self::Created(user) | Self::Existing(user) => user,
        }
    }
}

/// User administration.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Creates a user unless one with `email` already exists.
    pub async fn seed_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SeedOutcome, AppError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("Missing fields"));
        }
        if let Some(existing) = self.users.find_by_email(email).await? {
            return Ok(SeedOutcome::Existing(existing));
        }

        let user = self
            .users
            .create(&CreateUser {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                password_hash: self.hasher.hash_password(password)?,
            })
            .await?;
        info!(user_id = %user.id, "Seeded user");
        Ok(SeedOutcome::Created(user))
    }

    /// Lists every user.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }
}
