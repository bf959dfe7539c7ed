//! Signup, login, and session resolution.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use dobby_auth::jwt::{IssuedToken, JwtEncoder};
use dobby_auth::password::PasswordHasher;
use dobby_core::error::AppError;
use dobby_database::store::UserStore;
use dobby_entity::user::{CreateUser, PublicUser};

/// Request to create an account.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SignupRequest {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Plaintext password.
    #[serde(default)]
    pub password: String,
}

/// Request to log in.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct LoginRequest {
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Plaintext password.
    #[serde(default)]
    pub password: String,
}

/// An authenticated user with a freshly issued session token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The user.
    pub user: PublicUser,
    /// The session token.
    pub token: IssuedToken,
}

/// Issues sessions for new and returning users.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            encoder,
        }
    }

    /// Registers a user and starts a session.
    pub async fn signup(&self, req: SignupRequest) -> Result<AuthSession, AppError> {
        let name = req.name.trim();
        let email = req.email.trim();
        if name.is_empty() || email.is_empty() || req.password.is_empty() {
            return Err(AppError::validation("Missing fields"));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .users
            .create(&CreateUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User signed up");
        let token = self.encoder.issue(user.id)?;
        Ok(AuthSession {
            user: user.to_public(),
            token,
        })
    }

    /// Verifies credentials and starts a session. Unknown emails and wrong
    /// passwords fail identically.
    pub async fn login(&self, req: LoginRequest) -> Result<AuthSession, AppError> {
        let user = match self.users.find_by_email(&req.email).await? {
            Some(user) if !req.password.is_empty() => user,
            _ => {
                warn!("Login failed: unknown email");
                return Err(AppError::unauthorized("Invalid credentials"));
            }
        };

        if !self.hasher.verify_password(&req.password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        info!(user_id = %user.id, "User logged in");
        let token = self.encoder.issue(user.id)?;
        Ok(AuthSession {
            user: user.to_public(),
            token,
        })
    }

    /// Looks up the user behind a validated session.
    pub async fn current_user(&self, user_id: Uuid) -> Result<Option<PublicUser>, AppError> {
        Ok(self
            .users
            .find_by_id(user_id)
            .await?
            .map(|u| u.to_public()))
    }
}
