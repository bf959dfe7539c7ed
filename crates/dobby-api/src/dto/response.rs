//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dobby_entity::user::PublicUser;
use dobby_service::user::AuthSession;

/// Acknowledgement for state changes with no payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    /// Always `true`.
    pub ok: bool,
}

impl OkResponse {
    /// The single acknowledgement value.
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Generic message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Signup and login response: the user plus the issued session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// The authenticated user.
    #[serde(flatten)]
    pub user: PublicUser,
    /// Session JWT, also set as a cookie.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: session.user,
            token: session.token.token,
            expires_at: session.token.expires_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Server version.
    pub version: String,
}
