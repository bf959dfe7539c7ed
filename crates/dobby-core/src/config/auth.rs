//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Session token and cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session validity window in days.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_days: u64,
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the session cookie is marked `Secure`. Browsers only send
    /// `SameSite=None` cookies when this is set.
    #[serde(default = "default_true")]
    pub cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            session_ttl_days: default_session_ttl(),
            cookie_name: default_cookie_name(),
            cookie_secure: default_true(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_session_ttl() -> u64 {
    7
}

fn default_cookie_name() -> String {
    "token".to_string()
}

fn default_true() -> bool {
    true
}
