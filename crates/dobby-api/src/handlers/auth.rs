//! Auth handlers: signup, login, logout, me.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use tracing::warn;

use dobby_core::config::AuthConfig;
use dobby_entity::user::PublicUser;
use dobby_service::user::{LoginRequest, SignupRequest};

use crate::dto::response::{MessageResponse, SessionResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, MaybeUser};
use crate::state::AppState;

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<SignupRequest>,
) -> ApiResult<(CookieJar, Json<SessionResponse>)> {
    let session = state.auth_service.signup(req).await?;
    let cookie = session_cookie(&state.config.auth, session.token.token.clone());
    Ok((jar.add(cookie), Json(session.into())))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<SessionResponse>)> {
    let session = state.auth_service.login(req).await?;
    let cookie = session_cookie(&state.config.auth, session.token.token.clone());
    Ok((jar.add(cookie), Json(session.into())))
}

/// POST /api/auth/logout
///
/// Always emits an expiring cookie, whether or not one was sent.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let mut removal = Cookie::new(state.config.auth.cookie_name.clone(), "");
    apply_attributes(&state.config.auth, &mut removal);
    removal.make_removal();
    (
        jar.add(removal),
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
}

/// GET /api/auth/me
///
/// Responds with JSON `null` rather than an error when there is no
/// usable session.
pub async fn me(
    State(state): State<AppState>,
    MaybeUser(user_id): MaybeUser,
) -> Json<Option<PublicUser>> {
    let Some(user_id) = user_id else {
        return Json(None);
    };

    match state.auth_service.current_user(user_id).await {
        Ok(user) => Json(user),
        Err(e) => {
            warn!(user_id = %user_id, error = %e, "Session lookup failed");
            Json(None)
        }
    }
}

fn session_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(config.cookie_name.clone(), token);
    cookie.set_max_age(time::Duration::days(config.session_ttl_days as i64));
    apply_attributes(config, &mut cookie);
    cookie
}

/// Cross-site cookies need `SameSite=None`, which browsers only accept
/// together with `Secure`.
fn apply_attributes(config: &AuthConfig, cookie: &mut Cookie<'static>) {
    cookie.set_http_only(true);
    cookie.set_secure(config.cookie_secure);
    cookie.set_same_site(if config.cookie_secure {
        SameSite::None
    } else {
        SameSite::Lax
    });
    cookie.set_path("/");
}
