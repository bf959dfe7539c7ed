//! Image search handler.

use axum::Json;
use axum::extract::State;

use dobby_entity::image::Image;

use crate::dto::request::SearchQuery;
use crate::error::ApiResult;
use crate::extractors::{ApiQuery, AuthUser};
use crate::state::AppState;

/// GET /api/images/search?q=...
pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> ApiResult<Json<Vec<Image>>> {
    Ok(Json(state.search_service.search(&auth, &query.q).await?))
}
