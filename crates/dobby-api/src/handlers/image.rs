//! Image upload and lifecycle handlers.

use axum::Json;
use axum::extract::{Path, State};

use dobby_core::error::AppError;
use dobby_entity::image::Image;
use dobby_service::image::{UploadImageRequest, UploadedFile};
use dobby_service::share::ResourceType;

use crate::dto::request::EmailRequest;
use crate::dto::response::OkResponse;
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiMultipart, AuthUser, parse_uuid};
use crate::state::AppState;

/// POST /api/images (multipart: `image`, `name`, `folderId`)
pub async fn upload_image(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiMultipart(mut multipart): ApiMultipart,
) -> ApiResult<Json<Image>> {
    let mut req = UploadImageRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "image" => {
                let original_name = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read file: {e}")))?;
                req.file = Some(UploadedFile {
                    original_name,
                    data,
                });
            }
            "name" | "folderId" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Invalid field: {e}")))?;
                if field_name == "name" {
                    req.name = text;
                } else {
                    req.folder_id = Some(text);
                }
            }
            _ => {}
        }
    }

    Ok(Json(state.image_service.upload(&auth, req).await?))
}

/// POST /api/images/delete/{id}
pub async fn delete_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<OkResponse>> {
    let id = parse_uuid(&id)?;
    state.image_service.delete_image(&auth, id).await?;
    Ok(Json(OkResponse::ok()))
}

/// POST /api/images/restore/{id}
pub async fn restore_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<OkResponse>> {
    let id = parse_uuid(&id)?;
    state.image_service.restore_image(&auth, id).await?;
    Ok(Json(OkResponse::ok()))
}

/// POST /api/images/share/{id}
pub async fn share_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<EmailRequest>,
) -> ApiResult<Json<OkResponse>> {
    let id = parse_uuid(&id)?;
    state
        .share_service
        .share(&auth, ResourceType::Image, id, &req.email)
        .await?;
    Ok(Json(OkResponse::ok()))
}

/// POST /api/images/unshare/{id}
pub async fn unshare_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<EmailRequest>,
) -> ApiResult<Json<OkResponse>> {
    let id = parse_uuid(&id)?;
    state
        .share_service
        .unshare(&auth, ResourceType::Image, id, &req.email)
        .await?;
    Ok(Json(OkResponse::ok()))
}
