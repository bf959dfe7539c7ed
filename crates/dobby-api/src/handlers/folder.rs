//! Folder tree handlers.

use axum::Json;
use axum::extract::{Path, State};

use dobby_entity::folder::{Breadcrumb, Folder, FolderListing, RootListing};
use dobby_service::folder::CreateFolderRequest as SvcCreateFolder;
use dobby_service::share::ResourceType;

use crate::dto::request::{CreateFolderRequest, EmailRequest};
use crate::dto::response::OkResponse;
use crate::error::ApiResult;
use crate::extractors::{ApiJson, AuthUser, parse_uuid};
use crate::state::AppState;

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateFolderRequest>,
) -> ApiResult<Json<Folder>> {
    let folder = state
        .folder_service
        .create_folder(
            &auth,
            SvcCreateFolder {
                name: req.name,
                parent_id: req.parent_id,
            },
        )
        .await?;
    Ok(Json(folder))
}

/// GET /api/folders/root
pub async fn list_root(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<RootListing>> {
    Ok(Json(state.folder_service.list_root(&auth).await?))
}

/// GET /api/folders/breadcrumbs/{id}
pub async fn breadcrumbs(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Breadcrumb>>> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.folder_service.breadcrumbs(&auth, id).await?))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<FolderListing>> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.folder_service.get_folder(&auth, id).await?))
}

/// POST /api/folders/share/{id}
pub async fn share_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<EmailRequest>,
) -> ApiResult<Json<OkResponse>> {
    let id = parse_uuid(&id)?;
    state
        .share_service
        .share(&auth, ResourceType::Folder, id, &req.email)
        .await?;
    Ok(Json(OkResponse::ok()))
}

/// POST /api/folders/unshare/{id}
pub async fn unshare_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<EmailRequest>,
) -> ApiResult<Json<OkResponse>> {
    let id = parse_uuid(&id)?;
    state
        .share_service
        .unshare(&auth, ResourceType::Folder, id, &req.email)
        .await?;
    Ok(Json(OkResponse::ok()))
}

/// POST /api/folders/delete/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<OkResponse>> {
    let id = parse_uuid(&id)?;
    state.folder_service.delete_folder(&auth, id).await?;
    Ok(Json(OkResponse::ok()))
}

/// POST /api/folders/restore/{id}
pub async fn restore_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<OkResponse>> {
    let id = parse_uuid(&id)?;
    state.folder_service.restore_folder(&auth, id).await?;
    Ok(Json(OkResponse::ok()))
}
