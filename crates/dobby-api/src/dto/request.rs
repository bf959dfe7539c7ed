//! Request DTOs.

use serde::Deserialize;
use uuid::Uuid;

/// Body of `POST /api/folders`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Folder name.
    #[serde(default)]
    pub name: String,
    /// Parent folder, absent or null for root.
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// Body of the share and unshare endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailRequest {
    /// Email of the user to add or remove.
    #[serde(default)]
    pub email: String,
}

/// Query of `GET /api/images/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Substring to match against image names.
    #[serde(default)]
    pub q: String,
}
