//! Shared application state passed to all Axum handlers.

use std::fmt;
use std::sync::Arc;

use dobby_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use dobby_core::config::AppConfig;
use dobby_core::traits::BlobStore;
use dobby_database::Stores;
use dobby_service::{AuthService, FolderService, ImageService, SearchService, ShareService};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Session token validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Signup, login, and session lookup.
    pub auth_service: Arc<AuthService>,
    /// Folder tree operations.
    pub folder_service: Arc<FolderService>,
    /// Image upload and lifecycle.
    pub image_service: Arc<ImageService>,
    /// Image search.
    pub search_service: Arc<SearchService>,
    /// Sharing by email.
    pub share_service: Arc<ShareService>,
}

impl AppState {
    /// Wires every service over the given stores and blob store.
    pub fn new(config: AppConfig, stores: &Stores, blobs: Arc<dyn BlobStore>) -> Self {
        let hasher = Arc::new(PasswordHasher::new());
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&stores.users),
            hasher,
            encoder,
        ));
        let folder_service = Arc::new(FolderService::new(
            Arc::clone(&stores.folders),
            Arc::clone(&stores.images),
        ));
        let image_service = Arc::new(ImageService::new(
            Arc::clone(&stores.images),
            Arc::clone(&stores.folders),
            blobs,
        ));
        let search_service = Arc::new(SearchService::new(Arc::clone(&stores.images)));
        let share_service = Arc::new(ShareService::new(
            Arc::clone(&stores.users),
            Arc::clone(&stores.folders),
            Arc::clone(&stores.images),
        ));

        Self {
            config: Arc::new(config),
            jwt_decoder,
            auth_service,
            folder_service,
            image_service,
            search_service,
            share_service,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("storage", &self.config.storage.provider)
            .finish_non_exhaustive()
    }
}
