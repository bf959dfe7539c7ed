//! Route definitions for the Dobby Drive HTTP API.
//!
//! API routes are organized by domain and mounted under `/api`. The
//! health check lives at `/` and the local blob store's files are served
//! under their public prefix.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use dobby_core::config::StorageProviderKind;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.server.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(folder_routes())
        .merge(image_routes());

    let mut router = Router::new()
        .route("/", get(handlers::health::health))
        .nest("/api", api_routes);

    if state.config.storage.provider == StorageProviderKind::Local {
        let local = &state.config.storage.local;
        router = router.nest_service(&local.public_prefix, ServeDir::new(&local.root_path));
    }

    router
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::build_cors_layer(&state.config.server.cors))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Auth endpoints: signup, login, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Folder tree, sharing, and soft-delete
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", post(handlers::folder::create_folder))
        .route("/folders/root", get(handlers::folder::list_root))
        .route(
            "/folders/breadcrumbs/{id}",
            get(handlers::folder::breadcrumbs),
        )
        .route("/folders/{id}", get(handlers::folder::get_folder))
        .route("/folders/share/{id}", post(handlers::folder::share_folder))
        .route(
            "/folders/unshare/{id}",
            post(handlers::folder::unshare_folder),
        )
        .route("/folders/delete/{id}", post(handlers::folder::delete_folder))
        .route(
            "/folders/restore/{id}",
            post(handlers::folder::restore_folder),
        )
}

/// Image upload, search, sharing, and soft-delete
fn image_routes() -> Router<AppState> {
    Router::new()
        .route("/images", post(handlers::image::upload_image))
        .route("/images/search", get(handlers::search::search))
        .route("/images/delete/{id}", post(handlers::image::delete_image))
        .route("/images/restore/{id}", post(handlers::image::restore_image))
        .route("/images/share/{id}", post(handlers::image::share_image))
        .route("/images/unshare/{id}", post(handlers::image::unshare_image))
}
