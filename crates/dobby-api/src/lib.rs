//! # dobby-api
//!
//! HTTP API layer for Dobby Drive built on Axum.
//!
//! Provides the REST endpoints, the cookie session gate, CORS and request
//! logging middleware, DTOs, and the mapping from `AppError` to HTTP
//! responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve, shutdown_signal};
pub use error::{ApiError, ApiErrorResponse};
pub use state::AppState;
