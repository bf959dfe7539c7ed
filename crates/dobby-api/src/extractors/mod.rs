//! Custom Axum extractors.

pub mod auth;
pub mod body;
pub mod path;

pub use auth::{AuthUser, MaybeUser};
pub use body::{ApiJson, ApiMultipart, ApiQuery};
pub use path::parse_uuid;
