//! # dobby-service
//!
//! Business logic service layer for Dobby Drive. Each service
//! orchestrates the stores, the blob store, and the auth primitives to
//! implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod folder;
pub mod image;
pub mod share;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RequestContext;
pub use folder::FolderService;
pub use image::{ImageService, SearchService};
pub use share::{ResourceType, ShareService};
pub use user::{AuthService, UserService};
