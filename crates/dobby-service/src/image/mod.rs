//! Image registry operations.

pub mod search;
pub mod service;

pub use search::SearchService;
pub use service::{ImageService, UploadImageRequest, UploadedFile};
