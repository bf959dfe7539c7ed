//! Folder tree operations.

pub mod service;

pub use service::{CreateFolderRequest, FolderService};
