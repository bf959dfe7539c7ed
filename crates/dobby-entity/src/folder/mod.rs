//! Folder domain entities.

pub mod model;

pub use model::{Breadcrumb, CreateFolder, Folder, FolderListing, RootListing};
