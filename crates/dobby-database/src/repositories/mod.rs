//! PostgreSQL implementations of the store traits.

pub mod folder;
pub mod image;
pub mod user;

pub use folder::FolderRepository;
pub use image::ImageRepository;
pub use user::UserRepository;
