//! # dobby-database
//!
//! Store traits for users, folders, and images, their PostgreSQL
//! repository implementations, and an in-process [`MemoryStore`].

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::{StoreConnection, connect_pool};
pub use memory::MemoryStore;
pub use sqlx::PgPool;
pub use store::{FolderStore, ImageStore, Stores, UserStore};
