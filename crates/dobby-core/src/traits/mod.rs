//! Core traits defined in `dobby-core` and implemented by other crates.

pub mod blob;

pub use blob::{BlobStore, StoredBlob};
