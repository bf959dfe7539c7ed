//! Sharing folders and images with other users by email.

pub mod service;

pub use service::{ResourceType, ShareService};
