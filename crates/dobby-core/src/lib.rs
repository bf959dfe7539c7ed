//! # dobby-core
//!
//! Core crate for Dobby Drive. Contains the configuration schema, the
//! blob-store trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Dobby crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
