//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod folder;
pub mod health;
pub mod image;
pub mod search;
