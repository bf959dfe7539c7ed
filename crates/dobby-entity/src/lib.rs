//! # dobby-entity
//!
//! Domain entity models for Dobby Drive. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow` and serialize with camelCase keys.

pub mod access;
pub mod folder;
pub mod image;
pub mod user;
