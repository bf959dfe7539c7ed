//! # dobby-auth
//!
//! Authentication and authorization for Dobby Drive.
//!
//! ## Modules
//!
//! - `jwt`: session token creation and validation
//! - `password`: Argon2id password hashing
//! - `acl`: ownership and sharing decisions for folders and images

pub mod acl;
pub mod jwt;
pub mod password;

pub use acl::{can_mutate, can_view};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
