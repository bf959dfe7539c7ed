//! Accounts: signup, login, session lookup, and administrative seeding.

pub mod auth;
pub mod service;

pub use auth::{AuthService, AuthSession, LoginRequest, SignupRequest};
pub use service::{SeedOutcome, UserService};
