//! HTTP integration tests driving the full router against the in-memory
//! store and a temporary local blob directory.

mod helpers;

mod auth_test;
mod folder_test;
mod image_test;
mod search_test;
