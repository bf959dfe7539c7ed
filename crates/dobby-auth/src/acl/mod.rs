//! Ownership and sharing decisions.
//!
//! `can_view` and `can_mutate` are pure. The `require_*` helpers turn
//! them into errors in the order services apply them: existence and
//! soft-delete first, then authorization, so a deleted entity never
//! reveals whether the caller could have seen it.

pub mod checker;

pub use checker::{
    can_mutate, can_view, require_active, require_found, require_mutate, require_view,
};
