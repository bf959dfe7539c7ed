//! Convenience result type alias for Dobby Drive.

use crate::error::AppError;

/// A specialized `Result` type for Dobby Drive operations.
pub type AppResult<T> = Result<T, AppError>;
