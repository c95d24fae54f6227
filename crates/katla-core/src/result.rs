//! Convenience result type alias for KatlaSport.

use crate::error::AppError;

/// A specialized `Result` type for hive management operations.
pub type AppResult<T> = Result<T, AppError>;
