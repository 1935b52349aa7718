//! Error types for shared grid primitives.

use thiserror::Error;

/// Result type alias using CommonError.
pub type CommonResult<T> = Result<T, CommonError>;

/// Errors raised while building grid primitives.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommonError {
    #[error("Array of {len} values cannot have shape ({rows}, {cols})")]
    ArrayLength { len: usize, rows: usize, cols: usize },

    #[error("Invalid grid shape: {0}")]
    InvalidShape(String),
}
