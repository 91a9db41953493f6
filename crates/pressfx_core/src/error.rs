//! Core error types

use thiserror::Error;

/// Errors produced while constructing core value types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A color string could not be parsed
    #[error("Invalid color '{0}': expected #RRGGBB or #AARRGGBB")]
    InvalidColor(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
