//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading or validating a [`PressConfig`](crate::PressConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid TOML for this schema
    #[error("Failed to parse press config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Scale ratio outside (0, 1]
    #[error("Invalid scale_ratio {0}: expected a value in (0, 1]")]
    InvalidScaleRatio(f32),

    /// Control points that do not describe a timing curve
    #[error("Invalid {field}: x coordinates must lie in [0, 1], got {points:?}")]
    InvalidCurve { field: &'static str, points: [f32; 4] },

    /// Zero-length phase
    #[error("Invalid {0}: duration must be at least 1ms")]
    InvalidDuration(&'static str),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
