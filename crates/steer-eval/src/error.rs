//! Host-level error types for the steer runtime.
//!
//! Language diagnostics never appear here; they go to the session's
//! error stream. These errors cover loading and validating configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{name} must lie in [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f32 },
    #[error("view_size must be positive, got {0}")]
    InvalidViewSize(f32),
    #[error("output_dim must be at most 4, got {0}")]
    InvalidOutputDim(u8),
}

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
