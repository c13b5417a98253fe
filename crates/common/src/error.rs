//! Error types shared across ffwrap crates.

use std::path::PathBuf;

/// Top-level error type for ffwrap operations outside the command core.
#[derive(Debug, thiserror::Error)]
pub enum FfwrapError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using FfwrapError.
pub type FfwrapResult<T> = Result<T, FfwrapError>;

impl FfwrapError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: msg.into(),
        }
    }
}
