//! Error types for the alf-app service layer.

use std::path::PathBuf;

/// Application error type shared by every front end.
///
/// Loader and lookup failures are wrapped transparently so callers see the
/// original error unchanged.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Data(#[from] alf_data::DataError),

    #[error(transparent)]
    Core(#[from] alf_core::CoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for alf-app operations.
pub type AppResult<T> = Result<T, AppError>;
