//! Error types for the tm-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// gives every front end one error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Profile document error: {0}")]
    Document(String),

    #[error("Failed to read profile document: {path}")]
    DocumentRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Calculation failed: {0}")]
    Calculation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tm-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<tm_config::ConfigError> for AppError {
    fn from(err: tm_config::ConfigError) -> Self {
        AppError::Document(err.to_string())
    }
}

impl From<tm_profile::MotionError> for AppError {
    fn from(err: tm_profile::MotionError) -> Self {
        AppError::Calculation(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
