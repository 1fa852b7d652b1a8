//! Error types for the sn-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the backend crates' errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Network construction failed: {0}")]
    Network(String),

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("Failed to write report: {path}")]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sn-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<sn_project::ProjectError> for AppError {
    fn from(err: sn_project::ProjectError) -> Self {
        match err {
            sn_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<sn_project::ValidationError> for AppError {
    fn from(err: sn_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<sn_graph::GraphError> for AppError {
    fn from(err: sn_graph::GraphError) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<sn_core::SnError> for AppError {
    fn from(err: sn_core::SnError) -> Self {
        AppError::Settings(err.to_string())
    }
}

impl From<sn_invert::InvertError> for AppError {
    fn from(err: sn_invert::InvertError) -> Self {
        AppError::Settings(err.to_string())
    }
}
