use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("file '{0}' not found in storage")]
    NotFound(String),

    #[error("no files to add")]
    EmptyPayload,

    #[error("'{}' is not a readable file", .0.display())]
    InvalidSource(PathBuf),
}

/// Failures surfaced to the error reporter. None of them leave the dashboard
/// in a partially updated state.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Failed to load files: {0}")]
    LoadFailure(#[source] ServiceError),

    #[error("Failed to {operation}: {source}")]
    MutationFailure {
        operation: &'static str,
        #[source]
        source: ServiceError,
    },
}
