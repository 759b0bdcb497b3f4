//! Error types for the bf-app service layer.

use std::path::PathBuf;

/// Unified error for CLI and editor front-ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Failed to read layout file: {path}")]
    LayoutFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Layout validation failed: {0}")]
    Validation(String),

    #[error("Part '{id}': {message}")]
    Part { id: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Flow worker has stopped")]
    WorkerStopped,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<bf_project::ProjectError> for AppError {
    fn from(err: bf_project::ProjectError) -> Self {
        match err {
            bf_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Layout(other.to_string()),
        }
    }
}

impl From<bf_graph::GraphError> for AppError {
    fn from(err: bf_graph::GraphError) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<bf_solver::SolverError> for AppError {
    fn from(err: bf_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}
