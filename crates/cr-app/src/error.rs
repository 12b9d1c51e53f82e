//! Error types for the cr-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and gives the CLI a single error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Triangulation error: {0}")]
    Mesh(String),

    #[error("Search graph error: {0}")]
    Graph(String),

    #[error("Routing error: {0}")]
    Route(String),

    #[error("Failed to read {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to serialize report: {0}")]
    Report(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for cr-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<cr_layout::LayoutError> for AppError {
    fn from(err: cr_layout::LayoutError) -> Self {
        AppError::Layout(err.to_string())
    }
}

impl From<cr_mesh::MeshError> for AppError {
    fn from(err: cr_mesh::MeshError) -> Self {
        AppError::Mesh(err.to_string())
    }
}

impl From<cr_graph::GraphError> for AppError {
    fn from(err: cr_graph::GraphError) -> Self {
        AppError::Graph(err.to_string())
    }
}

impl From<cr_route::RouteError> for AppError {
    fn from(err: cr_route::RouteError) -> Self {
        AppError::Route(err.to_string())
    }
}

impl From<cr_core::CoreError> for AppError {
    fn from(err: cr_core::CoreError) -> Self {
        AppError::Config(err.to_string())
    }
}
