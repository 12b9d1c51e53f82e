//! Mesh-specific error types.

use cr_core::CoreError;

pub type MeshResult<T> = Result<T, MeshError>;

/// Triangulation input/output and engine errors.
#[derive(thiserror::Error, Debug)]
pub enum MeshError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {what}")]
    Parse { line: usize, what: String },

    #[error("{what} index {index} out of bounds (len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Triangulation engine error: {what}")]
    Engine { what: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}
