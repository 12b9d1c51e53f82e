//! Graph-specific error types.

use cr_core::Point;

pub type GraphResult<T> = Result<T, GraphError>;

/// Search-graph construction and validation errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// An edge is stored on one endpoint's adjacency but not the other's.
    #[error("Edge {a} - {b} is not stored symmetrically")]
    AsymmetricEdge { a: Point, b: Point },

    /// An adjacency entry points at a node that is not in the graph.
    #[error("Edge {a} - {b} references a missing node")]
    DanglingEdge { a: Point, b: Point },

    /// A node has no recorded triangle edge to subdivide.
    #[error("Node {node} has no provenance entry")]
    MissingProvenance { node: Point },
}
