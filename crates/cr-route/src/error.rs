//! Error types for route planning.

use cr_core::Point;
use cr_layout::ComponentKind;
use thiserror::Error;

/// Errors raised by the planner, assembler and detail router.
///
/// Lookup failures surface immediately. `UnroutableHop` is returned by
/// `best_hop` but the assembler records it per hop instead of aborting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("Component not found: {name}")]
    ComponentNotFound { name: String },

    #[error("No {kind} assigned to '{name}'")]
    PortNotAssigned { name: String, kind: ComponentKind },

    #[error("No provenance for search-graph node {point}")]
    ProvenanceMissing { point: Point },

    #[error("No path from '{from}' to '{to}'")]
    UnroutableHop { from: String, to: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type RouteResult<T> = Result<T, RouteError>;
