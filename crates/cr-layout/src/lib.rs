//! cr-layout: component layout and route-request input, validation, and the
//! geometry the router derives from them.

pub mod constraints;
pub mod parse;
pub mod ports;
pub mod schema;
pub mod validate;

pub use constraints::{ChipBounds, obstacle_edges, terminal_corners, triangulation_input};
pub use parse::{load_layout, load_requests, parse_layout, parse_requests};
pub use ports::{PortAssignment, assign_ports};
pub use schema::*;
pub use validate::validate_requests;

pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    #[error("Parse error at line {line}: {what}")]
    Parse { line: usize, what: String },

    #[error("Unknown component kind for '{name}' (expected leading d, f or w)")]
    UnknownKind { name: String },

    #[error("Duplicate component name: {name}")]
    DuplicateName { name: String },

    #[error("Request {request} references unknown component '{name}'")]
    UnknownComponent { request: usize, name: String },

    #[error("Request {request} is empty")]
    EmptyRequest { request: usize },

    #[error("Layout has no {kind} components")]
    NoPorts { kind: ComponentKind },

    #[error("Numeric error: {0}")]
    Numeric(#[from] cr_core::CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
