//! Shared application service layer for chiproute.
//!
//! This crate gives the CLI one entry point for configuration loading, the
//! full routing pipeline, and the JSON report it produces.

pub mod config;
pub mod error;
pub mod report;
pub mod route_service;

// Re-export key types for convenience
pub use config::{RouteConfig, load_config, parse_config};
pub use error::{AppError, AppResult};
pub use report::{GraphSummary, HopReport, RequestReport, RouteReport};
pub use route_service::{
    PreparedLayout, ValidationSummary, graph_file, mesh_file, mesh_input, prepare, route,
    route_files, validate_files,
};
