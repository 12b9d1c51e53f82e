//! Route planning over the search graph.
//!
//! This crate holds the three stages that run after the search graph is
//! built: an A* planner with best corner-pair selection, the assembler that
//! expands requests into hops and totals their length, and the detail router
//! that turns coarse node paths into concrete track points.

pub mod assemble;
pub mod detail;
pub mod error;
pub mod planner;

pub use assemble::{
    AssembleOptions, AssembledRoute, CoarsePath, EdgeKey, HopRoute, assemble_routes,
    resolve_names, total_length, total_length_with,
};
pub use detail::{division_points, refine};
pub use error::{RouteError, RouteResult};
pub use planner::{
    Heuristic, Hop, Predecessors, SearchResult, best_hop, path_length, reconstruct_path,
    shortest_path,
};
