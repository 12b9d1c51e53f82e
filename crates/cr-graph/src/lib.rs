//! cr-graph: the navigable search graph over triangulated free space.
//!
//! Provides:
//! - `SearchGraph`: undirected graph keyed by exact point coordinates
//! - `MidpointProvenance`: midpoint → originating triangle edge
//! - `SearchGraphBuilder`: midpoint nodes, obstacle filtering, medial edges,
//!   terminal connectors, then validation
//!
//! # Example
//!
//! ```
//! use cr_core::Point;
//! use cr_graph::build_search_graph;
//! use cr_mesh::Triangulation;
//!
//! let mesh = Triangulation::from_parts(
//!     vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(0.0, 2.0)],
//!     vec![[0, 1, 2]],
//! )
//! .unwrap();
//! let (graph, provenance) = build_search_graph(&mesh, &[], &[]).unwrap();
//!
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.edge_count(), 3);
//! assert!(provenance.get(Point::new(1.0, 0.0)).is_some());
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod provenance;
pub(crate) mod validate;

pub use builder::{SearchGraphBuilder, build_search_graph};
pub use error::{GraphError, GraphResult};
pub use graph::SearchGraph;
pub use provenance::MidpointProvenance;
