//! cr-mesh: triangulation adapter for chiproute.
//!
//! Provides:
//! - The plain-text point/edge exchange format consumed by triangulation engines
//! - `Triangulation`: vertex array + triangle index array, as consumed by the router
//! - `Triangulator`: the seam to a constrained Delaunay engine
//! - `SpadeTriangulator`: the bundled engine, with outer/hole triangles erased
//!
//! # Example
//!
//! ```
//! use cr_core::Point;
//! use cr_mesh::{SpadeTriangulator, TriangulationInput, Triangulator};
//!
//! let input = TriangulationInput::new(
//!     vec![
//!         Point::new(0.0, 1.0),
//!         Point::new(0.0, 0.0),
//!         Point::new(1.0, 0.0),
//!         Point::new(1.0, 1.0),
//!     ],
//!     vec![[0, 1], [1, 2], [2, 3], [0, 3]],
//! );
//! let mesh = SpadeTriangulator::new().triangulate(&input).unwrap();
//! assert_eq!(mesh.triangles().len(), 2);
//! ```

pub mod engine;
pub mod error;
pub mod exchange;
pub(crate) mod holes;
pub mod triangulation;

pub use engine::SpadeTriangulator;
pub use error::{MeshError, MeshResult};
pub use exchange::{format_input, parse_input, read_input, write_input};
pub use triangulation::{Triangulation, TriangulationInput, Triangulator};
