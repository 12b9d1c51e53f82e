//! Constrained Delaunay engine backed by `spade`.

use cr_core::Point;
use spade::{ConstrainedDelaunayTriangulation, Point2, Triangulation as _};
use tracing::{debug, warn};

use crate::error::{MeshError, MeshResult};
use crate::holes::erase_outer_and_holes;
use crate::triangulation::{Triangulation, TriangulationInput, Triangulator};

/// Spade-backed constrained Delaunay triangulator.
///
/// Vertices are inserted in the order provided; coincident vertices merge into
/// one, so output indices follow insertion order of the distinct positions.
/// A constraint edge that would cross an already inserted constraint is
/// split at the intersection, and the new vertex is appended after the input
/// vertices.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpadeTriangulator;

impl SpadeTriangulator {
    pub fn new() -> Self {
        Self
    }
}

impl Triangulator for SpadeTriangulator {
    fn triangulate(&self, input: &TriangulationInput) -> MeshResult<Triangulation> {
        input.validate()?;

        let mut cdt: ConstrainedDelaunayTriangulation<Point2<f64>> =
            ConstrainedDelaunayTriangulation::new();

        let mut handles = Vec::with_capacity(input.vertices.len());
        for (index, v) in input.vertices.iter().enumerate() {
            let handle = cdt
                .insert(Point2::new(v.x, v.y))
                .map_err(|err| MeshError::Engine {
                    what: format!("cannot insert vertex {index} at {v}: {err:?}"),
                })?;
            handles.push(handle);
        }

        let mut skipped = 0usize;
        let mut split = 0usize;
        for &[a, b] in &input.edges {
            let (from, to) = (handles[a], handles[b]);
            if from == to {
                warn!(a, b, "degenerate constraint edge; skipped");
                skipped += 1;
                continue;
            }
            if cdt.can_add_constraint(from, to) {
                cdt.add_constraint(from, to);
            } else {
                let before = cdt.num_vertices();
                cdt.add_constraint_and_split(from, to, |p| p);
                debug!(
                    a,
                    b,
                    added = cdt.num_vertices() - before,
                    "constraint edge split at crossings"
                );
                split += 1;
            }
        }

        let mut points = vec![Point::default(); cdt.num_vertices()];
        for vertex in cdt.vertices() {
            let p = vertex.position();
            points[vertex.fix().index()] = Point::new(p.x, p.y);
        }

        let triangles: Vec<[usize; 3]> = cdt
            .inner_faces()
            .map(|face| face.vertices().map(|v| v.fix().index()))
            .collect();

        // constraint edges as spade stores them (split at collinear vertices)
        let constraints: Vec<[usize; 2]> = cdt
            .undirected_edges()
            .filter(|edge| cdt.is_constraint_edge(edge.fix()))
            .map(|edge| edge.vertices().map(|v| v.fix().index()))
            .collect();

        let kept = erase_outer_and_holes(&triangles, &constraints);
        debug!(
            vertices = points.len(),
            constraints = constraints.len(),
            skipped,
            split,
            triangles = triangles.len(),
            kept = kept.len(),
            "triangulated"
        );

        Triangulation::from_parts(points, kept)
    }
}
