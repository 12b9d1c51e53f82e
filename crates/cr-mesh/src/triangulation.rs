//! Triangulation data structures and the engine seam.

use cr_core::Point;

use crate::error::{MeshError, MeshResult};

/// Engine input: vertices plus constraint edges (0-based vertex index pairs).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangulationInput {
    pub vertices: Vec<Point>,
    pub edges: Vec<[usize; 2]>,
}

impl TriangulationInput {
    pub fn new(vertices: Vec<Point>, edges: Vec<[usize; 2]>) -> Self {
        Self { vertices, edges }
    }

    /// Check that every constraint edge references an existing vertex.
    pub fn validate(&self) -> MeshResult<()> {
        let len = self.vertices.len();
        for edge in &self.edges {
            for &index in edge {
                if index >= len {
                    return Err(MeshError::IndexOob {
                        what: "constraint edge vertex",
                        index,
                        len,
                    });
                }
            }
        }
        Ok(())
    }

    /// Constraint edges resolved to their endpoint coordinates.
    pub fn edge_points(&self) -> Vec<(Point, Point)> {
        self.edges
            .iter()
            .map(|&[a, b]| (self.vertices[a], self.vertices[b]))
            .collect()
    }
}

/// A triangulated plane: vertex points and triangles as vertex index triples.
///
/// Triangles are assumed non-overlapping and to cover the free region; that
/// guarantee belongs to the engine and is not re-verified here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    points: Vec<Point>,
    triangles: Vec<[usize; 3]>,
}

impl Triangulation {
    /// Assemble a triangulation, checking every triangle index is in range.
    pub fn from_parts(points: Vec<Point>, triangles: Vec<[usize; 3]>) -> MeshResult<Self> {
        let len = points.len();
        for tri in &triangles {
            for &index in tri {
                if index >= len {
                    return Err(MeshError::IndexOob {
                        what: "triangle vertex",
                        index,
                        len,
                    });
                }
            }
        }
        Ok(Self { points, triangles })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Corner coordinates of triangle `i`, in stored vertex order.
    pub fn triangle_points(&self, i: usize) -> Option<[Point; 3]> {
        let tri = self.triangles.get(i)?;
        Some(tri.map(|v| self.points[v]))
    }

    /// Iterate over every triangle as its three corner points.
    pub fn iter_triangles(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.triangles.iter().map(|tri| tri.map(|v| self.points[v]))
    }
}

/// A constrained Delaunay triangulation engine.
///
/// Implementations must return only triangles inside the constrained region
/// (outer triangles and holes erased).
pub trait Triangulator {
    fn triangulate(&self, input: &TriangulationInput) -> MeshResult<Triangulation>;
}
