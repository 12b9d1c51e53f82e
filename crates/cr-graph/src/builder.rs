//! Incremental search-graph builder.
//!
//! Construction runs in four steps over one triangulation:
//! 1. every triangle-edge midpoint becomes a candidate node (with provenance)
//! 2. midpoints of obstacle/boundary edges are removed
//! 3. each triangle's surviving midpoints are joined pairwise (medial edges)
//! 4. component corners connect to the opposite-edge midpoint of every
//!    triangle they are a vertex of, when that midpoint survived

use std::collections::HashMap;

use cr_core::Point;
use cr_mesh::Triangulation;
use tracing::{debug, warn};

use crate::error::GraphResult;
use crate::graph::SearchGraph;
use crate::provenance::MidpointProvenance;
use crate::validate;

/// Builder for the search graph of one triangulation.
///
/// Call the steps in order, then `build()` to validate and take the graph.
#[derive(Debug)]
pub struct SearchGraphBuilder<'m> {
    mesh: &'m Triangulation,
    graph: SearchGraph,
    provenance: MidpointProvenance,
}

/// Midpoints of a triangle's sides `(p0,p1) (p1,p2) (p2,p0)`.
fn side_midpoints(tri: [Point; 3]) -> [Point; 3] {
    [
        tri[0].midpoint(tri[1]),
        tri[1].midpoint(tri[2]),
        tri[2].midpoint(tri[0]),
    ]
}

impl<'m> SearchGraphBuilder<'m> {
    pub fn new(mesh: &'m Triangulation) -> Self {
        Self {
            mesh,
            graph: SearchGraph::new(),
            provenance: MidpointProvenance::new(),
        }
    }

    /// Step 1: add every triangle-edge midpoint as a node. Returns the
    /// number of distinct nodes added.
    pub fn add_midpoints(&mut self) -> usize {
        let mut added = 0;
        for tri in self.mesh.iter_triangles() {
            for i in 0..3 {
                let (a, b) = (tri[i], tri[(i + 1) % 3]);
                let mid = a.midpoint(b);
                self.provenance.record(mid, a, b);
                if self.graph.add_node(mid) {
                    added += 1;
                }
            }
        }
        debug!(added, "midpoint nodes");
        added
    }

    /// Step 2: drop candidates lying on an obstacle or chip boundary edge
    /// (exact midpoint match). Returns the number of nodes removed.
    pub fn remove_obstacle_midpoints(&mut self, obstacle_edges: &[(Point, Point)]) -> usize {
        let removed = obstacle_edges
            .iter()
            .filter(|(a, b)| self.graph.remove_node(a.midpoint(*b)))
            .count();
        debug!(
            obstacle_edges = obstacle_edges.len(),
            removed, "obstacle midpoints filtered"
        );
        removed
    }

    /// Step 3: join each triangle's surviving midpoints pairwise. Returns the
    /// number of new edges.
    pub fn add_medial_edges(&mut self) -> usize {
        let mut added = 0;
        for tri in self.mesh.iter_triangles() {
            let mids = side_midpoints(tri);
            for i in 0..3 {
                let (m1, m2) = (mids[i], mids[(i + 1) % 3]);
                if self.graph.contains_node(m1)
                    && self.graph.contains_node(m2)
                    && self.graph.add_edge(m1, m2)
                {
                    added += 1;
                }
            }
        }
        debug!(added, "medial edges");
        added
    }

    /// Step 4: connect terminal corners into the graph. Returns the number
    /// of new connector edges.
    pub fn add_terminals(&mut self, corners: &[Point]) -> usize {
        let mut incident: HashMap<Point, Vec<(usize, usize)>> = HashMap::new();
        for (t, tri) in self.mesh.triangles().iter().enumerate() {
            for (slot, &v) in tri.iter().enumerate() {
                incident
                    .entry(self.mesh.points()[v])
                    .or_default()
                    .push((t, slot));
            }
        }

        let mut added = 0;
        for &corner in corners {
            let Some(slots) = incident.get(&corner) else {
                continue;
            };
            for &(t, slot) in slots {
                let Some(tri) = self.mesh.triangle_points(t) else {
                    continue;
                };
                let opposite = side_midpoints(tri)[(slot + 1) % 3];
                if self.graph.contains_node(opposite) && self.graph.add_edge(corner, opposite) {
                    self.provenance.record(corner, corner, corner);
                    added += 1;
                }
            }
        }
        debug!(corners = corners.len(), added, "terminal connectors");
        added
    }

    /// Validate and return the graph with its provenance.
    pub fn build(self) -> GraphResult<(SearchGraph, MidpointProvenance)> {
        validate::validate_structure(&self.graph)?;
        validate::validate_provenance(&self.graph, &self.provenance)?;

        if self.graph.is_empty() {
            warn!(
                triangles = self.mesh.triangles().len(),
                "search graph is empty; every route will be unroutable"
            );
        }

        Ok((self.graph, self.provenance))
    }
}

/// Run all four construction steps.
pub fn build_search_graph(
    mesh: &Triangulation,
    obstacle_edges: &[(Point, Point)],
    corners: &[Point],
) -> GraphResult<(SearchGraph, MidpointProvenance)> {
    let mut builder = SearchGraphBuilder::new(mesh);
    builder.add_midpoints();
    builder.remove_obstacle_midpoints(obstacle_edges);
    builder.add_medial_edges();
    builder.add_terminals(corners);
    let (graph, provenance) = builder.build()?;
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "search graph built"
    );
    Ok((graph, provenance))
}
