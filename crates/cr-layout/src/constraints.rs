//! Obstacle geometry derived from a layout.
//!
//! Every component rectangle and the chip boundary contribute four vertices
//! (left-top, left-bottom, right-bottom, right-top) and four constraint edges
//! `(0,1) (1,2) (2,3) (0,3)`. The same rectangle sides double as the obstacle
//! edge list whose midpoints the search graph excludes.

use cr_core::{Point, Real};
use cr_mesh::TriangulationInput;
use serde::{Deserialize, Serialize};

use crate::schema::{Layout, rect_sides};

/// Chip boundary: the rectangle `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChipBounds {
    pub width: Real,
    pub height: Real,
}

impl Default for ChipBounds {
    fn default() -> Self {
        Self {
            width: 70.0,
            height: 70.0,
        }
    }
}

impl ChipBounds {
    /// Same corner order as component rectangles.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(0.0, self.height),
            Point::new(0.0, 0.0),
            Point::new(self.width, 0.0),
            Point::new(self.width, self.height),
        ]
    }
}

fn rectangles(layout: &Layout, chip: &ChipBounds) -> Vec<[Point; 4]> {
    let mut rects: Vec<[Point; 4]> = layout.components().iter().map(|c| c.corners()).collect();
    rects.push(chip.corners());
    rects
}

/// Triangulation engine input: component rectangles first, chip boundary last.
pub fn triangulation_input(layout: &Layout, chip: &ChipBounds) -> TriangulationInput {
    let mut vertices = Vec::with_capacity((layout.len() + 1) * 4);
    let mut edges = Vec::with_capacity((layout.len() + 1) * 4);
    for corners in rectangles(layout, chip) {
        let o = vertices.len();
        vertices.extend_from_slice(&corners);
        edges.extend([[o, o + 1], [o + 1, o + 2], [o + 2, o + 3], [o, o + 3]]);
    }
    TriangulationInput::new(vertices, edges)
}

/// Every obstacle and boundary side as an endpoint pair.
pub fn obstacle_edges(layout: &Layout, chip: &ChipBounds) -> Vec<(Point, Point)> {
    rectangles(layout, chip)
        .into_iter()
        .flat_map(rect_sides)
        .collect()
}

/// All component corners, in layout order. These are the route terminals.
pub fn terminal_corners(layout: &Layout) -> Vec<Point> {
    layout
        .components()
        .iter()
        .flat_map(|c| c.corners())
        .collect()
}
