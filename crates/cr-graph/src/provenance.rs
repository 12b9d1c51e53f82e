//! Midpoint provenance: which triangle edge produced each search-graph node.

use std::collections::HashMap;

use cr_core::Point;

/// Midpoint → the ordered endpoint pair of the triangle edge it bisects.
///
/// Terminal corners are recorded as the degenerate pair `(corner, corner)`,
/// so every node the builder adds has an entry. Entries for nodes later
/// removed by obstacle filtering are kept; they are harmless because those
/// nodes are unreachable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MidpointProvenance {
    sources: HashMap<Point, (Point, Point)>,
}

impl MidpointProvenance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the source edge of `mid`.
    pub fn record(&mut self, mid: Point, a: Point, b: Point) {
        self.sources.insert(mid, (a, b));
    }

    pub fn get(&self, mid: Point) -> Option<(Point, Point)> {
        self.sources.get(&mid).copied()
    }

    pub fn contains(&self, mid: Point) -> bool {
        self.sources.contains_key(&mid)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point, (Point, Point))> + '_ {
        self.sources.iter().map(|(&m, &e)| (m, e))
    }
}
