//! Core search-graph data structure.

use std::collections::{BTreeMap, BTreeSet};

use cr_core::Point;

/// Undirected graph whose nodes are points and whose edges are admissible
/// straight-line moves.
///
/// Edges are stored once per endpoint in ordered sets, so inserting the same
/// unordered pair twice is a no-op and iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchGraph {
    pub(crate) adjacency: BTreeMap<Point, BTreeSet<Point>>,
}

impl SearchGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains_node(&self, p: Point) -> bool {
        self.adjacency.contains_key(&p)
    }

    pub fn contains_edge(&self, a: Point, b: Point) -> bool {
        self.adjacency.get(&a).is_some_and(|n| n.contains(&b))
    }

    /// Insert a node; returns false if it was already present.
    pub fn add_node(&mut self, p: Point) -> bool {
        if self.adjacency.contains_key(&p) {
            return false;
        }
        self.adjacency.insert(p, BTreeSet::new());
        true
    }

    /// Remove a node and every edge touching it; returns false if absent.
    pub fn remove_node(&mut self, p: Point) -> bool {
        let Some(neighbors) = self.adjacency.remove(&p) else {
            return false;
        };
        for n in neighbors {
            if let Some(set) = self.adjacency.get_mut(&n) {
                set.remove(&p);
            }
        }
        true
    }

    /// Insert the unordered edge `a`-`b`, adding missing endpoints.
    ///
    /// Returns true if the edge is new. Self-loops are ignored.
    pub fn add_edge(&mut self, a: Point, b: Point) -> bool {
        if a == b {
            return false;
        }
        let inserted = self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
        inserted
    }

    /// Neighbours of `p` in point order; empty if `p` is not a node.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        self.adjacency.get(&p).into_iter().flatten().copied()
    }

    pub fn degree(&self, p: Point) -> usize {
        self.adjacency.get(&p).map_or(0, BTreeSet::len)
    }

    /// All nodes in point order.
    pub fn nodes(&self) -> impl Iterator<Item = Point> + '_ {
        self.adjacency.keys().copied()
    }

    /// Every edge once, as `(a, b)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(&a, set)| set.range(a..).map(move |&b| (a, b)))
            .filter(|(a, b)| a != b)
    }
}
