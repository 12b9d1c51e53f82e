//! A* path planner over the search graph, and best corner-pair selection.
//!
//! Edge cost is Euclidean length. The frontier is a min-heap on
//! `cost + heuristic`; equal priorities pop in point order (x, then y).
//! The search stops when the goal is popped, not when it is first reached.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use cr_core::{Point, Real};
use cr_graph::SearchGraph;
use cr_layout::Layout;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{RouteError, RouteResult};

/// Distance estimate from a node to the goal.
///
/// `Manhattan` can overestimate a Euclidean-cost path, so A* may return a
/// slightly longer route than optimal. `Euclidean` never overestimates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
}

impl Heuristic {
    pub fn estimate(self, from: Point, goal: Point) -> Real {
        match self {
            Self::Manhattan => from.manhattan(goal),
            Self::Euclidean => from.distance(goal),
        }
    }
}

/// Predecessor map: the start maps to `None`, every other reached node to
/// the node it was reached from.
pub type Predecessors = HashMap<Point, Option<Point>>;

/// Output of one A* run.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub came_from: Predecessors,
    pub cost_so_far: HashMap<Point, Real>,
}

impl SearchResult {
    /// Accumulated cost to `p`, if it was reached.
    pub fn cost(&self, p: Point) -> Option<Real> {
        self.cost_so_far.get(&p).copied()
    }

    pub fn reached(&self, p: Point) -> bool {
        self.came_from.contains_key(&p)
    }
}

#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    priority: Real,
    cost: Real,
    point: Point,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    // reversed: BinaryHeap is a max-heap
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.point.cmp(&self.point))
    }
}

/// Run A* from `start` to `goal`.
///
/// A start or goal that is not a graph node is not an error: the search
/// simply never reaches the goal.
pub fn shortest_path(
    graph: &SearchGraph,
    start: Point,
    goal: Point,
    heuristic: Heuristic,
) -> SearchResult {
    let mut frontier = BinaryHeap::new();
    let mut result = SearchResult::default();
    result.came_from.insert(start, None);
    result.cost_so_far.insert(start, 0.0);
    frontier.push(FrontierEntry {
        priority: 0.0,
        cost: 0.0,
        point: start,
    });

    let mut expanded = 0usize;
    while let Some(FrontierEntry {
        cost, point: current, ..
    }) = frontier.pop()
    {
        if current == goal {
            break;
        }
        // superseded by a cheaper entry for the same node
        if result.cost(current).is_some_and(|best| cost > best) {
            continue;
        }
        expanded += 1;

        for next in graph.neighbors(current) {
            let new_cost = cost + current.distance(next);
            if result.cost(next).is_none_or(|old| new_cost < old) {
                result.cost_so_far.insert(next, new_cost);
                result.came_from.insert(next, Some(current));
                frontier.push(FrontierEntry {
                    priority: new_cost + heuristic.estimate(next, goal),
                    cost: new_cost,
                    point: next,
                });
            }
        }
    }

    trace!(
        %start,
        %goal,
        expanded,
        reached = result.reached(goal),
        "a* search"
    );
    result
}

/// Walk predecessors back from `goal` to `start`.
///
/// Returns `[start, ..., goal]`, or an empty path when `goal` was never
/// reached. `start == goal` yields `[start]`.
pub fn reconstruct_path(came_from: &Predecessors, start: Point, goal: Point) -> Vec<Point> {
    if !came_from.contains_key(&goal) {
        return Vec::new();
    }

    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        // a chain longer than the map means it never reaches start
        if path.len() > came_from.len() {
            return Vec::new();
        }
        match came_from.get(&current) {
            Some(Some(prev)) => {
                current = *prev;
                path.push(current);
            }
            _ => return Vec::new(),
        }
    }
    path.reverse();
    path
}

/// The cheapest route between two components.
#[derive(Debug, Clone, PartialEq)]
pub struct Hop {
    /// Corner of the source component the path leaves from.
    pub start: Point,
    /// Corner of the target component the path arrives at.
    pub goal: Point,
    pub path: Vec<Point>,
    pub cost: Real,
}

/// Try every corner of `from` against every corner of `to` and keep the
/// cheapest pair that connects. Ties keep the first pair found, in corner
/// order.
pub fn best_hop(
    layout: &Layout,
    from: &str,
    to: &str,
    graph: &SearchGraph,
    heuristic: Heuristic,
) -> RouteResult<Hop> {
    let lookup = |name: &str| {
        layout.get(name).ok_or_else(|| RouteError::ComponentNotFound {
            name: name.to_string(),
        })
    };
    let source = lookup(from)?;
    let target = lookup(to)?;

    let mut best: Option<Hop> = None;
    for start in source.corners() {
        for goal in target.corners() {
            let search = shortest_path(graph, start, goal, heuristic);
            let Some(cost) = search.cost(goal) else {
                continue;
            };
            if best.as_ref().is_none_or(|hop| cost < hop.cost) {
                best = Some(Hop {
                    start,
                    goal,
                    path: reconstruct_path(&search.came_from, start, goal),
                    cost,
                });
            }
        }
    }

    match best {
        Some(hop) => {
            debug!(from, to, cost = hop.cost, nodes = hop.path.len(), "best hop");
            Ok(hop)
        }
        None => Err(RouteError::UnroutableHop {
            from: from.to_string(),
            to: to.to_string(),
        }),
    }
}

/// Sum of Euclidean segment lengths along a path.
pub fn path_length(path: &[Point]) -> Real {
    path.windows(2).map(|w| w[0].distance(w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cr_layout::{Component, Layout};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// Medial graph of a 2x2 square split into four triangles at (1,1).
    fn fan_graph() -> SearchGraph {
        let mut g = SearchGraph::new();
        let tris = [
            [p(1.0, 0.0), p(1.5, 0.5), p(0.5, 0.5)],
            [p(2.0, 1.0), p(1.5, 1.5), p(1.5, 0.5)],
            [p(1.0, 2.0), p(0.5, 1.5), p(1.5, 1.5)],
            [p(0.0, 1.0), p(0.5, 0.5), p(0.5, 1.5)],
        ];
        for m in tris {
            g.add_edge(m[0], m[1]);
            g.add_edge(m[1], m[2]);
            g.add_edge(m[2], m[0]);
        }
        g
    }

    #[test]
    fn crosses_the_fan_through_the_lower_spokes() {
        let g = fan_graph();
        let (s, t) = (p(0.0, 1.0), p(2.0, 1.0));
        let search = shortest_path(&g, s, t, Heuristic::Manhattan);
        let path = reconstruct_path(&search.came_from, s, t);

        // both spoke routes cost 1 + sqrt(2); the lower one pops first
        assert_eq!(
            path,
            vec![p(0.0, 1.0), p(0.5, 0.5), p(1.5, 0.5), p(2.0, 1.0)]
        );
        let cost = search.cost(t).unwrap();
        assert!((cost - (1.0 + 2f64.sqrt())).abs() < 1e-12);
        assert!((cost - path_length(&path)).abs() < 1e-12);
    }

    #[test]
    fn goal_improved_after_first_discovery() {
        // X and Y both sit at priority 20; X pops first (smaller point) and
        // reaches G at cost 20, then Y reaches it at 5 + sqrt(125)
        let (s, x, y, goal) = (p(0.0, 0.0), p(0.0, 10.0), p(5.0, 0.0), p(10.0, 10.0));
        let mut g = SearchGraph::new();
        g.add_edge(s, x);
        g.add_edge(x, goal);
        g.add_edge(s, y);
        g.add_edge(y, goal);

        let search = shortest_path(&g, s, goal, Heuristic::Manhattan);
        let cost = search.cost(goal).unwrap();
        assert!((cost - (5.0 + 125f64.sqrt())).abs() < 1e-12);
        assert_eq!(reconstruct_path(&search.came_from, s, goal), vec![s, y, goal]);
    }

    #[test]
    fn start_equals_goal() {
        let g = fan_graph();
        let s = p(1.0, 0.0);
        let search = shortest_path(&g, s, s, Heuristic::Manhattan);
        assert_eq!(reconstruct_path(&search.came_from, s, s), vec![s]);
        assert_eq!(search.cost(s), Some(0.0));
    }

    #[test]
    fn unreachable_goal_gives_empty_path() {
        let mut g = fan_graph();
        g.add_edge(p(10.0, 10.0), p(11.0, 10.0));
        let (s, t) = (p(0.0, 1.0), p(11.0, 10.0));
        let search = shortest_path(&g, s, t, Heuristic::Euclidean);
        assert!(!search.reached(t));
        assert!(reconstruct_path(&search.came_from, s, t).is_empty());
    }

    #[test]
    fn start_outside_graph() {
        let g = fan_graph();
        let search = shortest_path(&g, p(9.0, 9.0), p(1.0, 0.0), Heuristic::Manhattan);
        assert_eq!(search.came_from.len(), 1);
        assert!(search.cost(p(1.0, 0.0)).is_none());
    }

    #[test]
    fn empty_graph_has_no_path() {
        let g = SearchGraph::new();
        let search = shortest_path(&g, p(0.0, 0.0), p(1.0, 1.0), Heuristic::Manhattan);
        assert!(reconstruct_path(&search.came_from, p(0.0, 0.0), p(1.0, 1.0)).is_empty());
    }

    #[test]
    fn reconstruct_rejects_broken_chain() {
        let mut came_from = Predecessors::new();
        came_from.insert(p(2.0, 0.0), Some(p(1.0, 0.0)));
        came_from.insert(p(1.0, 0.0), None);
        assert!(reconstruct_path(&came_from, p(0.0, 0.0), p(2.0, 0.0)).is_empty());

        let mut cyclic = Predecessors::new();
        cyclic.insert(p(1.0, 0.0), Some(p(2.0, 0.0)));
        cyclic.insert(p(2.0, 0.0), Some(p(1.0, 0.0)));
        assert!(reconstruct_path(&cyclic, p(0.0, 0.0), p(1.0, 0.0)).is_empty());
    }

    #[test]
    fn frontier_orders_by_priority_then_point() {
        let mut heap = BinaryHeap::new();
        for (priority, point) in [(2.0, p(0.0, 0.0)), (1.0, p(5.0, 0.0)), (1.0, p(3.0, 9.0))] {
            heap.push(FrontierEntry {
                priority,
                cost: 0.0,
                point,
            });
        }
        let order: Vec<Point> = std::iter::from_fn(|| heap.pop().map(|e| e.point)).collect();
        assert_eq!(order, vec![p(3.0, 9.0), p(5.0, 0.0), p(0.0, 0.0)]);
    }

    fn corridor() -> (Layout, SearchGraph) {
        // two 2x2 components; only a.rt (1,1) and b.lt (4,1) are connected
        let a = Component::new("d1", p(0.0, 0.0), 2.0, 2.0).unwrap();
        let b = Component::new("d2", p(5.0, 0.0), 2.0, 2.0).unwrap();
        let layout = Layout::new(vec![a, b]).unwrap();
        let mut g = SearchGraph::new();
        g.add_edge(p(1.0, 1.0), p(2.5, 1.0));
        g.add_edge(p(2.5, 1.0), p(4.0, 1.0));
        g.add_edge(p(1.0, -1.0), p(2.5, -3.0));
        g.add_edge(p(2.5, -3.0), p(4.0, -1.0));
        (layout, g)
    }

    #[test]
    fn best_hop_picks_cheapest_corner_pair() {
        let (layout, g) = corridor();
        let hop = best_hop(&layout, "d1", "d2", &g, Heuristic::Manhattan).unwrap();
        assert_eq!(hop.start, p(1.0, 1.0));
        assert_eq!(hop.goal, p(4.0, 1.0));
        assert_eq!(hop.path, vec![p(1.0, 1.0), p(2.5, 1.0), p(4.0, 1.0)]);
        assert!((hop.cost - 3.0).abs() < 1e-12);
    }

    #[test]
    fn best_hop_unroutable_names_both_ends() {
        let (layout, _) = corridor();
        let err = best_hop(&layout, "d1", "d2", &SearchGraph::new(), Heuristic::Manhattan)
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::UnroutableHop {
                from: "d1".into(),
                to: "d2".into()
            }
        );
    }

    #[test]
    fn best_hop_unknown_component() {
        let (layout, g) = corridor();
        let err = best_hop(&layout, "d1", "d7", &g, Heuristic::Manhattan).unwrap_err();
        assert_eq!(err, RouteError::ComponentNotFound { name: "d7".into() });
    }
}
