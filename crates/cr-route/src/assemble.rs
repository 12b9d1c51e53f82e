//! Route assembly: turn requests into per-hop coarse paths, and total the
//! track length they use.

use std::collections::HashSet;

use cr_core::{Point, Real};
use cr_graph::SearchGraph;
use cr_layout::{ComponentKind, Layout, PortAssignment, RouteRequest};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{RouteError, RouteResult};
use crate::planner::{Heuristic, best_hop};

/// A sequence of search-graph nodes from one component corner to another.
/// Empty means the hop could not be routed.
pub type CoarsePath = Vec<Point>;

/// Options for `assemble_routes`.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Suffix stripped from the last name of each request.
    pub marker: String,
    pub heuristic: Heuristic,
    /// Plan requests on the rayon pool.
    pub parallel: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            marker: "*".to_string(),
            heuristic: Heuristic::default(),
            parallel: true,
        }
    }
}

/// One hop of a route: `from` and `to` are component names.
#[derive(Debug, Clone, PartialEq)]
pub struct HopRoute {
    pub from: String,
    pub to: String,
    pub path: CoarsePath,
    /// Planner cost, absent when the hop is unroutable.
    pub cost: Option<Real>,
}

impl HopRoute {
    pub fn is_routed(&self) -> bool {
        !self.path.is_empty()
    }
}

/// A fully resolved request: inflow port, the request's names, outflow port.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledRoute {
    pub names: Vec<String>,
    pub hops: Vec<HopRoute>,
}

impl AssembledRoute {
    /// A route fails as a whole if any of its hops failed.
    pub fn is_failed(&self) -> bool {
        self.hops.iter().any(|h| !h.is_routed())
    }

    pub fn failed_hops(&self) -> impl Iterator<Item = &HopRoute> {
        self.hops.iter().filter(|h| !h.is_routed())
    }

    pub fn paths(&self) -> Vec<CoarsePath> {
        self.hops.iter().map(|h| h.path.clone()).collect()
    }
}

/// `[nearest_in(head), names..., nearest_out(tail)]`, with the marker
/// stripped from the last request name.
pub fn resolve_names(
    request: &RouteRequest,
    ports: &PortAssignment,
    marker: &str,
) -> RouteResult<Vec<String>> {
    let (Some(head), Some(tail)) = (request.head(), request.tail(marker)) else {
        return Ok(Vec::new());
    };
    let inflow = ports
        .nearest_in(head)
        .ok_or_else(|| RouteError::PortNotAssigned {
            name: head.to_string(),
            kind: ComponentKind::InflowPort,
        })?;
    let outflow = ports
        .nearest_out(tail)
        .ok_or_else(|| RouteError::PortNotAssigned {
            name: tail.to_string(),
            kind: ComponentKind::OutflowPort,
        })?;

    let mut names = Vec::with_capacity(request.names.len() + 2);
    names.push(inflow.to_string());
    names.extend(request.stripped_names(marker).map(str::to_string));
    names.push(outflow.to_string());
    Ok(names)
}

fn assemble_one(
    request: &RouteRequest,
    ports: &PortAssignment,
    layout: &Layout,
    graph: &SearchGraph,
    options: &AssembleOptions,
) -> RouteResult<AssembledRoute> {
    let names = resolve_names(request, ports, &options.marker)?;
    let mut hops = Vec::with_capacity(names.len().saturating_sub(1));

    for pair in names.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        let hop = match best_hop(layout, from, to, graph, options.heuristic) {
            Ok(hop) => HopRoute {
                from: from.clone(),
                to: to.clone(),
                path: hop.path,
                cost: Some(hop.cost),
            },
            Err(RouteError::UnroutableHop { .. }) => {
                warn!(from = %from, to = %to, "unroutable hop");
                HopRoute {
                    from: from.clone(),
                    to: to.clone(),
                    path: Vec::new(),
                    cost: None,
                }
            }
            Err(e) => return Err(e),
        };
        hops.push(hop);
    }

    Ok(AssembledRoute { names, hops })
}

/// Plan every request, preserving request and hop order.
///
/// Lookup failures abort; unroutable hops are recorded as empty paths and
/// the remaining hops and requests are still planned.
pub fn assemble_routes(
    requests: &[RouteRequest],
    ports: &PortAssignment,
    layout: &Layout,
    graph: &SearchGraph,
    options: &AssembleOptions,
) -> RouteResult<Vec<AssembledRoute>> {
    let plan = |request: &RouteRequest| assemble_one(request, ports, layout, graph, options);
    let routes: Vec<AssembledRoute> = if options.parallel {
        requests.par_iter().map(plan).collect::<RouteResult<_>>()?
    } else {
        requests.iter().map(plan).collect::<RouteResult<_>>()?
    };

    debug!(
        requests = routes.len(),
        failed = routes.iter().filter(|r| r.is_failed()).count(),
        "routes assembled"
    );
    Ok(routes)
}

/// Dedup key for shared track segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKey {
    /// `a -> b` and `b -> a` are billed separately.
    #[default]
    Ordered,
    /// A segment is billed once whichever direction it is traversed.
    Unordered,
}

impl EdgeKey {
    fn key(self, a: Point, b: Point) -> (Point, Point) {
        match self {
            Self::Unordered if b < a => (b, a),
            _ => (a, b),
        }
    }
}

/// Total Euclidean length of every route, billing each ordered segment once.
pub fn total_length(routes: &[Vec<CoarsePath>]) -> Real {
    total_length_with(routes, EdgeKey::Ordered)
}

/// Total Euclidean length of every route with the given dedup key.
pub fn total_length_with(routes: &[Vec<CoarsePath>], dedup: EdgeKey) -> Real {
    let mut seen: HashSet<(Point, Point)> = HashSet::new();
    let mut total = 0.0;
    for path in routes.iter().flatten() {
        for w in path.windows(2) {
            if seen.insert(dedup.key(w[0], w[1])) {
                total += w[0].distance(w[1]);
            }
        }
    }
    total
}
