//! End-to-end routing: layout → triangulation → search graph → routes.

use std::path::Path;
use std::time::Instant;

use cr_graph::{MidpointProvenance, SearchGraph, build_search_graph};
use cr_layout::{
    ChipBounds, ComponentKind, Layout, RouteRequest, assign_ports, load_layout, load_requests,
    obstacle_edges, terminal_corners, triangulation_input, validate_requests,
};
use cr_mesh::{SpadeTriangulator, Triangulation, TriangulationInput, Triangulator, format_input};
use cr_route::{
    AssembledRoute, CoarsePath, RouteError, assemble_routes, path_length, refine,
    total_length_with,
};
use tracing::{info, warn};

use crate::config::RouteConfig;
use crate::error::AppResult;
use crate::report::{GraphSummary, HopReport, RequestReport, RouteReport};

/// A layout with its triangulation and search graph built.
///
/// Read-only once built; every request is planned against the same graph.
#[derive(Debug, Clone)]
pub struct PreparedLayout {
    pub layout: Layout,
    pub chip: ChipBounds,
    pub mesh: Triangulation,
    pub graph: SearchGraph,
    pub provenance: MidpointProvenance,
}

impl PreparedLayout {
    pub fn summary(&self) -> GraphSummary {
        let corners = terminal_corners(&self.layout);
        GraphSummary {
            components: self.layout.len(),
            triangles: self.mesh.triangles().len(),
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
            connected_corners: corners
                .iter()
                .filter(|c| self.graph.contains_node(**c))
                .count(),
        }
    }
}

/// Counts reported by `validate_files`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub devices: usize,
    pub inflow_ports: usize,
    pub outflow_ports: usize,
    pub requests: usize,
}

/// Constraint input handed to the triangulation engine.
pub fn mesh_input(layout: &Layout, config: &RouteConfig) -> AppResult<TriangulationInput> {
    config.validate()?;
    let input = triangulation_input(layout, &config.chip);
    input.validate()?;
    Ok(input)
}

/// Triangulate the layout and build its search graph.
pub fn prepare(layout: Layout, config: &RouteConfig) -> AppResult<PreparedLayout> {
    let started = Instant::now();
    let input = mesh_input(&layout, config)?;
    let mesh = SpadeTriangulator::new().triangulate(&input)?;
    let (graph, provenance) = build_search_graph(
        &mesh,
        &obstacle_edges(&layout, &config.chip),
        &terminal_corners(&layout),
    )?;

    let prepared = PreparedLayout {
        layout,
        chip: config.chip,
        mesh,
        graph,
        provenance,
    };
    let summary = prepared.summary();
    info!(
        components = summary.components,
        triangles = summary.triangles,
        nodes = summary.nodes,
        edges = summary.edges,
        elapsed_s = started.elapsed().as_secs_f64(),
        "search graph ready"
    );
    Ok(prepared)
}

fn hop_reports(
    route: &AssembledRoute,
    provenance: &MidpointProvenance,
    divisions: usize,
) -> AppResult<Vec<HopReport>> {
    route
        .hops
        .iter()
        .map(|hop| -> AppResult<HopReport> {
            let detailed = refine(provenance, &hop.path, divisions)?;
            let error = (!hop.is_routed()).then(|| {
                RouteError::UnroutableHop {
                    from: hop.from.clone(),
                    to: hop.to.clone(),
                }
                .to_string()
            });
            Ok(HopReport {
                from: hop.from.clone(),
                to: hop.to.clone(),
                coarse: hop.path.clone(),
                detailed_length: path_length(&detailed),
                detailed,
                cost: hop.cost,
                error,
            })
        })
        .collect()
}

/// Plan, total and refine every request against a prepared layout.
pub fn route(
    prepared: &PreparedLayout,
    requests: &[RouteRequest],
    config: &RouteConfig,
) -> AppResult<RouteReport> {
    config.validate()?;
    let started = Instant::now();
    let marker = config.requests.ignore_marker.as_str();
    validate_requests(&prepared.layout, requests, marker)?;

    let ports = assign_ports(&prepared.layout, requests, marker, config.ports.reuse_limit)?;
    let routes = assemble_routes(
        requests,
        &ports,
        &prepared.layout,
        &prepared.graph,
        &config.assemble_options(),
    )?;

    let coarse: Vec<Vec<CoarsePath>> = routes.iter().map(AssembledRoute::paths).collect();
    let total_length = total_length_with(&coarse, config.length.dedup);

    let mut reports = Vec::with_capacity(routes.len());
    for (request, route) in requests.iter().zip(&routes) {
        for hop in route.failed_hops() {
            warn!(from = %hop.from, to = %hop.to, "request has an unroutable hop");
        }
        reports.push(RequestReport {
            request: request.names.clone(),
            names: route.names.clone(),
            failed: route.is_failed(),
            hops: hop_reports(route, &prepared.provenance, config.detail.divisions)?,
        });
    }

    let report = RouteReport {
        heuristic: config.planner.heuristic,
        divisions: config.detail.divisions,
        dedup: config.length.dedup,
        graph: prepared.summary(),
        total_length,
        routes: reports,
    };
    info!(
        requests = report.routes.len(),
        failed = report.failed_count(),
        total_length,
        elapsed_s = started.elapsed().as_secs_f64(),
        "routing complete"
    );
    Ok(report)
}

/// Load a layout and request file and route them.
pub fn route_files(
    layout_path: &Path,
    requests_path: &Path,
    config: &RouteConfig,
) -> AppResult<RouteReport> {
    let layout = load_layout(layout_path)?;
    let requests = load_requests(requests_path)?;
    let prepared = prepare(layout, config)?;
    route(&prepared, &requests, config)
}

/// Exchange-format triangulation input for a layout file.
pub fn mesh_file(layout_path: &Path, config: &RouteConfig) -> AppResult<String> {
    let layout = load_layout(layout_path)?;
    Ok(format_input(&mesh_input(&layout, config)?))
}

/// Search-graph statistics for a layout file.
pub fn graph_file(layout_path: &Path, config: &RouteConfig) -> AppResult<GraphSummary> {
    let layout = load_layout(layout_path)?;
    Ok(prepare(layout, config)?.summary())
}

/// Parse and check a layout, and optionally a request file against it.
pub fn validate_files(
    layout_path: &Path,
    requests_path: Option<&Path>,
    config: &RouteConfig,
) -> AppResult<ValidationSummary> {
    let layout = load_layout(layout_path)?;
    let mut summary = ValidationSummary {
        devices: layout.of_kind(ComponentKind::Device).count(),
        inflow_ports: layout.of_kind(ComponentKind::InflowPort).count(),
        outflow_ports: layout.of_kind(ComponentKind::OutflowPort).count(),
        requests: 0,
    };
    if let Some(path) = requests_path {
        let requests = load_requests(path)?;
        validate_requests(&layout, &requests, &config.requests.ignore_marker)?;
        summary.requests = requests.len();
    }
    Ok(summary)
}
