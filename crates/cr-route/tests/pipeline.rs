//! End-to-end planning: layout → triangulation → search graph → routes.

use cr_core::Point;
use cr_graph::build_search_graph;
use cr_layout::{
    ChipBounds, assign_ports, obstacle_edges, parse_layout, parse_requests, terminal_corners,
    triangulation_input,
};
use cr_mesh::{SpadeTriangulator, Triangulation, Triangulator};
use cr_route::{
    AssembleOptions, Heuristic, assemble_routes, path_length, reconstruct_path, refine,
    shortest_path, total_length,
};

const LAYOUT: &str = "\
d1\t20\t20\t10\t10
d2\t50\t50\t10\t10
f1\t5\t35\t4\t4
w1\t65\t35\t4\t4
";

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn fan_square_crossing() {
    let mesh = Triangulation::from_parts(
        vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(1.0, 1.0)],
        vec![[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]],
    )
    .unwrap();
    let (graph, _) = build_search_graph(&mesh, &[], &[]).unwrap();

    let (s, t) = (p(0.0, 1.0), p(2.0, 1.0));
    let search = shortest_path(&graph, s, t, Heuristic::Manhattan);
    let path = reconstruct_path(&search.came_from, s, t);

    assert_eq!(path.len(), 4);
    assert_eq!(path[0], s);
    assert_eq!(path[3], t);
    let lower = [p(0.5, 0.5), p(1.5, 0.5)];
    let upper = [p(0.5, 1.5), p(1.5, 1.5)];
    assert!(path[1..3] == lower || path[1..3] == upper);
    assert!((path_length(&path) - (1.0 + 2f64.sqrt())).abs() < 1e-12);
}

#[test]
fn routes_open_layout() {
    let layout = parse_layout(LAYOUT).unwrap();
    let chip = ChipBounds::default();
    let mesh = SpadeTriangulator::new()
        .triangulate(&triangulation_input(&layout, &chip))
        .unwrap();
    let (graph, provenance) = build_search_graph(
        &mesh,
        &obstacle_edges(&layout, &chip),
        &terminal_corners(&layout),
    )
    .unwrap();
    assert!(!graph.is_empty());

    let requests = parse_requests("d1\td2*\n").unwrap();
    let ports = assign_ports(&layout, &requests, "*", 1).unwrap();
    let options = AssembleOptions {
        heuristic: Heuristic::Euclidean,
        ..AssembleOptions::default()
    };
    let routes = assemble_routes(&requests, &ports, &layout, &graph, &options).unwrap();

    assert_eq!(routes.len(), 1);
    let route = &routes[0];
    assert_eq!(route.names, vec!["f1", "d1", "d2", "w1"]);
    assert!(!route.is_failed());

    for hop in &route.hops {
        let from = layout.get(&hop.from).unwrap();
        let to = layout.get(&hop.to).unwrap();
        let first = hop.path.first().copied().unwrap();
        let last = hop.path.last().copied().unwrap();
        assert!(from.corners().contains(&first));
        assert!(to.corners().contains(&last));

        let cost = hop.cost.unwrap();
        assert!((cost - path_length(&hop.path)).abs() < 1e-9);

        let refined = refine(&provenance, &hop.path, 3).unwrap();
        assert_eq!(refined.len(), hop.path.len());
        assert_eq!(refined.first(), hop.path.first());
        assert_eq!(refined.last(), hop.path.last());
    }

    let paths = vec![route.paths()];
    let total = total_length(&paths);
    let sum: f64 = route.hops.iter().filter_map(|h| h.cost).sum();
    assert!(total > 0.0);
    assert!(total <= sum + 1e-9);
}

#[test]
fn sequential_and_parallel_agree() {
    let layout = parse_layout(LAYOUT).unwrap();
    let chip = ChipBounds::default();
    let mesh = SpadeTriangulator::new()
        .triangulate(&triangulation_input(&layout, &chip))
        .unwrap();
    let (graph, _) = build_search_graph(
        &mesh,
        &obstacle_edges(&layout, &chip),
        &terminal_corners(&layout),
    )
    .unwrap();

    let requests = parse_requests("d1\td2\nd2\td1*\n").unwrap();
    let ports = assign_ports(&layout, &requests, "*", 2).unwrap();

    let sequential = AssembleOptions {
        parallel: false,
        ..AssembleOptions::default()
    };
    let a = assemble_routes(&requests, &ports, &layout, &graph, &sequential).unwrap();
    let b = assemble_routes(&requests, &ports, &layout, &graph, &AssembleOptions::default())
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(a[1].names, vec!["f1", "d2", "d1", "w1"]);
}

#[test]
fn empty_graph_marks_every_hop_failed() {
    let layout = parse_layout(LAYOUT).unwrap();
    let requests = parse_requests("d1\td2\n").unwrap();
    let ports = assign_ports(&layout, &requests, "*", 1).unwrap();
    let graph = cr_graph::SearchGraph::new();

    let routes =
        assemble_routes(&requests, &ports, &layout, &graph, &AssembleOptions::default()).unwrap();
    assert_eq!(routes[0].failed_hops().count(), 3);
    assert_eq!(total_length(&[routes[0].paths()]), 0.0);
}
