//! Smoke tests for the cr-app service layer, driven through files.

use std::path::PathBuf;

use cr_app::{
    AppError, RouteReport, graph_file, load_config, mesh_file, route_files, validate_files,
};

const LAYOUT: &str = "\
d1\t20\t20\t10\t10
d2\t50\t50\t10\t10
d3\t50\t20\t8\t8
f1\t5\t35\t4\t4
f2\t35\t5\t4\t4
w1\t65\t35\t4\t4
w2\t35\t65\t4\t4
";

const REQUESTS: &str = "d1\td2*\nd3\td2\td1\n";

fn write_fixture(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("cr_app_{}_{}", std::process::id(), name));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn route_files_end_to_end() {
    let layout = write_fixture("layout.tsv", LAYOUT);
    let requests = write_fixture("requests.tsv", REQUESTS);
    let config_path = write_fixture(
        "config.yaml",
        "planner:\n  heuristic: euclidean\ndetail:\n  divisions: 3\nports:\n  reuse_limit: 2\n",
    );
    let config = load_config(Some(&config_path)).unwrap();

    let report = route_files(&layout, &requests, &config).unwrap();
    assert_eq!(report.routes.len(), 2);
    assert_eq!(report.divisions, 3);
    assert_eq!(report.failed_count(), 0);
    assert_eq!(report.routes[0].names.first().map(String::as_str), Some("f1"));
    assert_eq!(report.routes[1].names.len(), 5);
    for req in &report.routes {
        for hop in &req.hops {
            assert_eq!(hop.detailed.first(), hop.coarse.first());
            assert_eq!(hop.detailed.last(), hop.coarse.last());
            assert!(hop.cost.is_some());
            assert!(hop.error.is_none());
        }
    }

    let out = std::env::temp_dir().join(format!("cr_app_{}_report.json", std::process::id()));
    report.write_json(&out).unwrap();
    let content = std::fs::read_to_string(&out).unwrap();
    let back: RouteReport = serde_json::from_str(&content).unwrap();
    assert_eq!(back.routes.len(), report.routes.len());
    assert!((back.total_length - report.total_length).abs() < 1e-9);

    for path in [layout, requests, config_path, out] {
        let _ = std::fs::remove_file(path);
    }
}

#[test]
fn mesh_and_graph_commands() {
    let layout = write_fixture("mesh_layout.tsv", LAYOUT);
    let config = load_config(None).unwrap();

    let mesh = mesh_file(&layout, &config).unwrap();
    assert!(mesh.starts_with("32 32\n"));
    let input = cr_mesh::parse_input(&mesh).unwrap();
    assert_eq!(input.vertices.len(), 32);

    let summary = graph_file(&layout, &config).unwrap();
    assert_eq!(summary.components, 7);
    assert!(summary.edges > 0);

    let _ = std::fs::remove_file(layout);
}

#[test]
fn validate_reports_counts_and_errors() {
    let layout = write_fixture("validate_layout.tsv", LAYOUT);
    let requests = write_fixture("validate_requests.tsv", REQUESTS);
    let bad = write_fixture("validate_bad.tsv", "d1\td8\n");
    let config = load_config(None).unwrap();

    let summary = validate_files(&layout, Some(&requests), &config).unwrap();
    assert_eq!(summary.devices, 3);
    assert_eq!(summary.inflow_ports, 2);
    assert_eq!(summary.outflow_ports, 2);
    assert_eq!(summary.requests, 2);

    let err = validate_files(&layout, Some(&bad), &config).unwrap_err();
    assert!(matches!(err, AppError::Layout(_)));
    assert!(err.to_string().contains("d8"));

    for path in [layout, requests, bad] {
        let _ = std::fs::remove_file(path);
    }
}
