use clap::{Parser, Subcommand};
use cr_app::{
    AppError, AppResult, RouteReport, graph_file, load_config, mesh_file, route_files,
    validate_files,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cr-cli")]
#[command(about = "ChipRoute CLI - route flow channels between chip components", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route every request and print (or write) the JSON report
    Route {
        /// Path to the component layout file (TSV)
        layout_path: PathBuf,
        /// Path to the route request file (TSV)
        requests_path: PathBuf,
        /// Routing configuration (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output JSON file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the triangulation input for a layout
    Mesh {
        /// Path to the component layout file (TSV)
        layout_path: PathBuf,
        /// Routing configuration (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Build the search graph and print its statistics
    Graph {
        /// Path to the component layout file (TSV)
        layout_path: PathBuf,
        /// Routing configuration (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a layout, and optionally a request file against it
    Validate {
        /// Path to the component layout file (TSV)
        layout_path: PathBuf,
        /// Path to the route request file (TSV)
        requests_path: Option<PathBuf>,
        /// Routing configuration (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing; logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Route {
            layout_path,
            requests_path,
            config,
            output,
        } => cmd_route(
            &layout_path,
            &requests_path,
            config.as_deref(),
            output.as_deref(),
        ),
        Commands::Mesh {
            layout_path,
            config,
            output,
        } => cmd_mesh(&layout_path, config.as_deref(), output.as_deref()),
        Commands::Graph {
            layout_path,
            config,
        } => cmd_graph(&layout_path, config.as_deref()),
        Commands::Validate {
            layout_path,
            requests_path,
            config,
        } => cmd_validate(&layout_path, requests_path.as_deref(), config.as_deref()),
    }
}

fn cmd_route(
    layout_path: &Path,
    requests_path: &Path,
    config_path: Option<&Path>,
    output: Option<&Path>,
) -> AppResult<()> {
    let config = load_config(config_path)?;
    info!(
        layout = %layout_path.display(),
        requests = %requests_path.display(),
        "routing"
    );
    let report = route_files(layout_path, requests_path, &config)?;

    match output {
        Some(path) => {
            report.write_json(path)?;
            println!("✓ Report written to {}", path.display());
            print_route_summary(&report);
        }
        None => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn print_route_summary(report: &RouteReport) {
    println!("  Requests: {}", report.routes.len());
    println!("  Failed: {}", report.failed_count());
    println!("  Total length: {:.3}", report.total_length);
    for (i, req) in report.routes.iter().enumerate() {
        for hop in req.hops.iter().filter(|h| h.error.is_some()) {
            println!("  ✗ request {}: {} -> {}", i, hop.from, hop.to);
        }
    }
}

fn cmd_mesh(layout_path: &Path, config_path: Option<&Path>, output: Option<&Path>) -> AppResult<()> {
    let config = load_config(config_path)?;
    let content = mesh_file(layout_path, &config)?;
    match output {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| AppError::FileWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
            println!("✓ Triangulation input written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn cmd_graph(layout_path: &Path, config_path: Option<&Path>) -> AppResult<()> {
    let config = load_config(config_path)?;
    let summary = graph_file(layout_path, &config)?;
    println!("Search graph for {}:", layout_path.display());
    println!("  Components: {}", summary.components);
    println!("  Triangles: {}", summary.triangles);
    println!("  Nodes: {}", summary.nodes);
    println!("  Edges: {}", summary.edges);
    println!("  Connected corners: {}", summary.connected_corners);
    Ok(())
}

fn cmd_validate(
    layout_path: &Path,
    requests_path: Option<&Path>,
    config_path: Option<&Path>,
) -> AppResult<()> {
    println!("Validating layout: {}", layout_path.display());
    let config = load_config(config_path)?;
    let summary = validate_files(layout_path, requests_path, &config)?;
    println!(
        "  {} devices, {} inflow ports, {} outflow ports",
        summary.devices, summary.inflow_ports, summary.outflow_ports
    );
    if requests_path.is_some() {
        println!("  {} requests", summary.requests);
    }
    println!("✓ Input is valid");
    Ok(())
}
