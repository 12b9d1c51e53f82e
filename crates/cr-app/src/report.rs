//! JSON summary of a routing run.

use std::path::Path;

use cr_core::{Point, Real};
use cr_route::{EdgeKey, Heuristic};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Search-graph statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub components: usize,
    pub triangles: usize,
    pub nodes: usize,
    pub edges: usize,
    /// Component corners that made it into the graph.
    pub connected_corners: usize,
}

/// One hop between two named components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopReport {
    pub from: String,
    pub to: String,
    pub coarse: Vec<Point>,
    pub detailed: Vec<Point>,
    pub cost: Option<Real>,
    pub detailed_length: Real,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One route request, expanded with its ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestReport {
    /// Names as written in the request file.
    pub request: Vec<String>,
    /// Inflow port, request names, outflow port.
    pub names: Vec<String>,
    pub failed: bool,
    pub hops: Vec<HopReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteReport {
    pub heuristic: Heuristic,
    pub divisions: usize,
    pub dedup: EdgeKey,
    pub graph: GraphSummary,
    /// Deduplicated coarse track length over every route.
    pub total_length: Real,
    pub routes: Vec<RequestReport>,
}

impl RouteReport {
    pub fn failed_count(&self) -> usize {
        self.routes.iter().filter(|r| r.failed).count()
    }

    pub fn to_json(&self) -> AppResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| AppError::Report(e.to_string()))
    }

    pub fn write_json(&self, path: &Path) -> AppResult<()> {
        let content = self.to_json()?;
        std::fs::write(path, content).map_err(|e| AppError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
