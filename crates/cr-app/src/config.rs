//! Routing configuration, loaded from YAML.
//!
//! Every field has a default, so a missing file or a partial one is fine.

use std::path::Path;

use cr_core::ensure_positive;
use cr_layout::ChipBounds;
use cr_route::{AssembleOptions, EdgeKey, Heuristic};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub heuristic: Heuristic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailConfig {
    /// Candidate points per via-edge.
    pub divisions: usize,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self { divisions: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortConfig {
    /// Names one port may serve before the next-nearest port is preferred.
    pub reuse_limit: usize,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self { reuse_limit: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    pub ignore_marker: String,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            ignore_marker: "*".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthConfig {
    pub dedup: EdgeKey,
}

/// Top-level routing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub chip: ChipBounds,
    pub planner: PlannerConfig,
    pub detail: DetailConfig,
    pub ports: PortConfig,
    pub requests: RequestConfig,
    pub length: LengthConfig,
    /// Plan requests on the rayon pool.
    pub parallel: bool,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            chip: ChipBounds::default(),
            planner: PlannerConfig::default(),
            detail: DetailConfig::default(),
            ports: PortConfig::default(),
            requests: RequestConfig::default(),
            length: LengthConfig::default(),
            parallel: true,
        }
    }
}

impl RouteConfig {
    pub fn validate(&self) -> AppResult<()> {
        ensure_positive(self.chip.width, "chip width")?;
        ensure_positive(self.chip.height, "chip height")?;
        if self.detail.divisions == 0 {
            return Err(AppError::Config(
                "detail.divisions must be at least 1".to_string(),
            ));
        }
        if self.ports.reuse_limit == 0 {
            return Err(AppError::Config(
                "ports.reuse_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions {
            marker: self.requests.ignore_marker.clone(),
            heuristic: self.planner.heuristic,
            parallel: self.parallel,
        }
    }
}

/// Parse and validate a YAML configuration.
pub fn parse_config(content: &str) -> AppResult<RouteConfig> {
    let config: RouteConfig = serde_yaml::from_str(content)
        .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?;
    config.validate()?;
    Ok(config)
}

/// Load a configuration file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> AppResult<RouteConfig> {
    let Some(path) = path else {
        return Ok(RouteConfig::default());
    };
    let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RouteConfig::default();
        assert_eq!(config.chip, ChipBounds::default());
        assert_eq!(config.planner.heuristic, Heuristic::Manhattan);
        assert_eq!(config.detail.divisions, 1);
        assert_eq!(config.ports.reuse_limit, 1);
        assert_eq!(config.requests.ignore_marker, "*");
        assert_eq!(config.length.dedup, EdgeKey::Ordered);
        assert!(config.parallel);
        config.validate().unwrap();
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = parse_config(
            "chip:\n  width: 100.0\nplanner:\n  heuristic: euclidean\nlength:\n  dedup: unordered\n",
        )
        .unwrap();
        assert_eq!(config.chip.width, 100.0);
        assert_eq!(config.chip.height, 70.0);
        assert_eq!(config.planner.heuristic, Heuristic::Euclidean);
        assert_eq!(config.length.dedup, EdgeKey::Unordered);
        assert_eq!(config.detail.divisions, 1);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(parse_config("{}").unwrap(), RouteConfig::default());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse_config("detail:\n  divisions: 0\n").is_err());
        assert!(parse_config("ports:\n  reuse_limit: 0\n").is_err());
        assert!(parse_config("chip:\n  width: -1.0\n").is_err());
        assert!(parse_config("planner:\n  heuristic: octile\n").is_err());
    }

    #[test]
    fn options_follow_config() {
        let mut config = RouteConfig::default();
        config.requests.ignore_marker = "#".to_string();
        config.parallel = false;
        let options = config.assemble_options();
        assert_eq!(options.marker, "#");
        assert!(!options.parallel);
    }

    #[test]
    fn missing_path_is_default() {
        assert_eq!(load_config(None).unwrap(), RouteConfig::default());
        let missing = std::env::temp_dir().join("cr_app_no_such_config.yaml");
        assert!(matches!(
            load_config(Some(&missing)),
            Err(AppError::FileRead { .. })
        ));
    }
}
