use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default maximum relative deviation of a district from the ideal population.
pub const DEFAULT_BALANCE_THRESHOLD: f64 = 0.05;

/// How each district's spanning tree is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SpanningTreeMethod {
    /// Minimum-weight tree of the induced subgraph, ties broken by edge order.
    #[default]
    Minimum,
    /// Uniform random tree (Wilson's algorithm), reproducible from `seed`.
    Random { seed: u64 },
}

/// Parameters for building feasible flows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub spanning_tree: SpanningTreeMethod,
    /// Process districts on the rayon thread pool.
    pub parallel: bool,
    /// Node series used for population balance.
    pub population_series: String,
    pub balance_threshold: f64,
    /// Fail the build instead of warning when a district is out of balance.
    pub enforce_balance: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            spanning_tree: SpanningTreeMethod::default(),
            parallel: true,
            population_series: "population".to_string(),
            balance_threshold: DEFAULT_BALANCE_THRESHOLD,
            enforce_balance: false,
        }
    }
}

impl FlowConfig {
    /// Parse a config from JSON text. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a config from a JSON file at `path`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
