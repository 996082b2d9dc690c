//! Project-level configuration support
//!
//! Loads per-project configuration from `alloyrank.toml` or `.alloyrankrc.json`
//! in the working directory (or the directory given with `--config-dir`).
//!
//! # Configuration Format
//!
//! ```toml
//! # alloyrank.toml
//!
//! [scoring]
//! max_alloy = 25.0
//! yield_ceiling = 1500.0
//! ductility_ceiling = 50.0
//!
//! [dataset]
//! path = "data/steel_dataset.csv"
//! layout = "header"          # or "positional"
//!
//! [dataset.columns]
//! yield_strength = "YS (MPa)"
//!
//! [defaults]
//! format = "text"
//! ```

use crate::error::{RankError, RankResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "alloyrank.toml";
const JSON_CONFIG_FILE_NAME: &str = ".alloyrankrc.json";

/// Dataset used when neither the CLI nor the config names one
pub const DEFAULT_DATASET_PATH: &str = "data/steel_dataset.csv";

/// Commented example written by `alloyrank init`
pub const EXAMPLE_CONFIG: &str = r#"# alloyrank configuration

[scoring]
# Alloy content (sum of element %) that maps to a full thermal score
max_alloy = 25.0
# Yield strength (MPa) that maps to a full fatigue strength term
yield_ceiling = 1500.0
# Elongation (%) that maps to a full fatigue ductility term
ductility_ceiling = 50.0

[dataset]
# path = "data/steel_dataset.csv"
# "header" maps columns by name, "positional" uses the legacy export layout
layout = "header"

[dataset.columns]
# Override header names per field, e.g.
# yield_strength = "YS (MPa)"
# ductility = "Elong %"

[defaults]
# Output format: text or json
# format = "text"
"#;

/// Project-level configuration loaded from alloyrank.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Scoring ceilings
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Dataset location and column mapping
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Normalization ceilings injected into the scorer
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScoringConfig {
    /// Total alloy content that saturates the thermal score (default: 25.0)
    #[serde(default = "default_max_alloy")]
    pub max_alloy: f64,

    /// Yield strength that saturates the fatigue strength term (default: 1500.0)
    #[serde(default = "default_yield_ceiling")]
    pub yield_ceiling: f64,

    /// Ductility that saturates the fatigue ductility term (default: 50.0)
    #[serde(default = "default_ductility_ceiling")]
    pub ductility_ceiling: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_alloy: default_max_alloy(),
            yield_ceiling: default_yield_ceiling(),
            ductility_ceiling: default_ductility_ceiling(),
        }
    }
}

fn default_max_alloy() -> f64 {
    25.0
}
fn default_yield_ceiling() -> f64 {
    1500.0
}
fn default_ductility_ceiling() -> f64 {
    50.0
}

impl ScoringConfig {
    /// Every ceiling is a divisor, so each must be finite and positive
    pub fn validate(&self) -> RankResult<()> {
        for (name, value) in [
            ("scoring.max_alloy", self.max_alloy),
            ("scoring.yield_ceiling", self.yield_ceiling),
            ("scoring.ductility_ceiling", self.ductility_ceiling),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RankError::invalid(
                    name,
                    format!("must be a positive number, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// How dataset columns are located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnLayout {
    /// Match header names against known aliases (default)
    #[default]
    Header,
    /// Fixed column indices of the legacy steel dataset export
    Positional,
}

/// Dataset location and column mapping
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DatasetConfig {
    /// Dataset path, relative to the working directory
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub layout: ColumnLayout,

    /// Field name -> header name overrides (header layout only)
    #[serde(default)]
    pub columns: HashMap<String, String>,
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json)
    #[serde(default)]
    pub format: Option<String>,
}

impl ProjectConfig {
    /// Dataset to read: explicit CLI path > config > built-in default
    pub fn dataset_path(&self, cli_path: Option<&Path>) -> PathBuf {
        cli_path
            .map(Path::to_path_buf)
            .or_else(|| self.dataset.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH))
    }

    /// Output format: explicit CLI value > config > "text"
    pub fn output_format(&self, cli_format: Option<&str>) -> String {
        cli_format
            .or(self.defaults.format.as_deref())
            .unwrap_or("text")
            .to_string()
    }
}

/// Load project configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `alloyrank.toml`
/// 2. `.alloyrankrc.json`
///
/// Returns default configuration if no config file is found or if the file
/// cannot be parsed.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let toml_path = dir.join(CONFIG_FILE_NAME);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = dir.join(JSON_CONFIG_FILE_NAME);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}
