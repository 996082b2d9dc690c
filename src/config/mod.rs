//! Configuration module for alloyrank
//!
//! This module handles:
//! - Project-level configuration (alloyrank.toml)
//! - Scoring ceilings
//! - Dataset location and column mapping
//! - CLI defaults

mod project_config;

pub use project_config::{
    load_project_config, CliDefaults, ColumnLayout, DatasetConfig, ProjectConfig, ScoringConfig,
    CONFIG_FILE_NAME, DEFAULT_DATASET_PATH, EXAMPLE_CONFIG,
};
