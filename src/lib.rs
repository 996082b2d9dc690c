//! alloyrank - alloy material ranking
//!
//! Scores each row of a materials dataset against a required yield strength
//! and three importance weights, and selects the best match in a single pass.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod scoring;

pub use error::{RankError, RankResult};
