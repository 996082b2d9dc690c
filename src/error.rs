//! Error types for alloyrank
//!
//! Fatal conditions are represented here. Malformed rows are not errors:
//! the dataset reader defaults the bad fields, logs a warning and keeps going.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a ranking run
#[derive(Error, Debug)]
pub enum RankError {
    #[error("Cannot read dataset {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Dataset {} has no data rows after the header", path.display())]
    EmptyDataset { path: PathBuf },
}

pub type RankResult<T> = Result<T, RankError>;

impl RankError {
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        RankError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            RankError::SourceUnavailable { .. } => 2,
            RankError::InvalidParameter { .. } => 3,
            RankError::EmptyDataset { .. } => 4,
        }
    }
}
