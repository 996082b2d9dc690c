//! Ranking pipeline
//!
//! Orchestrates a full ranking run:
//! 1. Open the dataset and resolve its columns
//! 2. Validate the run parameters
//! 3. Score every row in a single pass, keeping the best

use crate::config::{DatasetConfig, ProjectConfig};
use crate::dataset::DatasetReader;
use crate::error::{RankError, RankResult};
use crate::models::{RunParameters, Selection};
use crate::scoring::{select_best, MaterialScorer};
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Full ranking pipeline.
pub struct RankPipeline {
    scorer: MaterialScorer,
    dataset: DatasetConfig,
}

impl RankPipeline {
    /// Create a pipeline from project configuration.
    pub fn new(config: &ProjectConfig) -> RankResult<Self> {
        Ok(Self {
            scorer: MaterialScorer::new(config.scoring)?,
            dataset: config.dataset.clone(),
        })
    }

    pub fn scorer(&self) -> &MaterialScorer {
        &self.scorer
    }

    /// Open the dataset without scanning it.
    ///
    /// Kept separate from [`RankPipeline::rank`] so an unreadable source is
    /// reported before the user is asked for parameters.
    pub fn open(&self, path: &Path) -> RankResult<DatasetReader<File>> {
        DatasetReader::open(path, &self.dataset)
    }

    /// Rank an opened dataset.
    pub fn rank(&self, reader: DatasetReader<File>, params: &RunParameters) -> RankResult<Selection> {
        params.validate()?;
        let path = reader.path().to_path_buf();

        let selection = select_best(reader, &self.scorer, params)?
            .ok_or_else(|| RankError::EmptyDataset { path: path.clone() })?;

        info!(
            "Ranked {} rows from {} ({} malformed); best: {} ({:.3})",
            selection.rows_scanned,
            path.display(),
            selection.rows_malformed,
            selection.best.record.name,
            selection.best.composite
        );
        Ok(selection)
    }

    /// Open and rank a dataset in one step.
    pub fn run(&self, path: &Path, params: &RunParameters) -> RankResult<Selection> {
        let reader = self.open(path)?;
        self.rank(reader, params)
    }
}
