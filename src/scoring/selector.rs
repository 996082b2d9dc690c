//! Single-pass best-material selection

use super::MaterialScorer;
use crate::error::RankResult;
use crate::models::{MaterialRecord, RunParameters, ScoredMaterial, Selection};
use tracing::debug;

/// A parsed dataset row
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowOutcome {
    pub record: MaterialRecord,
    /// At least one field could not be parsed and fell back to its default
    pub malformed: bool,
}

impl From<MaterialRecord> for RowOutcome {
    fn from(record: MaterialRecord) -> Self {
        Self {
            record,
            malformed: false,
        }
    }
}

/// Keep the highest-scoring row of `rows` in one forward pass.
///
/// Ties keep the earliest row. Returns `Ok(None)` when `rows` is empty;
/// a row error (unreadable source) stops the scan.
pub fn select_best<I>(
    rows: I,
    scorer: &MaterialScorer,
    params: &RunParameters,
) -> RankResult<Option<Selection>>
where
    I: IntoIterator<Item = RankResult<RowOutcome>>,
{
    let mut best: Option<ScoredMaterial> = None;
    let mut rows_scanned = 0;
    let mut rows_malformed = 0;

    for row in rows {
        let RowOutcome { record, malformed } = row?;
        rows_scanned += 1;
        if malformed {
            rows_malformed += 1;
        }

        let breakdown = scorer.score(&record, params)?;
        let improves = best
            .as_ref()
            .map_or(true, |current| breakdown.composite > current.composite);

        if improves {
            debug!(
                "New best at row {}: {} ({:.3})",
                rows_scanned, record.name, breakdown.composite
            );
            best = Some(ScoredMaterial {
                record,
                composite: breakdown.composite,
                sub_scores: breakdown.sub_scores,
            });
        }
    }

    Ok(best.map(|best| Selection {
        best,
        rows_scanned,
        rows_malformed,
    }))
}
