//! Core data models for alloyrank
//!
//! These models carry a dataset row through scoring and selection,
//! and describe the final ranking result handed to the reporters.

use crate::error::{RankError, RankResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One row of the materials dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MaterialRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cluster: i64,
    #[serde(default)]
    pub chromium: f64,
    #[serde(default)]
    pub nickel: f64,
    #[serde(default)]
    pub molybdenum: f64,
    #[serde(default)]
    pub manganese: f64,
    #[serde(default)]
    pub silicon: f64,
    #[serde(default)]
    pub vanadium: f64,
    #[serde(default)]
    pub niobium: f64,
    #[serde(default)]
    pub titanium: f64,
    /// Yield strength (MPa)
    #[serde(default)]
    pub yield_strength: f64,
    /// Ultimate tensile strength (MPa)
    #[serde(default)]
    pub tensile_strength: f64,
    /// Elongation at break (%)
    #[serde(default)]
    pub ductility: f64,
}

impl MaterialRecord {
    /// Total alloying content: sum of the eight tracked element fractions
    pub fn alloy_index(&self) -> f64 {
        self.chromium
            + self.nickel
            + self.molybdenum
            + self.manganese
            + self.silicon
            + self.vanadium
            + self.niobium
            + self.titanium
    }
}

/// User-supplied parameters, fixed for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    /// Target yield strength (MPa), must be > 0
    pub required_yield: f64,
    pub thermal_weight: f64,
    pub electrical_weight: f64,
    pub cost_weight: f64,
}

impl RunParameters {
    /// Build and validate run parameters.
    ///
    /// Importance weights outside [0, 1] are accepted as-is; they only
    /// scale their share of the composite.
    pub fn new(
        required_yield: f64,
        thermal_weight: f64,
        electrical_weight: f64,
        cost_weight: f64,
    ) -> RankResult<Self> {
        let params = Self {
            required_yield,
            thermal_weight,
            electrical_weight,
            cost_weight,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check the required yield and flag unusual weights
    pub fn validate(&self) -> RankResult<()> {
        if !self.required_yield.is_finite() || self.required_yield <= 0.0 {
            return Err(RankError::invalid(
                "required_yield",
                format!("must be greater than 0, got {}", self.required_yield),
            ));
        }

        for (name, weight) in self.weights() {
            if !weight.is_finite() {
                return Err(RankError::invalid(name, format!("must be a finite number, got {weight}")));
            }
            if !(0.0..=1.0).contains(&weight) {
                warn!("{} = {} is outside 0-1; it will scale the score as given", name, weight);
            }
        }
        Ok(())
    }

    fn weights(&self) -> [(&'static str, f64); 3] {
        [
            ("thermal_weight", self.thermal_weight),
            ("electrical_weight", self.electrical_weight),
            ("cost_weight", self.cost_weight),
        ]
    }
}

/// Per-record score components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SubScores {
    pub alloy_index: f64,
    pub strength: f64,
    pub thermal: f64,
    pub electrical: f64,
    pub cost: f64,
    pub fatigue: f64,
}

/// A record together with its composite score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMaterial {
    pub record: MaterialRecord,
    pub composite: f64,
    pub sub_scores: SubScores,
}

/// Result of a single selection pass
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub best: ScoredMaterial,
    /// Data rows seen (header excluded)
    pub rows_scanned: usize,
    /// Rows where at least one field fell back to its default
    pub rows_malformed: usize,
}

/// Final ranking result for reporters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankReport {
    pub dataset: String,
    pub parameters: RunParameters,
    pub best: ScoredMaterial,
    pub rows_scanned: usize,
    pub rows_malformed: usize,
}

impl RankReport {
    pub fn new(dataset: impl Into<String>, parameters: RunParameters, selection: Selection) -> Self {
        Self {
            dataset: dataset.into(),
            parameters,
            best: selection.best,
            rows_scanned: selection.rows_scanned,
            rows_malformed: selection.rows_malformed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloy_index_sums_all_elements() {
        let record = MaterialRecord {
            chromium: 10.0,
            nickel: 5.0,
            molybdenum: 2.0,
            manganese: 1.0,
            silicon: 1.0,
            vanadium: 0.5,
            niobium: 0.25,
            titanium: 0.25,
            ..Default::default()
        };
        assert!((record.alloy_index() - 20.0).abs() < 1e-12);
        assert_eq!(MaterialRecord::default().alloy_index(), 0.0);
    }

    #[test]
    fn test_required_yield_must_be_positive() {
        assert!(RunParameters::new(1000.0, 0.5, 0.5, 0.5).is_ok());

        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = RunParameters::new(bad, 0.5, 0.5, 0.5).unwrap_err();
            assert!(matches!(err, RankError::InvalidParameter { ref name, .. } if name == "required_yield"));
        }
    }

    #[test]
    fn test_out_of_range_weights_are_accepted() {
        let params = RunParameters::new(500.0, 1.5, -0.2, 3.0).unwrap();
        assert_eq!(params.thermal_weight, 1.5);
        assert_eq!(params.electrical_weight, -0.2);
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        assert!(RunParameters::new(500.0, f64::NAN, 0.5, 0.5).is_err());
    }
}
