//! Composite material scorer
//!
//! Computes bounded sub-scores for a single record and combines them
//! with the run's importance weights.

use crate::config::ScoringConfig;
use crate::error::{RankError, RankResult};
use crate::models::{MaterialRecord, RunParameters, SubScores};

/// Category coefficients of the composite
const STRENGTH_WEIGHT: f64 = 0.30;
const THERMAL_WEIGHT: f64 = 0.20;
const ELECTRICAL_WEIGHT: f64 = 0.15;
const COST_WEIGHT: f64 = 0.15;
const FATIGUE_WEIGHT: f64 = 0.20;

/// Clusters at or above this tag get the thermal/electrical shift
const CLUSTER_THRESHOLD: i64 = 6;
const CLUSTER_ADJUSTMENT: f64 = 0.2;

/// Share of the fatigue score taken by yield strength (rest is ductility)
const FATIGUE_YIELD_SHARE: f64 = 0.6;
const FATIGUE_DUCTILITY_SHARE: f64 = 0.4;

/// Composite score with its components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub composite: f64,
    pub sub_scores: SubScores,
}

/// Scores material records against run parameters
#[derive(Debug, Clone, Copy)]
pub struct MaterialScorer {
    config: ScoringConfig,
}

impl Default for MaterialScorer {
    fn default() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }
}

impl MaterialScorer {
    /// Create a scorer with the given ceilings
    pub fn new(config: ScoringConfig) -> RankResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one record. Pure: same inputs always give the same output.
    pub fn score(&self, record: &MaterialRecord, params: &RunParameters) -> RankResult<ScoreBreakdown> {
        let strength = self.strength_score(record, params)?;
        let thermal = self.thermal_score(record);
        let electrical = self.electrical_score(record);
        let cost = self.cost_score(record);
        let fatigue = self.fatigue_score(record);

        let composite = STRENGTH_WEIGHT * strength
            + THERMAL_WEIGHT * thermal * params.thermal_weight
            + ELECTRICAL_WEIGHT * electrical * params.electrical_weight
            + COST_WEIGHT * cost * params.cost_weight
            + FATIGUE_WEIGHT * fatigue;

        Ok(ScoreBreakdown {
            composite,
            sub_scores: SubScores {
                alloy_index: record.alloy_index(),
                strength,
                thermal,
                electrical,
                cost,
                fatigue,
            },
        })
    }

    /// Alloy index normalized by the alloy ceiling (unclamped)
    fn alloy_ratio(&self, record: &MaterialRecord) -> f64 {
        record.alloy_index() / self.config.max_alloy
    }

    fn cluster_adjustment(record: &MaterialRecord) -> f64 {
        if record.cluster >= CLUSTER_THRESHOLD {
            CLUSTER_ADJUSTMENT
        } else {
            0.0
        }
    }

    /// Heavier alloying and high clusters raise the thermal score
    pub fn thermal_score(&self, record: &MaterialRecord) -> f64 {
        (self.alloy_ratio(record) + Self::cluster_adjustment(record)).clamp(0.0, 1.0)
    }

    /// Purer metals conduct better; high clusters are penalized
    pub fn electrical_score(&self, record: &MaterialRecord) -> f64 {
        (1.0 - self.alloy_ratio(record) - Self::cluster_adjustment(record)).clamp(0.0, 1.0)
    }

    /// Cost depends on alloy content only
    pub fn cost_score(&self, record: &MaterialRecord) -> f64 {
        (1.0 - self.alloy_ratio(record)).clamp(0.0, 1.0)
    }

    pub fn fatigue_score(&self, record: &MaterialRecord) -> f64 {
        let y = (record.yield_strength / self.config.yield_ceiling).clamp(0.0, 1.0);
        let d = (record.ductility / self.config.ductility_ceiling).clamp(0.0, 1.0);
        FATIGUE_YIELD_SHARE * y + FATIGUE_DUCTILITY_SHARE * d
    }

    /// How well the record meets the required yield, capped at 1.0
    pub fn strength_score(&self, record: &MaterialRecord, params: &RunParameters) -> RankResult<f64> {
        if !params.required_yield.is_finite() || params.required_yield <= 0.0 {
            return Err(RankError::invalid(
                "required_yield",
                format!("must be greater than 0, got {}", params.required_yield),
            ));
        }
        Ok((record.yield_strength / params.required_yield).clamp(0.0, 1.0))
    }

    /// Generate human-readable explanation of a score
    pub fn explain(&self, breakdown: &ScoreBreakdown, params: &RunParameters) -> String {
        let s = &breakdown.sub_scores;
        let mut lines = Vec::new();

        lines.push(format!("Composite score: {:.3}", breakdown.composite));
        lines.push(String::new());
        lines.push(format!(
            "Alloy index: {:.2} / {:.1} = {:.3}",
            s.alloy_index,
            self.config.max_alloy,
            s.alloy_index / self.config.max_alloy
        ));
        lines.push(String::new());

        let rows = [
            ("Strength", STRENGTH_WEIGHT, s.strength, 1.0),
            ("Thermal", THERMAL_WEIGHT, s.thermal, params.thermal_weight),
            ("Electrical", ELECTRICAL_WEIGHT, s.electrical, params.electrical_weight),
            ("Cost", COST_WEIGHT, s.cost, params.cost_weight),
            ("Fatigue", FATIGUE_WEIGHT, s.fatigue, 1.0),
        ];
        for (name, coefficient, score, weight) in rows {
            lines.push(format!(
                "  {:<11} {:.2} x {:.3} x {:.2} = {:.4}",
                name,
                coefficient,
                score,
                weight,
                coefficient * score * weight
            ));
        }

        lines.join("\n")
    }
}
