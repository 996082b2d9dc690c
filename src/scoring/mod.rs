//! Material Scoring and Selection
//!
//! Each dataset row is scored independently, and a single forward pass keeps
//! the highest-scoring row.
//!
//! # Scoring Formula
//!
//! ```text
//! Composite = 0.30 × Strength
//!           + 0.20 × Thermal    × thermal_weight
//!           + 0.15 × Electrical × electrical_weight
//!           + 0.15 × Cost       × cost_weight
//!           + 0.20 × Fatigue
//!
//! Where (a = alloy index / max_alloy, b = 0.2 if cluster >= 6 else 0):
//!   Strength   = min(yield / required_yield, 1)
//!   Thermal    = min(a + b, 1)
//!   Electrical = max(1 - a - b, 0)
//!   Cost       = max(1 - a, 0)
//!   Fatigue    = 0.6 × min(yield / yield_ceiling, 1) + 0.4 × min(ductility / ductility_ceiling, 1)
//! ```
//!
//! Strength and fatigue always carry their full category weight. The three
//! importance weights scale the thermal, electrical and cost categories, so
//! the maximum composite is 1.0 only when all three weights are 1.0.
//!
//! # Example
//!
//! A cluster-7 alloy with alloy index 19, yield 1200 MPa and 30% elongation,
//! ranked for 1000 MPa with all weights at 0.5:
//!
//! Composite = 0.300 + 0.096 + 0.003 + 0.018 + 0.144 = 0.561

mod material_scorer;
mod selector;

pub use material_scorer::{MaterialScorer, ScoreBreakdown};
pub use selector::{select_best, RowOutcome};
