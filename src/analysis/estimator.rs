//! Mediator-adjusted effect estimation.
//!
//! Combines the direct nutrient → outcome slope with the path routed
//! through the mediator (nutrient → mediator → outcome). The indirect path
//! is damped by a fixed weight rather than estimated with a full
//! structural mediation model.

use super::stats::regression_slope;

/// Weight applied to the indirect (mediated) path.
pub const DEFAULT_MEDIATOR_WEIGHT: f64 = 0.3;

/// Slope breakdown for one nutrient/outcome pair, in standardized units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediatedEffect {
    /// Slope of outcome on nutrient.
    pub direct: f64,
    /// Product of the nutrient → mediator and mediator → outcome slopes.
    pub indirect: f64,
    /// `direct + weight * indirect`.
    pub combined: f64,
}

/// Estimates standardized effects through a single mediator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediatorAdjustedEstimator {
    mediator_weight: f64,
}

impl Default for MediatorAdjustedEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIATOR_WEIGHT)
    }
}

impl MediatorAdjustedEstimator {
    pub fn new(mediator_weight: f64) -> Self {
        Self { mediator_weight }
    }

    /// Estimate the effect from standardized, day-aligned series.
    pub fn estimate(&self, nutrient: &[f64], mediator: &[f64], outcome: &[f64]) -> MediatedEffect {
        let direct = regression_slope(nutrient, outcome);
        let indirect = regression_slope(nutrient, mediator) * regression_slope(mediator, outcome);

        MediatedEffect {
            direct,
            indirect,
            combined: direct + self.mediator_weight * indirect,
        }
    }
}
