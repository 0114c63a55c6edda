//! Pairwise effect engine.
//!
//! Evaluates every nutrient × outcome pair: standardize the series,
//! estimate the mediator-adjusted effect, rescale it to outcome units,
//! score confidence from the raw correlation and drop weak pairs.

use rand::Rng;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::estimator::{MediatorAdjustedEstimator, DEFAULT_MEDIATOR_WEIGHT};
use super::narrative::causal_path;
use super::stats::{pearson, population_std_dev, standardize};
use crate::error::{AnalysisError, Result};
use crate::models::{DailyRecord, Direction, IteResult, Nutrient, Outcome};

/// Fewest daily records the engine will accept.
pub const MIN_RECORDS: usize = 3;

/// Pairs whose |r| falls below this are not reported.
pub const MIN_CORRELATION: f64 = 0.20;

/// Upper bound on reported confidence.
pub const CONFIDENCE_CAP: f64 = 0.99;

/// |ITE| above this (in outcome units) is classified as a direction.
pub const DIRECTION_THRESHOLD: f64 = 0.5;

/// ATE baseline as a fraction of the ITE.
pub const ATE_DAMPING: f64 = 0.7;

/// Half-width of the uniform ATE jitter.
pub const ATE_JITTER_SPAN: f64 = 1.0;

/// Tunables for the effect engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub mediator_weight: f64,
    pub min_correlation: f64,
    pub confidence_cap: f64,
    pub direction_threshold: f64,
    pub ate_damping: f64,
    /// Zero disables the jitter.
    pub ate_jitter_span: f64,
    pub min_records: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            mediator_weight: DEFAULT_MEDIATOR_WEIGHT,
            min_correlation: MIN_CORRELATION,
            confidence_cap: CONFIDENCE_CAP,
            direction_threshold: DIRECTION_THRESHOLD,
            ate_damping: ATE_DAMPING,
            ate_jitter_span: ATE_JITTER_SPAN,
            min_records: MIN_RECORDS,
        }
    }
}

impl From<&crate::config::EngineConfig> for EngineSettings {
    fn from(config: &crate::config::EngineConfig) -> Self {
        Self {
            mediator_weight: config.mediator_weight,
            min_correlation: config.min_correlation,
            confidence_cap: config.confidence_cap,
            direction_threshold: config.direction_threshold,
            ate_damping: config.ate_damping,
            ate_jitter_span: config.ate_jitter_span,
            // The statistical floor cannot be configured away.
            min_records: config.min_records.max(MIN_RECORDS),
        }
    }
}

/// Classify an effect by its sign, using strict thresholds.
pub fn classify_direction(ite_value: f64, threshold: f64) -> Direction {
    if ite_value > threshold {
        Direction::Positive
    } else if ite_value < -threshold {
        Direction::Negative
    } else {
        Direction::Neutral
    }
}

/// Check the record count and that every record carries every key.
///
/// The count is checked first so a short input always reports
/// `InsufficientData`.
pub fn validate_records(records: &[DailyRecord], min_records: usize) -> Result<()> {
    if records.len() < min_records {
        return Err(AnalysisError::InsufficientData {
            found: records.len(),
            required: min_records,
        });
    }

    for (day, record) in records.iter().enumerate() {
        for nutrient in Nutrient::ALL {
            match record.nutrition.get(&nutrient) {
                None => {
                    return Err(AnalysisError::MissingValue {
                        day,
                        key: nutrient.key().to_string(),
                    })
                }
                Some(&value) if !value.is_finite() || value < 0.0 => {
                    return Err(AnalysisError::InvalidValue {
                        day,
                        key: nutrient.key().to_string(),
                        value,
                    })
                }
                Some(_) => {}
            }
        }
        for outcome in Outcome::ALL {
            match record.outcomes.get(&outcome) {
                None => {
                    return Err(AnalysisError::MissingValue {
                        day,
                        key: outcome.key().to_string(),
                    })
                }
                Some(&value) if !value.is_finite() => {
                    return Err(AnalysisError::InvalidValue {
                        day,
                        key: outcome.key().to_string(),
                        value,
                    })
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}

/// Day-aligned columns extracted from the records.
///
/// Index `i` of every series is day `i`.
#[derive(Debug, Clone)]
pub struct SeriesTable {
    nutrients: BTreeMap<Nutrient, Vec<f64>>,
    outcomes: BTreeMap<Outcome, Vec<f64>>,
    days: usize,
}

impl SeriesTable {
    /// Extract every column. Records must already be validated.
    pub fn from_records(records: &[DailyRecord]) -> Self {
        let nutrients = Nutrient::ALL
            .into_iter()
            .map(|n| {
                let series = records
                    .iter()
                    .map(|r| r.nutrition.get(&n).copied().unwrap_or_default())
                    .collect();
                (n, series)
            })
            .collect();

        let outcomes = Outcome::ALL
            .into_iter()
            .map(|o| {
                let series = records
                    .iter()
                    .map(|r| r.outcomes.get(&o).copied().unwrap_or_default())
                    .collect();
                (o, series)
            })
            .collect();

        Self {
            nutrients,
            outcomes,
            days: records.len(),
        }
    }

    pub fn nutrient(&self, nutrient: Nutrient) -> &[f64] {
        self.nutrients.get(&nutrient).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn outcome(&self, outcome: Outcome) -> &[f64] {
        self.outcomes.get(&outcome).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn days(&self) -> usize {
        self.days
    }
}

/// Estimates individual effects for every nutrient/outcome pair.
#[derive(Debug, Clone)]
pub struct EffectEngine {
    settings: EngineSettings,
    estimator: MediatorAdjustedEstimator,
}

impl Default for EffectEngine {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

impl EffectEngine {
    /// Build an engine. `min_records` is raised to [`MIN_RECORDS`] if lower.
    pub fn new(mut settings: EngineSettings) -> Self {
        settings.min_records = settings.min_records.max(MIN_RECORDS);
        let estimator = MediatorAdjustedEstimator::new(settings.mediator_weight);
        Self {
            settings,
            estimator,
        }
    }

    /// Number of pairs the engine evaluates per run.
    pub fn pair_count(&self) -> usize {
        Nutrient::ALL.len() * Outcome::ALL.len()
    }

    /// Run the engine over the records.
    ///
    /// Returns passing pairs in enumeration order (nutrient-major). `rng`
    /// only feeds the ATE jitter; every other field is a pure function of
    /// the records.
    pub fn estimate<R: Rng>(&self, records: &[DailyRecord], rng: &mut R) -> Result<Vec<IteResult>> {
        validate_records(records, self.settings.min_records)?;

        let table = SeriesTable::from_records(records);
        let mediator_z = standardize(table.outcome(Outcome::MEDIATOR));

        let outcome_z: BTreeMap<Outcome, Vec<f64>> = Outcome::ALL
            .into_iter()
            .map(|o| (o, standardize(table.outcome(o))))
            .collect();

        let mut results = Vec::new();

        for nutrient in Nutrient::ALL {
            let raw_nutrient = table.nutrient(nutrient);
            let nutrient_z = standardize(raw_nutrient);

            for outcome in Outcome::ALL {
                let raw_outcome = table.outcome(outcome);

                let correlation = pearson(raw_nutrient, raw_outcome);
                if correlation.abs() < self.settings.min_correlation {
                    continue;
                }

                let effect = self
                    .estimator
                    .estimate(&nutrient_z, &mediator_z, &outcome_z[&outcome]);
                let ite_value = effect.combined * population_std_dev(raw_outcome);
                if !ite_value.is_finite() {
                    debug!(
                        nutrient = nutrient.key(),
                        outcome = outcome.key(),
                        "pair dropped: effect not finite"
                    );
                    continue;
                }
                let confidence = correlation.abs().min(self.settings.confidence_cap);
                let direction = classify_direction(ite_value, self.settings.direction_threshold);
                let ate_value = self.ate_baseline(ite_value, rng);

                debug!(
                    nutrient = nutrient.key(),
                    outcome = outcome.key(),
                    r = correlation,
                    direct = effect.direct,
                    indirect = effect.indirect,
                    ite = ite_value,
                    "pair retained"
                );

                results.push(IteResult::new(
                    nutrient,
                    outcome,
                    ite_value,
                    ate_value,
                    direction,
                    confidence,
                    causal_path(nutrient, outcome, direction),
                ));
            }
        }

        info!(
            "Estimated {} of {} pairs over {} days",
            results.len(),
            self.pair_count(),
            table.days()
        );

        Ok(results)
    }

    /// Placeholder population baseline: damped ITE plus uniform jitter.
    fn ate_baseline<R: Rng>(&self, ite_value: f64, rng: &mut R) -> f64 {
        let span = self.settings.ate_jitter_span;
        let jitter = if span > 0.0 && span.is_finite() {
            rng.gen_range(-span..span)
        } else {
            0.0
        };
        self.settings.ate_damping * ite_value + jitter
    }
}
