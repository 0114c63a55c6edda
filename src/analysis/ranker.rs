//! Effect ranking and grouping.
//!
//! This module orders engine output by confidence-weighted magnitude and
//! provides the per-outcome groupings and headline picks used by the
//! summary and report generation.

use crate::models::{Direction, IteResult, Outcome};
use serde::Serialize;
use std::collections::BTreeMap;

/// Maximum effects listed per outcome.
pub const TOP_PER_OUTCOME: usize = 5;

/// Positive effects named in the summary.
pub const HEADLINE_POSITIVE: usize = 3;

/// Negative effects named in the summary.
pub const HEADLINE_NEGATIVE: usize = 2;

/// Default |ITE| cutoff for the per-outcome filter.
pub const MIN_REPORTABLE_EFFECT: f64 = 0.5;

/// Limits used when grouping ranked effects.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingSettings {
    pub top_per_outcome: usize,
    pub headline_positive: usize,
    pub headline_negative: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            top_per_outcome: TOP_PER_OUTCOME,
            headline_positive: HEADLINE_POSITIVE,
            headline_negative: HEADLINE_NEGATIVE,
        }
    }
}

impl From<&crate::config::RankingConfig> for RankingSettings {
    fn from(config: &crate::config::RankingConfig) -> Self {
        Self {
            top_per_outcome: config.top_per_outcome,
            headline_positive: config.headline_positive,
            headline_negative: config.headline_negative,
        }
    }
}

/// Sort effects by `confidence * |ite_value|`, highest first.
///
/// The sort is stable, so ties keep the engine's enumeration order.
pub fn rank_effects(results: &mut [IteResult]) {
    results.sort_by(|a, b| b.ranking_score().total_cmp(&a.ranking_score()));
}

/// First `n` ranked effects for every outcome.
///
/// Every outcome gets an entry, empty when nothing passed the filter.
pub fn top_nutrients_by_outcome(ranked: &[IteResult], n: usize) -> BTreeMap<Outcome, Vec<IteResult>> {
    let mut grouped: BTreeMap<Outcome, Vec<IteResult>> =
        Outcome::ALL.into_iter().map(|o| (o, Vec::new())).collect();

    for result in ranked {
        let entry = grouped.entry(result.outcome()).or_default();
        if entry.len() < n {
            entry.push(result.clone());
        }
    }

    grouped
}

/// Headline effects for the summary digest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Headlines<'a> {
    pub positive: Vec<&'a IteResult>,
    pub negative: Vec<&'a IteResult>,
}

/// Pick the first positive and negative effects in ranked order.
pub fn headlines(ranked: &[IteResult], positive: usize, negative: usize) -> Headlines<'_> {
    let pick = |direction: Direction, n: usize| {
        ranked
            .iter()
            .filter(|r| r.direction() == direction)
            .take(n)
            .collect::<Vec<_>>()
    };

    Headlines {
        positive: pick(Direction::Positive, positive),
        negative: pick(Direction::Negative, negative),
    }
}

/// Effects on one outcome with `|ite_value| > min_abs_effect`, in ranked order.
pub fn effects_for_outcome(
    ranked: &[IteResult],
    outcome: Outcome,
    min_abs_effect: f64,
) -> Vec<&IteResult> {
    ranked
        .iter()
        .filter(|r| r.outcome() == outcome && r.ite_value().abs() > min_abs_effect)
        .collect()
}

/// Counts of reported effects.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EffectSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Reported effects per outcome key.
    pub by_outcome: BTreeMap<Outcome, usize>,
}

impl EffectSummary {
    pub fn from_results(results: &[IteResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };

        for result in results {
            match result.direction() {
                Direction::Positive => summary.positive += 1,
                Direction::Negative => summary.negative += 1,
                Direction::Neutral => summary.neutral += 1,
            }
            *summary.by_outcome.entry(result.outcome()).or_insert(0) += 1;
        }

        summary
    }
}
