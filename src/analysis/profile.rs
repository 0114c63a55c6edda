//! Profile assembly: engine → ranker → summary.

use rand::Rng;
use tracing::debug;

use super::engine::EffectEngine;
use super::ranker::{headlines, rank_effects, top_nutrients_by_outcome, RankingSettings};
use crate::error::Result;
use crate::models::{DailyRecord, ProfileResult};
use crate::report::personal_summary;

/// Estimate, rank and summarize effects for one person's records.
pub fn build_profile<R: Rng>(
    records: &[DailyRecord],
    engine: &EffectEngine,
    ranking: &RankingSettings,
    rng: &mut R,
) -> Result<ProfileResult> {
    let mut ite_results = engine.estimate(records, rng)?;
    rank_effects(&mut ite_results);

    let top_nutrients_for_outcome = top_nutrients_by_outcome(&ite_results, ranking.top_per_outcome);
    let picks = headlines(
        &ite_results,
        ranking.headline_positive,
        ranking.headline_negative,
    );
    debug!(
        positive = picks.positive.len(),
        negative = picks.negative.len(),
        "headline effects selected"
    );
    let personal_summary = personal_summary(&picks, records.len(), ite_results.len());

    Ok(ProfileResult {
        ite_results,
        top_nutrients_for_outcome,
        personal_summary,
    })
}
