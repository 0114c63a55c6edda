//! Markdown and JSON report generation.
//!
//! This module renders a full profile report from the ranked effects,
//! plus the narrower per-outcome view used by `--outcome`.

use crate::analysis::EffectSummary;
use crate::knowledge::{Advice, FoodSuggestion};
use crate::models::{IteResult, Outcome, ProfileResult, Report, ReportMetadata};
use anyhow::Result;
use std::collections::BTreeMap;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# Nutrition Effect Profile\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_table_of_contents(&report.profile));
    output.push_str(&generate_summary_section(&report.profile));
    output.push_str(&generate_ranked_section(&report.profile.ite_results));
    output.push_str(&generate_outcomes_section(
        &report.profile.top_nutrients_for_outcome,
    ));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** {}\n", metadata.source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Study Period:** {} to {} ({} days)\n",
        metadata.first_day, metadata.last_day, metadata.days_analyzed
    ));
    section.push_str(&format!(
        "- **Pairs Evaluated:** {}\n",
        metadata.pairs_evaluated
    ));
    if let Some(seed) = metadata.seed {
        section.push_str(&format!("- **Baseline Seed:** `{}`\n", seed));
    }
    section.push('\n');

    section
}

fn outcome_anchor(outcome: Outcome) -> String {
    outcome.key().replace('_', "-")
}

/// Generate the table of contents.
fn generate_table_of_contents(profile: &ProfileResult) -> String {
    let mut toc = String::new();

    toc.push_str("## Table of Contents\n\n");
    toc.push_str("- [Metadata](#metadata)\n");
    toc.push_str("- [Summary](#summary)\n");
    toc.push_str("- [Ranked Effects](#ranked-effects)\n");
    toc.push_str("- [Effects by Outcome](#effects-by-outcome)\n");

    for (outcome, top) in &profile.top_nutrients_for_outcome {
        if !top.is_empty() {
            toc.push_str(&format!(
                "  - [{}](#{})\n",
                outcome.label(),
                outcome_anchor(*outcome)
            ));
        }
    }

    toc.push('\n');

    toc
}

/// Generate the summary section.
fn generate_summary_section(profile: &ProfileResult) -> String {
    let mut section = String::new();
    let summary = EffectSummary::from_results(&profile.ite_results);

    section.push_str("## Summary\n\n");
    section.push_str("```text\n");
    section.push_str(&profile.personal_summary);
    section.push_str("\n```\n\n");

    section.push_str("### Effect Directions\n\n");
    section.push_str("| ↑ Positive | ↓ Negative | → Neutral | **Total** |\n");
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | **{}** |\n\n",
        summary.positive, summary.negative, summary.neutral, summary.total
    ));

    if !summary.by_outcome.is_empty() {
        section.push_str("### Effects per Outcome\n\n");
        section.push_str("| Outcome | Effects |\n");
        section.push_str("|:---|:---:|\n");

        let mut outcomes: Vec<_> = summary.by_outcome.iter().collect();
        outcomes.sort_by_key(|(_, count)| std::cmp::Reverse(**count));

        for (outcome, count) in outcomes {
            section.push_str(&format!("| {} | {} |\n", outcome.label(), count));
        }
        section.push('\n');
    }

    section
}

/// Generate the ranked effects table.
fn generate_ranked_section(results: &[IteResult]) -> String {
    let mut section = String::new();

    section.push_str("## Ranked Effects\n\n");

    if results.is_empty() {
        section.push_str(
            "No nutrient showed a correlation strong enough to report. \
             Keep logging; patterns usually emerge after a few weeks.\n\n",
        );
        return section;
    }

    section.push_str("| # | Nutrient | Outcome | ITE | ATE | Direction | Confidence |\n");
    section.push_str("|---:|:---|:---|---:|---:|:---:|---:|\n");

    for (i, result) in results.iter().enumerate() {
        section.push_str(&format!(
            "| {} | {} ({}) | {} | {:+.2} {} | {:+.2} | {} {} | {:.2} |\n",
            i + 1,
            result.nutrient_label(),
            result.unit(),
            result.outcome_label(),
            result.ite_value(),
            result.outcome().unit(),
            result.ate_value(),
            result.direction().arrow(),
            result.direction(),
            result.confidence()
        ));
    }
    section.push('\n');

    section
}

/// Generate the per-outcome sections.
fn generate_outcomes_section(grouped: &BTreeMap<Outcome, Vec<IteResult>>) -> String {
    let mut section = String::new();

    section.push_str("## Effects by Outcome\n\n");

    for (outcome, top) in grouped {
        if top.is_empty() {
            continue;
        }
        section.push_str(&format!(
            "### {} {{#{}}}\n\n",
            outcome.label(),
            outcome_anchor(*outcome)
        ));
        for result in top {
            section.push_str(&generate_effect_block(result));
        }
    }

    section
}

/// Generate a single effect block.
fn generate_effect_block(result: &IteResult) -> String {
    let mut block = String::new();

    block.push_str(&format!(
        "#### {} {} ({:+.2} {} per {})\n\n",
        result.direction().arrow(),
        result.nutrient_label(),
        result.ite_value(),
        result.outcome().unit(),
        result.unit()
    ));
    block.push_str(&format!("**Causal path:** {}\n\n", result.causal_path()));
    block.push_str(&format!(
        "**Confidence:** {:.2} | **Population baseline:** {:+.2}\n\n",
        result.confidence(),
        result.ate_value()
    ));

    block
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(
        "*Confidence reflects correlation strength only; these are associations, not medical advice.*\n",
    );

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Render the focused view of one outcome with food suggestions.
pub fn generate_outcome_view(
    outcome: Outcome,
    effects: &[(&IteResult, FoodSuggestion)],
) -> String {
    let mut view = String::new();

    view.push_str(&format!("{} ({})\n", outcome.label(), outcome.unit()));

    if effects.is_empty() {
        view.push_str("  No nutrient effects above the reporting threshold.\n");
        return view;
    }

    for (result, suggestion) in effects {
        view.push_str(&format!(
            "\n  {} {}: {:+.2} {} per {} (confidence {:.2})\n",
            result.direction().arrow(),
            result.nutrient_label(),
            result.ite_value(),
            outcome.unit(),
            result.unit(),
            result.confidence()
        ));
        view.push_str(&format!("    {}\n", result.causal_path()));

        let verb = match suggestion.advice {
            Advice::Increase => "Eat more",
            Advice::Limit => "Cut back on",
            Advice::Monitor => "Keep an eye on",
        };
        if !suggestion.foods.is_empty() {
            let foods: Vec<_> = suggestion.foods.iter().map(|f| f.name.as_str()).collect();
            view.push_str(&format!("    {}: {}\n", verb, foods.join(", ")));
        }
        if !suggestion.search_tags.is_empty() {
            view.push_str(&format!("    Tags: {}\n", suggestion.search_tags.join(", ")));
        }
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::FoodSource;
    use crate::models::{Direction, Nutrient};
    use chrono::{NaiveDate, Utc};

    fn effect(nutrient: Nutrient, outcome: Outcome, ite: f64, direction: Direction) -> IteResult {
        IteResult::new(
            nutrient,
            outcome,
            ite,
            0.7 * ite,
            direction,
            0.64,
            crate::analysis::narrative::causal_path(nutrient, outcome, direction),
        )
    }

    fn create_test_report() -> Report {
        let results = vec![
            effect(Nutrient::Caffeine, Outcome::DeepSleepMinutes, -12.5, Direction::Negative),
            effect(Nutrient::Magnesium, Outcome::DeepSleepMinutes, 4.0, Direction::Positive),
        ];
        let top = crate::analysis::top_nutrients_by_outcome(&results, 5);

        Report {
            metadata: ReportMetadata {
                source: "records.json".to_string(),
                generated_at: Utc::now(),
                days_analyzed: 14,
                first_day: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                last_day: NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
                pairs_evaluated: 250,
                seed: Some(7),
            },
            profile: ProfileResult {
                ite_results: results,
                top_nutrients_for_outcome: top,
                personal_summary: "Personal nutrition-health profile".to_string(),
            },
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let markdown = generate_markdown_report(&create_test_report());

        assert!(markdown.contains("# Nutrition Effect Profile"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("## Summary"));
        assert!(markdown.contains("## Ranked Effects"));
        assert!(markdown.contains("| 1 | Caffeine (mg) | Deep Sleep | -12.50 min |"));
        assert!(markdown.contains("### Deep Sleep {#deep-sleep-minutes}"));
        assert!(markdown.contains("Excess Caffeine intake"));
        assert!(!markdown.contains("### Steps"));
    }

    #[test]
    fn test_generate_metadata_section() {
        let section = generate_metadata_section(&create_test_report().metadata);

        assert!(section.contains("records.json"));
        assert!(section.contains("2024-01-01 to 2024-01-14 (14 days)"));
        assert!(section.contains("**Pairs Evaluated:** 250"));
        assert!(section.contains("Baseline Seed"));
    }

    #[test]
    fn test_empty_ranked_section() {
        let section = generate_ranked_section(&[]);
        assert!(section.contains("No nutrient showed a correlation"));
    }

    #[test]
    fn test_generate_json_report() {
        let json = generate_json_report(&create_test_report()).unwrap();

        assert!(json.contains("\"ite_results\""));
        assert!(json.contains("\"top_nutrients_for_outcome\""));
        assert!(json.contains("\"personal_summary\""));
        assert!(json.contains("\"deep_sleep_minutes\""));
        assert!(json.contains("\"causal_path\""));
    }

    #[test]
    fn test_generate_outcome_view() {
        let report = create_test_report();
        let caffeine = &report.profile.ite_results[0];
        let suggestion = FoodSuggestion {
            nutrient: Nutrient::Caffeine,
            advice: Advice::Limit,
            foods: vec![FoodSource {
                name: "brewed coffee (8 oz)".to_string(),
                amount_per_serving: 95.0,
            }],
            search_tags: vec!["coffee".to_string()],
        };

        let view = generate_outcome_view(Outcome::DeepSleepMinutes, &[(caffeine, suggestion)]);
        assert!(view.starts_with("Deep Sleep (min)"));
        assert!(view.contains("Caffeine: -12.50 min per mg"));
        assert!(view.contains("Cut back on: brewed coffee (8 oz)"));
        assert!(view.contains("Tags: coffee"));

        let empty = generate_outcome_view(Outcome::Steps, &[]);
        assert!(empty.contains("No nutrient effects"));
    }
}
