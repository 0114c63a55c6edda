//! Personal summary digest.
//!
//! Fixed-template text naming the headline positive and negative effects.

use crate::analysis::Headlines;
use crate::models::IteResult;

/// Render the digest for a ranked profile.
pub fn personal_summary(headlines: &Headlines<'_>, days: usize, total_effects: usize) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "Personal nutrition-health profile: {} days analyzed, {} individual effects detected.",
        days, total_effects
    ));
    lines.push(String::new());

    lines.push("Nutrients that help you most:".to_string());
    if headlines.positive.is_empty() {
        lines.push("  - No strong positive effects detected yet.".to_string());
    } else {
        lines.extend(headlines.positive.iter().map(|r| headline_line(r)));
    }
    lines.push(String::new());

    lines.push("Nutrients to watch:".to_string());
    if headlines.negative.is_empty() {
        lines.push("  - No strong negative effects detected yet.".to_string());
    } else {
        lines.extend(headlines.negative.iter().map(|r| headline_line(r)));
    }
    lines.push(String::new());

    lines.push(
        "Effects are associations estimated from your own records for one unit more of each \
         nutrient; more days of data make them more reliable."
            .to_string(),
    );

    lines.join("\n")
}

fn headline_line(result: &IteResult) -> String {
    format!(
        "  - {} → {}: {:+.2} {}",
        result.nutrient_label(),
        result.outcome_label(),
        result.ite_value(),
        result.outcome().unit()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, Nutrient, Outcome};

    fn effect(nutrient: Nutrient, outcome: Outcome, ite: f64, direction: Direction) -> IteResult {
        IteResult::new(nutrient, outcome, ite, ite, direction, 0.6, String::new())
    }

    #[test]
    fn test_summary_formats_signed_values() {
        let up = effect(
            Nutrient::Magnesium,
            Outcome::DeepSleepMinutes,
            4.2071,
            Direction::Positive,
        );
        let down = effect(
            Nutrient::Caffeine,
            Outcome::HrvRmssd,
            -3.0,
            Direction::Negative,
        );
        let headlines = Headlines {
            positive: vec![&up],
            negative: vec![&down],
        };

        let text = personal_summary(&headlines, 21, 7);

        assert!(text.starts_with("Personal nutrition-health profile: 21 days analyzed, 7"));
        assert!(text.contains("  - Magnesium → Deep Sleep: +4.21 min"));
        assert!(text.contains("  - Caffeine → HRV (RMSSD): -3.00 ms"));
        assert!(!text.contains("No strong"));
    }

    #[test]
    fn test_summary_placeholders_when_empty() {
        let text = personal_summary(&Headlines::default(), 3, 0);
        assert!(text.contains("No strong positive effects detected yet."));
        assert!(text.contains("No strong negative effects detected yet."));
    }
}
