//! Causal-path narratives.
//!
//! Each nutrient category maps to one template function; the engine looks
//! the template up by category instead of matching on nutrient names.

use crate::models::{Direction, Nutrient, NutrientCategory, Outcome};

/// Renders a narrative for one nutrient/outcome pair.
pub type NarrativeTemplate = fn(Nutrient, Outcome, Direction) -> String;

/// Template for a nutrient category.
pub fn template_for(category: NutrientCategory) -> NarrativeTemplate {
    match category {
        NutrientCategory::Stimulant => stimulant_path,
        NutrientCategory::Precursor => precursor_path,
        NutrientCategory::AntiInflammatory => anti_inflammatory_path,
        NutrientCategory::Generic => metabolic_path,
    }
}

/// Narrative for a pair, dispatched on the nutrient's category.
pub fn causal_path(nutrient: Nutrient, outcome: Outcome, direction: Direction) -> String {
    template_for(nutrient.category())(nutrient, outcome, direction)
}

fn stimulant_path(nutrient: Nutrient, outcome: Outcome, _direction: Direction) -> String {
    format!(
        "Excess {} intake → autonomic nervous system disruption → {} decline",
        nutrient.label(),
        outcome.label()
    )
}

fn precursor_path(nutrient: Nutrient, outcome: Outcome, _direction: Direction) -> String {
    format!(
        "{} intake → serotonin/melatonin precursor pathway → {} improvement",
        nutrient.label(),
        outcome.label()
    )
}

fn anti_inflammatory_path(nutrient: Nutrient, outcome: Outcome, _direction: Direction) -> String {
    format!(
        "{} intake → anti-inflammatory effect → HRV and {} influence",
        nutrient.label(),
        outcome.label()
    )
}

fn metabolic_path(nutrient: Nutrient, outcome: Outcome, direction: Direction) -> String {
    match direction {
        Direction::Positive => format!(
            "{} intake → metabolic pathway → {} improves",
            nutrient.label(),
            outcome.label()
        ),
        Direction::Negative | Direction::Neutral => format!(
            "{} intake → metabolic pathway → affects {}",
            nutrient.label(),
            outcome.label()
        ),
    }
}
