//! Nutrient-to-food reference data.
//!
//! The estimation core never reads this; it backs the `--outcome` view,
//! which pairs each effect with search tags and food sources. The table
//! sits behind the [`FoodKnowledge`] trait so a different dataset can be
//! loaded from JSON or substituted in tests.

pub mod table;

pub use table::FoodTable;

use serde::{Deserialize, Serialize};

use crate::models::{Direction, IteResult, Nutrient};

/// A food and how much of a nutrient one serving provides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSource {
    pub name: String,
    /// Amount per typical serving, in the nutrient's unit.
    pub amount_per_serving: f64,
}

/// Read-only lookup of foods and search tags per nutrient.
pub trait FoodKnowledge {
    /// Free-text search tags for the nutrient.
    fn search_tags(&self, nutrient: Nutrient) -> Vec<String>;

    /// Known food sources for the nutrient, in no particular order.
    fn food_sources(&self, nutrient: Nutrient) -> Vec<FoodSource>;
}

/// What to do about a nutrient given its estimated effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Advice {
    Increase,
    Limit,
    Monitor,
}

impl From<Direction> for Advice {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Positive => Advice::Increase,
            Direction::Negative => Advice::Limit,
            Direction::Neutral => Advice::Monitor,
        }
    }
}

/// Foods to eat more (or less) of for one effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodSuggestion {
    pub nutrient: Nutrient,
    pub advice: Advice,
    pub foods: Vec<FoodSource>,
    pub search_tags: Vec<String>,
}

/// Top `limit` food sources for the effect's nutrient, richest first.
pub fn suggest_foods(
    knowledge: &dyn FoodKnowledge,
    effect: &IteResult,
    limit: usize,
) -> FoodSuggestion {
    let mut foods = knowledge.food_sources(effect.nutrient());
    foods.sort_by(|a, b| b.amount_per_serving.total_cmp(&a.amount_per_serving));
    foods.truncate(limit);

    FoodSuggestion {
        nutrient: effect.nutrient(),
        advice: Advice::from(effect.direction()),
        foods,
        search_tags: knowledge.search_tags(effect.nutrient()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;

    /// A stand-in table with a single nutrient.
    struct OneFood;

    impl FoodKnowledge for OneFood {
        fn search_tags(&self, nutrient: Nutrient) -> Vec<String> {
            vec![format!("{} test", nutrient.key())]
        }

        fn food_sources(&self, nutrient: Nutrient) -> Vec<FoodSource> {
            if nutrient != Nutrient::Magnesium {
                return Vec::new();
            }
            vec![
                FoodSource {
                    name: "spinach".to_string(),
                    amount_per_serving: 78.0,
                },
                FoodSource {
                    name: "pumpkin seeds".to_string(),
                    amount_per_serving: 156.0,
                },
                FoodSource {
                    name: "almonds".to_string(),
                    amount_per_serving: 80.0,
                },
            ]
        }
    }

    fn effect(nutrient: Nutrient, direction: Direction) -> IteResult {
        let ite = if direction == Direction::Negative { -3.0 } else { 3.0 };
        IteResult::new(
            nutrient,
            Outcome::DeepSleepMinutes,
            ite,
            0.7 * ite,
            direction,
            0.5,
            String::new(),
        )
    }

    #[test]
    fn test_suggestions_rank_richest_first() {
        let suggestion = suggest_foods(&OneFood, &effect(Nutrient::Magnesium, Direction::Positive), 2);

        assert_eq!(suggestion.advice, Advice::Increase);
        let names: Vec<_> = suggestion.foods.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["pumpkin seeds", "almonds"]);
        assert_eq!(suggestion.search_tags, vec!["magnesium test".to_string()]);
    }

    #[test]
    fn test_negative_effect_advises_limit() {
        let suggestion = suggest_foods(&OneFood, &effect(Nutrient::Caffeine, Direction::Negative), 3);
        assert_eq!(suggestion.advice, Advice::Limit);
        assert!(suggestion.foods.is_empty());
    }
}
