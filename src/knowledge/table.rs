//! Table-backed food knowledge.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::{FoodKnowledge, FoodSource};
use crate::models::Nutrient;

/// Tags and foods for one nutrient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientEntry {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub foods: Vec<FoodSource>,
}

/// In-memory food knowledge keyed by nutrient.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodTable {
    entries: BTreeMap<Nutrient, NutrientEntry>,
}

impl FoodTable {
    pub fn new(entries: BTreeMap<Nutrient, NutrientEntry>) -> Self {
        Self { entries }
    }

    #[allow(dead_code)] // Used by table consumers and tests
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)] // Pairs with len()
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a table from JSON: `{ "<nutrient key>": { "tags": [...], "foods": [...] } }`.
    ///
    /// Unknown nutrient keys are rejected.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, NutrientEntry> =
            serde_json::from_str(json).context("Failed to parse food table JSON")?;

        let mut entries = BTreeMap::new();
        for (key, entry) in raw {
            let nutrient: Nutrient = key.parse()?;
            entries.insert(nutrient, entry);
        }
        Ok(Self::new(entries))
    }

    /// Load a table from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read food table: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Invalid food table: {}", path.display()))
    }

    /// The table shipped with the binary.
    pub fn builtin() -> Self {
        let entries = Nutrient::ALL
            .into_iter()
            .map(|n| {
                let (tags, foods) = builtin_entry(n);
                let entry = NutrientEntry {
                    tags: tags.iter().map(|t| t.to_string()).collect(),
                    foods: foods
                        .iter()
                        .map(|(name, amount)| FoodSource {
                            name: name.to_string(),
                            amount_per_serving: *amount,
                        })
                        .collect(),
                };
                (n, entry)
            })
            .collect();
        Self::new(entries)
    }
}

impl FoodKnowledge for FoodTable {
    fn search_tags(&self, nutrient: Nutrient) -> Vec<String> {
        self.entries
            .get(&nutrient)
            .map(|e| e.tags.clone())
            .unwrap_or_default()
    }

    fn food_sources(&self, nutrient: Nutrient) -> Vec<FoodSource> {
        self.entries
            .get(&nutrient)
            .map(|e| e.foods.clone())
            .unwrap_or_default()
    }
}

type Entry = (&'static [&'static str], &'static [(&'static str, f64)]);

fn builtin_entry(nutrient: Nutrient) -> Entry {
    match nutrient {
        Nutrient::Calories => (
            &["energy dense", "high calorie"],
            &[("peanut butter (2 tbsp)", 190.0), ("granola (1/2 cup)", 300.0), ("avocado", 240.0)],
        ),
        Nutrient::Protein => (
            &["high protein", "lean protein"],
            &[("chicken breast", 31.0), ("greek yogurt", 17.0), ("lentils (1 cup)", 18.0)],
        ),
        Nutrient::Carbohydrates => (
            &["complex carbs", "whole grain"],
            &[("brown rice (1 cup)", 45.0), ("oats (1 cup)", 27.0), ("sweet potato", 26.0)],
        ),
        Nutrient::Fat => (
            &["healthy fats"],
            &[("olive oil (1 tbsp)", 14.0), ("almonds (1 oz)", 14.0), ("avocado", 21.0)],
        ),
        Nutrient::SaturatedFat => (
            &["saturated fat", "fatty meat", "fried"],
            &[("butter (1 tbsp)", 7.0), ("cheddar (1 oz)", 5.4), ("bacon (3 slices)", 4.5)],
        ),
        Nutrient::Fiber => (
            &["high fiber", "whole grain", "legumes"],
            &[("chia seeds (1 oz)", 10.0), ("black beans (1 cup)", 15.0), ("raspberries (1 cup)", 8.0)],
        ),
        Nutrient::Sugar => (
            &["sugary", "dessert", "sweetened"],
            &[("soda (12 oz)", 39.0), ("milk chocolate bar", 24.0), ("fruit yogurt", 19.0)],
        ),
        Nutrient::Sodium => (
            &["salty", "processed", "cured"],
            &[("instant noodles", 1500.0), ("soy sauce (1 tbsp)", 900.0), ("deli ham (2 oz)", 600.0)],
        ),
        Nutrient::Potassium => (
            &["potassium rich", "leafy greens"],
            &[("baked potato", 925.0), ("banana", 420.0), ("white beans (1 cup)", 1190.0)],
        ),
        Nutrient::Calcium => (
            &["dairy", "calcium rich"],
            &[("plain yogurt (1 cup)", 450.0), ("sardines (3 oz)", 325.0), ("tofu (1/2 cup)", 430.0)],
        ),
        Nutrient::Iron => (
            &["iron rich", "red meat", "leafy greens"],
            &[("fortified cereal", 18.0), ("lentils (1 cup)", 6.6), ("spinach (1 cup cooked)", 6.4)],
        ),
        Nutrient::Magnesium => (
            &["magnesium rich", "nuts and seeds", "dark chocolate"],
            &[("pumpkin seeds (1 oz)", 156.0), ("almonds (1 oz)", 80.0), ("spinach (1/2 cup cooked)", 78.0)],
        ),
        Nutrient::Zinc => (
            &["zinc rich", "shellfish"],
            &[("oysters (3 oz)", 74.0), ("beef (3 oz)", 5.3), ("pumpkin seeds (1 oz)", 2.2)],
        ),
        Nutrient::VitaminA => (
            &["orange vegetables", "beta carotene"],
            &[("sweet potato", 1100.0), ("carrots (1/2 cup)", 460.0), ("spinach (1/2 cup cooked)", 570.0)],
        ),
        Nutrient::VitaminC => (
            &["citrus", "vitamin c rich"],
            &[("red bell pepper", 95.0), ("orange", 70.0), ("kiwi", 64.0)],
        ),
        Nutrient::VitaminD => (
            &["oily fish", "fortified", "vitamin d rich"],
            &[("salmon (3 oz)", 14.2), ("fortified milk (1 cup)", 2.9), ("egg yolk", 1.1)],
        ),
        Nutrient::VitaminB6 => (
            &["b vitamins", "poultry"],
            &[("chickpeas (1 cup)", 1.1), ("tuna (3 oz)", 0.9), ("banana", 0.4)],
        ),
        Nutrient::VitaminB12 => (
            &["b vitamins", "animal products"],
            &[("clams (3 oz)", 84.1), ("beef liver (3 oz)", 70.7), ("salmon (3 oz)", 4.8)],
        ),
        Nutrient::Folate => (
            &["folate rich", "leafy greens", "legumes"],
            &[("beef liver (3 oz)", 215.0), ("spinach (1/2 cup cooked)", 131.0), ("black-eyed peas (1/2 cup)", 105.0)],
        ),
        Nutrient::Omega3 => (
            &["omega 3", "oily fish", "flaxseed"],
            &[("salmon (3 oz)", 1.8), ("chia seeds (1 oz)", 5.1), ("walnuts (1 oz)", 2.6)],
        ),
        Nutrient::Tryptophan => (
            &["tryptophan rich", "turkey", "seeds"],
            &[("turkey (3 oz)", 250.0), ("pumpkin seeds (1 oz)", 160.0), ("oats (1 cup)", 150.0)],
        ),
        Nutrient::Caffeine => (
            &["caffeinated", "coffee", "energy drink"],
            &[("brewed coffee (8 oz)", 95.0), ("energy drink (8 oz)", 80.0), ("black tea (8 oz)", 47.0)],
        ),
        Nutrient::Alcohol => (
            &["alcoholic beverage", "wine", "beer"],
            &[("beer (12 oz)", 14.0), ("wine (5 oz)", 14.0), ("spirits (1.5 oz)", 14.0)],
        ),
        Nutrient::Water => (
            &["hydrating", "high water content"],
            &[("water (1 glass)", 250.0), ("watermelon (1 cup)", 140.0), ("cucumber", 290.0)],
        ),
        Nutrient::Cholesterol => (
            &["cholesterol", "eggs", "organ meat"],
            &[("egg", 186.0), ("shrimp (3 oz)", 161.0), ("beef liver (3 oz)", 333.0)],
        ),
    }
}
