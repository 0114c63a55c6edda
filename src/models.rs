//! Data models for the effect estimator.
//!
//! This module contains the fixed nutrient and outcome key sets, the daily
//! record shape, and the result structures handed to report generation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;

/// A nutrient tracked in the daily food log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Calories,
    Protein,
    Carbohydrates,
    Fat,
    SaturatedFat,
    Fiber,
    Sugar,
    Sodium,
    Potassium,
    Calcium,
    Iron,
    Magnesium,
    Zinc,
    VitaminA,
    VitaminC,
    VitaminD,
    VitaminB6,
    VitaminB12,
    Folate,
    #[serde(rename = "omega_3")]
    Omega3,
    Tryptophan,
    Caffeine,
    Alcohol,
    Water,
    Cholesterol,
}

impl Nutrient {
    /// Every nutrient, in enumeration order.
    pub const ALL: [Nutrient; 25] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Carbohydrates,
        Nutrient::Fat,
        Nutrient::SaturatedFat,
        Nutrient::Fiber,
        Nutrient::Sugar,
        Nutrient::Sodium,
        Nutrient::Potassium,
        Nutrient::Calcium,
        Nutrient::Iron,
        Nutrient::Magnesium,
        Nutrient::Zinc,
        Nutrient::VitaminA,
        Nutrient::VitaminC,
        Nutrient::VitaminD,
        Nutrient::VitaminB6,
        Nutrient::VitaminB12,
        Nutrient::Folate,
        Nutrient::Omega3,
        Nutrient::Tryptophan,
        Nutrient::Caffeine,
        Nutrient::Alcohol,
        Nutrient::Water,
        Nutrient::Cholesterol,
    ];

    /// Wire identifier, as used in input files.
    pub fn key(&self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Carbohydrates => "carbohydrates",
            Nutrient::Fat => "fat",
            Nutrient::SaturatedFat => "saturated_fat",
            Nutrient::Fiber => "fiber",
            Nutrient::Sugar => "sugar",
            Nutrient::Sodium => "sodium",
            Nutrient::Potassium => "potassium",
            Nutrient::Calcium => "calcium",
            Nutrient::Iron => "iron",
            Nutrient::Magnesium => "magnesium",
            Nutrient::Zinc => "zinc",
            Nutrient::VitaminA => "vitamin_a",
            Nutrient::VitaminC => "vitamin_c",
            Nutrient::VitaminD => "vitamin_d",
            Nutrient::VitaminB6 => "vitamin_b6",
            Nutrient::VitaminB12 => "vitamin_b12",
            Nutrient::Folate => "folate",
            Nutrient::Omega3 => "omega_3",
            Nutrient::Tryptophan => "tryptophan",
            Nutrient::Caffeine => "caffeine",
            Nutrient::Alcohol => "alcohol",
            Nutrient::Water => "water",
            Nutrient::Cholesterol => "cholesterol",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Nutrient::Calories => "Calories",
            Nutrient::Protein => "Protein",
            Nutrient::Carbohydrates => "Carbohydrates",
            Nutrient::Fat => "Total Fat",
            Nutrient::SaturatedFat => "Saturated Fat",
            Nutrient::Fiber => "Fiber",
            Nutrient::Sugar => "Sugar",
            Nutrient::Sodium => "Sodium",
            Nutrient::Potassium => "Potassium",
            Nutrient::Calcium => "Calcium",
            Nutrient::Iron => "Iron",
            Nutrient::Magnesium => "Magnesium",
            Nutrient::Zinc => "Zinc",
            Nutrient::VitaminA => "Vitamin A",
            Nutrient::VitaminC => "Vitamin C",
            Nutrient::VitaminD => "Vitamin D",
            Nutrient::VitaminB6 => "Vitamin B6",
            Nutrient::VitaminB12 => "Vitamin B12",
            Nutrient::Folate => "Folate",
            Nutrient::Omega3 => "Omega-3",
            Nutrient::Tryptophan => "Tryptophan",
            Nutrient::Caffeine => "Caffeine",
            Nutrient::Alcohol => "Alcohol",
            Nutrient::Water => "Water",
            Nutrient::Cholesterol => "Cholesterol",
        }
    }

    /// Unit the daily intake is logged in.
    pub fn unit(&self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            Nutrient::Protein
            | Nutrient::Carbohydrates
            | Nutrient::Fat
            | Nutrient::SaturatedFat
            | Nutrient::Fiber
            | Nutrient::Sugar
            | Nutrient::Omega3
            | Nutrient::Alcohol => "g",
            Nutrient::Sodium
            | Nutrient::Potassium
            | Nutrient::Calcium
            | Nutrient::Iron
            | Nutrient::Magnesium
            | Nutrient::Zinc
            | Nutrient::VitaminC
            | Nutrient::VitaminB6
            | Nutrient::Tryptophan
            | Nutrient::Caffeine
            | Nutrient::Cholesterol => "mg",
            Nutrient::VitaminA | Nutrient::VitaminD | Nutrient::VitaminB12 | Nutrient::Folate => {
                "µg"
            }
            Nutrient::Water => "ml",
        }
    }

    /// Physiological category used to pick a narrative template.
    pub fn category(&self) -> NutrientCategory {
        match self {
            Nutrient::Caffeine | Nutrient::Alcohol | Nutrient::SaturatedFat => {
                NutrientCategory::Stimulant
            }
            Nutrient::Tryptophan | Nutrient::Magnesium => NutrientCategory::Precursor,
            Nutrient::Omega3 => NutrientCategory::AntiInflammatory,
            _ => NutrientCategory::Generic,
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Nutrient {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Nutrient::ALL
            .into_iter()
            .find(|n| n.key() == key)
            .ok_or_else(|| AnalysisError::UnknownNutrient(s.to_string()))
    }
}

/// A health outcome reported by the wearable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    DeepSleepMinutes,
    RemSleepMinutes,
    LightSleepMinutes,
    TotalSleepMinutes,
    SleepEfficiency,
    HrvRmssd,
    RestingHeartRate,
    Steps,
    ActiveCalories,
    ReadinessScore,
}

impl Outcome {
    /// Every outcome, in enumeration order.
    pub const ALL: [Outcome; 10] = [
        Outcome::DeepSleepMinutes,
        Outcome::RemSleepMinutes,
        Outcome::LightSleepMinutes,
        Outcome::TotalSleepMinutes,
        Outcome::SleepEfficiency,
        Outcome::HrvRmssd,
        Outcome::RestingHeartRate,
        Outcome::Steps,
        Outcome::ActiveCalories,
        Outcome::ReadinessScore,
    ];

    /// The mediating variable for every pair.
    pub const MEDIATOR: Outcome = Outcome::SleepEfficiency;

    pub fn key(&self) -> &'static str {
        match self {
            Outcome::DeepSleepMinutes => "deep_sleep_minutes",
            Outcome::RemSleepMinutes => "rem_sleep_minutes",
            Outcome::LightSleepMinutes => "light_sleep_minutes",
            Outcome::TotalSleepMinutes => "total_sleep_minutes",
            Outcome::SleepEfficiency => "sleep_efficiency",
            Outcome::HrvRmssd => "hrv_rmssd",
            Outcome::RestingHeartRate => "resting_heart_rate",
            Outcome::Steps => "steps",
            Outcome::ActiveCalories => "active_calories",
            Outcome::ReadinessScore => "readiness_score",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::DeepSleepMinutes => "Deep Sleep",
            Outcome::RemSleepMinutes => "REM Sleep",
            Outcome::LightSleepMinutes => "Light Sleep",
            Outcome::TotalSleepMinutes => "Total Sleep",
            Outcome::SleepEfficiency => "Sleep Efficiency",
            Outcome::HrvRmssd => "HRV (RMSSD)",
            Outcome::RestingHeartRate => "Resting Heart Rate",
            Outcome::Steps => "Steps",
            Outcome::ActiveCalories => "Active Calories",
            Outcome::ReadinessScore => "Readiness Score",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Outcome::DeepSleepMinutes
            | Outcome::RemSleepMinutes
            | Outcome::LightSleepMinutes
            | Outcome::TotalSleepMinutes => "min",
            Outcome::SleepEfficiency => "%",
            Outcome::HrvRmssd => "ms",
            Outcome::RestingHeartRate => "bpm",
            Outcome::Steps => "steps",
            Outcome::ActiveCalories => "kcal",
            Outcome::ReadinessScore => "pts",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Outcome {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Outcome::ALL
            .into_iter()
            .find(|o| o.key() == key)
            .ok_or_else(|| AnalysisError::UnknownOutcome(s.to_string()))
    }
}

/// Nutrient grouping that selects the causal narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientCategory {
    /// Stimulants and depressants (caffeine, alcohol, saturated fat).
    Stimulant,
    /// Serotonin/melatonin precursors (tryptophan, magnesium).
    Precursor,
    /// Anti-inflammatory fats (omega-3).
    AntiInflammatory,
    /// Everything else.
    Generic,
}

/// One day of nutrient intake, keyed by nutrient.
pub type NutritionSample = BTreeMap<Nutrient, f64>;

/// One day of outcome readings, keyed by outcome.
pub type OutcomeSample = BTreeMap<Outcome, f64>;

/// Nutrition and outcomes for a single study day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    /// Calendar date of the day.
    pub date: NaiveDate,
    /// Nutrient intake for the day.
    pub nutrition: NutritionSample,
    /// Outcome readings for the day (usually the following night's sleep).
    pub outcomes: OutcomeSample,
}

impl DailyRecord {
    /// Creates a record with empty samples.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            nutrition: NutritionSample::new(),
            outcomes: OutcomeSample::new(),
        }
    }

    /// Creates a record with every key set to the same value.
    #[cfg(test)]
    pub fn uniform(date: NaiveDate, nutrient_value: f64, outcome_value: f64) -> Self {
        Self {
            date,
            nutrition: Nutrient::ALL.iter().map(|n| (*n, nutrient_value)).collect(),
            outcomes: Outcome::ALL.iter().map(|o| (*o, outcome_value)).collect(),
        }
    }
}

/// Sign of an estimated effect, after thresholding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Positive => write!(f, "positive"),
            Direction::Negative => write!(f, "negative"),
            Direction::Neutral => write!(f, "neutral"),
        }
    }
}

impl Direction {
    /// Returns an arrow representation of the direction.
    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Positive => "↑",
            Direction::Negative => "↓",
            Direction::Neutral => "→",
        }
    }
}

/// Estimated individual effect of one nutrient on one outcome.
///
/// Built only by the effect engine; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IteResult {
    nutrient: Nutrient,
    nutrient_label: String,
    unit: String,
    outcome: Outcome,
    outcome_label: String,
    ite_value: f64,
    ate_value: f64,
    direction: Direction,
    confidence: f64,
    causal_path: String,
}

impl IteResult {
    pub(crate) fn new(
        nutrient: Nutrient,
        outcome: Outcome,
        ite_value: f64,
        ate_value: f64,
        direction: Direction,
        confidence: f64,
        causal_path: String,
    ) -> Self {
        Self {
            nutrient,
            nutrient_label: nutrient.label().to_string(),
            unit: nutrient.unit().to_string(),
            outcome,
            outcome_label: outcome.label().to_string(),
            ite_value,
            ate_value,
            direction,
            confidence,
            causal_path,
        }
    }

    pub fn nutrient(&self) -> Nutrient {
        self.nutrient
    }

    pub fn nutrient_label(&self) -> &str {
        &self.nutrient_label
    }

    /// Unit of the nutrient intake.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn outcome_label(&self) -> &str {
        &self.outcome_label
    }

    /// Individual effect, in the outcome's natural units.
    pub fn ite_value(&self) -> f64 {
        self.ite_value
    }

    /// Population-baseline approximation.
    pub fn ate_value(&self) -> f64 {
        self.ate_value
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn causal_path(&self) -> &str {
        &self.causal_path
    }

    /// Ranking key: confidence weighted effect magnitude.
    pub fn ranking_score(&self) -> f64 {
        self.confidence * self.ite_value.abs()
    }
}

/// Ranked effects plus a text digest, produced once per run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileResult {
    /// All reported effects, ranked.
    pub ite_results: Vec<IteResult>,
    /// Up to five ranked effects per outcome.
    pub top_nutrients_for_outcome: BTreeMap<Outcome, Vec<IteResult>>,
    /// Human-readable digest.
    pub personal_summary: String,
}

/// Metadata about a generated profile report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Where the records came from (file path or "synthetic").
    pub source: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of study days.
    pub days_analyzed: usize,
    /// First study day.
    pub first_day: NaiveDate,
    /// Last study day.
    pub last_day: NaiveDate,
    /// Nutrient × outcome pairs evaluated.
    pub pairs_evaluated: usize,
    /// Seed used for the ATE jitter, if fixed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// The complete report written by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub profile: ProfileResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_sets_are_fixed() {
        assert_eq!(Nutrient::ALL.len(), 25);
        assert_eq!(Outcome::ALL.len(), 10);
        assert_eq!(Outcome::MEDIATOR, Outcome::SleepEfficiency);
    }

    #[test]
    fn test_nutrient_key_round_trips_through_from_str() {
        for nutrient in Nutrient::ALL {
            assert_eq!(nutrient.key().parse::<Nutrient>(), Ok(nutrient));
        }
        assert_eq!(
            "Omega_3".parse::<Nutrient>(),
            Ok(Nutrient::Omega3),
            "keys are case-insensitive"
        );
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert_eq!(
            "kale".parse::<Nutrient>(),
            Err(AnalysisError::UnknownNutrient("kale".to_string()))
        );
        assert_eq!(
            "mood".parse::<Outcome>(),
            Err(AnalysisError::UnknownOutcome("mood".to_string()))
        );
    }

    #[test]
    fn test_serde_keys_match_wire_keys() {
        for nutrient in Nutrient::ALL {
            let json = serde_json::to_string(&nutrient).unwrap();
            assert_eq!(json, format!("\"{}\"", nutrient.key()));
        }
        for outcome in Outcome::ALL {
            let json = serde_json::to_string(&outcome).unwrap();
            assert_eq!(json, format!("\"{}\"", outcome.key()));
        }
    }

    #[test]
    fn test_nutrient_categories() {
        assert_eq!(Nutrient::Caffeine.category(), NutrientCategory::Stimulant);
        assert_eq!(Nutrient::Alcohol.category(), NutrientCategory::Stimulant);
        assert_eq!(Nutrient::SaturatedFat.category(), NutrientCategory::Stimulant);
        assert_eq!(Nutrient::Tryptophan.category(), NutrientCategory::Precursor);
        assert_eq!(Nutrient::Magnesium.category(), NutrientCategory::Precursor);
        assert_eq!(Nutrient::Omega3.category(), NutrientCategory::AntiInflammatory);
        assert_eq!(Nutrient::Fiber.category(), NutrientCategory::Generic);
    }

    #[test]
    fn test_ite_result_serializes_expected_fields() {
        let result = IteResult::new(
            Nutrient::Magnesium,
            Outcome::DeepSleepMinutes,
            4.2,
            3.1,
            Direction::Positive,
            0.61,
            "path".to_string(),
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["nutrient"], "magnesium");
        assert_eq!(value["nutrient_label"], "Magnesium");
        assert_eq!(value["unit"], "mg");
        assert_eq!(value["outcome"], "deep_sleep_minutes");
        assert_eq!(value["outcome_label"], "Deep Sleep");
        assert_eq!(value["direction"], "positive");
        assert_eq!(value["causal_path"], "path");
        assert!((result.ranking_score() - 0.61 * 4.2).abs() < 1e-12);
    }
}
