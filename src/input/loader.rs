//! Daily record loading.
//!
//! Reads a JSON array of day objects, maps string keys onto the fixed
//! nutrient and outcome sets, and rejects anything outside them before
//! the records reach the engine.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::analysis::validate_records;
use crate::error::AnalysisError;
use crate::models::{DailyRecord, Nutrient, NutritionSample, Outcome, OutcomeSample};

/// A day as it appears on the wire, before key validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    date: NaiveDate,
    nutrition: BTreeMap<String, f64>,
    outcomes: BTreeMap<String, f64>,
}

impl RawRecord {
    fn into_record(self, day: usize) -> crate::error::Result<DailyRecord> {
        let nutrition: NutritionSample = typed_keys::<Nutrient>(day, self.nutrition)?;
        let outcomes: OutcomeSample = typed_keys::<Outcome>(day, self.outcomes)?;

        Ok(DailyRecord {
            date: self.date,
            nutrition,
            outcomes,
        })
    }
}

/// Map wire keys onto `K`. Keys parse case-insensitively, so two
/// spellings of one key are rejected rather than one silently winning.
fn typed_keys<K>(day: usize, raw: BTreeMap<String, f64>) -> crate::error::Result<BTreeMap<K, f64>>
where
    K: FromStr<Err = AnalysisError> + Ord,
{
    let mut typed = BTreeMap::new();
    for (key, value) in raw {
        let parsed = key.parse::<K>()?;
        if typed.insert(parsed, value).is_some() {
            return Err(AnalysisError::DuplicateKey { day, key });
        }
    }
    Ok(typed)
}

/// Parse and validate records from a JSON string.
///
/// The record count is not checked here; the engine owns that floor.
pub fn parse_records(json: &str) -> Result<Vec<DailyRecord>> {
    let raw: Vec<RawRecord> =
        serde_json::from_str(json).context("Failed to parse daily records JSON")?;

    let records = raw
        .into_iter()
        .enumerate()
        .map(|(day, record)| record.into_record(day))
        .collect::<crate::error::Result<Vec<_>>>()?;

    validate_records(&records, 0)?;

    if records.windows(2).any(|w| w[0].date >= w[1].date) {
        warn!("Daily records are not in strictly increasing date order");
    }

    debug!("Parsed {} daily records", records.len());
    Ok(records)
}

/// Load records from a JSON file.
pub fn load_records(path: &Path) -> Result<Vec<DailyRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records file: {}", path.display()))?;

    parse_records(&content)
        .with_context(|| format!("Invalid records file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn day_json(date: &str, nutrient_value: f64, outcome_value: f64) -> serde_json::Value {
        let nutrition: serde_json::Map<String, serde_json::Value> = Nutrient::ALL
            .iter()
            .map(|n| (n.key().to_string(), nutrient_value.into()))
            .collect();
        let outcomes: serde_json::Map<String, serde_json::Value> = Outcome::ALL
            .iter()
            .map(|o| (o.key().to_string(), outcome_value.into()))
            .collect();
        serde_json::json!({ "date": date, "nutrition": nutrition, "outcomes": outcomes })
    }

    fn analysis_error(err: &anyhow::Error) -> Option<&AnalysisError> {
        err.chain().find_map(|e| e.downcast_ref::<AnalysisError>())
    }

    #[test]
    fn test_parse_complete_records() {
        let json = serde_json::json!([
            day_json("2024-05-01", 1.0, 10.0),
            day_json("2024-05-02", 2.0, 20.0),
        ])
        .to_string();

        let records = parse_records(&json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].nutrition[&Nutrient::Omega3], 2.0);
        assert_eq!(records[1].outcomes[&Outcome::SleepEfficiency], 20.0);
        assert_eq!(
            records[0].date,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
    }

    #[test]
    fn test_unknown_nutrient_rejected() {
        let mut day = day_json("2024-05-01", 1.0, 10.0);
        day["nutrition"]["kale"] = 3.0.into();
        let json = serde_json::json!([day]).to_string();

        let err = parse_records(&json).unwrap_err();
        assert_eq!(
            analysis_error(&err),
            Some(&AnalysisError::UnknownNutrient("kale".to_string()))
        );
    }

    #[test]
    fn test_unknown_outcome_rejected() {
        let mut day = day_json("2024-05-01", 1.0, 10.0);
        day["outcomes"]["mood"] = 3.0.into();
        let json = serde_json::json!([day]).to_string();

        let err = parse_records(&json).unwrap_err();
        assert!(matches!(
            analysis_error(&err),
            Some(AnalysisError::UnknownOutcome(key)) if key == "mood"
        ));
    }

    #[test]
    fn test_missing_key_rejected() {
        let mut day = day_json("2024-05-01", 1.0, 10.0);
        day["outcomes"]
            .as_object_mut()
            .unwrap()
            .remove("steps");
        let json = serde_json::json!([day_json("2024-04-30", 1.0, 10.0), day]).to_string();

        let err = parse_records(&json).unwrap_err();
        assert_eq!(
            analysis_error(&err),
            Some(&AnalysisError::MissingValue {
                day: 1,
                key: "steps".to_string()
            })
        );
    }

    #[test]
    fn test_case_variant_duplicate_key_rejected() {
        let mut day = day_json("2024-05-01", 1.0, 10.0);
        day["nutrition"]["Caffeine"] = 400.0.into();
        let json = serde_json::json!([day_json("2024-04-30", 1.0, 10.0), day]).to_string();

        let err = parse_records(&json).unwrap_err();
        assert!(matches!(
            analysis_error(&err),
            Some(AnalysisError::DuplicateKey { day: 1, .. })
        ));
    }

    #[test]
    fn test_case_variant_key_alone_is_accepted() {
        let mut day = day_json("2024-05-01", 1.0, 10.0);
        let outcomes = day["outcomes"].as_object_mut().unwrap();
        outcomes.remove("steps");
        outcomes.insert("Steps".to_string(), 9000.0.into());
        let json = serde_json::json!([day]).to_string();

        let records = parse_records(&json).unwrap();
        assert_eq!(records[0].outcomes[&Outcome::Steps], 9000.0);
    }

    #[test]
    fn test_negative_nutrition_rejected() {
        let mut day = day_json("2024-05-01", 1.0, 10.0);
        day["nutrition"]["caffeine"] = (-5.0).into();
        let json = serde_json::json!([day]).to_string();

        let err = parse_records(&json).unwrap_err();
        assert!(matches!(
            analysis_error(&err),
            Some(AnalysisError::InvalidValue { day: 0, .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse_records("{ not json").is_err());
        assert!(parse_records(r#"[{"date": "yesterday"}]"#).is_err());
    }

    #[test]
    fn test_load_records_from_file() {
        let json = serde_json::json!([
            day_json("2024-05-01", 1.0, 10.0),
            day_json("2024-05-02", 2.0, 20.0),
            day_json("2024-05-03", 3.0, 30.0),
        ])
        .to_string();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_records(Path::new("/nonexistent/records.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read records file"));
    }
}
