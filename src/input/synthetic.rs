//! Synthetic demo logs.
//!
//! Generates a plausible N-of-1 log with a handful of planted
//! relationships (caffeine and alcohol against sleep and HRV, magnesium
//! and omega-3 in favour) so the pipeline can be exercised without a
//! real export.

use chrono::{Days, NaiveDate};
use rand::Rng;
use std::f64::consts::PI;

use crate::models::{DailyRecord, Nutrient, Outcome};

/// Typical daily intake (mean, standard deviation) per nutrient.
fn intake_profile(nutrient: Nutrient) -> (f64, f64) {
    match nutrient {
        Nutrient::Calories => (2200.0, 300.0),
        Nutrient::Protein => (90.0, 20.0),
        Nutrient::Carbohydrates => (250.0, 50.0),
        Nutrient::Fat => (75.0, 15.0),
        Nutrient::SaturatedFat => (25.0, 8.0),
        Nutrient::Fiber => (25.0, 7.0),
        Nutrient::Sugar => (50.0, 15.0),
        Nutrient::Sodium => (2500.0, 500.0),
        Nutrient::Potassium => (3000.0, 600.0),
        Nutrient::Calcium => (900.0, 200.0),
        Nutrient::Iron => (14.0, 4.0),
        Nutrient::Magnesium => (320.0, 80.0),
        Nutrient::Zinc => (10.0, 3.0),
        Nutrient::VitaminA => (700.0, 200.0),
        Nutrient::VitaminC => (80.0, 30.0),
        Nutrient::VitaminD => (10.0, 5.0),
        Nutrient::VitaminB6 => (1.5, 0.4),
        Nutrient::VitaminB12 => (3.0, 1.0),
        Nutrient::Folate => (350.0, 100.0),
        Nutrient::Omega3 => (1.2, 0.6),
        Nutrient::Tryptophan => (900.0, 250.0),
        Nutrient::Caffeine => (180.0, 90.0),
        Nutrient::Alcohol => (8.0, 10.0),
        Nutrient::Water => (2200.0, 500.0),
        Nutrient::Cholesterol => (250.0, 80.0),
    }
}

fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1 = rng.gen::<f64>().clamp(f64::MIN_POSITIVE, 1.0);
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// A `days`-long log starting 2024-01-01.
pub fn synthetic_records<R: Rng>(days: usize, rng: &mut R) -> Vec<DailyRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    (0..days)
        .map(|i| synthetic_day(start + Days::new(i as u64), rng))
        .collect()
}

fn synthetic_day<R: Rng>(date: NaiveDate, rng: &mut R) -> DailyRecord {
    let mut record = DailyRecord::new(date);

    // z-scores of the day's intake, reused by the outcome model below
    let mut z = std::collections::BTreeMap::new();
    for nutrient in Nutrient::ALL {
        let (mean, sd) = intake_profile(nutrient);
        let draw = standard_normal(rng);
        let value = (mean + sd * draw).max(0.0);
        z.insert(nutrient, (value - mean) / sd);
        record.nutrition.insert(nutrient, value);
    }
    let zn = |n: Nutrient| z[&n];
    let mut noise = || standard_normal(rng);

    let deep = 85.0 - 8.0 * zn(Nutrient::Caffeine) + 6.0 * zn(Nutrient::Magnesium)
        - 5.0 * zn(Nutrient::Alcohol)
        + 4.0 * noise();
    let rem = 100.0 - 6.0 * zn(Nutrient::Alcohol) + 3.0 * zn(Nutrient::Tryptophan) + 5.0 * noise();
    let light = 230.0 + 10.0 * noise();
    let efficiency = (86.0 + 2.0 * zn(Nutrient::Fiber) - 2.0 * zn(Nutrient::Alcohol)
        + 1.5 * noise())
    .min(100.0);
    let hrv = 55.0 + 6.0 * zn(Nutrient::Omega3)
        - 7.0 * zn(Nutrient::Alcohol)
        - 3.0 * zn(Nutrient::Caffeine)
        + 4.0 * noise();
    let rhr = 58.0 + 3.0 * zn(Nutrient::Alcohol) + 1.5 * zn(Nutrient::SaturatedFat) + 1.5 * noise();
    let steps = (8500.0 + 1500.0 * noise()).max(0.0);
    let active = (450.0 + 80.0 * zn(Nutrient::Calories) + 60.0 * noise()).max(0.0);
    let readiness = 78.0 + 0.3 * (hrv - 55.0) - 0.8 * (rhr - 58.0) + 0.05 * (deep - 85.0)
        + 3.0 * noise();

    let outcomes = [
        (Outcome::DeepSleepMinutes, deep),
        (Outcome::RemSleepMinutes, rem),
        (Outcome::LightSleepMinutes, light),
        (Outcome::TotalSleepMinutes, deep + rem + light),
        (Outcome::SleepEfficiency, efficiency),
        (Outcome::HrvRmssd, hrv),
        (Outcome::RestingHeartRate, rhr),
        (Outcome::Steps, steps.round()),
        (Outcome::ActiveCalories, active),
        (Outcome::ReadinessScore, readiness.clamp(0.0, 100.0)),
    ];
    record.outcomes.extend(outcomes);

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::validate_records;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_synthetic_records_are_complete() {
        let records = synthetic_records(14, &mut StdRng::seed_from_u64(1));
        assert_eq!(records.len(), 14);
        assert!(validate_records(&records, 3).is_ok());
        assert_eq!(records[13].date, NaiveDate::from_ymd_opt(2024, 1, 14).unwrap());
    }

    #[test]
    fn test_synthetic_records_reproducible() {
        let a = synthetic_records(10, &mut StdRng::seed_from_u64(5));
        let b = synthetic_records(10, &mut StdRng::seed_from_u64(5));
        let c = synthetic_records(10, &mut StdRng::seed_from_u64(6));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_planted_caffeine_effect_is_negative() {
        let records = synthetic_records(60, &mut StdRng::seed_from_u64(3));
        let caffeine: Vec<f64> = records
            .iter()
            .map(|r| r.nutrition[&Nutrient::Caffeine])
            .collect();
        let deep: Vec<f64> = records
            .iter()
            .map(|r| r.outcomes[&Outcome::DeepSleepMinutes])
            .collect();
        assert!(crate::analysis::stats::pearson(&caffeine, &deep) < -0.2);
    }
}
