//! Error types for the estimation core.
//!
//! The binary wraps these in `anyhow` at the orchestration layer; inside
//! the core they stay typed so callers can react to `InsufficientData`.

use thiserror::Error;

/// Result alias for the estimation core.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors raised by record validation and the effect engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Too few daily records to estimate anything.
    #[error(
        "insufficient data: {found} daily record(s) provided, at least {required} required. \
         Collect at least {} more day(s) of data.",
        missing_days(.found, .required)
    )]
    InsufficientData {
        /// Records actually supplied.
        found: usize,
        /// Statistical floor.
        required: usize,
    },

    /// A nutrient identifier outside the fixed key set.
    #[error("unknown nutrient key: '{0}'")]
    UnknownNutrient(String),

    /// An outcome identifier outside the fixed key set.
    #[error("unknown outcome key: '{0}'")]
    UnknownOutcome(String),

    /// A record is missing one of the required keys.
    #[error("day {day}: missing value for '{key}'")]
    MissingValue {
        /// Zero-based record index.
        day: usize,
        /// The missing key.
        key: String,
    },

    /// Two keys in one record name the same nutrient or outcome.
    #[error("day {day}: '{key}' given more than once")]
    DuplicateKey {
        /// Zero-based record index.
        day: usize,
        /// The colliding key as written.
        key: String,
    },

    /// A value is non-finite, or negative where only non-negative values are valid.
    #[error("day {day}: invalid value {value} for '{key}'")]
    InvalidValue {
        /// Zero-based record index.
        day: usize,
        /// Offending key.
        key: String,
        /// Offending value.
        value: f64,
    },
}

fn missing_days(found: &usize, required: &usize) -> usize {
    required.saturating_sub(*found)
}

impl AnalysisError {
    /// Number of additional days needed, for `InsufficientData`.
    pub fn days_missing(&self) -> Option<usize> {
        match self {
            AnalysisError::InsufficientData { found, required } => {
                Some(missing_days(found, required))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_message_is_actionable() {
        let err = AnalysisError::InsufficientData {
            found: 1,
            required: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("1 daily record"));
        assert!(msg.contains("at least 2 more day"));
        assert_eq!(err.days_missing(), Some(2));
    }

    #[test]
    fn test_days_missing_only_for_insufficient_data() {
        let err = AnalysisError::UnknownNutrient("kale".to_string());
        assert_eq!(err.days_missing(), None);
        assert_eq!(err.to_string(), "unknown nutrient key: 'kale'");
    }
}
