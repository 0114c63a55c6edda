//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.nutri-ite.toml` files.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analysis::{engine, estimator, ranker};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".nutri-ite.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Effect engine tunables.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Ranking limits.
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Fixed seed for the ATE baseline jitter.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            seed: None,
        }
    }
}

fn default_output() -> String {
    "nutrition_profile.md".to_string()
}

/// Effect engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Weight of the mediated (indirect) path.
    #[serde(default = "default_mediator_weight")]
    pub mediator_weight: f64,

    /// Minimum |r| for a pair to be reported.
    #[serde(default = "default_min_correlation")]
    pub min_correlation: f64,

    /// Upper bound on reported confidence.
    #[serde(default = "default_confidence_cap")]
    pub confidence_cap: f64,

    /// |ITE| needed to call an effect positive or negative.
    #[serde(default = "default_direction_threshold")]
    pub direction_threshold: f64,

    /// ATE baseline as a fraction of the ITE.
    #[serde(default = "default_ate_damping")]
    pub ate_damping: f64,

    /// Half-width of the ATE jitter (0 disables it).
    #[serde(default = "default_ate_jitter_span")]
    pub ate_jitter_span: f64,

    /// Minimum number of daily records (never below 3).
    #[serde(default = "default_min_records")]
    pub min_records: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mediator_weight: default_mediator_weight(),
            min_correlation: default_min_correlation(),
            confidence_cap: default_confidence_cap(),
            direction_threshold: default_direction_threshold(),
            ate_damping: default_ate_damping(),
            ate_jitter_span: default_ate_jitter_span(),
            min_records: default_min_records(),
        }
    }
}

impl EngineConfig {
    /// Reject tunables the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.mediator_weight.is_finite(),
            "engine.mediator_weight must be finite, got {}",
            self.mediator_weight
        );
        ensure!(
            (0.0..=1.0).contains(&self.min_correlation),
            "engine.min_correlation must be within [0, 1], got {}",
            self.min_correlation
        );
        ensure!(
            (0.0..=engine::CONFIDENCE_CAP).contains(&self.confidence_cap),
            "engine.confidence_cap must be within [0, {}], got {}",
            engine::CONFIDENCE_CAP,
            self.confidence_cap
        );
        ensure!(
            self.direction_threshold.is_finite(),
            "engine.direction_threshold must be finite, got {}",
            self.direction_threshold
        );
        ensure!(
            self.ate_damping.is_finite(),
            "engine.ate_damping must be finite, got {}",
            self.ate_damping
        );
        ensure!(
            self.ate_jitter_span.is_finite() && self.ate_jitter_span >= 0.0,
            "engine.ate_jitter_span must be a finite non-negative number, got {}",
            self.ate_jitter_span
        );
        Ok(())
    }
}

fn default_mediator_weight() -> f64 {
    estimator::DEFAULT_MEDIATOR_WEIGHT
}

fn default_min_correlation() -> f64 {
    engine::MIN_CORRELATION
}

fn default_confidence_cap() -> f64 {
    engine::CONFIDENCE_CAP
}

fn default_direction_threshold() -> f64 {
    engine::DIRECTION_THRESHOLD
}

fn default_ate_damping() -> f64 {
    engine::ATE_DAMPING
}

fn default_ate_jitter_span() -> f64 {
    engine::ATE_JITTER_SPAN
}

fn default_min_records() -> usize {
    engine::MIN_RECORDS
}

/// Ranking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Effects kept per outcome.
    #[serde(default = "default_top_per_outcome")]
    pub top_per_outcome: usize,

    /// Positive effects named in the summary.
    #[serde(default = "default_headline_positive")]
    pub headline_positive: usize,

    /// Negative effects named in the summary.
    #[serde(default = "default_headline_negative")]
    pub headline_negative: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_per_outcome: default_top_per_outcome(),
            headline_positive: default_headline_positive(),
            headline_negative: default_headline_negative(),
        }
    }
}

fn default_top_per_outcome() -> usize {
    ranker::TOP_PER_OUTCOME
}

fn default_headline_positive() -> usize {
    ranker::HEADLINE_POSITIVE
}

fn default_headline_negative() -> usize {
    ranker::HEADLINE_NEGATIVE
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// |ITE| cutoff for the per-outcome view.
    #[serde(default = "default_min_effect")]
    pub min_effect: f64,

    /// Foods suggested per effect in the per-outcome view.
    #[serde(default = "default_food_suggestions")]
    pub food_suggestions: usize,

    /// Optional JSON food table replacing the built-in one.
    #[serde(default)]
    pub food_table: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            min_effect: default_min_effect(),
            food_suggestions: default_food_suggestions(),
            food_table: None,
        }
    }
}

fn default_min_effect() -> f64 {
    ranker::MIN_REPORTABLE_EFFECT
}

fn default_food_suggestions() -> usize {
    3
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .engine
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when the CLI provides an explicit value.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if let Some(seed) = args.seed {
            self.general.seed = Some(seed);
        }
        if let Some(min_effect) = args.min_effect {
            self.report.min_effect = min_effect;
        }
        if let Some(ref food_table) = args.food_table {
            self.report.food_table = Some(food_table.display().to_string());
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.engine.mediator_weight, 0.3);
        assert_eq!(config.engine.min_correlation, 0.20);
        assert_eq!(config.engine.confidence_cap, 0.99);
        assert_eq!(config.engine.min_records, 3);
        assert_eq!(config.ranking.top_per_outcome, 5);
        assert_eq!(config.report.min_effect, 0.5);
        assert!(config.general.seed.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "custom_profile.md"
seed = 42

[engine]
mediator_weight = 0.5
ate_jitter_span = 0.0

[ranking]
headline_positive = 5
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "custom_profile.md");
        assert_eq!(config.general.seed, Some(42));
        assert_eq!(config.engine.mediator_weight, 0.5);
        assert_eq!(config.engine.ate_jitter_span, 0.0);
        assert_eq!(config.engine.min_correlation, 0.20);
        assert_eq!(config.ranking.headline_positive, 5);
        assert_eq!(config.ranking.headline_negative, 2);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[report]\nfood_suggestions = 1\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.report.food_suggestions, 1);
        assert_eq!(config.report.min_effect, 0.5);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[engine]\nmediator_weight = \"heavy\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_default_engine_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_confidence_cap_above_limit_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[engine]\nconfidence_cap = 1.5\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("engine.confidence_cap"));
    }

    #[test]
    fn test_infinite_jitter_span_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[engine]\nate_jitter_span = inf\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("engine.ate_jitter_span"));
    }

    #[test]
    fn test_engine_config_ranges() {
        let negative_span = EngineConfig {
            ate_jitter_span: -1.0,
            ..Default::default()
        };
        assert!(negative_span.validate().is_err());

        let loose_correlation = EngineConfig {
            min_correlation: 1.2,
            ..Default::default()
        };
        assert!(loose_correlation.validate().is_err());

        let nan_weight = EngineConfig {
            mediator_weight: f64::NAN,
            ..Default::default()
        };
        assert!(nan_weight.validate().is_err());

        let no_jitter = EngineConfig {
            ate_jitter_span: 0.0,
            confidence_cap: 0.5,
            ..Default::default()
        };
        assert!(no_jitter.validate().is_ok());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[engine]"));
        assert!(toml_str.contains("[ranking]"));
        assert!(toml_str.contains("[report]"));
        // Verbosity is a command-line concern only.
        assert!(!toml_str.contains("verbose"));
    }
}
