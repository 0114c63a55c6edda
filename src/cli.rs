//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

use crate::models::Outcome;

/// nutri-ite - personal nutrient effect estimator
///
/// Estimates how much each nutrient in your food log is associated with
/// changes in your sleep, HRV, heart rate and activity, from your own
/// daily records.
///
/// Examples:
///   nutri-ite --input records.json
///   nutri-ite --input records.json --format json --output profile.json
///   nutri-ite --input records.json --outcome deep_sleep_minutes
///   nutri-ite --demo-days 30 --seed 7
///   nutri-ite --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// JSON file with one object per study day
    #[arg(short, long, value_name = "FILE", env = "NUTRI_ITE_INPUT")]
    pub input: Option<PathBuf>,

    /// Generate a synthetic log of this many days instead of reading --input
    #[arg(long, value_name = "DAYS", conflicts_with = "input")]
    pub demo_days: Option<usize>,

    /// Output file path for the report
    ///
    /// Defaults to the config file setting or nutrition_profile.md.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Seed for the population-baseline jitter
    ///
    /// With a fixed seed, identical input produces an identical report.
    #[arg(long, value_name = "SEED", env = "NUTRI_ITE_SEED")]
    pub seed: Option<u64>,

    /// Print the effects on one outcome with food suggestions
    ///
    /// Example: --outcome deep_sleep_minutes
    #[arg(long, value_name = "KEY")]
    pub outcome: Option<String>,

    /// Minimum |ITE| shown in the --outcome view
    #[arg(long, value_name = "UNITS")]
    pub min_effect: Option<f64>,

    /// JSON food table to use instead of the built-in one
    #[arg(long, value_name = "FILE")]
    pub food_table: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .nutri-ite.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .nutri-ite.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.input.is_none() && self.demo_days.is_none() {
            return Err("Either --input or --demo-days is required".to_string());
        }

        if let Some(ref input) = self.input {
            if !input.is_file() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
        }

        if self.demo_days == Some(0) {
            return Err("--demo-days must be at least 1".to_string());
        }

        // Unknown outcome keys are a configuration error, caught before analysis.
        if let Some(ref key) = self.outcome {
            key.parse::<Outcome>().map_err(|e| e.to_string())?;
        }

        if let Some(min_effect) = self.min_effect {
            if !min_effect.is_finite() || min_effect < 0.0 {
                return Err("--min-effect must be a non-negative number".to_string());
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// The outcome selected with `--outcome`, if any.
    pub fn outcome_filter(&self) -> Option<Outcome> {
        self.outcome.as_deref().and_then(|key| key.parse().ok())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
