//! nutri-ite - personal nutrient effect estimator
//!
//! A CLI tool that estimates individualized treatment effects of daily
//! nutrient intake on sleep, HRV, heart rate and activity outcomes from a
//! single person's log, and writes a ranked profile report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad input, config, too few days of data, etc.)

mod analysis;
mod cli;
mod config;
mod error;
mod input;
mod knowledge;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use error::AnalysisError;
use knowledge::{FoodKnowledge, FoodTable};
use models::{DailyRecord, Report, ReportMetadata};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("nutri-ite v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Analysis failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .nutri-ite.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(config::CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", config::CONFIG_FILE_NAME);
    println!("   Edit it to tune thresholds, ranking limits and report options.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the complete estimation workflow. Returns the exit code.
fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let seed = config.general.seed;
    let (records, source) = get_records(&args, seed)?;
    info!("Loaded {} daily records from {}", records.len(), source);

    let engine = analysis::EffectEngine::new(analysis::EngineSettings::from(&config.engine));
    let ranking = analysis::RankingSettings::from(&config.ranking);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!("🔬 Estimating effects for {} nutrient/outcome pairs...", engine.pair_count());

    let profile = match analysis::build_profile(&records, &engine, &ranking, &mut rng) {
        Ok(profile) => profile,
        Err(e @ AnalysisError::InsufficientData { .. }) => {
            let missing = e.days_missing().unwrap_or_default();
            warn!("{}", e);
            eprintln!(
                "\n⏳ Not enough data yet: collect at least {} more day(s) of records and try again.",
                missing
            );
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    // Both ends exist: build_profile rejects fewer than three records.
    let (first_day, last_day) = match (records.first(), records.last()) {
        (Some(first), Some(last)) => (first.date, last.date),
        _ => return Ok(1),
    };

    let report = Report {
        metadata: ReportMetadata {
            source,
            generated_at: Utc::now(),
            days_analyzed: records.len(),
            first_day,
            last_day,
            pairs_evaluated: engine.pair_count(),
            seed,
        },
        profile,
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    let output_path = PathBuf::from(&config.general.output);
    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    if !args.quiet {
        println!("\n{}", report.profile.personal_summary);
    }

    if let Some(outcome) = args.outcome_filter() {
        let knowledge = load_food_knowledge(&config)?;
        let effects: Vec<_> = analysis::effects_for_outcome(
            &report.profile.ite_results,
            outcome,
            config.report.min_effect,
        )
        .into_iter()
        .map(|effect| {
            let suggestion =
                knowledge::suggest_foods(knowledge.as_ref(), effect, config.report.food_suggestions);
            (effect, suggestion)
        })
        .collect();

        println!("\n{}", report::generate_outcome_view(outcome, &effects));
    }

    println!(
        "\n✅ Profile complete! {} effects reported. Report saved to: {}",
        report.profile.ite_results.len(),
        output_path.display()
    );

    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", config::CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Read records from --input, or generate them for --demo-days.
fn get_records(args: &Args, seed: Option<u64>) -> Result<(Vec<DailyRecord>, String)> {
    if let Some(ref path) = args.input {
        let records = input::load_records(path)?;
        return Ok((records, path.display().to_string()));
    }

    let days = args.demo_days.unwrap_or_default();
    info!("Generating {} days of synthetic records", days);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok((input::synthetic_records(days, &mut rng), "synthetic".to_string()))
}

/// The food table from config, or the built-in one.
fn load_food_knowledge(config: &Config) -> Result<Box<dyn FoodKnowledge>> {
    match config.report.food_table {
        Some(ref path) => {
            info!("Loading food table from: {}", path);
            Ok(Box::new(FoodTable::load(Path::new(path))?))
        }
        None => Ok(Box::new(FoodTable::builtin())),
    }
}
