//! Command-line driver for the multiplayer Elo engine
//!
//! Replays a session of match results from a records file, then prints the
//! final standings or a JSON report with every player's rating history.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use podium_elo::config::AppConfig;
use podium_elo::{HistoryReport, HistoryTracker, Session};
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Podium Elo - multiplayer ratings for matches with tied finishing positions
#[derive(Parser)]
#[command(
    name = "podium-elo",
    version,
    about = "Replay match results and report multiplayer Elo ratings",
    long_about = "Podium Elo replays an ordered list of match results, where each match is a \
                 list of finishing position groups, and reports every player's rating after \
                 each match using a generalized multiplayer Elo system."
)]
struct Args {
    /// Session records file
    #[arg(
        value_name = "RECORDS",
        help = "Path to the session records file (.toml or .json)"
    )]
    records: PathBuf,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// K-factor override
    #[arg(long, value_name = "POINTS", help = "Override the award (K-factor)")]
    award: Option<f64>,

    /// Diff override
    #[arg(long, value_name = "POINTS", help = "Override the rating gap parameter")]
    diff: Option<f64>,

    /// Alpha override
    #[arg(long, value_name = "WEIGHT", help = "Override the top position weighting")]
    alpha: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate inputs and exit)
    #[arg(long, help = "Validate configuration and records and exit")]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Leaderboard table
    Table,
    /// Full report with histories
    Json,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment, file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(award) = args.award {
        config.rating.award = award;
    }

    if let Some(diff) = args.diff {
        config.rating.diff = diff;
    }

    if let Some(alpha) = args.alpha {
        config.rating.alpha = alpha;
    }

    podium_elo::config::validate_config(&config)?;
    Ok(config)
}

fn run(args: &Args, config: &AppConfig) -> Result<()> {
    let session = Session::load(&args.records)?;
    let initial_ratings = session.initial_ratings(config.rating.initial_rating);

    info!(
        "{}: {} player(s), {} match(es), award {}, diff {}, alpha {}",
        config.service.name,
        initial_ratings.len(),
        session.matches.len(),
        config.rating.award,
        config.rating.diff,
        config.rating.alpha
    );

    let mut tracker = HistoryTracker::from_config(&initial_ratings, config.rating.clone())?;

    for (number, game) in session.matches.iter().enumerate() {
        let changes = tracker
            .record_match(game)
            .with_context(|| format!("Match {} was rejected", number + 1))?;
        debug!("Match {}: {} rating change(s)", number + 1, changes.len());
    }

    if args.dry_run {
        info!("Dry run completed - records are valid");
        return Ok(());
    }

    let report = HistoryReport::from_tracker(&tracker);
    match args.format {
        OutputFormat::Table => print!("{}", report.render_table()?),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&args, &config) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
