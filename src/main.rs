//! Command line entry point for the esports ELO rating engine
//!
//! Replays a file of completed matches through the rating engine, prints the
//! resulting standings and, optionally, a prediction for an upcoming match.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use esports_elo::collector::{InMemoryTeamStore, MatchProcessor};
use esports_elo::config::{validate_config, AppConfig};
use esports_elo::rating::{EloEngine, RatingTier};
use esports_elo::types::{MatchImportance, MatchRecord, TeamId};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Esports ELO - team ratings and match predictions
#[derive(Parser)]
#[command(
    name = "esports-elo",
    version,
    about = "ELO ratings and match predictions for esports teams",
    long_about = "Replays completed esports matches through an ELO rating engine with dynamic \
                 K-factors, tournament weighting and inactivity decay, then reports team \
                 standings and match predictions."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Match file to replay
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "JSON array of completed matches to apply"
    )]
    matches: Option<PathBuf>,

    /// Teams to predict
    #[arg(
        long,
        value_name = "A,B",
        value_delimiter = ',',
        help = "Predict a match between two team ids, e.g. --predict 15,39"
    )]
    predict: Vec<TeamId>,

    /// Tier for the prediction
    #[arg(
        long,
        value_name = "TIER",
        help = "Tournament tier for the prediction (S, A, B, C, Qualifier, League)"
    )]
    importance: Option<String>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Print standings as JSON
    #[arg(long, help = "Print final standings as JSON instead of a table")]
    json: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without processing matches")]
    dry_run: bool,
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
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration and apply CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    validate_config(&config)?;
    Ok(config)
}

/// Display startup banner with rating parameters
fn display_startup_banner(config: &AppConfig) {
    info!("Esports ELO rating engine v{}", esports_elo::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Base K-factor: {}", config.rating.base_k_factor);
    info!(
        "   Decay: x{} every {} days after {} idle days",
        config.rating.decay_factor,
        config.rating.decay_period_days,
        config.rating.decay_threshold_days
    );
    info!("   Default tier: {}", config.collection.default_importance);
}

/// Read matches and order them by date; undated matches go first
fn read_matches(path: &Path) -> Result<Vec<MatchRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read match file {}", path.display()))?;

    let mut matches: Vec<MatchRecord> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse match file {}", path.display()))?;

    matches.sort_by_key(|record| record.played_at);
    Ok(matches)
}

fn print_standings(processor: &MatchProcessor<InMemoryTeamStore>, as_json: bool) -> Result<()> {
    let standings = processor.standings()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&standings)?);
        return Ok(());
    }

    println!(
        "{:<4} {:<28} {:>8} {:>8} {:>11} {:>8}",
        "#", "Team", "Rating", "Matches", "Confidence", "Form"
    );
    for (rank, team) in standings.iter().enumerate() {
        println!(
            "{:<4} {:<28} {:>8.1} {:>8} {:>11.1} {:>+8.1}",
            rank + 1,
            team.name,
            team.elo.rating,
            team.elo.match_count,
            processor.engine().confidence(&team.elo),
            team.elo.current_form()
        );
    }

    let distribution = processor.rating_distribution()?;
    println!();
    println!(
        "Teams: {}  mean {:.1}  median {:.1}  std {:.1}  range {:.1}-{:.1}",
        distribution.total,
        distribution.mean,
        distribution.median,
        distribution.std_dev,
        distribution.min,
        distribution.max
    );
    for tier in RatingTier::ALL {
        let count = distribution.count(tier);
        if count > 0 {
            println!("  {:<22} {}", tier.to_string(), count);
        }
    }

    Ok(())
}

fn run(args: &Args, config: AppConfig) -> Result<()> {
    let engine = EloEngine::new(config.rating.clone())?;
    let mut processor = MatchProcessor::new(engine, InMemoryTeamStore::new())
        .with_default_importance(config.collection.default_importance);

    if let Some(path) = &args.matches {
        let matches = read_matches(path)?;
        info!("Loaded {} matches from {}", matches.len(), path.display());

        let summary = processor.process_matches(&matches);
        println!("Processed matches: {}", summary);
    }

    print_standings(&processor, args.json)?;

    if !args.predict.is_empty() {
        let &[team_a, team_b] = args.predict.as_slice() else {
            return Err(anyhow!("--predict expects exactly two team ids"));
        };
        let importance = args
            .importance
            .as_deref()
            .map(MatchImportance::from)
            .unwrap_or(config.collection.default_importance);

        let prediction = processor.predict(team_a, team_b, importance)?;
        println!();
        println!(
            "Prediction {} vs {} ({} tier): {}",
            team_a, team_b, importance, prediction.label
        );
        println!(
            "  Win probability: {:.1}% / {:.1}%",
            prediction.expected_a * 100.0,
            prediction.expected_b * 100.0
        );
        println!(
            "  Rating difference: {:+.1}  confidence: {:.2}",
            prediction.rating_difference, prediction.confidence
        );
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    if args.dry_run {
        info!("Configuration validation successful");
        return;
    }

    if let Err(e) = run(&args, config) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
