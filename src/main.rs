//! Command-line entry point for the league-rating engine
//!
//! Computes single rating updates, evaluates the rating curve, and applies
//! a period of match results to a roster read from JSON files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use league_rating::config::AppConfig;
use league_rating::rating::{apply_matches, RatingCalculator, RatingEngine, RatingPeriod};
use league_rating::types::{MatchResult, Roster, UpdateMode};
use league_rating::{inverse_log_curve, VERSION};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// League Rating - inverse-log curve rating updates for head-to-head matches
#[derive(Parser)]
#[command(
    name = "league-rating",
    version,
    about = "Compute league ratings from head-to-head match results",
    long_about = "League Rating updates a player's rating after a match using an inverse-log \
                 curve: small changes for expected results, larger ones for upsets."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        global = true,
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, global = true, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        global = true,
        help = "Validate configuration and exit without computing anything"
    )]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Rate a single match from the subject player's point of view
    Update {
        /// Subject player's current rating
        #[arg(long, allow_negative_numbers = true)]
        rating: f64,
        /// Opponent's current rating
        #[arg(long, allow_negative_numbers = true)]
        opponent: f64,
        /// The subject lost (default is a win)
        #[arg(long)]
        lost: bool,
        /// Print the full update breakdown as JSON
        #[arg(long)]
        json: bool,
    },
    /// Evaluate the inverse-log curve
    Curve {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        scale: f64,
        #[arg(long, allow_negative_numbers = true)]
        sensitivity: f64,
    },
    /// Apply several matches to one player
    Player {
        /// Player's rating before the matches
        #[arg(long, allow_negative_numbers = true)]
        rating: f64,
        /// Match as OPPONENT_RATING:W or OPPONENT_RATING:L (repeatable)
        #[arg(long = "match", allow_hyphen_values = true, value_name = "RATING:W|L", value_parser = parse_match)]
        matches: Vec<(f64, bool)>,
        /// Override the configured update mode
        #[arg(long, value_parser = parse_mode)]
        mode: Option<UpdateMode>,
    },
    /// Apply a period of match results to a roster
    Period {
        /// JSON object mapping player ids to ratings
        #[arg(long, value_name = "FILE")]
        roster: PathBuf,
        /// JSON array of {"winner": ..., "loser": ...} results
        #[arg(long, value_name = "FILE")]
        results: PathBuf,
        /// Period number (e.g. league week)
        #[arg(long, default_value_t = 1)]
        period: u32,
        /// Override the configured update mode
        #[arg(long, value_parser = parse_mode)]
        mode: Option<UpdateMode>,
    },
}

fn parse_match(value: &str) -> std::result::Result<(f64, bool), String> {
    let (rating, outcome) = value
        .rsplit_once(':')
        .ok_or_else(|| format!("expected RATING:W or RATING:L, got {}", value))?;
    let rating: f64 = rating
        .parse()
        .map_err(|_| format!("invalid opponent rating: {}", rating))?;
    let won = match outcome.to_uppercase().as_str() {
        "W" | "1" => true,
        "L" | "0" => false,
        other => return Err(format!("invalid match outcome: {}", other)),
    };
    Ok((rating, won))
}

fn parse_mode(value: &str) -> std::result::Result<UpdateMode, String> {
    value.parse()
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file/environment and CLI arguments
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

    league_rating::config::validate_config(&config)?;
    Ok(config)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn run(command: Command, config: &AppConfig) -> Result<()> {
    let engine = RatingEngine::new(config.rating.clone())?;

    match command {
        Command::Update {
            rating,
            opponent,
            lost,
            json,
        } => {
            let update = engine.rating_change(rating, opponent, !lost);
            if json {
                println!("{}", serde_json::to_string_pretty(&update)?);
            } else {
                println!("{}", update.new_rating);
            }
        }
        Command::Curve {
            x,
            scale,
            sensitivity,
        } => {
            println!("{}", inverse_log_curve(x, scale, sensitivity)?);
        }
        Command::Player {
            rating,
            matches,
            mode,
        } => {
            let mode = mode.unwrap_or(config.rating.update_mode);
            debug!(rating, matches = matches.len(), %mode, "Applying player matches");
            println!("{}", apply_matches(&engine, rating, &matches, mode));
        }
        Command::Period {
            roster,
            results,
            period,
            mode,
        } => {
            let roster: Roster = read_json(&roster)?;
            let results: Vec<MatchResult> = read_json(&results)?;
            let mode = mode.unwrap_or(config.rating.update_mode);

            let summary =
                RatingPeriod::new(Arc::new(engine), mode).process(period, &roster, &results)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    debug!(version = VERSION, service = %config.service.name, "Starting");

    if args.dry_run {
        info!(rating = ?config.rating, "Configuration validation successful");
        return Ok(());
    }

    match args.command {
        Some(command) => run(command, &config),
        None => {
            eprintln!("No command given, see --help");
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_match() {
        assert_eq!(parse_match("1600:W"), Ok((1600.0, true)));
        assert_eq!(parse_match("1600:1"), Ok((1600.0, true)));
        assert_eq!(parse_match("-50:l"), Ok((-50.0, false)));
        assert_eq!(parse_match("1450.5:0"), Ok((1450.5, false)));
    }

    #[test]
    fn test_parse_match_rejects_bad_input() {
        assert!(parse_match("1600:x").is_err());
        assert!(parse_match("1600").is_err());
        assert!(parse_match("strong:W").is_err());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("sequential"), Ok(UpdateMode::Sequential));
        assert!(parse_mode("weekly").is_err());
    }

    #[test]
    fn test_player_command_args() {
        let args = Args::try_parse_from([
            "league-rating",
            "player",
            "--rating",
            "1500",
            "--match",
            "1600:W",
            "--match",
            "-50:l",
            "--mode",
            "sequential",
        ])
        .unwrap();

        match args.command {
            Some(Command::Player {
                rating,
                matches,
                mode,
            }) => {
                assert_eq!(rating, 1500.0);
                assert_eq!(matches, vec![(1600.0, true), (-50.0, false)]);
                assert_eq!(mode, Some(UpdateMode::Sequential));
            }
            _ => panic!("expected player command"),
        }
    }

    #[test]
    fn test_player_command_rejects_bad_match() {
        let result = Args::try_parse_from([
            "league-rating",
            "player",
            "--rating",
            "1500",
            "--match",
            "1600:draw",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "league-rating",
            "update",
            "--rating",
            "1500",
            "--opponent",
            "1600",
            "--dry-run",
            "--debug",
        ])
        .unwrap();

        assert!(args.dry_run);
        assert!(args.debug);
        assert!(matches!(
            args.command,
            Some(Command::Update { lost: false, .. })
        ));
    }
}
