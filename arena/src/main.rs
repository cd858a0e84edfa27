//! Arena - seated Worms match runner
//!
//! A command line process that:
//! 1. Loads settings from config.toml, WORMS_* variables and flags
//! 2. Plays a seeded series of games between the configured policies
//! 3. Writes per-seat win and score statistics to a JSON file

use anyhow::Result;
use arena::{run_match, Config};
use clap::Parser;
use tracing::info;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let match_config = config.match_config()?;
    let snapshot = run_match(&match_config)?;

    for (seat, name) in snapshot.seats.iter().enumerate() {
        info!(
            seat,
            policy = %name,
            wins = snapshot.wins[seat],
            win_rate = snapshot.win_rates[seat],
            mean_score = snapshot.mean_scores[seat],
            "Seat result"
        );
    }
    if let Some(path) = &match_config.stats_path {
        info!("Match statistics written to {}", path.display());
    }

    Ok(())
}
