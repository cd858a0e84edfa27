//! Configuration for the arena binary
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use games_worms::MAX_PLAYERS;
use mcts::{ActionSelection, MctsConfig, RewardBaseline, RolloutPolicy};
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

use crate::policy::{SeatKind, DEFAULT_MIN_TAKE};
use crate::runner::MatchConfig;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_seats() -> String {
    CENTRAL_CONFIG.arena.seats.join(",")
}

fn default_n_players() -> usize {
    CENTRAL_CONFIG.game.n_players
}

fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.common.seed
}

fn default_n_dice() -> usize {
    CENTRAL_CONFIG.game.n_dice
}

fn default_max_steps() -> u32 {
    CENTRAL_CONFIG.arena.max_steps
}

fn default_n_iter() -> u32 {
    CENTRAL_CONFIG.mcts.n_iter
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.mcts.exploration
}

fn default_rollouts() -> u32 {
    CENTRAL_CONFIG.mcts.num_rollouts
}

fn default_rollout_turns() -> u32 {
    CENTRAL_CONFIG.mcts.rollout_turns
}

fn default_max_rollout_depth() -> u32 {
    CENTRAL_CONFIG.mcts.max_rollout_depth
}

fn default_weighted() -> bool {
    CENTRAL_CONFIG.mcts.weighted_rollouts
}

fn default_reward_baseline() -> String {
    CENTRAL_CONFIG.mcts.reward_baseline.clone()
}

fn default_action_selection() -> String {
    CENTRAL_CONFIG.mcts.action_selection.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_log_interval() -> u32 {
    CENTRAL_CONFIG.arena.log_interval
}

fn default_stats_path() -> String {
    format!("{}/arena_stats.json", CENTRAL_CONFIG.common.data_dir)
}

#[derive(Parser, Debug, Clone)]
#[command(name = "arena")]
#[command(about = "Worms arena - seated matches between MCTS and baseline policies")]
#[command(
    long_about = "Plays a series of Worms games with one policy per seat and reports
wins and mean scores per seat.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Comma separated policy per seat (mcts, random, greedy)
    #[arg(long, default_value_t = default_seats())]
    pub seats: String,

    /// Players at the table; seats beyond the --seats list play randomly
    #[arg(long, default_value_t = default_n_players())]
    pub n_players: usize,

    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Base seed; game i uses seed + i
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Dice per turn
    #[arg(long, default_value_t = default_n_dice())]
    pub n_dice: usize,

    /// Abort a game after this many actions
    #[arg(long, default_value_t = default_max_steps())]
    pub max_steps: u32,

    /// MCTS iterations per decision
    #[arg(long, default_value_t = default_n_iter())]
    pub n_iter: u32,

    /// UCB exploration constant
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Playouts averaged per evaluation
    #[arg(long, default_value_t = default_rollouts())]
    pub rollouts: u32,

    /// Turns of the searching player simulated per playout
    #[arg(long, default_value_t = default_rollout_turns())]
    pub rollout_turns: u32,

    /// Hard cap on moves per playout
    #[arg(long, default_value_t = default_max_rollout_depth())]
    pub max_rollout_depth: u32,

    /// Per-level backpropagation discount in (0, 1]; unset for none
    #[arg(long)]
    pub discount: Option<f64>,

    /// Sample playout moves in proportion to their payload
    #[arg(long, default_value_t = default_weighted())]
    pub weighted: bool,

    /// Reward delta baseline (parent, node)
    #[arg(long, default_value_t = default_reward_baseline())]
    pub reward_baseline: String,

    /// Reported action (root, leaf)
    #[arg(long, default_value_t = default_action_selection())]
    pub action_selection: String,

    /// Smallest total the greedy baseline claims a domino with
    #[arg(long, default_value_t = DEFAULT_MIN_TAKE)]
    pub min_take: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Log progress every N games (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,

    /// Where match statistics are written
    #[arg(long, default_value_t = default_stats_path())]
    pub stats_path: String,
}

impl Config {
    /// Seat list padded with random players up to `n_players`.
    pub fn seat_kinds(&self) -> Result<Vec<SeatKind>> {
        let mut seats = self
            .seats
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<SeatKind>>>()?;

        if seats.len() > self.n_players {
            return Err(anyhow!(
                "{} seats given for {} players",
                seats.len(),
                self.n_players
            ));
        }
        seats.resize(self.n_players, SeatKind::Random);
        Ok(seats)
    }

    /// Search parameters for MCTS seats.
    pub fn mcts_config(&self) -> Result<MctsConfig> {
        let rollout_policy = if self.weighted {
            RolloutPolicy::Weighted
        } else {
            RolloutPolicy::Uniform
        };
        let reward_baseline: RewardBaseline = self
            .reward_baseline
            .parse()
            .context("invalid reward_baseline")?;
        let action_selection: ActionSelection = self
            .action_selection
            .parse()
            .context("invalid action_selection")?;

        let config = MctsConfig::default()
            .with_iterations(self.n_iter)
            .with_exploration(self.exploration)
            .with_rollouts(self.rollouts)
            .with_rollout_turns(self.rollout_turns)
            .with_rollout_policy(rollout_policy)
            .with_discount(self.discount.or(CENTRAL_CONFIG.mcts.discount))
            .with_reward_baseline(reward_baseline)
            .with_action_selection(action_selection);

        Ok(MctsConfig {
            max_rollout_depth: self.max_rollout_depth,
            ..config
        })
    }

    pub fn match_config(&self) -> Result<MatchConfig> {
        Ok(MatchConfig {
            seats: self.seat_kinds()?,
            games: self.games,
            seed: self.seed,
            n_dice: self.n_dice,
            max_steps: self.max_steps,
            log_interval: self.log_interval,
            min_take: self.min_take,
            mcts: self.mcts_config()?,
            stats_path: if self.stats_path.is_empty() {
                None
            } else {
                Some(PathBuf::from(&self.stats_path))
            },
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_players == 0 || self.n_players > MAX_PLAYERS {
            return Err(anyhow!(
                "n_players must be between 1 and {}, got {}",
                MAX_PLAYERS,
                self.n_players
            ));
        }

        self.seat_kinds()?;

        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if self.n_dice == 0 {
            return Err(anyhow!("n_dice must be greater than 0"));
        }

        if self.max_steps == 0 {
            return Err(anyhow!("max_steps must be greater than 0"));
        }

        self.mcts_config()?
            .validate()
            .context("invalid MCTS settings")?;

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }
}
