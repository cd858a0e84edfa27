//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time so every binary starts
//! from the same values.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    game: GameDefaults,
    mcts: MctsDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
    seed: u64,
    data_dir: String,
}

#[derive(Debug, Deserialize)]
struct GameDefaults {
    n_players: usize,
    n_dice: usize,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    n_iter: u32,
    exploration: f64,
    num_rollouts: u32,
    rollout_turns: u32,
    max_rollout_depth: u32,
    discount: Option<f64>,
    weighted_rollouts: bool,
    reward_baseline: String,
    action_selection: String,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    games: u32,
    seats: Vec<String>,
    max_steps: u32,
    log_interval: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn seed() -> u64 {
    DEFAULTS.common.seed
}
pub fn data_dir() -> &'static str {
    &DEFAULTS.common.data_dir
}

// Game
pub fn n_players() -> usize {
    DEFAULTS.game.n_players
}
pub fn n_dice() -> usize {
    DEFAULTS.game.n_dice
}

// MCTS
pub fn n_iter() -> u32 {
    DEFAULTS.mcts.n_iter
}
pub fn exploration() -> f64 {
    DEFAULTS.mcts.exploration
}
pub fn num_rollouts() -> u32 {
    DEFAULTS.mcts.num_rollouts
}
pub fn rollout_turns() -> u32 {
    DEFAULTS.mcts.rollout_turns
}
pub fn max_rollout_depth() -> u32 {
    DEFAULTS.mcts.max_rollout_depth
}
pub fn discount() -> Option<f64> {
    DEFAULTS.mcts.discount
}
pub fn weighted_rollouts() -> bool {
    DEFAULTS.mcts.weighted_rollouts
}
pub fn reward_baseline() -> &'static str {
    &DEFAULTS.mcts.reward_baseline
}
pub fn action_selection() -> &'static str {
    &DEFAULTS.mcts.action_selection
}

// Arena
pub fn games() -> u32 {
    DEFAULTS.arena.games
}
pub fn seats() -> &'static [String] {
    &DEFAULTS.arena.seats
}
pub fn max_steps() -> u32 {
    DEFAULTS.arena.max_steps
}
pub fn log_interval() -> u32 {
    DEFAULTS.arena.log_interval
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        // Just accessing these will verify the TOML parses correctly
        assert_eq!(log_level(), "info");
        assert_eq!(seed(), 42);
        assert_eq!(data_dir(), "./data");
    }

    #[test]
    fn test_game_defaults() {
        assert_eq!(n_players(), 2);
        assert_eq!(n_dice(), 8);
    }

    #[test]
    fn test_mcts_defaults() {
        assert_eq!(n_iter(), 100);
        assert!((exploration() - std::f64::consts::SQRT_2).abs() < 1e-12);
        assert_eq!(num_rollouts(), 5);
        assert_eq!(rollout_turns(), 3);
        assert_eq!(discount(), None);
        assert!(!weighted_rollouts());
        assert_eq!(action_selection(), "root");
    }

    #[test]
    fn test_arena_defaults() {
        assert_eq!(games(), 100);
        assert_eq!(seats(), ["mcts".to_string(), "random".to_string()]);
        assert_eq!(log_interval(), 10);
    }
}
