//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by WORMS_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("WORMS_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from WORMS_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "WORMS_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// A missing or malformed file falls back to the built-in defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, f64, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
    // Optional parseable field (Option<f64>, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = Some(v);
        }
    };
    // Comma separated list of strings
    ($config:expr, $section:ident . $field:ident, $key:expr, list) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: WORMS_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "WORMS_COMMON_LOG_LEVEL");
    env_override!(config, common.seed, "WORMS_COMMON_SEED", parse);
    env_override!(config, common.data_dir, "WORMS_COMMON_DATA_DIR");

    // Game
    env_override!(config, game.n_players, "WORMS_GAME_N_PLAYERS", parse);
    env_override!(config, game.n_dice, "WORMS_GAME_N_DICE", parse);

    // MCTS
    env_override!(config, mcts.n_iter, "WORMS_MCTS_N_ITER", parse);
    env_override!(config, mcts.exploration, "WORMS_MCTS_EXPLORATION", parse);
    env_override!(config, mcts.num_rollouts, "WORMS_MCTS_NUM_ROLLOUTS", parse);
    env_override!(
        config,
        mcts.rollout_turns,
        "WORMS_MCTS_ROLLOUT_TURNS",
        parse
    );
    env_override!(
        config,
        mcts.max_rollout_depth,
        "WORMS_MCTS_MAX_ROLLOUT_DEPTH",
        parse
    );
    env_override!(
        config,
        mcts.discount,
        "WORMS_MCTS_DISCOUNT",
        optional_parse
    );
    env_override!(
        config,
        mcts.weighted_rollouts,
        "WORMS_MCTS_WEIGHTED_ROLLOUTS",
        parse
    );
    env_override!(config, mcts.reward_baseline, "WORMS_MCTS_REWARD_BASELINE");
    env_override!(
        config,
        mcts.action_selection,
        "WORMS_MCTS_ACTION_SELECTION"
    );

    // Arena
    env_override!(config, arena.games, "WORMS_ARENA_GAMES", parse);
    env_override!(config, arena.seats, "WORMS_ARENA_SEATS", list);
    env_override!(config, arena.max_steps, "WORMS_ARENA_MAX_STEPS", parse);
    env_override!(
        config,
        arena.log_interval,
        "WORMS_ARENA_LOG_INTERVAL",
        parse
    );

    config
}
