//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across the workspace binaries.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`WORMS_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! WORMS_<SECTION>_<KEY>=value
//!
//! Examples:
//!     WORMS_COMMON_LOG_LEVEL=debug
//!     WORMS_GAME_N_PLAYERS=3
//!     WORMS_MCTS_N_ITER=500
//!     WORMS_ARENA_SEATS=mcts,greedy
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;

#[cfg(test)]
mod tests;
