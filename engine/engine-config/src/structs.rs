//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_data_dir() -> String {
    defaults::data_dir().into()
}
fn d_n_players() -> usize {
    defaults::n_players()
}
fn d_n_dice() -> usize {
    defaults::n_dice()
}
fn d_n_iter() -> u32 {
    defaults::n_iter()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_num_rollouts() -> u32 {
    defaults::num_rollouts()
}
fn d_rollout_turns() -> u32 {
    defaults::rollout_turns()
}
fn d_max_rollout_depth() -> u32 {
    defaults::max_rollout_depth()
}
fn d_discount() -> Option<f64> {
    defaults::discount()
}
fn d_weighted_rollouts() -> bool {
    defaults::weighted_rollouts()
}
fn d_reward_baseline() -> String {
    defaults::reward_baseline().into()
}
fn d_action_selection() -> String {
    defaults::action_selection().into()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_seats() -> Vec<String> {
    defaults::seats().to_vec()
}
fn d_max_steps() -> u32 {
    defaults::max_steps()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub mcts: MctsSettings,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    #[serde(default = "d_seed")]
    pub seed: u64,
    #[serde(default = "d_data_dir")]
    pub data_dir: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            seed: defaults::seed(),
            data_dir: defaults::data_dir().into(),
        }
    }
}

/// Table setup
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    #[serde(default = "d_n_players")]
    pub n_players: usize,
    #[serde(default = "d_n_dice")]
    pub n_dice: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            n_players: defaults::n_players(),
            n_dice: defaults::n_dice(),
        }
    }
}

/// Search parameters, kept as plain values so this crate stays independent
/// of the search crate. Enum-like fields are parsed by the consumer.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MctsSettings {
    #[serde(default = "d_n_iter")]
    pub n_iter: u32,
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    #[serde(default = "d_num_rollouts")]
    pub num_rollouts: u32,
    #[serde(default = "d_rollout_turns")]
    pub rollout_turns: u32,
    #[serde(default = "d_max_rollout_depth")]
    pub max_rollout_depth: u32,
    #[serde(default = "d_discount")]
    pub discount: Option<f64>,
    #[serde(default = "d_weighted_rollouts")]
    pub weighted_rollouts: bool,
    #[serde(default = "d_reward_baseline")]
    pub reward_baseline: String,
    #[serde(default = "d_action_selection")]
    pub action_selection: String,
}

impl Default for MctsSettings {
    fn default() -> Self {
        Self {
            n_iter: defaults::n_iter(),
            exploration: defaults::exploration(),
            num_rollouts: defaults::num_rollouts(),
            rollout_turns: defaults::rollout_turns(),
            max_rollout_depth: defaults::max_rollout_depth(),
            discount: defaults::discount(),
            weighted_rollouts: defaults::weighted_rollouts(),
            reward_baseline: defaults::reward_baseline().into(),
            action_selection: defaults::action_selection().into(),
        }
    }
}

/// Match runner configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    #[serde(default = "d_games")]
    pub games: u32,
    #[serde(default = "d_seats")]
    pub seats: Vec<String>,
    #[serde(default = "d_max_steps")]
    pub max_steps: u32,
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            seats: defaults::seats().to_vec(),
            max_steps: defaults::max_steps(),
            log_interval: defaults::log_interval(),
        }
    }
}
