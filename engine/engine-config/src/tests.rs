//! Tests for the configuration module.

use super::*;
use std::io::Write;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.common.seed, 42);
    assert_eq!(config.common.data_dir, "./data");
    assert_eq!(config.game.n_players, 2);
    assert_eq!(config.game.n_dice, 8);
    assert_eq!(config.arena.games, 100);
    assert_eq!(config.arena.seats, vec!["mcts", "random"]);
}

#[test]
fn test_mcts_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.mcts.n_iter, 100);
    assert!((config.mcts.exploration - std::f64::consts::SQRT_2).abs() < 1e-12);
    assert_eq!(config.mcts.num_rollouts, 5);
    assert_eq!(config.mcts.rollout_turns, 3);
    assert_eq!(config.mcts.max_rollout_depth, 1000);
    assert_eq!(config.mcts.discount, None);
    assert!(!config.mcts.weighted_rollouts);
    assert_eq!(config.mcts.reward_baseline, "parent");
    assert_eq!(config.mcts.action_selection, "root");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
seed = 7
log_level = "debug"

[game]
n_players = 4

[mcts]
n_iter = 250
discount = 0.9
weighted_rollouts = true

[arena]
seats = ["mcts", "greedy", "random", "random"]
games = 12
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.seed, 7);
    assert_eq!(config.common.log_level, "debug");
    assert_eq!(config.game.n_players, 4);
    assert_eq!(config.mcts.n_iter, 250);
    assert_eq!(config.mcts.discount, Some(0.9));
    assert!(config.mcts.weighted_rollouts);
    assert_eq!(config.arena.seats.len(), 4);
    assert_eq!(config.arena.games, 12);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[mcts]
num_rollouts = 9
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.mcts.num_rollouts, 9);
    assert_eq!(config.mcts.n_iter, 100); // Default
    assert_eq!(config.common.data_dir, "./data"); // Default
    assert_eq!(config.arena.log_interval, 10); // Default
}

#[test]
fn test_load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[game]\nn_dice = 6\n\n[arena]\nmax_steps = 500").unwrap();

    let config = load_from_path(file.path());
    assert_eq!(config.game.n_dice, 6);
    assert_eq!(config.arena.max_steps, 500);
    assert_eq!(config.game.n_players, 2);
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[game\nn_dice = ").unwrap();

    let config = load_from_path(file.path());
    assert_eq!(config.game, GameConfig::default());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_from_path(&dir.path().join("absent.toml"));
    assert_eq!(config.mcts, MctsSettings::default());
}

#[test]
fn test_env_overrides() {
    std::env::set_var("WORMS_MCTS_ROLLOUT_TURNS", "7");
    std::env::set_var("WORMS_MCTS_DISCOUNT", "0.8");
    std::env::set_var("WORMS_ARENA_SEATS", "greedy, mcts");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.mcts.rollout_turns, 7);
    assert_eq!(config.mcts.discount, Some(0.8));
    assert_eq!(config.arena.seats, vec!["greedy", "mcts"]);

    std::env::remove_var("WORMS_MCTS_ROLLOUT_TURNS");
    std::env::remove_var("WORMS_MCTS_DISCOUNT");
    std::env::remove_var("WORMS_ARENA_SEATS");
}

#[test]
fn test_unparseable_env_override_is_ignored() {
    std::env::set_var("WORMS_GAME_N_DICE", "many");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.game.n_dice, 8);

    std::env::remove_var("WORMS_GAME_N_DICE");
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config, cloned);
}
