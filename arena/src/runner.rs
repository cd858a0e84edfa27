//! Sequential match runner
//!
//! Plays a series of independent games with a fixed seating. Each game gets
//! its own generator and freshly built policies, all seeded from the match
//! seed and the game index, so any single game can be replayed on its own.

use std::path::PathBuf;

use anyhow::{Context, Result};
use games_worms::Worms;
use mcts::MctsConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{error, info};

use crate::game::play_game;
use crate::mcts_policy::MctsPolicy;
use crate::policy::{GreedyPolicy, Policy, RandomPolicy, SeatKind};
use crate::stats::{MatchStats, MatchStatsSnapshot};

/// Everything needed to run a match.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// One policy per seat; the seat count is the player count
    pub seats: Vec<SeatKind>,
    pub games: u32,
    pub seed: u64,
    pub n_dice: usize,
    pub max_steps: u32,
    /// Log progress every N games (0 to disable)
    pub log_interval: u32,
    pub min_take: u32,
    pub mcts: MctsConfig,
    pub stats_path: Option<PathBuf>,
}

/// Seed for one game of the match.
pub fn game_seed(base: u64, game: u32) -> u64 {
    base.wrapping_add(u64::from(game))
}

/// Build fresh policies for one game.
pub fn build_seats(config: &MatchConfig, seed: u64) -> Vec<Box<dyn Policy<Worms>>> {
    config
        .seats
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let seat_seed = seed.wrapping_mul(31).wrapping_add(i as u64 + 1);
            let policy: Box<dyn Policy<Worms>> = match kind {
                SeatKind::Mcts => Box::new(MctsPolicy::with_seed(config.mcts.clone(), seat_seed)),
                SeatKind::Random => Box::new(RandomPolicy::with_seed(seat_seed)),
                SeatKind::Greedy => Box::new(GreedyPolicy::new(config.min_take)),
            };
            policy
        })
        .collect()
}

/// Play every game of the match and return the final statistics.
pub fn run_match(config: &MatchConfig) -> Result<MatchStatsSnapshot> {
    let names = config.seats.iter().map(|k| k.name().to_string()).collect();
    let mut stats = MatchStats::new(names, config.stats_path.clone());

    info!(
        games = config.games,
        seats = ?config.seats,
        seed = config.seed,
        n_iter = config.mcts.n_iter,
        "Starting match"
    );

    for game in 0..config.games {
        let seed = game_seed(config.seed, game);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut seats = build_seats(config, seed);
        let initial = Worms::with_dice(config.seats.len(), config.n_dice)
            .context("failed to set up the table")?;

        match play_game(initial, &mut seats, &mut rng, config.max_steps) {
            Ok(record) => stats.record_game(&record),
            Err(e) => {
                error!("Game {} failed: {}", game + 1, e);
                stats.record_failure();
                // Continue with next game rather than stopping
                continue;
            }
        }

        let played = stats.games_played();
        if config.log_interval > 0 && played % config.log_interval == 0 {
            let snapshot = stats.snapshot();
            info!(
                "Completed {} games (wins {:?}, mean scores {:?})",
                played, snapshot.wins, snapshot.mean_scores
            );
            stats.write_stats();
        }
    }

    stats.write_stats();
    let snapshot = stats.snapshot();
    info!(
        games = snapshot.games_played,
        failed = snapshot.games_failed,
        runtime_secs = snapshot.runtime_seconds,
        "Match finished"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn quick_config(seats: Vec<SeatKind>) -> MatchConfig {
        MatchConfig {
            seats,
            games: 4,
            seed: 7,
            n_dice: 8,
            max_steps: 100_000,
            log_interval: 2,
            min_take: 25,
            mcts: MctsConfig::for_play()
                .with_iterations(5)
                .with_rollouts(1)
                .with_rollout_turns(1),
            stats_path: None,
        }
    }

    #[test]
    fn test_baseline_match() {
        let config = quick_config(vec![SeatKind::Greedy, SeatKind::Random]);
        let snapshot = run_match(&config).unwrap();

        assert_eq!(snapshot.games_played, 4);
        assert_eq!(snapshot.games_failed, 0);
        assert_eq!(snapshot.seats, vec!["greedy", "random"]);
        assert!(snapshot.wins.iter().sum::<u32>() >= 4);
    }

    #[test]
    fn test_mcts_seat_plays_to_completion() {
        let mut config = quick_config(vec![SeatKind::Mcts, SeatKind::Random]);
        config.games = 1;
        let snapshot = run_match(&config).unwrap();

        assert_eq!(snapshot.games_played, 1);
        assert!(snapshot.total_steps > 0);
    }

    #[test]
    fn test_match_is_reproducible() {
        let config = quick_config(vec![SeatKind::Random, SeatKind::Random, SeatKind::Greedy]);
        let first = run_match(&config).unwrap();
        let second = run_match(&config).unwrap();

        assert_eq!(first.wins, second.wins);
        assert_eq!(first.mean_scores, second.mean_scores);
        assert_eq!(first.total_steps, second.total_steps);
    }

    #[test]
    fn test_step_limit_counts_as_failure() {
        let mut config = quick_config(vec![SeatKind::Random, SeatKind::Random]);
        config.max_steps = 5;
        let snapshot = run_match(&config).unwrap();

        assert_eq!(snapshot.games_played, 0);
        assert_eq!(snapshot.games_failed, 4);
    }

    #[test]
    fn test_stats_file_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("arena_stats.json");
        let mut config = quick_config(vec![SeatKind::Greedy, SeatKind::Greedy]);
        config.stats_path = Some(path.clone());

        run_match(&config).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: MatchStatsSnapshot = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.games_played, 4);
    }

    #[test]
    fn test_game_seeds_are_distinct() {
        assert_ne!(game_seed(7, 0), game_seed(7, 1));
        assert_eq!(game_seed(u64::MAX, 1), 0);
    }
}
