//! Seated Worms matches.
//!
//! Policies implement [`Policy`]: uniform random, a greedy rule-of-thumb
//! player and an MCTS-backed player. [`play_game`] runs one game to the end
//! and [`run_match`] plays a seeded series of games, tallying wins and mean
//! scores per seat.

pub mod config;
pub mod game;
pub mod mcts_policy;
pub mod policy;
pub mod runner;
pub mod stats;

pub use config::Config;
pub use game::{play_game, GameError, GameRecord};
pub use mcts_policy::MctsPolicy;
pub use policy::{GreedyPolicy, Policy, RandomPolicy, SeatKind};
pub use runner::{run_match, MatchConfig};
pub use stats::{MatchStats, MatchStatsSnapshot};
