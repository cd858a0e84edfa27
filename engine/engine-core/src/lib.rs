//! Core traits and types for the Worms game engine
//!
//! This crate provides the abstractions every other crate builds on:
//! - `GameState`: immutable snapshot with legal moves, transitions and scores
//! - `GameAction`: opaque, hashable move token with an optional numeric payload
//! - `game_utils`: score helpers shared by games and evaluation code

pub mod game_utils;
pub mod typed;

// Re-export main types for convenience
pub use game_utils::{advantage, next_player, winners};
pub use typed::{GameAction, GameState, PlayerId};
