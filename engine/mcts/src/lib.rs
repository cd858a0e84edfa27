//! Monte Carlo Tree Search (MCTS) over any `engine-core` game state.
//!
//! # Overview
//!
//! Each iteration of the search runs four phases:
//!
//! 1. **Selection**: Descend from the root by UCB score,
//!    `mean + C * sqrt(ln(N_parent) / N)`, to a node without children
//! 2. **Expansion**: Add a child for every legal action of that node
//! 3. **Evaluation**: Score each new child with bounded random playouts,
//!    measured as the change in the searching player's reward signal
//! 4. **Backpropagation**: Add every child's reward to the nodes on the
//!    selected path, optionally discounted by depth
//!
//! # Usage
//!
//! ```rust
//! use engine_core::GameState;
//! use games_worms::Worms;
//! use mcts::{Mcts, MctsConfig};
//!
//! let state = Worms::new(2).expect("valid table");
//! let mut engine = Mcts::new(MctsConfig::for_play().with_iterations(20), 42);
//!
//! let action = engine.play(state.clone()).expect("a fresh game has moves");
//! assert!(state.legal_actions().contains(&action));
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `n_iter`: Iterations per `train` call (default: 100)
//! - `exploration`: UCB exploration constant (default: sqrt 2)
//! - `num_rollouts`: Playouts averaged per evaluation (default: 5)
//! - `rollout_turns`: Turns of the searching player simulated per playout (default: 3)
//! - `discount`: Optional per-level backpropagation discount (default: none)
//!
//! # Randomness
//!
//! Tie-breaks, chance events and playout moves all draw from the engine's
//! single [`rand_chacha::ChaCha20Rng`]. Two engines built with the same seed
//! and given the same root produce identical trees.

pub mod config;
pub mod evaluator;
pub mod node;
pub mod search;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_games;

// Re-export main types
pub use config::{ActionSelection, ConfigError, MctsConfig, RewardBaseline, RolloutPolicy};
pub use evaluator::{shape_reward, Evaluator, RolloutEvaluator};
pub use node::{MctsNode, NodeId, INITIAL_VISITS};
pub use search::{Mcts, SearchStats};
pub use tree::{MctsTree, TreeStats};
