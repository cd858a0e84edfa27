//! MCTS-backed policy
//!
//! Wraps the search engine so it can sit at a table like any other policy.
//! Every decision runs a fresh search rooted at the state to act in.

use anyhow::{anyhow, Result};
use engine_core::GameState;
use mcts::{Mcts, MctsConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, warn};

/// Policy that picks actions by Monte Carlo Tree Search
pub struct MctsPolicy<S: GameState> {
    engine: Mcts<S>,
    /// Decisions made so far
    decisions: u64,
    /// Decisions where the search came back empty-handed
    fallbacks: u64,
}

impl<S: GameState> std::fmt::Debug for MctsPolicy<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MctsPolicy")
            .field("config", self.engine.config())
            .field("decisions", &self.decisions)
            .field("fallbacks", &self.fallbacks)
            .finish()
    }
}

impl<S: GameState> MctsPolicy<S> {
    /// Create a new MCTS policy with an entropy-seeded engine
    pub fn new(config: MctsConfig) -> Self {
        Self::from_engine(Mcts::with_rng(config, ChaCha20Rng::from_entropy()))
    }

    /// Create with a specific seed for determinism
    pub fn with_seed(config: MctsConfig, seed: u64) -> Self {
        Self::from_engine(Mcts::new(config, seed))
    }

    fn from_engine(engine: Mcts<S>) -> Self {
        Self {
            engine,
            decisions: 0,
            fallbacks: 0,
        }
    }

    /// Number of decisions that fell back to the first legal action
    pub fn fallbacks(&self) -> u64 {
        self.fallbacks
    }
}

impl<S: GameState> crate::policy::Policy<S> for MctsPolicy<S> {
    fn name(&self) -> &str {
        "mcts"
    }

    fn select_action(&mut self, state: &S) -> Result<S::Action> {
        let legal = state.legal_actions();
        if legal.is_empty() {
            return Err(anyhow!("no legal actions available"));
        }
        self.decisions += 1;

        let chosen = self.engine.play(state.clone());
        let stats = self.engine.search_stats();
        debug!(
            decision = self.decisions,
            iterations = stats.iterations,
            evaluations = stats.evaluations,
            elapsed_us = stats.elapsed.as_micros() as u64,
            action = ?chosen,
            "MCTS decision"
        );

        match chosen {
            Some(action) if legal.contains(&action) => Ok(action),
            other => {
                self.fallbacks += 1;
                warn!(
                    searched = ?other,
                    "MCTS produced no playable action, falling back to first legal action"
                );
                Ok(legal[0].clone())
            }
        }
    }
}
