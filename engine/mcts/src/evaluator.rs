//! Evaluator trait for freshly expanded nodes.
//!
//! An evaluator turns a node into a scalar reward from the searching
//! player's point of view. The default is [`RolloutEvaluator`], which plays
//! short random continuations and measures how much the player's reward
//! signal moved.

use engine_core::{GameAction, GameState, PlayerId};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, WeightedIndex};

use crate::config::{MctsConfig, RewardBaseline, RolloutPolicy};
use crate::node::NodeId;
use crate::tree::MctsTree;

/// Trait for node evaluators.
///
/// Implementations could be:
/// - RolloutEvaluator: bounded random playouts (the default)
/// - Heuristic evaluators reading the state directly
pub trait Evaluator<S: GameState> {
    /// Estimate the reward of `node` for `player`.
    ///
    /// All randomness must be drawn from `rng` so seeded searches replay
    /// exactly.
    fn evaluate(
        &self,
        tree: &MctsTree<S>,
        node: NodeId,
        player: PlayerId,
        rng: &mut ChaCha20Rng,
    ) -> f64;
}

/// Reward shaping: `sign(x) * x^2`.
///
/// Amplifies large deltas and flattens noise near zero. Odd-symmetric, so
/// `shape_reward(-x) == -shape_reward(x)`.
#[inline]
pub fn shape_reward(x: f64) -> f64 {
    x.signum() * x * x
}

/// Playout evaluator averaging several bounded simulations.
#[derive(Debug, Clone)]
pub struct RolloutEvaluator {
    /// Independent playouts per evaluation
    pub num_rollouts: u32,

    /// Stop once the evaluating player has completed this many turns
    pub max_turns: u32,

    /// Hard cap on simulated moves per playout
    pub max_depth: u32,

    /// Move sampling
    pub policy: RolloutPolicy,

    /// State the reward delta is measured from
    pub baseline: RewardBaseline,
}

impl Default for RolloutEvaluator {
    fn default() -> Self {
        Self::from_config(&MctsConfig::default())
    }
}

impl RolloutEvaluator {
    pub fn new(num_rollouts: u32, max_turns: u32) -> Self {
        Self {
            num_rollouts,
            max_turns,
            ..Self::default()
        }
    }

    pub fn from_config(config: &MctsConfig) -> Self {
        Self {
            num_rollouts: config.num_rollouts,
            max_turns: config.rollout_turns,
            max_depth: config.max_rollout_depth,
            policy: config.rollout_policy,
            baseline: config.reward_baseline,
        }
    }

    /// Play one continuation from `start` and return the final state.
    fn rollout<S: GameState>(&self, start: &S, player: PlayerId, rng: &mut ChaCha20Rng) -> S {
        let mut state = start.clone();
        let mut away = state.current_player() != player;
        let mut turns = 0;
        let mut depth = 0;

        while turns < self.max_turns && depth < self.max_depth && !state.is_terminal() {
            let actions = state.legal_actions();
            if actions.is_empty() {
                break;
            }

            let action = self.sample_action(&actions, rng);
            state = state.apply(&action, rng);
            depth += 1;

            // A turn is complete once play leaves the player and comes back
            if state.current_player() != player {
                away = true;
            } else if away {
                away = false;
                turns += 1;
            }
        }

        state
    }

    /// Pick one of `actions` according to the rollout policy.
    fn sample_action<A: GameAction>(&self, actions: &[A], rng: &mut ChaCha20Rng) -> A {
        if self.policy == RolloutPolicy::Weighted {
            let weights: Vec<u32> = actions.iter().map(|a| a.payload().unwrap_or(0)).collect();
            // Fails when every weight is zero; fall through to uniform
            if let Ok(dist) = WeightedIndex::new(&weights) {
                return actions[dist.sample(rng)].clone();
            }
        }
        actions[rng.gen_range(0..actions.len())].clone()
    }
}

impl<S: GameState> Evaluator<S> for RolloutEvaluator {
    fn evaluate(
        &self,
        tree: &MctsTree<S>,
        node: NodeId,
        player: PlayerId,
        rng: &mut ChaCha20Rng,
    ) -> f64 {
        if self.num_rollouts == 0 {
            return 0.0;
        }

        let current = tree.get(node);
        let baseline_state = match self.baseline {
            RewardBaseline::Parent if current.parent.is_some() => &tree.get(current.parent).state,
            _ => &current.state,
        };
        let baseline = baseline_state.reward_signal(player);

        let total: f64 = (0..self.num_rollouts)
            .map(|_| self.rollout(&current.state, player, rng).reward_signal(player) - baseline)
            .sum();

        shape_reward(total / self.num_rollouts as f64)
    }
}
