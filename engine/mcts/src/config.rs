//! MCTS configuration parameters.

use std::str::FromStr;
use thiserror::Error;

/// Conventional UCB1 exploration constant.
pub const DEFAULT_EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// Errors reported by [`MctsConfig::validate`] and the string parsers.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("exploration constant must be finite and non-negative, got {0}")]
    InvalidExploration(f64),

    #[error("discount must lie in (0, 1], got {0}")]
    InvalidDiscount(f64),

    #[error("at least one rollout per evaluation is required")]
    NoRollouts,

    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

/// How playouts pick moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RolloutPolicy {
    /// Every legal action equally likely
    #[default]
    Uniform,
    /// Probability proportional to the action payload; uniform when no
    /// action carries a positive payload
    Weighted,
}

/// Which state a playout's reward delta is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RewardBaseline {
    /// The state the evaluated node was reached from, so the node's own
    /// move counts towards its reward
    #[default]
    Parent,
    /// The evaluated node's state itself. This is the delta taken "at the
    /// node being evaluated"; a terminal child always scores 0 under it.
    Node,
}

/// Which action the engine reports after training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionSelection {
    /// Follow the best child repeatedly and report the action of the last
    /// node on that line
    #[default]
    Leaf,
    /// Report the action of the root's best child
    Root,
}

impl FromStr for RolloutPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "weighted" => Ok(Self::Weighted),
            _ => Err(ConfigError::UnknownVariant {
                kind: "rollout policy",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for RewardBaseline {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "parent" => Ok(Self::Parent),
            "node" => Ok(Self::Node),
            _ => Err(ConfigError::UnknownVariant {
                kind: "reward baseline",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for ActionSelection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "leaf" => Ok(Self::Leaf),
            "root" => Ok(Self::Root),
            _ => Err(ConfigError::UnknownVariant {
                kind: "action selection",
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Number of select/expand/evaluate/backpropagate iterations per search.
    pub n_iter: u32,

    /// Exploration constant C in `mean + C * sqrt(ln(N_parent) / N)`.
    pub exploration: f64,

    /// Independent playouts averaged per evaluation.
    pub num_rollouts: u32,

    /// Playouts stop after this many full cycles back to the evaluating
    /// player. 0 measures the delta without simulating at all.
    pub rollout_turns: u32,

    /// Hard cap on moves per playout, independent of turn counting.
    pub max_rollout_depth: u32,

    /// Move sampling used by playouts.
    pub rollout_policy: RolloutPolicy,

    /// Per-level discount applied during backpropagation.
    /// None = undiscounted, Some(d) scales the reward by `d^depth`.
    pub discount: Option<f64>,

    /// Reference state for playout reward deltas.
    pub reward_baseline: RewardBaseline,

    /// Action reported by `play`.
    pub action_selection: ActionSelection,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            n_iter: 100,
            exploration: DEFAULT_EXPLORATION,
            num_rollouts: 5,
            rollout_turns: 3,
            max_rollout_depth: 1000,
            rollout_policy: RolloutPolicy::Uniform,
            discount: None,
            reward_baseline: RewardBaseline::Parent,
            action_selection: ActionSelection::Leaf,
        }
    }
}

impl MctsConfig {
    /// Create config for seated play: the reported action always belongs
    /// to the searched state.
    pub fn for_play() -> Self {
        Self {
            action_selection: ActionSelection::Root,
            ..Self::default()
        }
    }

    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            n_iter: 20,
            num_rollouts: 2,
            rollout_turns: 1,
            max_rollout_depth: 200,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.n_iter = n;
        self
    }

    /// Builder pattern: set exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set rollouts per evaluation.
    pub fn with_rollouts(mut self, n: u32) -> Self {
        self.num_rollouts = n;
        self
    }

    /// Builder pattern: set playout turn limit.
    pub fn with_rollout_turns(mut self, turns: u32) -> Self {
        self.rollout_turns = turns;
        self
    }

    /// Builder pattern: set playout move sampling.
    pub fn with_rollout_policy(mut self, policy: RolloutPolicy) -> Self {
        self.rollout_policy = policy;
        self
    }

    /// Builder pattern: set (or clear) backpropagation discount.
    pub fn with_discount(mut self, discount: Option<f64>) -> Self {
        self.discount = discount;
        self
    }

    /// Builder pattern: set reward baseline.
    pub fn with_reward_baseline(mut self, baseline: RewardBaseline) -> Self {
        self.reward_baseline = baseline;
        self
    }

    /// Builder pattern: set reported action.
    pub fn with_action_selection(mut self, selection: ActionSelection) -> Self {
        self.action_selection = selection;
        self
    }

    /// Check the parameters a search relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(ConfigError::InvalidExploration(self.exploration));
        }
        if let Some(d) = self.discount {
            if !(d > 0.0 && d <= 1.0) {
                return Err(ConfigError::InvalidDiscount(d));
            }
        }
        if self.num_rollouts == 0 {
            return Err(ConfigError::NoRollouts);
        }
        Ok(())
    }
}
