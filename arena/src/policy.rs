//! Action selection policies for seated players

use std::str::FromStr;

use anyhow::{anyhow, Result};
use engine_core::GameState;
use games_worms::{face_points, Action, Worms, WORM_FACE};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

/// Smallest total the greedy baseline is willing to claim a domino with.
pub const DEFAULT_MIN_TAKE: u32 = 25;

/// Trait for action selection policies.
pub trait Policy<S: GameState> {
    /// Short label used in logs and match statistics
    fn name(&self) -> &str;

    /// Select one of the legal actions of `state`
    fn select_action(&mut self, state: &S) -> Result<S::Action>;
}

/// Policy kinds that can be seated from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatKind {
    Mcts,
    Random,
    Greedy,
}

impl SeatKind {
    pub fn name(self) -> &'static str {
        match self {
            SeatKind::Mcts => "mcts",
            SeatKind::Random => "random",
            SeatKind::Greedy => "greedy",
        }
    }
}

impl FromStr for SeatKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mcts" => Ok(Self::Mcts),
            "random" => Ok(Self::Random),
            "greedy" => Ok(Self::Greedy),
            other => Err(anyhow!(
                "unknown seat '{}', expected one of mcts, random, greedy",
                other
            )),
        }
    }
}

/// Random policy that selects legal actions uniformly at random.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GameState> Policy<S> for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn select_action(&mut self, state: &S) -> Result<S::Action> {
        state
            .legal_actions()
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| anyhow!("no legal actions available"))
    }
}

/// Rule-of-thumb Worms player.
///
/// Claims a domino as soon as the total reaches `min_take`, secures a worm
/// face first, otherwise sets aside the most valuable face and keeps rolling.
#[derive(Debug, Clone)]
pub struct GreedyPolicy {
    pub min_take: u32,
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self {
            min_take: DEFAULT_MIN_TAKE,
        }
    }
}

impl GreedyPolicy {
    pub fn new(min_take: u32) -> Self {
        Self { min_take }
    }
}

impl Policy<Worms> for GreedyPolicy {
    fn name(&self) -> &str {
        "greedy"
    }

    fn select_action(&mut self, state: &Worms) -> Result<Action> {
        let actions = state.legal_actions();
        let roll = state.roll();

        let take = actions.iter().find_map(|a| match a {
            Action::Take(total) => Some(*total),
            _ => None,
        });
        if let Some(total) = take {
            // Out of dice means there is nothing better coming
            if total >= self.min_take || (!actions.contains(&Action::Roll) && !has_select(&actions))
            {
                return Ok(Action::Take(total));
            }
        }

        if !roll.has_worm() && actions.contains(&Action::Select(WORM_FACE)) {
            return Ok(Action::Select(WORM_FACE));
        }

        let best_select = actions
            .iter()
            .filter_map(|a| match a {
                Action::Select(face) => Some(*face),
                _ => None,
            })
            .max_by_key(|&face| (face_points(face) * roll.count_of(face) as u32, face));
        if let Some(face) = best_select {
            return Ok(Action::Select(face));
        }

        if actions.contains(&Action::Roll) {
            return Ok(Action::Roll);
        }

        actions
            .first()
            .copied()
            .ok_or_else(|| anyhow!("no legal actions available"))
    }
}

fn has_select(actions: &[Action]) -> bool {
    actions.iter().any(|a| matches!(a, Action::Select(_)))
}
