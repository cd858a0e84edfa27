//! Typed game-state contract consumed by the search engine
//!
//! Game implementations expose immutable snapshots: every transition yields
//! a fresh value so that sibling branches of a search tree never interfere.
//! Stochastic transitions (dice) draw from an explicit generator handed in by
//! the caller, which keeps seeded searches reproducible.

use rand_chacha::ChaCha20Rng;
use std::fmt::Debug;
use std::hash::Hash;

/// Index of a seat at the table (0-based).
pub type PlayerId = usize;

/// A token identifying one legal move from a state.
///
/// Actions are opaque to the search. The optional numeric payload (a die
/// face, a domino value) is only read by weighted playouts and heuristics.
pub trait GameAction: Clone + Eq + Hash + Debug {
    /// Numeric payload carried by this action, if any.
    fn payload(&self) -> Option<u32> {
        None
    }
}

/// One turn-complete snapshot of a game.
///
/// # Example
///
/// ```rust
/// # use engine_core::typed::*;
/// # use rand_chacha::ChaCha20Rng;
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// struct Pick(u8);
///
/// impl GameAction for Pick {
///     fn payload(&self) -> Option<u32> {
///         Some(self.0 as u32)
///     }
/// }
///
/// #[derive(Debug, Clone)]
/// struct Countdown {
///     left: u8,
///     totals: [u32; 2],
///     to_move: PlayerId,
/// }
///
/// impl GameState for Countdown {
///     type Action = Pick;
///
///     fn legal_actions(&self) -> Vec<Pick> {
///         if self.left == 0 { Vec::new() } else { vec![Pick(1), Pick(2)] }
///     }
///
///     fn apply(&self, action: &Pick, _rng: &mut ChaCha20Rng) -> Self {
///         let mut next = self.clone();
///         next.left = next.left.saturating_sub(1);
///         next.totals[self.to_move] += action.0 as u32;
///         next.to_move = 1 - self.to_move;
///         next
///     }
///
///     fn is_terminal(&self) -> bool { self.left == 0 }
///     fn current_player(&self) -> PlayerId { self.to_move }
///     fn num_players(&self) -> usize { 2 }
///     fn score(&self, player: PlayerId) -> f64 { self.totals[player] as f64 }
/// }
///
/// let state = Countdown { left: 3, totals: [0, 0], to_move: 0 };
/// assert_eq!(state.legal_actions().len(), 2);
/// assert_eq!(state.reward_signal(0), 0.0);
/// ```
pub trait GameState: Clone + Debug {
    /// Move type for this game
    type Action: GameAction;

    /// All moves available to the player to act. Empty for terminal states.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Return the state reached by playing `action`. `self` is left untouched.
    ///
    /// # Arguments
    ///
    /// * `action` - Move to play, normally one of `legal_actions()`
    /// * `rng` - Draw source for stochastic elements of the transition
    fn apply(&self, action: &Self::Action, rng: &mut ChaCha20Rng) -> Self;

    /// Whether the game is over
    fn is_terminal(&self) -> bool;

    /// Seat of the player to act
    fn current_player(&self) -> PlayerId;

    /// Number of seats at the table
    fn num_players(&self) -> usize;

    /// Raw game score of a seat
    fn score(&self, player: PlayerId) -> f64;

    /// Scores of every seat, indexed by `PlayerId`.
    fn scores(&self) -> Vec<f64> {
        (0..self.num_players()).map(|p| self.score(p)).collect()
    }

    /// Per-player signal used for reward shaping: the seat's score lead
    /// over its strongest opponent.
    fn reward_signal(&self, player: PlayerId) -> f64 {
        crate::game_utils::advantage(&self.scores(), player)
    }
}
