//! Worms dice-and-domino game implementation for the engine
//!
//! Players take turns throwing eight dice, setting aside one face per throw
//! and trying to reach a total high enough to claim a domino. Dominoes run
//! from 21 to 36 and are worth one to four worms. A player who busts returns
//! their top domino to the board and the highest board domino leaves play.
//! The game ends when the board is empty; the most worms wins.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::GameState;
//! use games_worms::Worms;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let mut state = Worms::new(2).expect("two players is a valid table");
//!
//! while !state.is_terminal() {
//!     let action = state.legal_actions()[0].clone();
//!     state = state.apply(&action, &mut rng);
//! }
//! assert!(state.board().is_empty());
//! ```

pub mod dice;

use engine_core::{next_player, GameAction, GameState, PlayerId};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::warn;

pub use dice::{face_points, Roll, WORM_FACE};

/// Lowest domino on the board
pub const MIN_DOMINO: u8 = 21;
/// Highest domino on the board
pub const MAX_DOMINO: u8 = 36;
/// Dice per turn in the standard game
pub const DEFAULT_DICE: usize = 8;
/// Largest supported table
pub const MAX_PLAYERS: usize = 8;

/// Errors raised when setting up a game.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WormsError {
    #[error("Unsupported number of players: {0} (expected 1..={MAX_PLAYERS})")]
    InvalidPlayers(usize),

    #[error("At least one die is required")]
    InvalidDice,
}

/// Worms move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Throw the remaining dice
    Roll,
    /// Set aside every die showing this face
    Select(u8),
    /// Claim a domino with the current total
    Take(u32),
    /// Bust: end the turn without a domino
    GiveUp,
}

impl GameAction for Action {
    fn payload(&self) -> Option<u32> {
        match self {
            Action::Select(face) => Some(*face as u32),
            Action::Take(total) => Some(*total),
            Action::Roll | Action::GiveUp => None,
        }
    }
}

/// Worms value of a domino.
#[inline]
pub fn domino_worms(domino: u8) -> u32 {
    ((domino - MIN_DOMINO) / 4 + 1) as u32
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worms {
    /// Seat to act
    turn: PlayerId,
    /// Dominoes held by each player, top of stack last
    player_stacks: Vec<Vec<u8>>,
    /// Dominoes still on the board
    board: Vec<u8>,
    /// Dice of the player to act
    roll: Roll,
}

impl Worms {
    /// Standard game with eight dice
    pub fn new(n_players: usize) -> Result<Self, WormsError> {
        Self::with_dice(n_players, DEFAULT_DICE)
    }

    /// Game with a custom number of dice per turn
    pub fn with_dice(n_players: usize, n_dice: usize) -> Result<Self, WormsError> {
        if n_players == 0 || n_players > MAX_PLAYERS {
            return Err(WormsError::InvalidPlayers(n_players));
        }
        if n_dice == 0 {
            return Err(WormsError::InvalidDice);
        }

        Ok(Self {
            turn: 0,
            player_stacks: vec![Vec::new(); n_players],
            board: (MIN_DOMINO..=MAX_DOMINO).collect(),
            roll: Roll::new(n_dice),
        })
    }

    pub fn board(&self) -> &[u8] {
        &self.board
    }

    pub fn stack(&self, player: PlayerId) -> &[u8] {
        &self.player_stacks[player]
    }

    pub fn roll(&self) -> &Roll {
        &self.roll
    }

    /// Exposed top domino of a player's stack
    pub fn top_domino(&self, player: PlayerId) -> Option<u8> {
        self.player_stacks[player].last().copied()
    }

    /// Worms held by a player
    pub fn worms(&self, player: PlayerId) -> u32 {
        self.player_stacks[player]
            .iter()
            .map(|&d| domino_worms(d))
            .sum()
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.board.is_empty()
    }

    /// Get legal moves for the player to act
    pub fn legal_moves(&self) -> Vec<Action> {
        if self.is_done() {
            return Vec::new();
        }

        let mut moves = Vec::new();

        if self.roll.dice_left() > 0 {
            if self.roll.is_ready() {
                moves.push(Action::Roll);
            } else {
                moves.extend(self.roll.selectable_faces().into_iter().map(Action::Select));
            }
        }

        let total = self.roll.total();
        if self.roll.has_worm() && self.can_take(total) {
            moves.push(Action::Take(total));
        }

        if moves.is_empty() {
            moves.push(Action::GiveUp);
        }
        moves
    }

    /// Play a move in place. Moves that are not legal leave the state unchanged.
    pub fn step(&mut self, action: Action, rng: &mut ChaCha20Rng) {
        if !self.legal_moves().contains(&action) {
            warn!(?action, turn = self.turn, "Ignoring illegal Worms action");
            return;
        }

        match action {
            Action::Roll => self.roll.throw(rng),
            Action::Select(face) => {
                self.roll.select(face);
            }
            Action::Take(total) => {
                if !self.take_domino(total) {
                    self.give_up();
                }
                self.end_turn();
            }
            Action::GiveUp => {
                self.give_up();
                self.end_turn();
            }
        }
    }

    /// Whether a domino can be claimed with `total`
    fn can_take(&self, total: u32) -> bool {
        self.board_pick(total).is_some() || self.steal_pick(total).is_some()
    }

    /// Highest board domino not above `total`
    fn board_pick(&self, total: u32) -> Option<u8> {
        self.board
            .iter()
            .copied()
            .filter(|&d| d as u32 <= total)
            .max()
    }

    /// First opponent whose exposed top domino equals `total`
    fn steal_pick(&self, total: u32) -> Option<PlayerId> {
        (0..self.player_stacks.len())
            .filter(|&p| p != self.turn)
            .find(|&p| self.top_domino(p).map(|d| d as u32) == Some(total))
    }

    fn take_domino(&mut self, total: u32) -> bool {
        if let Some(domino) = self.board_pick(total) {
            self.board.retain(|&d| d != domino);
            self.player_stacks[self.turn].push(domino);
            return true;
        }

        if let Some(victim) = self.steal_pick(total) {
            if let Some(domino) = self.player_stacks[victim].pop() {
                self.player_stacks[self.turn].push(domino);
                return true;
            }
        }

        false
    }

    /// Return own top domino to the board, then flip the highest board domino out of play.
    fn give_up(&mut self) {
        if let Some(domino) = self.player_stacks[self.turn].pop() {
            self.board.push(domino);
        }

        if let Some(highest) = self.board.iter().copied().max() {
            self.board.retain(|&d| d != highest);
        }
    }

    fn end_turn(&mut self) {
        self.turn = next_player(self.turn, self.player_stacks.len());
        self.roll.reset();
    }
}

impl GameState for Worms {
    type Action = Action;

    fn legal_actions(&self) -> Vec<Action> {
        self.legal_moves()
    }

    fn apply(&self, action: &Action, rng: &mut ChaCha20Rng) -> Self {
        let mut next = self.clone();
        next.step(*action, rng);
        next
    }

    fn is_terminal(&self) -> bool {
        self.is_done()
    }

    fn current_player(&self) -> PlayerId {
        self.turn
    }

    fn num_players(&self) -> usize {
        self.player_stacks.len()
    }

    fn score(&self, player: PlayerId) -> f64 {
        self.worms(player) as f64
    }
}
