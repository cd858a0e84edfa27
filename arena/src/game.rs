//! Reference game loop
//!
//! Asks the seated policy for the player to act, checks the answer against
//! the legal actions, applies it and repeats until the game ends.

use engine_core::{winners, GameState, PlayerId};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

use crate::policy::Policy;

/// Errors that end a game early.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("game needs {expected} seats, got {got}")]
    SeatCount { expected: usize, got: usize },

    #[error("player {player} ({policy}) chose illegal action {action}")]
    IllegalAction {
        player: PlayerId,
        policy: String,
        action: String,
    },

    #[error("game did not finish within {0} steps")]
    StepLimit(u32),

    #[error(transparent)]
    Policy(#[from] anyhow::Error),
}

/// Outcome of one finished game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    /// Actions applied
    pub steps: u32,
    /// Final score of every seat
    pub scores: Vec<f64>,
    /// Seats sharing the best final score
    pub winners: Vec<PlayerId>,
}

/// Play `initial` to the end with one policy per seat.
pub fn play_game<S: GameState>(
    initial: S,
    seats: &mut [Box<dyn Policy<S>>],
    rng: &mut ChaCha20Rng,
    max_steps: u32,
) -> Result<GameRecord, GameError> {
    if seats.len() != initial.num_players() {
        return Err(GameError::SeatCount {
            expected: initial.num_players(),
            got: seats.len(),
        });
    }

    let mut state = initial;
    let mut steps = 0u32;

    while !state.is_terminal() {
        if steps >= max_steps {
            return Err(GameError::StepLimit(max_steps));
        }

        let player = state.current_player();
        let policy = &mut seats[player];
        let action = policy.select_action(&state)?;

        if !state.legal_actions().contains(&action) {
            return Err(GameError::IllegalAction {
                player,
                policy: policy.name().to_string(),
                action: format!("{:?}", action),
            });
        }

        trace!(step = steps, player, ?action, "applying action");
        state = state.apply(&action, rng);
        steps += 1;
    }

    let scores = state.scores();
    let record = GameRecord {
        steps,
        winners: winners(&scores),
        scores,
    };
    debug!(steps, scores = ?record.scores, winners = ?record.winners, "Game finished");
    Ok(record)
}
