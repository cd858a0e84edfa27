//! Small deterministic games used by the search tests.

use engine_core::{next_player, GameAction, GameState, PlayerId};
use rand_chacha::ChaCha20Rng;

/// One decision for player 0: `A` wins immediately, `B` loses immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    A,
    B,
}

impl GameAction for Choice {}

#[derive(Debug, Clone, PartialEq)]
pub struct Duel {
    outcome: Option<Choice>,
}

impl Duel {
    pub fn start() -> Self {
        Self { outcome: None }
    }
}

impl GameState for Duel {
    type Action = Choice;

    fn legal_actions(&self) -> Vec<Choice> {
        match self.outcome {
            None => vec![Choice::A, Choice::B],
            Some(_) => Vec::new(),
        }
    }

    fn apply(&self, action: &Choice, _rng: &mut ChaCha20Rng) -> Self {
        Self {
            outcome: Some(*action),
        }
    }

    fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    fn current_player(&self) -> PlayerId {
        if self.outcome.is_none() {
            0
        } else {
            1
        }
    }

    fn num_players(&self) -> usize {
        2
    }

    fn score(&self, player: PlayerId) -> f64 {
        match (self.outcome, player) {
            (Some(Choice::A), 0) | (Some(Choice::B), 1) => 1.0,
            _ => 0.0,
        }
    }
}

/// Add `n` to the mover's total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step(pub u32);

impl GameAction for Step {
    fn payload(&self) -> Option<u32> {
        Some(self.0)
    }
}

/// Players alternate adding one of `options` to their own total until the
/// move budget runs out.
#[derive(Debug, Clone, PartialEq)]
pub struct Race {
    pub totals: Vec<f64>,
    pub to_move: PlayerId,
    pub moves_left: u32,
    pub options: Vec<u32>,
}

impl Race {
    pub fn new(players: usize, moves: u32, options: &[u32]) -> Self {
        Self {
            totals: vec![0.0; players],
            to_move: 0,
            moves_left: moves,
            options: options.to_vec(),
        }
    }
}

impl GameState for Race {
    type Action = Step;

    fn legal_actions(&self) -> Vec<Step> {
        if self.moves_left == 0 {
            return Vec::new();
        }
        self.options.iter().map(|&n| Step(n)).collect()
    }

    fn apply(&self, action: &Step, _rng: &mut ChaCha20Rng) -> Self {
        let mut next = self.clone();
        next.totals[self.to_move] += action.0 as f64;
        next.moves_left = self.moves_left.saturating_sub(1);
        next.to_move = next_player(self.to_move, self.totals.len());
        next
    }

    fn is_terminal(&self) -> bool {
        self.moves_left == 0
    }

    fn current_player(&self) -> PlayerId {
        self.to_move
    }

    fn num_players(&self) -> usize {
        self.totals.len()
    }

    fn score(&self, player: PlayerId) -> f64 {
        self.totals[player]
    }
}

/// Not terminal, yet nothing can be played.
#[derive(Debug, Clone, PartialEq)]
pub struct Stuck;

impl GameState for Stuck {
    type Action = Choice;

    fn legal_actions(&self) -> Vec<Choice> {
        Vec::new()
    }

    fn apply(&self, _action: &Choice, _rng: &mut ChaCha20Rng) -> Self {
        Stuck
    }

    fn is_terminal(&self) -> bool {
        false
    }

    fn current_player(&self) -> PlayerId {
        0
    }

    fn num_players(&self) -> usize {
        1
    }

    fn score(&self, _player: PlayerId) -> f64 {
        0.0
    }
}

/// Either end the game now or play on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Stop,
    Go,
}

impl GameAction for Signal {}

/// Two players pass `Go` back and forth until someone plays `Stop`, which
/// ends the game with player 0 one point ahead. Running out of plies ends it
/// level.
#[derive(Debug, Clone, PartialEq)]
pub struct StopGo {
    stopped: bool,
    to_move: PlayerId,
    plies_left: u32,
}

impl StopGo {
    pub fn new(plies: u32) -> Self {
        Self {
            stopped: false,
            to_move: 0,
            plies_left: plies,
        }
    }
}

impl GameState for StopGo {
    type Action = Signal;

    fn legal_actions(&self) -> Vec<Signal> {
        if self.is_terminal() {
            return Vec::new();
        }
        vec![Signal::Stop, Signal::Go]
    }

    fn apply(&self, action: &Signal, _rng: &mut ChaCha20Rng) -> Self {
        let mut next = self.clone();
        match action {
            Signal::Stop => next.stopped = true,
            Signal::Go => {
                next.plies_left = self.plies_left.saturating_sub(1);
                next.to_move = next_player(self.to_move, 2);
            }
        }
        next
    }

    fn is_terminal(&self) -> bool {
        self.stopped || self.plies_left == 0
    }

    fn current_player(&self) -> PlayerId {
        self.to_move
    }

    fn num_players(&self) -> usize {
        2
    }

    fn score(&self, player: PlayerId) -> f64 {
        if self.stopped && player == 0 {
            1.0
        } else {
            0.0
        }
    }
}
