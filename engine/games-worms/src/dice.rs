//! Dice handling for a single Worms turn.
//!
//! A turn throws the remaining dice, then sets aside every die showing one
//! chosen face. Faces already set aside can not be chosen again. The worm
//! face (6) counts five points and at least one worm is required for the
//! total to count at all.

use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Face value of the worm.
pub const WORM_FACE: u8 = 6;

/// Points a worm contributes to the total.
pub const WORM_POINTS: u32 = 5;

/// Points contributed by one die face.
#[inline]
pub fn face_points(face: u8) -> u32 {
    (face as u32).min(WORM_POINTS)
}

/// Dice state of the player to act.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roll {
    n_dice: usize,
    /// Faces showing on the last throw
    rolled: Vec<u8>,
    /// Faces set aside so far this turn
    kept: Vec<u8>,
    /// True when the dice may be thrown, false while a face must be chosen
    ready: bool,
}

impl Roll {
    pub fn new(n_dice: usize) -> Self {
        Self {
            n_dice,
            rolled: Vec::new(),
            kept: Vec::new(),
            ready: true,
        }
    }

    /// Number of dice not yet set aside
    pub fn dice_left(&self) -> usize {
        self.n_dice - self.kept.len()
    }

    /// Whether at least one worm has been set aside
    pub fn has_worm(&self) -> bool {
        self.kept.contains(&WORM_FACE)
    }

    /// Total of the set-aside dice, or 0 while no worm is held.
    pub fn total(&self) -> u32 {
        if !self.has_worm() {
            return 0;
        }
        self.kept.iter().map(|&f| face_points(f)).sum()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn rolled(&self) -> &[u8] {
        &self.rolled
    }

    pub fn kept(&self) -> &[u8] {
        &self.kept
    }

    /// Faces on the table that have not been set aside yet, ascending.
    pub fn selectable_faces(&self) -> Vec<u8> {
        let mut faces: Vec<u8> = self
            .rolled
            .iter()
            .copied()
            .filter(|f| !self.kept.contains(f))
            .collect();
        faces.sort_unstable();
        faces.dedup();
        faces
    }

    /// Number of dice on the table showing `face`
    pub fn count_of(&self, face: u8) -> usize {
        self.rolled.iter().filter(|&&f| f == face).count()
    }

    /// Throw all remaining dice.
    pub fn throw(&mut self, rng: &mut ChaCha20Rng) {
        self.ready = false;
        self.rolled = (0..self.dice_left())
            .map(|_| rng.gen_range(1..=WORM_FACE))
            .collect();
    }

    /// Set aside every die showing `face`; returns how many were kept.
    pub fn select(&mut self, face: u8) -> usize {
        self.ready = true;
        let picked: Vec<u8> = self.rolled.iter().copied().filter(|&f| f == face).collect();
        let count = picked.len();
        self.kept.extend(picked);
        count
    }

    /// Start a fresh turn.
    pub fn reset(&mut self) {
        self.rolled.clear();
        self.kept.clear();
        self.ready = true;
    }

    #[cfg(test)]
    pub(crate) fn with_dice(n_dice: usize, rolled: Vec<u8>, kept: Vec<u8>, ready: bool) -> Self {
        Self {
            n_dice,
            rolled,
            kept,
            ready,
        }
    }
}
