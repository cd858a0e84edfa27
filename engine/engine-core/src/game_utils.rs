//! Shared score utilities for multi-player game implementations

use crate::typed::PlayerId;

/// Score lead of `player` over the best of the other seats.
///
/// Positive when `player` is ahead, negative when behind. A single-seat
/// table has no opponent, so the lead is the raw score.
///
/// # Example
/// ```
/// use engine_core::game_utils::advantage;
///
/// assert_eq!(advantage(&[5.0, 3.0, 4.0], 0), 1.0);
/// assert_eq!(advantage(&[5.0, 3.0, 4.0], 1), -2.0);
/// assert_eq!(advantage(&[7.0], 0), 7.0);
/// ```
pub fn advantage(scores: &[f64], player: PlayerId) -> f64 {
    let own = scores[player];
    let best_other = scores
        .iter()
        .enumerate()
        .filter(|(seat, _)| *seat != player)
        .map(|(_, &s)| s)
        .fold(f64::NEG_INFINITY, f64::max);

    if best_other.is_finite() {
        own - best_other
    } else {
        own
    }
}

/// Every seat sharing the maximum score. Empty only for an empty table.
///
/// # Example
/// ```
/// use engine_core::game_utils::winners;
///
/// assert_eq!(winners(&[2.0, 6.0, 6.0]), vec![1, 2]);
/// assert!(winners(&[]).is_empty());
/// ```
pub fn winners(scores: &[f64]) -> Vec<PlayerId> {
    let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    scores
        .iter()
        .enumerate()
        .filter(|(_, &s)| s == best)
        .map(|(seat, _)| seat)
        .collect()
}

/// Seat that acts after `player` at a table of `num_players`.
#[inline]
pub fn next_player(player: PlayerId, num_players: usize) -> PlayerId {
    (player + 1) % num_players
}
