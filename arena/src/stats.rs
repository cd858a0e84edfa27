//! Match statistics tracking and persistence.
//!
//! Tracks per-seat outcomes across a series of games:
//! - Games played and total length
//! - Wins per seat (a shared best score credits every tied seat)
//! - Mean final score per seat
//!
//! Snapshots are written to a JSON file so runs can be compared afterwards.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

use crate::game::GameRecord;

/// Running totals for one match.
#[derive(Debug)]
pub struct MatchStats {
    /// Policy name of every seat
    seats: Vec<String>,
    /// Games completed
    games_played: u32,
    /// Games that ended in an error
    games_failed: u32,
    /// Actions applied across all games
    total_steps: u64,
    /// Wins credited to each seat
    wins: Vec<u32>,
    /// Sum of final scores per seat
    score_sums: Vec<f64>,
    /// Start time for rate calculations
    start_time: Instant,
    /// Where snapshots are written, if anywhere
    stats_path: Option<PathBuf>,
}

/// Serializable stats for JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStatsSnapshot {
    pub seats: Vec<String>,
    pub games_played: u32,
    pub games_failed: u32,
    pub total_steps: u64,
    pub wins: Vec<u32>,
    pub win_rates: Vec<f64>,
    pub mean_scores: Vec<f64>,
    pub avg_game_length: f64,
    pub games_per_second: f64,
    pub runtime_seconds: f64,
    pub timestamp: u64,
}

impl MatchStats {
    /// Create a tracker for the given seat names.
    pub fn new(seats: Vec<String>, stats_path: Option<PathBuf>) -> Self {
        if let Some(dir) = stats_path.as_deref().and_then(Path::parent) {
            if !dir.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(dir) {
                    warn!("Failed to create stats directory {}: {}", dir.display(), e);
                }
            }
        }

        let n = seats.len();
        Self {
            seats,
            games_played: 0,
            games_failed: 0,
            total_steps: 0,
            wins: vec![0; n],
            score_sums: vec![0.0; n],
            start_time: Instant::now(),
            stats_path,
        }
    }

    /// Record a completed game.
    pub fn record_game(&mut self, record: &GameRecord) {
        self.games_played += 1;
        self.total_steps += u64::from(record.steps);

        for &seat in &record.winners {
            if let Some(w) = self.wins.get_mut(seat) {
                *w += 1;
            }
        }
        for (sum, score) in self.score_sums.iter_mut().zip(&record.scores) {
            *sum += score;
        }
    }

    /// Record a game that could not be finished.
    pub fn record_failure(&mut self) {
        self.games_failed += 1;
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Get a snapshot of current stats.
    pub fn snapshot(&self) -> MatchStatsSnapshot {
        let games = self.games_played;
        let runtime = self.start_time.elapsed().as_secs_f64();
        let per_game = |total: f64| {
            if games > 0 {
                total / games as f64
            } else {
                0.0
            }
        };

        MatchStatsSnapshot {
            seats: self.seats.clone(),
            games_played: games,
            games_failed: self.games_failed,
            total_steps: self.total_steps,
            wins: self.wins.clone(),
            win_rates: self.wins.iter().map(|&w| per_game(w as f64)).collect(),
            mean_scores: self.score_sums.iter().map(|&s| per_game(s)).collect(),
            avg_game_length: per_game(self.total_steps as f64),
            games_per_second: if runtime > 0.0 {
                games as f64 / runtime
            } else {
                0.0
            },
            runtime_seconds: runtime,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    /// Write a snapshot to the configured path, logging any failure.
    pub fn write_stats(&self) {
        let Some(path) = &self.stats_path else {
            return;
        };
        match self.snapshot().write_json(path) {
            Ok(()) => debug!("Wrote match stats to {}", path.display()),
            Err(e) => warn!("Failed to write match stats to {}: {}", path.display(), e),
        }
    }

    pub fn stats_path(&self) -> Option<&Path> {
        self.stats_path.as_deref()
    }
}

impl MatchStatsSnapshot {
    /// Write to JSON file (atomic write-then-rename).
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        let mut temp_path = path.as_os_str().to_owned();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        let written = fs::File::create(&temp_path).and_then(|mut file| {
            file.write_all(json.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|()| fs::rename(&temp_path, path)) {
            // Try to clean up temp file
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn seats() -> Vec<String> {
        vec!["mcts".into(), "random".into()]
    }

    fn record(steps: u32, scores: [f64; 2], winners: Vec<usize>) -> GameRecord {
        GameRecord {
            steps,
            scores: scores.to_vec(),
            winners,
        }
    }

    #[test]
    fn test_record_game() {
        let mut stats = MatchStats::new(seats(), None);

        stats.record_game(&record(40, [6.0, 2.0], vec![0]));
        stats.record_game(&record(60, [1.0, 3.0], vec![1]));
        stats.record_game(&record(50, [4.0, 4.0], vec![0, 1]));

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.games_played, 3);
        assert_eq!(snapshot.wins, vec![2, 2]);
        assert_eq!(snapshot.total_steps, 150);
        assert!((snapshot.avg_game_length - 50.0).abs() < 1e-9);
        assert!((snapshot.mean_scores[0] - 11.0 / 3.0).abs() < 1e-9);
        assert!((snapshot.mean_scores[1] - 3.0).abs() < 1e-9);
        assert!((snapshot.win_rates[0] - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_with_zero_games() {
        let stats = MatchStats::new(seats(), None);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.games_played, 0);
        assert_eq!(snapshot.avg_game_length, 0.0);
        assert_eq!(snapshot.mean_scores, vec![0.0, 0.0]);
        assert_eq!(snapshot.win_rates, vec![0.0, 0.0]);
    }

    #[test]
    fn test_failures_do_not_count_as_games() {
        let mut stats = MatchStats::new(seats(), None);
        stats.record_failure();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.games_played, 0);
        assert_eq!(snapshot.games_failed, 1);
    }

    #[test]
    fn test_write_stats() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("arena_stats.json");
        let mut stats = MatchStats::new(seats(), Some(path.clone()));

        stats.record_game(&record(30, [2.0, 1.0], vec![0]));
        stats.write_stats();

        // Verify file exists and is valid JSON
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let content = fs::read_to_string(&path).unwrap();
        let parsed: MatchStatsSnapshot = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.games_played, 1);
        assert_eq!(parsed.seats, seats());
    }

    #[test]
    fn test_write_json_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let mut stats = MatchStats::new(seats(), None);

        stats.snapshot().write_json(&path).unwrap();
        stats.record_game(&record(10, [1.0, 0.0], vec![0]));
        stats.snapshot().write_json(&path).unwrap();

        let parsed: MatchStatsSnapshot =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.games_played, 1);
    }

    #[test]
    fn test_write_json_to_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent").join("stats.json");
        let stats = MatchStats::new(seats(), None);

        assert!(stats.snapshot().write_json(&path).is_err());
    }
}
