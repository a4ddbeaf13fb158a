//! Run leaderboard
//!
//! Every world reset files the finished run here. Kept in memory for the
//! life of the process; the top 10 runs by score survive.

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// One finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// How long the run lasted, in simulation frames
    pub frames: u64,
    /// 1-based run number within this process
    pub run: u32,
}

impl HighScoreEntry {
    /// Higher score wins; on equal score the longer survival ranks first
    fn outranks(&self, other: &HighScoreEntry) -> bool {
        (self.score, self.frames) > (other.score, other.frames)
    }
}

/// Runs sorted best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a finished run; returns its 1-based rank if it made the board.
    /// Scoreless runs are never filed.
    pub fn record(&mut self, score: u32, frames: u64, run: u32) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let entry = HighScoreEntry { score, frames, run };
        let index = self
            .entries
            .iter()
            .position(|e| entry.outranks(e))
            .unwrap_or(self.entries.len());
        if index >= MAX_HIGH_SCORES {
            return None;
        }

        self.entries.insert(index, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(index + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}
