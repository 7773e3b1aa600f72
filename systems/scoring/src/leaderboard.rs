//! Size-bounded ranking of submitted scores.

use serde::{Deserialize, Serialize};

/// Number of entries a default leaderboard retains.
pub const DEFAULT_LEADERBOARD_CAPACITY: usize = 10;

/// A single ranked score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player that achieved the score.
    pub name: String,
    /// Final score of the run.
    pub score: f64,
    /// Seconds since the Unix epoch when the score was recorded.
    pub recorded_at: u64,
}

/// In-memory leaderboard ordered by descending score.
///
/// Storage is left to adapters; the leaderboard only ranks. Equal scores keep
/// their submission order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    capacity: usize,
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Creates an empty leaderboard retaining at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    /// Maximum number of retained entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Ranked entries, best first.
    #[must_use]
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Rank (1-indexed) the score would achieve, or `None` when it would not
    /// make the board.
    #[must_use]
    pub fn potential_rank(&self, score: f64) -> Option<usize> {
        let position = self.insertion_point(score);
        (position < self.capacity).then_some(position + 1)
    }

    /// Records a score and returns the rank it achieved, if any.
    pub fn submit(
        &mut self,
        name: impl Into<String>,
        score: f64,
        recorded_at: u64,
    ) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            LeaderboardEntry {
                name: name.into(),
                score,
                recorded_at,
            },
        );
        self.entries.truncate(self.capacity);
        Some(rank)
    }

    fn insertion_point(&self, score: f64) -> usize {
        self.entries
            .iter()
            .position(|entry| score > entry.score)
            .unwrap_or(self.entries.len())
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LEADERBOARD_CAPACITY)
    }
}
