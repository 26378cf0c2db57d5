//! On-disk form of the leaderboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    state::{Leaderboard, LeaderboardEntry},
};

/// Leaderboard contents as written after each confirmed finish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRecord {
    pub updated_at: DateTime<Utc>,
    pub entries: Vec<LeaderboardEntry>,
}

impl LeaderboardRecord {
    pub fn from_board(board: &Leaderboard) -> Self {
        Self {
            updated_at: Utc::now(),
            entries: board.snapshot(),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        super::to_json(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        super::from_json(bytes)
    }

    /// Feed the recorded entries into `board`.
    pub fn apply_to(self, board: &Leaderboard) {
        board.restore(self.entries);
    }
}
