//! Console response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{ClockReading, GameSession, LeaderboardEntry, TimerMode};

/// Response printed after every console command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub mode: TimerMode,
    pub clock: ClockReading,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaderboard: Option<Vec<LeaderboardEntry>>,
}

impl ConsoleResponse {
    /// Create a new response describing `session`
    pub fn new(status: &str, message: String, session: &GameSession) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            mode: session.mode(),
            clock: session.reading(),
            leaderboard: None,
        }
    }

    pub fn ok(message: String, session: &GameSession) -> Self {
        Self::new("ok", message, session)
    }

    pub fn error(message: String, session: &GameSession) -> Self {
        Self::new("error", message, session)
    }

    pub fn with_leaderboard(mut self, entries: Vec<LeaderboardEntry>) -> Self {
        self.leaderboard = Some(entries);
        self
    }
}
