//! State management module
//! 
//! This module contains the session engine: the countdown clock, the
//! pause/resume controller, the leaderboard and the session tying them together.

pub mod countdown;
pub mod leaderboard;
pub mod session;
pub mod timer_mode;

// Re-export main types
pub use countdown::{ClockReading, CountdownClock};
pub use leaderboard::{Leaderboard, LeaderboardEntry, SubmitOutcome, LEADERBOARD_CAPACITY};
pub use session::{FinishedGame, GameSession};
pub use timer_mode::{TimerMode, TimerModeController};
