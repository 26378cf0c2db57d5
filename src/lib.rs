//! Adventure Session - the play-session engine of a text adventure
//! 
//! This library provides the countdown clock that limits a game, the
//! pause/resume controller driving it, the best-times leaderboard, and the
//! snapshot format used to save and restore a session.

pub mod config;
pub mod console;
pub mod error;
pub mod persistence;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SessionError};
pub use persistence::{load, save, SessionSnapshot};
pub use state::{
    ClockReading, CountdownClock, GameSession, Leaderboard, LeaderboardEntry, SubmitOutcome,
    TimerMode, TimerModeController,
};
pub use tasks::Scheduler;
pub use utils::signals::shutdown_signal;
