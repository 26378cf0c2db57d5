//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::tasks::Scheduler;

/// Countdown length used by the shipped game, in seconds.
pub const DEFAULT_LIMIT_SECS: u32 = 93;

/// Interval between two ticks of a running clock.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "adventure-session")]
#[command(about = "Play-session clock, pause/resume control and leaderboard for a text adventure")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Countdown length in seconds
    #[arg(short, long, default_value = "93")]
    pub limit: u32,

    /// Milliseconds between clock ticks
    #[arg(long, default_value = "1000")]
    pub tick_millis: u64,

    /// File used by the `save` and `load` commands
    #[arg(long, default_value = "session.json")]
    pub save_file: PathBuf,

    /// File holding the persisted leaderboard
    #[arg(long, default_value = "leaderboard.json")]
    pub leaderboard_file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Tick period requested on the command line, never shorter than 1ms
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }

    /// Scheduler bound to the ambient tokio runtime
    pub fn scheduler(&self) -> Scheduler {
        Scheduler::current().with_tick_period(self.tick_period())
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_shipped_game() {
        let config = Config::parse_from(["adventure-session"]);
        assert_eq!(config.limit, DEFAULT_LIMIT_SECS);
        assert_eq!(config.tick_period(), DEFAULT_TICK_PERIOD);
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.save_file, PathBuf::from("session.json"));
    }

    #[test]
    fn cli_overrides() {
        let config = Config::parse_from([
            "adventure-session",
            "-v",
            "--limit",
            "92",
            "--tick-millis",
            "0",
        ]);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.limit, 92);
        assert_eq!(config.tick_period(), Duration::from_millis(1));
    }
}
