//! Console command handlers

use std::path::PathBuf;

use tokio::sync::watch;
use tracing::{error, info, warn};

use super::{
    commands::{Command, HELP},
    responses::ConsoleResponse,
    storage,
};
use crate::{
    config::Config,
    state::{ClockReading, GameSession, Leaderboard, SubmitOutcome},
    tasks::Scheduler,
};

/// Everything the console needs to serve commands
#[derive(Debug)]
pub struct Console {
    session: GameSession,
    board: &'static Leaderboard,
    scheduler: Scheduler,
    save_file: PathBuf,
    leaderboard_file: PathBuf,
}

impl Console {
    pub fn new(session: GameSession, board: &'static Leaderboard, config: &Config) -> Self {
        Self {
            session,
            board,
            scheduler: config.scheduler(),
            save_file: config.save_file.clone(),
            leaderboard_file: config.leaderboard_file.clone(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Clock updates of the current session. Changes after a `load`.
    pub fn subscribe(&self) -> watch::Receiver<ClockReading> {
        self.session.subscribe()
    }

    /// Serve one command. `Quit` is handled by the caller.
    pub async fn handle(&mut self, command: Command) -> ConsoleResponse {
        match command {
            Command::Toggle => self.toggle_handler(),
            Command::Status => ConsoleResponse::ok("Current session".to_string(), &self.session),
            Command::Save => self.save_handler().await,
            Command::Load => self.load_handler().await,
            Command::Finish(name) => self.finish_handler(&name).await,
            Command::Board => ConsoleResponse::ok("Best times".to_string(), &self.session)
                .with_leaderboard(self.board.snapshot()),
            Command::Help | Command::Quit => ConsoleResponse::ok(HELP.to_string(), &self.session),
        }
    }

    fn toggle_handler(&self) -> ConsoleResponse {
        match self.session.toggle() {
            Ok(mode) => ConsoleResponse::ok(format!("Timer {}", mode), &self.session),
            Err(e) => {
                error!("Failed to toggle timer: {}", e);
                ConsoleResponse::error(e.to_string(), &self.session)
            }
        }
    }

    async fn save_handler(&self) -> ConsoleResponse {
        let snapshot = self.session.save();
        match storage::write_session(&self.save_file, &snapshot).await {
            Ok(()) => ConsoleResponse::ok(
                format!("Session saved to {}", self.save_file.display()),
                &self.session,
            ),
            Err(e) => {
                error!("Failed to save session: {:#}", e);
                ConsoleResponse::error(format!("{:#}", e), &self.session)
            }
        }
    }

    async fn load_handler(&mut self) -> ConsoleResponse {
        let restored = match storage::read_session(&self.save_file).await {
            Ok(snapshot) => GameSession::restore(&snapshot, self.scheduler.clone())
                .map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };

        match restored {
            Ok(session) => {
                // Dropping the old session cancels its tick stream.
                self.session = session;
                info!("Session replaced from {}", self.save_file.display());
                ConsoleResponse::ok(
                    format!("Session loaded from {}", self.save_file.display()),
                    &self.session,
                )
            }
            Err(e) => {
                warn!("Keeping current session, load failed: {:#}", e);
                ConsoleResponse::error(format!("{:#}", e), &self.session)
            }
        }
    }

    async fn finish_handler(&self, name: &str) -> ConsoleResponse {
        let finished = self.session.finish(name, self.board);

        if finished.outcome != SubmitOutcome::Discarded {
            if let Err(e) = storage::write_leaderboard(&self.leaderboard_file, self.board).await {
                error!("Failed to persist leaderboard: {:#}", e);
            }
        }

        ConsoleResponse::ok(
            format!("{} finished in {}s", finished.name, finished.score),
            &self.session,
        )
        .with_leaderboard(self.board.snapshot())
    }
}
