//! A play session: one countdown clock driven by one pause/resume controller

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use super::{
    countdown::{ClockReading, CountdownClock},
    leaderboard::{Leaderboard, SubmitOutcome},
    timer_mode::{TimerMode, TimerModeController},
};
use crate::{
    error::Result,
    persistence::{self, SessionSnapshot},
    tasks::Scheduler,
};

/// Result of finishing a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedGame {
    pub name: String,
    pub score: u32,
    pub outcome: SubmitOutcome,
}

#[derive(Debug)]
pub struct GameSession {
    clock: Arc<CountdownClock>,
    controller: TimerModeController,
}

impl GameSession {
    /// Fresh session with its clock already ticking.
    pub fn new(limit: u32, scheduler: Scheduler) -> Result<Self> {
        let clock = Arc::new(CountdownClock::new(limit, scheduler));
        clock.start()?;
        info!("New session started with a {}s countdown", clock.limit());

        Ok(Self {
            controller: TimerModeController::new(Arc::clone(&clock), TimerMode::Resumed),
            clock,
        })
    }

    /// Rebuild a session from a snapshot, resuming the clock if it was saved
    /// while running.
    pub fn restore(snapshot: &SessionSnapshot, scheduler: Scheduler) -> Result<Self> {
        let (clock, controller) = persistence::load(snapshot, scheduler)?;
        if controller.mode() == TimerMode::Resumed {
            clock.start()?;
        }

        Ok(Self { clock, controller })
    }

    pub fn save(&self) -> SessionSnapshot {
        persistence::save(&self.controller)
    }

    pub fn toggle(&self) -> Result<TimerMode> {
        self.controller.toggle()
    }

    pub fn describe(&self) -> String {
        self.controller.describe()
    }

    pub fn mode(&self) -> TimerMode {
        self.controller.mode()
    }

    pub fn reading(&self) -> ClockReading {
        self.clock.reading()
    }

    pub fn subscribe(&self) -> watch::Receiver<ClockReading> {
        self.clock.subscribe()
    }

    pub fn clock(&self) -> &Arc<CountdownClock> {
        &self.clock
    }

    pub fn controller(&self) -> &TimerModeController {
        &self.controller
    }

    /// Capture the ending time, pause the session for good and offer the
    /// time to `board`.
    pub fn finish(&self, name: &str, board: &Leaderboard) -> FinishedGame {
        let score = self.controller.conclude();
        let outcome = board.submit(name, score);
        info!("{} finished in {}s: {:?}", name, score, outcome);

        FinishedGame {
            name: name.to_string(),
            score,
            outcome,
        }
    }
}
