//! Pause/resume mode and the controller that keeps the clock in step with it

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::countdown::CountdownClock;
use crate::error::Result;

/// Whether the session clock is meant to be ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerMode {
    Paused,
    Resumed,
}

impl TimerMode {
    /// The mode a toggle leads to.
    pub fn toggled(self) -> Self {
        match self {
            TimerMode::Paused => TimerMode::Resumed,
            TimerMode::Resumed => TimerMode::Paused,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimerMode::Paused => "Paused",
            TimerMode::Resumed => "Resumed",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
struct ModeState {
    mode: TimerMode,
    /// Set once the game is over; the clock must not be resumed again.
    concluded: bool,
}

/// Drives a shared [`CountdownClock`] from pause/resume toggles.
///
/// Every mode change starts or stops the clock while holding the mode lock,
/// so the two never drift apart.
#[derive(Debug)]
pub struct TimerModeController {
    clock: Arc<CountdownClock>,
    state: Mutex<ModeState>,
}

impl TimerModeController {
    /// Wrap `clock` in the given mode without touching the clock.
    pub fn new(clock: Arc<CountdownClock>, mode: TimerMode) -> Self {
        Self {
            clock,
            state: Mutex::new(ModeState {
                mode,
                concluded: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ModeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Flip between paused and resumed, stopping or starting the clock.
    ///
    /// When the clock cannot be started the mode stays `Paused` and the
    /// error is returned. Resuming an expired clock succeeds but leaves it
    /// stopped: the mode reads `Resumed` while `is_running()` is false.
    /// After [`TimerModeController::conclude`] toggling changes nothing.
    pub fn toggle(&self) -> Result<TimerMode> {
        let mut state = self.lock();
        if state.concluded {
            debug!("Game is over, ignoring timer toggle");
            return Ok(state.mode);
        }

        let next = state.mode.toggled();
        match next {
            TimerMode::Resumed => self.clock.start()?,
            TimerMode::Paused => self.clock.stop(),
        }

        info!("Timer mode {} -> {}", state.mode, next);
        state.mode = next;
        Ok(next)
    }

    /// End the game: capture the ending time, stop the clock and settle in
    /// `Paused` for good. Returns the captured time.
    pub(crate) fn conclude(&self) -> u32 {
        let mut state = self.lock();
        let ending = self.clock.capture_ending();
        self.clock.stop();

        if state.mode != TimerMode::Paused {
            info!("Timer mode {} -> {} (game over)", state.mode, TimerMode::Paused);
        }
        state.mode = TimerMode::Paused;
        state.concluded = true;
        ending
    }

    pub fn mode(&self) -> TimerMode {
        self.lock().mode
    }

    /// Tag of the current mode, `"Paused"` or `"Resumed"`.
    pub fn describe(&self) -> String {
        self.mode().to_string()
    }

    pub fn clock(&self) -> &Arc<CountdownClock> {
        &self.clock
    }

    /// Run `f` with the mode held, so no toggle can interleave.
    pub(crate) fn with_mode<T>(&self, f: impl FnOnce(TimerMode, &CountdownClock) -> T) -> T {
        let state = self.lock();
        f(state.mode, &self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::SessionError, tasks::Scheduler};

    fn resumed_controller() -> TimerModeController {
        let clock = Arc::new(CountdownClock::new(93, Scheduler::current()));
        clock.start().expect("runtime available");
        TimerModeController::new(clock, TimerMode::Resumed)
    }

    #[test]
    fn transition_function_alternates() {
        assert_eq!(TimerMode::Paused.toggled(), TimerMode::Resumed);
        assert_eq!(TimerMode::Resumed.toggled(), TimerMode::Paused);
        assert_eq!(TimerMode::Resumed.toggled().toggled(), TimerMode::Resumed);
    }

    #[test]
    fn tags_serialize_as_described() {
        assert_eq!(
            serde_json::to_string(&TimerMode::Paused).expect("serializes"),
            "\"Paused\""
        );
        assert_eq!(TimerMode::Resumed.to_string(), "Resumed");
    }

    #[tokio::test]
    async fn toggling_pauses_then_resumes_the_clock() {
        let controller = resumed_controller();
        assert_eq!(controller.describe(), "Resumed");
        assert!(controller.clock().is_running());

        assert_eq!(controller.toggle().expect("pause"), TimerMode::Paused);
        assert_eq!(controller.describe(), "Paused");
        assert!(!controller.clock().is_running());

        assert_eq!(controller.toggle().expect("resume"), TimerMode::Resumed);
        assert_eq!(controller.describe(), "Resumed");
        assert!(controller.clock().is_running());
    }

    #[test]
    fn failed_resume_keeps_paused_mode() {
        let clock = Arc::new(CountdownClock::new(93, Scheduler::current()));
        let controller = TimerModeController::new(clock, TimerMode::Paused);

        let result = controller.toggle();

        assert!(matches!(result, Err(SessionError::SchedulingUnavailable(_))));
        assert_eq!(controller.mode(), TimerMode::Paused);
        assert!(!controller.clock().is_running());
    }

    #[tokio::test]
    async fn resuming_an_expired_clock_leaves_it_stopped() {
        let clock = Arc::new(CountdownClock::from_parts(5, 5, 0, Scheduler::current()));
        let controller = TimerModeController::new(Arc::clone(&clock), TimerMode::Paused);

        assert_eq!(controller.toggle().expect("no-op start"), TimerMode::Resumed);
        assert_eq!(controller.describe(), "Resumed");
        assert!(!clock.is_running());
        assert_eq!(clock.elapsed(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn concluded_game_stays_paused() {
        let controller = resumed_controller();
        tokio::time::sleep(std::time::Duration::from_millis(2500)).await;

        assert_eq!(controller.conclude(), 3);
        assert_eq!(controller.describe(), "Paused");
        assert!(!controller.clock().is_running());

        assert_eq!(controller.toggle().expect("ignored"), TimerMode::Paused);
        assert_eq!(controller.toggle().expect("ignored"), TimerMode::Paused);
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        assert!(!controller.clock().is_running());
        assert_eq!(controller.clock().elapsed(), 3);
        assert_eq!(controller.clock().ending(), 3);
    }

    #[tokio::test]
    async fn with_mode_sees_matching_clock_state() {
        let controller = resumed_controller();
        controller.toggle().expect("pause");

        let (mode, running) = controller.with_mode(|mode, clock| (mode, clock.is_running()));
        assert_eq!(mode, TimerMode::Paused);
        assert!(!running);
    }
}
