//! Session save/load
//!
//! A saved session is the clock's values plus the controller's mode. The
//! tick stream is never saved; loading builds a stopped clock with a fresh
//! [`Scheduler`] and leaves starting it to the caller.

pub mod leaderboard_file;
pub mod snapshot;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{info, warn};

use crate::{
    error::{Result, SessionError},
    state::{CountdownClock, TimerModeController},
    tasks::Scheduler,
};

pub use leaderboard_file::LeaderboardRecord;
pub use snapshot::{ClockSnapshot, SessionSnapshot, SNAPSHOT_FORMAT_VERSION};

/// Capture the controller's mode and its clock as one consistent snapshot.
pub fn save(controller: &TimerModeController) -> SessionSnapshot {
    let snapshot = controller.with_mode(|mode, clock| {
        let reading = clock.reading();
        SessionSnapshot::new(
            ClockSnapshot {
                elapsed: reading.elapsed,
                limit: reading.limit,
                remaining: reading.remaining,
                ending: reading.ending,
            },
            mode,
        )
    });

    info!(
        "Session saved at {}s of {}s ({})",
        snapshot.clock.elapsed, snapshot.clock.limit, snapshot.mode
    );
    snapshot
}

/// Rebuild a stopped clock and its controller from `snapshot`.
///
/// Nothing is constructed unless the snapshot validates. The clock is never
/// started here, whatever mode was saved.
pub fn load(
    snapshot: &SessionSnapshot,
    scheduler: Scheduler,
) -> Result<(Arc<CountdownClock>, TimerModeController)> {
    if let Err(e) = snapshot.validate() {
        warn!("Rejected session snapshot: {}", e);
        return Err(e);
    }

    let saved = snapshot.clock;
    let clock = Arc::new(CountdownClock::from_parts(
        saved.limit,
        saved.elapsed,
        saved.ending,
        scheduler,
    ));
    let controller = TimerModeController::new(Arc::clone(&clock), snapshot.mode);

    info!(
        "Session loaded at {}s of {}s ({})",
        saved.elapsed, saved.limit, snapshot.mode
    );
    Ok((clock, controller))
}

/// Serialize a snapshot for storage.
pub fn encode(snapshot: &SessionSnapshot) -> Result<Vec<u8>> {
    to_json(snapshot)
}

/// Parse stored bytes back into a snapshot.
pub fn decode(bytes: &[u8]) -> Result<SessionSnapshot> {
    from_json(bytes)
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(value).map_err(SessionError::Encode)
}

/// Unreadable input is always a corrupt snapshot.
pub(crate) fn from_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| SessionError::CorruptSnapshot(e.to_string()))
}
