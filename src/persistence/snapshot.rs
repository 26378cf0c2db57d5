//! Storage-ready shape of a saved session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, SessionError},
    state::TimerMode,
};

/// Version written into every snapshot.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Clock values worth keeping. The live tick stream is deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub elapsed: u32,
    pub limit: u32,
    pub remaining: u32,
    pub ending: u32,
}

/// Clock plus controller mode, as written by a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub format_version: u32,
    pub saved_at: DateTime<Utc>,
    pub clock: ClockSnapshot,
    pub mode: TimerMode,
}

impl SessionSnapshot {
    pub fn new(clock: ClockSnapshot, mode: TimerMode) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            saved_at: Utc::now(),
            clock,
            mode,
        }
    }

    /// Check the invariants a live clock would hold.
    pub fn validate(&self) -> Result<()> {
        if self.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(SessionError::CorruptSnapshot(format!(
                "unsupported format version {}",
                self.format_version
            )));
        }

        let clock = &self.clock;
        if clock.limit == 0 {
            return Err(SessionError::CorruptSnapshot("limit must be positive".to_string()));
        }
        if clock.elapsed > clock.limit {
            return Err(SessionError::CorruptSnapshot(format!(
                "elapsed {}s exceeds limit {}s",
                clock.elapsed, clock.limit
            )));
        }
        if clock.remaining != clock.limit - clock.elapsed {
            return Err(SessionError::CorruptSnapshot(format!(
                "remaining {}s does not match limit {}s minus elapsed {}s",
                clock.remaining, clock.limit, clock.elapsed
            )));
        }
        if clock.ending > clock.limit {
            return Err(SessionError::CorruptSnapshot(format!(
                "ending {}s exceeds limit {}s",
                clock.ending, clock.limit
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(elapsed: u32, limit: u32, remaining: u32) -> SessionSnapshot {
        SessionSnapshot::new(
            ClockSnapshot {
                elapsed,
                limit,
                remaining,
                ending: 0,
            },
            TimerMode::Paused,
        )
    }

    #[test]
    fn consistent_snapshot_validates() {
        assert!(snapshot(10, 93, 83).validate().is_ok());
        assert!(snapshot(93, 93, 0).validate().is_ok());
    }

    #[test]
    fn inconsistent_snapshots_are_corrupt() {
        for bad in [snapshot(0, 0, 0), snapshot(94, 93, 0), snapshot(10, 93, 80)] {
            assert!(matches!(bad.validate(), Err(SessionError::CorruptSnapshot(_))));
        }

        let mut overlong = snapshot(10, 93, 83);
        overlong.clock.ending = 94;
        assert!(matches!(overlong.validate(), Err(SessionError::CorruptSnapshot(_))));
        overlong.clock.ending = 93;
        assert!(overlong.validate().is_ok());

        let mut future = snapshot(1, 93, 92);
        future.format_version = SNAPSHOT_FORMAT_VERSION + 1;
        assert!(matches!(future.validate(), Err(SessionError::CorruptSnapshot(_))));
    }
}
