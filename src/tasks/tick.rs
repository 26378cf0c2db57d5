//! Countdown tick background task

use std::{sync::Weak, time::Duration};

use tokio::time::interval;
use tracing::debug;

use crate::state::countdown::ClockShared;

/// Drives one tick stream of a countdown clock.
///
/// The first tick fires immediately, then once per `period`. The task ends
/// when the clock is dropped or when the clock no longer recognises
/// `generation` as its live stream (stopped, restarted or expired).
pub(crate) async fn tick_task(clock: Weak<ClockShared>, generation: u64, period: Duration) {
    debug!("Tick stream {} started", generation);

    let mut interval = interval(period);

    loop {
        interval.tick().await;

        let Some(shared) = clock.upgrade() else {
            debug!("Clock dropped, tick stream {} ending", generation);
            break;
        };

        if !shared.tick(generation) {
            debug!("Tick stream {} retired", generation);
            break;
        }
    }
}
