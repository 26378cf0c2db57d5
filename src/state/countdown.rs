//! Countdown clock with a background tick stream

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    error::Result,
    tasks::{tick_task, Scheduler},
};

/// Consistent view of a clock at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockReading {
    pub elapsed: u32,
    pub remaining: u32,
    pub ending: u32,
    pub limit: u32,
    pub running: bool,
}

impl ClockReading {
    /// The countdown ran out and the clock stopped itself.
    pub fn is_expired(&self) -> bool {
        self.remaining == 0 && !self.running
    }
}

/// A live tick stream. Never persisted.
#[derive(Debug)]
struct Ticker {
    generation: u64,
    task: JoinHandle<()>,
}

#[derive(Debug)]
struct ClockInner {
    elapsed: u32,
    remaining: u32,
    ending: u32,
    ticker: Option<Ticker>,
    generations: u64,
}

impl ClockInner {
    fn running(&self) -> bool {
        self.ticker.as_ref().is_some_and(|ticker| !ticker.task.is_finished())
    }

    fn live_generation(&self) -> Option<u64> {
        self.ticker.as_ref().map(|ticker| ticker.generation)
    }

    /// Cancel the current tick stream, if any. Returns whether one existed.
    fn retire(&mut self) -> bool {
        match self.ticker.take() {
            Some(ticker) => {
                ticker.task.abort();
                true
            }
            None => false,
        }
    }
}

/// State shared between a clock and its tick stream.
///
/// Every mutation and every read goes through `inner`, so `elapsed` and
/// `remaining` are always observed together.
#[derive(Debug)]
pub struct ClockShared {
    limit: u32,
    inner: Mutex<ClockInner>,
    updates: watch::Sender<ClockReading>,
}

impl ClockShared {
    fn lock(&self) -> MutexGuard<'_, ClockInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn reading_of(&self, inner: &ClockInner) -> ClockReading {
        ClockReading {
            elapsed: inner.elapsed,
            remaining: inner.remaining,
            ending: inner.ending,
            limit: self.limit,
            running: inner.running(),
        }
    }

    fn publish(&self, inner: &ClockInner) {
        self.updates.send_replace(self.reading_of(inner));
    }

    /// Advance by one second on behalf of tick stream `generation`.
    ///
    /// Returns `false` when that stream is no longer the live one, in which
    /// case nothing was changed and the stream must end.
    pub(crate) fn tick(&self, generation: u64) -> bool {
        let mut inner = self.lock();
        if inner.live_generation() != Some(generation) {
            return false;
        }

        inner.elapsed += 1;
        let keep_ticking = if inner.elapsed >= self.limit {
            inner.retire();
            inner.elapsed = self.limit;
            inner.ending = 0;
            inner.remaining = 0;
            info!("Countdown of {}s expired, clock stopped", self.limit);
            false
        } else {
            inner.remaining = self.limit - inner.elapsed;
            true
        };

        self.publish(&inner);
        keep_ticking
    }
}

/// One-second countdown clock.
///
/// Ticks on a background task spawned through its [`Scheduler`]; all other
/// operations are synchronous and safe to call from any thread.
#[derive(Debug)]
pub struct CountdownClock {
    shared: Arc<ClockShared>,
    scheduler: Scheduler,
}

impl CountdownClock {
    /// A stopped clock at zero that counts down from `limit` seconds.
    pub fn new(limit: u32, scheduler: Scheduler) -> Self {
        let limit = if limit == 0 {
            warn!("Clock limit of 0 seconds is not allowed, using 1");
            1
        } else {
            limit
        };

        Self::from_parts(limit, 0, 0, scheduler)
    }

    /// Rebuild a stopped clock from persisted values.
    ///
    /// Callers validate `0 < limit` and `elapsed <= limit` beforehand.
    pub(crate) fn from_parts(limit: u32, elapsed: u32, ending: u32, scheduler: Scheduler) -> Self {
        let inner = ClockInner {
            elapsed,
            remaining: limit.saturating_sub(elapsed),
            ending,
            ticker: None,
            generations: 0,
        };
        let (updates, _) = watch::channel(ClockReading {
            elapsed: inner.elapsed,
            remaining: inner.remaining,
            ending,
            limit,
            running: false,
        });

        Self {
            shared: Arc::new(ClockShared {
                limit,
                inner: Mutex::new(inner),
                updates,
            }),
            scheduler,
        }
    }

    /// Begin ticking, replacing any tick stream already running.
    ///
    /// The first tick fires immediately. Starting an expired clock does
    /// nothing. If no runtime can host the stream the clock is left exactly
    /// as it was.
    pub fn start(&self) -> Result<()> {
        let mut inner = self.shared.lock();
        if inner.elapsed >= self.shared.limit {
            debug!("Clock already at its {}s limit, not starting", self.shared.limit);
            return Ok(());
        }

        let generation = inner.generations + 1;
        let task = self.scheduler.spawn(tick_task(
            Arc::downgrade(&self.shared),
            generation,
            self.scheduler.tick_period(),
        ))?;

        inner.generations = generation;
        if inner.retire() {
            debug!("Replaced running tick stream with stream {}", generation);
        }
        inner.ticker = Some(Ticker { generation, task });

        info!("Clock started at {}s of {}s", inner.elapsed, self.shared.limit);
        self.shared.publish(&inner);
        Ok(())
    }

    /// Cancel the tick stream. No tick changes the clock after this returns.
    pub fn stop(&self) {
        let mut inner = self.shared.lock();
        if inner.retire() {
            info!("Clock stopped at {}s", inner.elapsed);
            self.shared.publish(&inner);
        } else {
            debug!("Clock already stopped");
        }
    }

    /// Whether a tick stream is live right now.
    pub fn is_running(&self) -> bool {
        self.shared.lock().running()
    }

    pub fn elapsed(&self) -> u32 {
        self.shared.lock().elapsed
    }

    pub fn remaining(&self) -> u32 {
        self.shared.lock().remaining
    }

    /// Last captured ending time, without capturing a new one
    pub fn ending(&self) -> u32 {
        self.shared.lock().ending
    }

    pub fn limit(&self) -> u32 {
        self.shared.limit
    }

    pub fn reading(&self) -> ClockReading {
        let inner = self.shared.lock();
        self.shared.reading_of(&inner)
    }

    /// Record the current elapsed time as the ending time and return it.
    pub fn capture_ending(&self) -> u32 {
        let mut inner = self.shared.lock();
        inner.ending = inner.elapsed;
        debug!("Captured ending time {}s", inner.ending);
        self.shared.publish(&inner);
        inner.ending
    }

    /// Watch channel republished after every change to the clock.
    pub fn subscribe(&self) -> watch::Receiver<ClockReading> {
        self.shared.updates.subscribe()
    }

    /// Scheduler this clock spawns its tick streams on
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}

impl Drop for CountdownClock {
    fn drop(&mut self) {
        self.shared.lock().retire();
    }
}
