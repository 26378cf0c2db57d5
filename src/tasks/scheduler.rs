//! Runtime binding for clock tick streams

use std::{future::Future, time::Duration};

use tokio::{runtime::Handle, task::JoinHandle};
use tracing::debug;

use crate::{
    config::DEFAULT_TICK_PERIOD,
    error::{Result, SessionError},
};

/// Where and how often a clock's tick stream runs.
///
/// A `Scheduler` is a plain value: it can be cloned into a freshly loaded
/// clock, while the tick stream it spawns is never persisted.
#[derive(Debug, Clone)]
pub struct Scheduler {
    handle: Option<Handle>,
    tick_period: Duration,
}

impl Scheduler {
    /// Bind to the runtime the caller is running on, if any.
    ///
    /// Without an ambient runtime the binding is retried on every spawn.
    pub fn current() -> Self {
        Self {
            handle: Handle::try_current().ok(),
            tick_period: DEFAULT_TICK_PERIOD,
        }
    }

    /// Bind to an explicit runtime, usable from threads outside it.
    pub fn on(handle: Handle) -> Self {
        Self {
            handle: Some(handle),
            tick_period: DEFAULT_TICK_PERIOD,
        }
    }

    pub fn with_tick_period(mut self, tick_period: Duration) -> Self {
        self.tick_period = tick_period;
        self
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Spawn a tick stream onto the bound runtime.
    pub(crate) fn spawn<F>(&self, future: F) -> Result<JoinHandle<()>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = match &self.handle {
            Some(handle) => handle.clone(),
            None => Handle::try_current()
                .map_err(|e| SessionError::SchedulingUnavailable(e.to_string()))?,
        };

        debug!("Spawning tick stream with period {:?}", self.tick_period);
        Ok(handle.spawn(future))
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::current()
    }
}
