//! Fixed-period poll timer
//!
//! At most one timer is alive per scheduler: starting again replaces the
//! running timer instead of adding a second one.

use std::future::Future;
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Default time between polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(60_000);

/// Owns the repeating poll timer
///
/// Must be started from within a tokio runtime.
#[derive(Default)]
pub struct PollScheduler {
    handle: Option<JoinHandle<()>>,
    interval: Option<Duration>,
}

impl PollScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any running timer, then call `tick` every `interval`
    ///
    /// The first tick fires one full interval after this call. Each tick's
    /// future is spawned on its own, so a slow tick never delays or cancels
    /// the next one. No jitter, no backoff.
    pub fn start<F, Fut>(&mut self, interval: Duration, tick: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.stop();

        let period = interval.max(Duration::from_millis(1));
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                debug!("Poll tick");
                tokio::spawn(tick());
            }
        });

        self.handle = Some(handle);
        self.interval = Some(period);
    }

    /// Cancel the timer. No-op if it isn't running.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.interval = None;
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Period of the running timer
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
