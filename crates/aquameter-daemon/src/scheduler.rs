//! Fixed-interval scheduling of the poll cycle.

use std::future::Future;
use std::time::Duration;

use chrono::Local;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::AccountPoller;

/// Default refresh interval: once per day.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(86_400);

/// Drives one [`AccountPoller`] on a fixed interval.
///
/// Refreshes are serialized by construction: the next tick is not processed
/// until the previous refresh finished. The first refresh runs immediately
/// when the scheduler starts.
#[derive(Debug)]
pub struct Scheduler {
    poller: AccountPoller,
    interval: Duration,
}

impl Scheduler {
    /// Creates a scheduler that refreshes `poller` every `interval`.
    #[must_use]
    pub const fn new(poller: AccountPoller, interval: Duration) -> Self {
        Self { poller, interval }
    }

    /// Creates a scheduler with the default daily interval.
    #[must_use]
    pub const fn with_default_interval(poller: AccountPoller) -> Self {
        Self::new(poller, DEFAULT_INTERVAL)
    }

    /// Returns the refresh interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the poller.
    #[must_use]
    pub const fn poller(&self) -> &AccountPoller {
        &self.poller
    }

    /// Runs the poll loop until `shutdown` resolves.
    ///
    /// On shutdown the in-flight wait is abandoned, the poller's session is
    /// released, and the poller is handed back with its last known estimate
    /// intact. No partial estimate is ever surfaced.
    pub async fn run<F>(mut self, shutdown: F) -> AccountPoller
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!(interval_secs = self.interval.as_secs(), "scheduler started");

        loop {
            tokio::select! {
                // Shutdown wins over a due tick.
                biased;

                () = &mut shutdown => {
                    self.poller.close();
                    info!("scheduler stopped");
                    return self.poller;
                }
                _ = ticker.tick() => {
                    let as_of = Local::now().date_naive();
                    // Failures are logged by the poller; the loop keeps
                    // going and the next tick is the only retry.
                    let _ = self.poller.refresh(as_of).await;
                }
            }
        }
    }
}
