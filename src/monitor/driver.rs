//! Async polling loop around a [`FileMonitor`].

use super::FileMonitor;
use crate::error::Result;
use crate::settings::WatchSettings;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};

/// Drives a [`FileMonitor`] at a fixed cadence.
///
/// The first poll happens immediately, later polls follow the interval. If a
/// poll is late (a slow listener, a busy runtime) the next one is delayed
/// instead of firing a burst of catch-up polls.
///
/// # Examples
///
/// ```rust,no_run
/// use pollwatch::monitor::{FileMonitor, PollDriver};
/// use pollwatch::notify::listener_fn;
/// use std::time::Duration;
///
/// # async fn example() -> pollwatch::error::Result<()> {
/// let monitor = FileMonitor::new("data.csv");
/// monitor.attach(listener_fn(|state| {
///     println!("data.csv: {}", state);
///     Ok(())
/// }));
///
/// let driver = PollDriver::new(monitor, Duration::from_millis(100));
/// let monitor = driver.run_until(tokio::signal::ctrl_c()).await?;
/// println!("stopped after {} polls", monitor.poll_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PollDriver {
    monitor: FileMonitor,
    interval: Duration,
}

impl PollDriver {
    /// Create a driver polling `monitor` every `interval`.
    ///
    /// A zero interval is raised to one millisecond.
    pub fn new(monitor: FileMonitor, interval: Duration) -> Self {
        Self {
            monitor,
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    /// Create a monitor and driver for `path` from validated settings.
    pub fn from_settings(path: impl Into<PathBuf>, settings: &WatchSettings) -> Self {
        let monitor = FileMonitor::new(path).with_dispatch_mode(settings.dispatch_mode);
        Self::new(monitor, settings.interval())
    }

    /// Poll interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The driven monitor.
    pub fn monitor(&self) -> &FileMonitor {
        &self.monitor
    }

    /// Mutable access to the driven monitor.
    pub fn monitor_mut(&mut self) -> &mut FileMonitor {
        &mut self.monitor
    }

    /// Stop driving and hand back the monitor.
    pub fn into_monitor(self) -> FileMonitor {
        self.monitor
    }

    /// Poll until `shutdown` resolves.
    ///
    /// Returns the monitor on shutdown.
    ///
    /// # Errors
    ///
    /// Stops at the first poll error (a failing listener) and returns it.
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<FileMonitor>
    where
        F: Future,
    {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::debug!(
            path = %self.monitor.path().display(),
            interval_ms = self.interval.as_millis() as u64,
            "polling started"
        );

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    self.monitor.poll()?;
                }
            }
        }

        tracing::debug!(polls = self.monitor.poll_count(), "polling stopped");
        Ok(self.monitor)
    }

    /// Poll exactly `polls` times at the configured cadence.
    ///
    /// # Errors
    ///
    /// Stops at the first poll error and returns it.
    pub async fn run_for(mut self, polls: u64) -> Result<FileMonitor> {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for _ in 0..polls {
            ticker.tick().await;
            self.monitor.poll()?;
        }
        Ok(self.monitor)
    }
}
