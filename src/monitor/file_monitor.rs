//! The polling state machine for a single file.

use crate::error::Result;
use crate::notify::{DispatchMode, Listener, Notifier};
use crate::state::FileState;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Result of a single poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The file looks exactly as it did on the previous poll.
    Unchanged,
    /// The file changed and listeners were notified of `current`.
    Changed {
        /// State remembered before this poll
        previous: FileState,
        /// State observed by this poll
        current: FileState,
    },
}

impl PollOutcome {
    /// Whether this poll detected a change.
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// Watches one path by polling its existence and size.
///
/// Construction reads the current state immediately, so anything that happened
/// to the file before the monitor existed is never reported. Every call to
/// [`poll`](FileMonitor::poll) reads the state again and notifies the
/// registered listeners only if it differs from the remembered one.
///
/// # Examples
///
/// ```rust,no_run
/// use pollwatch::monitor::FileMonitor;
/// use pollwatch::notify::listener_fn;
///
/// # fn example() -> pollwatch::error::Result<()> {
/// let mut monitor = FileMonitor::new("/var/log/app.log");
/// monitor.attach(listener_fn(|state| {
///     println!("app.log is now {}", state);
///     Ok(())
/// }));
///
/// loop {
///     monitor.poll()?;
///     std::thread::sleep(std::time::Duration::from_millis(100));
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct FileMonitor {
    path: PathBuf,
    last_known: FileState,
    notifier: Notifier,
    mode: DispatchMode,
    polls: u64,
    changes: u64,
}

impl FileMonitor {
    /// Create a monitor for `path`, recording its current state.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let initial = FileState::read(&path);
        tracing::debug!(path = %path.display(), state = %initial, "monitor created");

        Self {
            path,
            last_known: initial,
            notifier: Notifier::new(),
            mode: DispatchMode::default(),
            polls: 0,
            changes: 0,
        }
    }

    /// Set how dispatch reacts to failing listeners.
    pub fn with_dispatch_mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Change how dispatch reacts to failing listeners.
    pub fn set_dispatch_mode(&mut self, mode: DispatchMode) {
        self.mode = mode;
    }

    /// The watched path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The state recorded by the most recent change (or by construction).
    pub fn last_known_state(&self) -> FileState {
        self.last_known
    }

    /// Current dispatch mode.
    pub fn dispatch_mode(&self) -> DispatchMode {
        self.mode
    }

    /// Shared handle to this monitor's listener registry.
    ///
    /// Listeners attached through the handle are notified by this monitor.
    pub fn notifier(&self) -> Notifier {
        self.notifier.clone()
    }

    /// Register a listener.
    pub fn attach(&self, listener: Arc<dyn Listener>) {
        self.notifier.attach(listener);
    }

    /// Remove every registration of `listener`, returning how many were removed.
    pub fn detach<L>(&self, listener: &Arc<L>) -> usize
    where
        L: Listener + ?Sized,
    {
        self.notifier.detach(listener)
    }

    /// Read the state of the watched path without touching the remembered state.
    pub fn read_current_state(&self) -> FileState {
        FileState::read(&self.path)
    }

    /// Run one poll cycle.
    ///
    /// On a change, listeners are notified first and the new state is
    /// remembered afterwards. The new state is remembered even when a
    /// listener fails, so the same change is not announced again by the next
    /// poll; the listener error is still returned.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if a listener fails, see [`DispatchMode`].
    pub fn poll(&mut self) -> Result<PollOutcome> {
        self.polls += 1;
        let current = self.read_current_state();
        if current == self.last_known {
            return Ok(PollOutcome::Unchanged);
        }

        let previous = self.last_known;
        tracing::info!(
            path = %self.path.display(),
            %previous,
            %current,
            "file state changed"
        );

        let dispatched = self.notifier.dispatch_with(current, self.mode);
        self.last_known = current;
        self.changes += 1;

        dispatched.map(|()| PollOutcome::Changed { previous, current })
    }

    /// Number of polls run so far.
    pub fn poll_count(&self) -> u64 {
        self.polls
    }

    /// Number of changes detected so far.
    pub fn change_count(&self) -> u64 {
        self.changes
    }
}
