//! Listener registry and state dispatch.

use super::listener::{Listener, same_listener};
use crate::error::{Result, WatchError};
use crate::state::FileState;
use arc_swap::ArcSwap;
use std::sync::Arc;

type Snapshot = Vec<Arc<dyn Listener>>;

/// How a dispatch reacts to a failing listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Stop at the first failing listener and return its error.
    #[default]
    FailFast,
    /// Notify every listener, then return all failures together.
    Isolate,
}

/// Ordered registry of listeners that receive file state changes.
///
/// The registry is stored as an immutable snapshot that is swapped on every
/// `attach` / `detach`. A dispatch iterates the snapshot it loaded, so
/// registrations made while a dispatch is running (including from inside a
/// listener) take effect on the next dispatch.
///
/// Cloning a `Notifier` yields another handle to the same registry.
///
/// # Examples
///
/// ```rust
/// use pollwatch::notify::{Notifier, listener_fn};
/// use pollwatch::state::FileState;
///
/// let notifier = Notifier::new();
///
/// notifier.attach(listener_fn(|state| {
///     println!("Listener 1: {}", state);
///     Ok(())
/// }));
/// notifier.attach(listener_fn(|state| {
///     println!("Listener 2: {}", state);
///     Ok(())
/// }));
///
/// // Listener 1 runs before listener 2
/// notifier.dispatch(FileState::present(10)).unwrap();
/// ```
#[derive(Clone)]
pub struct Notifier {
    listeners: Arc<ArcSwap<Snapshot>>,
}

impl Notifier {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(ArcSwap::from_pointee(Vec::new())),
        }
    }

    /// Append a listener. The same handle may be attached more than once, in
    /// which case it is notified once per entry.
    pub fn attach(&self, listener: Arc<dyn Listener>) {
        self.listeners.rcu(|current| {
            let mut next = Snapshot::with_capacity(current.len() + 1);
            next.extend(current.iter().cloned());
            next.push(Arc::clone(&listener));
            next
        });
    }

    /// Remove every entry referring to the same listener as `listener`.
    ///
    /// Returns how many entries were removed; detaching a listener that is
    /// not registered is a no-op returning `0`.
    pub fn detach<L>(&self, listener: &Arc<L>) -> usize
    where
        L: Listener + ?Sized,
    {
        let mut removed = 0;
        self.listeners.rcu(|current| {
            let next: Snapshot = current
                .iter()
                .filter(|entry| !same_listener(*entry, listener))
                .cloned()
                .collect();
            removed = current.len() - next.len();
            next
        });
        removed
    }

    /// Remove all listeners.
    pub fn clear(&self) {
        self.listeners.store(Arc::new(Vec::new()));
    }

    /// Deliver `state` to every listener in registration order.
    ///
    /// The first listener error aborts the dispatch: later listeners are not
    /// notified and the error is returned as [`WatchError::Listener`].
    pub fn dispatch(&self, state: FileState) -> Result<()> {
        let snapshot = self.listeners.load_full();
        tracing::debug!(listeners = snapshot.len(), %state, "dispatching state");

        for (index, listener) in snapshot.iter().enumerate() {
            if let Err(source) = listener.receive(state) {
                tracing::warn!(index, error = %source, "listener failed, aborting dispatch");
                return Err(WatchError::Listener { index, source });
            }
        }
        Ok(())
    }

    /// Deliver `state` to every listener in registration order, even if some
    /// of them fail.
    ///
    /// All failures are returned together as [`WatchError::Dispatch`].
    pub fn dispatch_isolated(&self, state: FileState) -> Result<()> {
        let snapshot = self.listeners.load_full();
        tracing::debug!(listeners = snapshot.len(), %state, "dispatching state (isolated)");

        let mut failures = Vec::new();
        for (index, listener) in snapshot.iter().enumerate() {
            if let Err(err) = listener.receive(state) {
                tracing::warn!(index, error = %err, "listener failed");
                failures.push((index, err));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(WatchError::Dispatch(failures))
        }
    }

    /// Dispatch using the given failure policy.
    pub fn dispatch_with(&self, state: FileState, mode: DispatchMode) -> Result<()> {
        match mode {
            DispatchMode::FailFast => self.dispatch(state),
            DispatchMode::Isolate => self.dispatch_isolated(state),
        }
    }

    /// Number of registry entries (duplicates included).
    pub fn listener_count(&self) -> usize {
        self.listeners.load().len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listener_count() == 0
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
