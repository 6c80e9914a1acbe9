//! The listener capability and a closure adapter.

use crate::error::ListenerError;
use crate::state::FileState;
use std::fmt;
use std::sync::Arc;

/// Recipient of file state change notifications.
///
/// Listeners are registered as `Arc<dyn Listener>` handles. The registry only
/// holds a reference for dispatch, and a listener is identified by its
/// allocation: detaching a handle removes every entry that points at the same
/// listener.
///
/// Returning an error from [`receive`](Listener::receive) signals a listener
/// failure to whoever triggered the dispatch.
///
/// # Examples
///
/// ```rust
/// use pollwatch::error::ListenerError;
/// use pollwatch::notify::Listener;
/// use pollwatch::state::FileState;
///
/// struct Printer;
///
/// impl Listener for Printer {
///     fn receive(&self, state: FileState) -> Result<(), ListenerError> {
///         println!("file is now {}", state);
///         Ok(())
///     }
/// }
/// ```
pub trait Listener: Send + Sync {
    /// Handle a newly observed state.
    fn receive(&self, state: FileState) -> Result<(), ListenerError>;
}

/// Listener backed by a closure.
pub struct FnListener<F> {
    callback: F,
}

impl<F> FnListener<F>
where
    F: Fn(FileState) -> Result<(), ListenerError> + Send + Sync,
{
    /// Wrap a closure.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> Listener for FnListener<F>
where
    F: Fn(FileState) -> Result<(), ListenerError> + Send + Sync,
{
    fn receive(&self, state: FileState) -> Result<(), ListenerError> {
        (self.callback)(state)
    }
}

impl<F> fmt::Debug for FnListener<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnListener").finish_non_exhaustive()
    }
}

/// Create a ready-to-attach listener handle from a closure.
///
/// Keep a clone of the returned handle to detach the listener later.
///
/// # Examples
///
/// ```rust
/// use pollwatch::notify::{Notifier, listener_fn};
/// use pollwatch::state::FileState;
///
/// let notifier = Notifier::new();
/// let listener = listener_fn(|state| {
///     println!("changed: {}", state);
///     Ok(())
/// });
///
/// notifier.attach(listener.clone());
/// notifier.dispatch(FileState::present(3)).unwrap();
/// notifier.detach(&listener);
/// ```
pub fn listener_fn<F>(callback: F) -> Arc<dyn Listener>
where
    F: Fn(FileState) -> Result<(), ListenerError> + Send + Sync + 'static,
{
    Arc::new(FnListener::new(callback))
}

/// Whether two handles refer to the same listener allocation.
pub(crate) fn same_listener<A, B>(a: &Arc<A>, b: &Arc<B>) -> bool
where
    A: ?Sized,
    B: ?Sized,
{
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
