//! Change notification.
//!
//! Listeners implement [`Listener`] and are registered with a [`Notifier`],
//! which delivers every detected [`FileState`](crate::state::FileState)
//! change to them in registration order.

pub mod listener;
pub mod registry;

pub use listener::{FnListener, Listener, listener_fn};
pub use registry::{DispatchMode, Notifier};
