//! # pollwatch
//!
//! Polling file monitor that notifies registered listeners when a file
//! appears, disappears or changes size.
//!
//! ## Overview
//!
//! A [`FileMonitor`](monitor::FileMonitor) remembers the last observed
//! [`FileState`](state::FileState) of one path. Each poll reads the state
//! again and, only if it differs, delivers the new state to every registered
//! [`Listener`](notify::Listener) in registration order.
//!
//! - No filesystem event APIs: plain metadata polling, one path per monitor
//! - Listener registry backed by `arc-swap` snapshots, safe to share
//! - Fail-fast or isolated handling of failing listeners
//! - Async driver loop with a configurable interval
//! - Layered settings (files → env vars) via the `config` crate
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pollwatch::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> pollwatch::error::Result<()> {
//! let monitor = FileMonitor::new("/var/log/app.log");
//! monitor.attach(Arc::new(ConsoleListener::stdout()));
//!
//! PollDriver::new(monitor, Duration::from_millis(100))
//!     .run_until(tokio::signal::ctrl_c())
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Polling can also be driven by hand:
//!
//! ```rust,no_run
//! use pollwatch::prelude::*;
//!
//! # fn example() -> pollwatch::error::Result<()> {
//! let mut monitor = FileMonitor::new("report.csv");
//! monitor.attach(listener_fn(|state| {
//!     println!("report.csv is now {}", state);
//!     Ok(())
//! }));
//!
//! if monitor.poll()?.is_changed() {
//!     println!("listeners were notified");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod console;
pub mod error;
pub mod monitor;
pub mod notify;
pub mod settings;
pub mod state;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::console::ConsoleListener;
    pub use crate::error::{ListenerError, Result, ValidationError, WatchError};
    pub use crate::monitor::{FileMonitor, PollDriver, PollOutcome};
    pub use crate::notify::{DispatchMode, Listener, Notifier, listener_fn};
    pub use crate::settings::{Validate, WatchSettings};
    pub use crate::state::FileState;
}
