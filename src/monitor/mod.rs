//! Polling file monitor and its driver loop.

mod driver;
mod file_monitor;

pub use driver::PollDriver;
pub use file_monitor::{FileMonitor, PollOutcome};
