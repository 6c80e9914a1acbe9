//! Layered settings for the polling driver.
//!
//! Settings are merged from built-in defaults, settings files and
//! environment variables (in increasing precedence), then validated.

mod builder;
mod validation;

pub use builder::WatchSettingsBuilder;
pub use validation::{MAX_INTERVAL_MS, Validate};

use crate::notify::DispatchMode;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Poll interval used when nothing else is configured.
pub const DEFAULT_INTERVAL_MS: u64 = 100;

/// Environment variable prefix read by [`WatchSettingsBuilder::with_default_env`].
pub const ENV_PREFIX: &str = "POLLWATCH";

/// Settings for watching one file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WatchSettings {
    /// File to watch. The console driver asks for one when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Delay between polls in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// How a failing listener affects the rest of a dispatch.
    #[serde(default)]
    pub dispatch_mode: DispatchMode,
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

impl WatchSettings {
    /// Create a builder for layered settings.
    pub fn builder() -> WatchSettingsBuilder {
        WatchSettingsBuilder::new()
    }

    /// Delay between polls.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            path: None,
            interval_ms: DEFAULT_INTERVAL_MS,
            dispatch_mode: DispatchMode::default(),
        }
    }
}
