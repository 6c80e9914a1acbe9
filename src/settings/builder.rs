//! Builder for constructing WatchSettings.

use super::{DEFAULT_INTERVAL_MS, ENV_PREFIX, Validate, WatchSettings};
use crate::error::{Result, WatchError};
use crate::notify::DispatchMode;
use config::{Config, Environment, File};
use std::path::PathBuf;

/// Builder for layered [`WatchSettings`].
///
/// Precedence, lowest first: defaults, settings files (later files win),
/// environment variables, and finally the explicit values set with
/// `with_path`, `with_interval_ms` and `with_dispatch_mode`.
///
/// # Examples
///
/// ```rust,no_run
/// use pollwatch::settings::WatchSettings;
///
/// # fn example() -> pollwatch::error::Result<()> {
/// let settings = WatchSettings::builder()
///     .with_file("pollwatch.toml")
///     .with_default_env()
///     .with_interval_ms(250)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct WatchSettingsBuilder {
    files: Vec<PathBuf>,
    env_prefix: Option<String>,
    path: Option<PathBuf>,
    interval_ms: Option<u64>,
    dispatch_mode: Option<DispatchMode>,
}

impl WatchSettingsBuilder {
    /// Create a builder that yields the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a settings file. The format (YAML, TOML, JSON) follows the extension.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Read `<PREFIX>_*` environment variables, e.g. `<PREFIX>_INTERVAL_MS`.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Read `POLLWATCH_*` environment variables.
    pub fn with_default_env(self) -> Self {
        self.with_env_prefix(ENV_PREFIX)
    }

    /// Watch this path regardless of files and environment.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Poll at this interval regardless of files and environment.
    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = Some(interval_ms);
        self
    }

    /// Use this dispatch mode regardless of files and environment.
    pub fn with_dispatch_mode(mut self, mode: DispatchMode) -> Self {
        self.dispatch_mode = Some(mode);
        self
    }

    /// Load, merge and validate the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A settings file is missing, has an unknown extension or cannot be parsed
    /// - A value has the wrong type
    /// - Validation fails
    pub fn build(self) -> Result<WatchSettings> {
        let mut layers = Config::builder()
            .set_default("interval_ms", DEFAULT_INTERVAL_MS as i64)
            .and_then(|b| b.set_default("dispatch_mode", "fail_fast"))
            .map_err(|e| WatchError::Load(format!("Invalid default: {}", e)))?;

        // Files first, in the order given, so later files win
        for file in &self.files {
            tracing::debug!(file = %file.display(), "adding settings file");
            layers = layers.add_source(File::from(file.as_path()).required(true));
        }

        // Environment overrides every file
        if let Some(prefix) = &self.env_prefix {
            layers = layers.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .try_parsing(true),
            );
        }

        let merged = layers
            .build()
            .map_err(|e| WatchError::Load(e.to_string()))?;
        let mut settings: WatchSettings = merged
            .try_deserialize()
            .map_err(|e| WatchError::Deserialization(e.to_string()))?;

        // Explicit values (command line) beat every layer
        if let Some(path) = self.path {
            settings.path = Some(path);
        }
        if let Some(interval_ms) = self.interval_ms {
            settings.interval_ms = interval_ms;
        }
        if let Some(mode) = self.dispatch_mode {
            settings.dispatch_mode = mode;
        }

        settings.validate()?;
        tracing::debug!(?settings, "settings loaded");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_layers() {
        let settings = WatchSettingsBuilder::new().build().unwrap();
        assert_eq!(settings, WatchSettings::default());
    }

    #[test]
    fn test_each_file_format() {
        let temp_dir = TempDir::new().unwrap();
        let cases = [
            ("watch.yaml", "interval_ms: 250\npath: a.log\n"),
            ("watch.toml", "interval_ms = 250\npath = \"a.log\"\n"),
            ("watch.json", r#"{ "interval_ms": 250, "path": "a.log" }"#),
        ];

        for (name, body) in cases {
            let file = temp_dir.path().join(name);
            fs::write(&file, body).unwrap();

            let settings = WatchSettingsBuilder::new().with_file(&file).build().unwrap();
            assert_eq!(settings.interval_ms, 250, "{name}");
            assert_eq!(settings.path, Some(PathBuf::from("a.log")), "{name}");
        }
    }

    #[test]
    fn test_later_file_wins() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("base.yaml");
        let local = temp_dir.path().join("local.json");
        fs::write(&base, "interval_ms: 500\npath: base.txt\n").unwrap();
        fs::write(&local, r#"{ "interval_ms": 50 }"#).unwrap();

        let settings = WatchSettingsBuilder::new()
            .with_file(&base)
            .with_file(&local)
            .build()
            .unwrap();

        assert_eq!(settings.interval_ms, 50);
        assert_eq!(settings.path, Some(PathBuf::from("base.txt")));
    }

    #[test]
    fn test_explicit_values_win() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("watch.toml");
        fs::write(&file, "interval_ms = 500\ndispatch_mode = \"isolate\"\n").unwrap();

        let settings = WatchSettingsBuilder::new()
            .with_file(&file)
            .with_interval_ms(20)
            .with_dispatch_mode(DispatchMode::FailFast)
            .with_path("explicit.log")
            .build()
            .unwrap();

        assert_eq!(settings.interval_ms, 20);
        assert_eq!(settings.dispatch_mode, DispatchMode::FailFast);
        assert_eq!(settings.path, Some(PathBuf::from("explicit.log")));
    }

    #[test]
    fn test_unknown_dispatch_mode() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("watch.yaml");
        fs::write(&file, "dispatch_mode: sometimes\n").unwrap();

        let result = WatchSettingsBuilder::new().with_file(&file).build();
        assert!(matches!(result, Err(WatchError::Deserialization(_))));
    }

    #[test]
    fn test_missing_file_rejected() {
        let result = WatchSettingsBuilder::new()
            .with_file("/nonexistent/pollwatch.yaml")
            .build();
        assert!(matches!(result, Err(WatchError::Load(_))));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let result = WatchSettingsBuilder::new().with_interval_ms(0).build();
        assert!(matches!(result, Err(WatchError::Validation(_))));
    }

    #[test]
    fn test_default_env_prefix() {
        let builder = WatchSettingsBuilder::new().with_default_env();
        assert_eq!(builder.env_prefix.as_deref(), Some("POLLWATCH"));
    }
}
