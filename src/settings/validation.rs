//! Settings validation.

use super::WatchSettings;
use crate::error::ValidationError;

/// Longest accepted poll interval (one hour).
pub const MAX_INTERVAL_MS: u64 = 3_600_000;

/// Trait for settings validation.
///
/// # Examples
///
/// ```rust
/// use pollwatch::settings::{Validate, WatchSettings};
///
/// let mut settings = WatchSettings::default();
/// assert!(settings.validate().is_ok());
///
/// settings.interval_ms = 0;
/// assert!(settings.validate().is_err());
/// ```
pub trait Validate {
    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Should return a `ValidationError` describing what validation failed.
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for WatchSettings {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if self.interval_ms == 0 {
            errors.push(ValidationError::invalid_field(
                "interval_ms",
                "must be greater than 0",
            ));
        } else if self.interval_ms > MAX_INTERVAL_MS {
            errors.push(ValidationError::invalid_field(
                "interval_ms",
                format!("must be at most {}", MAX_INTERVAL_MS),
            ));
        }

        if self
            .path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            errors.push(ValidationError::invalid_field("path", "must not be empty"));
        }

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ValidationError::Multiple(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_are_valid() {
        assert!(WatchSettings::default().validate().is_ok());
    }

    #[test]
    fn test_interval_bounds() {
        let mut settings = WatchSettings::default();
        settings.interval_ms = MAX_INTERVAL_MS;
        assert!(settings.validate().is_ok());

        settings.interval_ms = MAX_INTERVAL_MS + 1;
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_collects_every_problem() {
        let settings = WatchSettings {
            path: Some(PathBuf::new()),
            interval_ms: 0,
            ..WatchSettings::default()
        };

        match settings.validate() {
            Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected multiple errors, got {:?}", other),
        }
    }
}
