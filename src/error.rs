//! Error types for pollwatch.

use std::fmt;

/// Result type alias for pollwatch operations.
pub type Result<T> = std::result::Result<T, WatchError>;

/// Errors that can occur while monitoring a file.
///
/// Note that a missing or unreadable watched file is never an error: it is
/// reported as [`FileState::missing`](crate::state::FileState::missing).
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// IO error outside of the watched file itself (stdin, settings files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to load settings from a source.
    #[error("Failed to load settings: {0}")]
    Load(String),

    /// Failed to deserialize settings.
    #[error("Failed to deserialize settings: {0}")]
    Deserialization(String),

    /// Settings validation failed.
    #[error("Settings validation failed: {0}")]
    Validation(String),

    /// A listener failed and the remaining listeners were not notified.
    #[error("Listener #{index} failed: {source}")]
    Listener {
        /// Position of the failing listener in registration order
        index: usize,
        /// The error returned by the listener
        #[source]
        source: ListenerError,
    },

    /// One or more listeners failed while every listener was still notified.
    #[error("{} listener(s) failed during dispatch", .0.len())]
    Dispatch(Vec<(usize, ListenerError)>),
}

/// Failure raised by a [`Listener`](crate::notify::Listener) while receiving a state.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// The listener could not write its output.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The listener refused the notification.
    #[error("{0}")]
    Rejected(String),
}

impl ListenerError {
    /// Create a rejection error with a message.
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }
}

/// Validation error for watch settings.
#[derive(Debug)]
pub enum ValidationError {
    /// Custom validation error with a message.
    Custom(String),

    /// A specific field has an invalid value.
    InvalidField {
        /// The field name
        field: String,
        /// The reason why it's invalid
        reason: String,
    },

    /// Multiple validation errors occurred.
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Create a custom validation error.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(msg) => write!(f, "{}", msg),
            Self::InvalidField { field, reason } => {
                write!(f, "Field '{}' is invalid: {}", field, reason)
            }
            Self::Multiple(errors) => {
                writeln!(f, "Multiple validation errors:")?;
                for (i, err) in errors.iter().enumerate() {
                    writeln!(f, "  {}. {}", i + 1, err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for WatchError {
    fn from(err: ValidationError) -> Self {
        WatchError::Validation(err.to_string())
    }
}
