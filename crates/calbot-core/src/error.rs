//! Core error types.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by core components.
///
/// Unparseable timestamps are deliberately absent from this enum: they
/// resolve to `None` and a logged warning, never to an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// An argument was outside the range an operation accepts.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The timezone name is not a known IANA zone.
    #[error("unknown timezone: {name}")]
    UnknownTimezone { name: String },
}

impl CoreError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an unknown timezone error.
    pub fn unknown_timezone(name: impl Into<String>) -> Self {
        Self::UnknownTimezone { name: name.into() }
    }
}
