//! Client error types.

use thiserror::Error;

use calbot_core::CoreError;
use calbot_providers::ProviderError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid value on the command line.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// Scheduling error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Event source error.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
