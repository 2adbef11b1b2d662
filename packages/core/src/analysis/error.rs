//! Error types for condition providers

use thiserror::Error;

/// Errors from weather data providers. Each is recovered per location:
/// the monitor logs the failure and moves on to the next zone.
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Data format error: {message}")]
    FormatError { message: String },

    #[error("Provider request timed out")]
    Timeout,

    #[error("Service unavailable")]
    ServiceUnavailable,
}

impl ProviderError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::FormatError {
            message: message.into(),
        }
    }
}
