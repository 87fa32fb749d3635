//! Error types for the omdb-client crate.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when talking to the metadata provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider answered but has no entity for the lookup key
    #[error("Not found: {0}")]
    NotFound(String),

    /// A search page came back empty or past the last page
    #[error("No more results")]
    NoMoreResults,

    /// Non-success HTTP status
    #[error("Provider API error (status {status_code}): {message}")]
    Api { status_code: u16, message: String },

    /// Network-level failure (connect, TLS, body read)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected shape
    #[error("Decode error at {path}: {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },

    /// The call did not finish within its deadline
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),
}

impl ProviderError {
    /// True when the error only means "the provider has nothing for this key"
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound(_) | ProviderError::NoMoreResults)
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ProviderError>;
