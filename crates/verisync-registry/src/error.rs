//! Registry error types.
//!
//! These never escape the public search operations, which degrade to empty
//! results; they exist so the degradation can be logged with a cause.

use thiserror::Error;

/// Errors that can occur when talking to the metrology registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// HTTP transport error, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Registry returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the registry.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse a registry response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The registry returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}

impl RegistryError {
    /// Whether the failure was the hard request timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}
