//! LLM client error types.

use thiserror::Error;

/// Errors that can occur when requesting completions from a provider.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport error (network, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider API returned a non-success status code.
    #[error("provider API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The provider returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The provider response carried no usable completion text, or LLM
    /// output did not match the shape a caller asked for.
    #[error("parse error: {0}")]
    Parse(String),

    /// The client was constructed without an API key.
    #[error("LLM provider is not configured (missing API key)")]
    NotConfigured,
}

impl LlmError {
    /// Whether the caller may retry after a delay.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}
