//! Repository client error types.

use thiserror::Error;

/// Errors that can occur when talking to the repository hosting API.
#[derive(Debug, Error)]
pub enum RepoError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Hosting API returned a non-success status code.
    #[error("GitHub API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned a 429 / rate-limit response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// A batched write failed partway through.
    ///
    /// `written` lists the paths that were committed before the failure so
    /// the caller can reason about what the repository now contains.
    #[error("partial write: failed at '{path}' after {} file(s): {source}", written.len())]
    PartialWrite {
        /// Paths committed before the failure, in write order.
        written: Vec<String>,
        /// The path whose write failed.
        path: String,
        /// The underlying failure.
        #[source]
        source: Box<RepoError>,
    },

    /// Response body decoding failed (base64 or JSON shape).
    #[error("decode error: {0}")]
    Decode(String),

    /// The client was constructed without a token.
    #[error("GitHub client is not configured (missing token)")]
    NotConfigured,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_write_reports_progress() {
        let err = RepoError::PartialWrite {
            written: vec!["a/app.py".to_string(), "a/README.md".to_string()],
            path: "a/aws/deploy.sh".to_string(),
            source: Box::new(RepoError::Api {
                status: 502,
                message: "bad gateway".to_string(),
            }),
        };
        let text = err.to_string();
        assert!(text.contains("failed at 'a/aws/deploy.sh'"));
        assert!(text.contains("after 2 file(s)"));
    }
}
