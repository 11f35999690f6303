//! State persistence error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur loading or saving the automation state.
///
/// Load-side errors are recoverable (the caller falls back to a default
/// state); save-side errors are fatal to the run.
#[derive(Debug, Error)]
pub enum StateError {
    /// Filesystem I/O failed.
    #[error("state I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file exists but is not valid JSON for the expected shape.
    #[error("state file at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing the state for writing failed.
    #[error("failed to serialize state: {0}")]
    Serialize(#[source] serde_json::Error),
}
