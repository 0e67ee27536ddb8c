//! Error types for cohort-tables.
//!
//! The selection core itself is infallible: malformed or absent persisted
//! values degrade silently to the union default. Errors only arise from
//! the preference store collaborator, and callers that treat persistence
//! as best-effort can log and continue.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by preference store implementations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    /// IO errors with path context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Preference document (de)serialization errors
    #[error("Preference serialization failed: {0}")]
    Serialization(String),

    /// No platform configuration directory could be resolved
    #[error("No configuration directory available on this platform")]
    NoConfigDir,
}

impl StoreError {
    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path,
            message,
            source,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenient Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
