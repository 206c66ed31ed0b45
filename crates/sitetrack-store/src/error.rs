//! Error types for sitetrack-store.

use std::path::PathBuf;

/// Result type for sitetrack-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sitetrack-store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Storage medium is disabled or cannot be reached.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Storage medium rejected a write because it is full.
    #[error("Storage quota exceeded while writing {key}")]
    QuotaExceeded { key: String },

    /// Failed to create the storage directory.
    #[error("Failed to create storage directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Backend-specific failure (for example a JavaScript exception).
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
