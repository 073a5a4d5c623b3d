//! Error types for attendsync-core

use thiserror::Error;

/// Result type alias using attendsync-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in attendsync-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A record's timestamp could not be parsed during merge
    #[error("Malformed attendance record {id}: unparseable timestamp {timestamp:?}")]
    MalformedRecord { id: String, timestamp: String },

    /// The shared sync slot holds a value that is not a sync payload
    #[error("Corrupt sync state: {0}")]
    CorruptSyncState(String),

    /// A device-local key holds a value that cannot be decoded
    #[error("Corrupt local state under key '{key}': {reason}")]
    CorruptLocalState { key: String, reason: String },

    /// The underlying key-value store failed
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        Self::StorageUnavailable(error.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::StorageUnavailable(error.to_string())
    }
}
