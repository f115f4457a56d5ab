//! Error types for persistence operations.

use std::path::PathBuf;
use thiserror::Error;

use dagschema_reconcile::RegistryError;

/// Errors that can occur while reading or writing registry files.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to read from file system.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write to file system.
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize data to JSON.
    #[error("failed to serialize: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to create directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents could not be understood.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl From<PersistenceError> for RegistryError {
    fn from(err: PersistenceError) -> Self {
        RegistryError::Backend(Box::new(err))
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
