//! Error types for photodisk operations.
//!
//! This module provides the error hierarchy using `thiserror` for lookups,
//! analytics, schema lifecycle and CLI commands. Mutations do not use it:
//! they report a [`ReturnValue`](crate::storage::ReturnValue) code instead.

use thiserror::Error;

/// Result type alias for photodisk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Storage-related errors (database operations).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Storage-specific errors for database operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(String),

    /// Schema has not been created yet.
    #[error("photodisk not initialized. Run: photodisk init")]
    NotInitialized,

    /// Photo not found by ID.
    #[error("photo not found: {id}")]
    PhotoNotFound {
        /// Photo ID that was not found.
        id: i64,
    },

    /// Disk not found by ID.
    #[error("disk not found: {id}")]
    DiskNotFound {
        /// Disk ID that was not found.
        id: i64,
    },

    /// RAM module not found by ID.
    #[error("RAM not found: {id}")]
    RamNotFound {
        /// RAM ID that was not found.
        id: i64,
    },

    /// Transaction error.
    #[error("transaction error: {0}")]
    Transaction(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),

    /// A mutation was rejected with a non-OK result code.
    #[error("operation returned {0}")]
    Rejected(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Command(CommandError::ExecutionFailed(err.to_string()))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Database(err.to_string()))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}
