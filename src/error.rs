//! Error types for TreeDB
//!
//! Provides a unified error type for all operations.
//!
//! Misses are not errors: index and store lookups return `Option`, and a
//! missing snapshot file is reported as `Ok(None)` by the storage layer.

use thiserror::Error;

/// Result type alias using TreeDbError
pub type Result<T> = std::result::Result<T, TreeDbError>;

/// Unified error type for TreeDB operations
#[derive(Debug, Error)]
pub enum TreeDbError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    /// Snapshot exists but cannot be trusted (bad header, checksum, length)
    #[error("Snapshot corruption detected: {0}")]
    Corruption(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Validation Errors (engine layer only)
    // -------------------------------------------------------------------------
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<bincode::Error> for TreeDbError {
    fn from(err: bincode::Error) -> Self {
        TreeDbError::Serialization(err.to_string())
    }
}
