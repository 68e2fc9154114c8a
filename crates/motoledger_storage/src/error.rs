//! Error types for store operations.

use std::io;
use thiserror::Error;

/// Result type for store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while talking to a ledger store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The persisted store contents are corrupted.
    #[error("store corrupted: {0}")]
    Corrupted(String),

    /// A cursor was used after it was closed.
    #[error("cursor is closed")]
    Closed,

    /// The store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Another process holds the store.
    #[error("store locked: another process has exclusive access")]
    Locked,
}
