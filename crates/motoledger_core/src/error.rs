//! Error types for MotoLedger core.

use crate::record::DecodeError;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in MotoLedger core operations.
///
/// Per-entry decode failures during a range scan are not represented here;
/// they are reported inline in the scan result.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Ledger store error.
    #[error("storage error: {0}")]
    Storage(#[from] motoledger_storage::StorageError),

    /// Record or response encoding failed.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Key is absent, or its stored value is empty.
    #[error("{key} does not exist")]
    NotFound {
        /// The key that was looked up.
        key: String,
    },

    /// Request arguments have the wrong count or shape.
    #[error("invalid request: {message}")]
    Validation {
        /// Description of the problem.
        message: String,
    },

    /// No operation is registered under the requested name.
    #[error("unknown operation: {name}")]
    UnknownOperation {
        /// The name that was invoked.
        name: String,
    },

    /// A stored value could not be decoded where a record was required.
    #[error("record {key} is corrupt: {source}")]
    CorruptRecord {
        /// The key holding the undecodable value.
        key: String,
        /// The underlying decode failure.
        source: DecodeError,
    },
}

impl CoreError {
    /// Creates a not-found error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a validation error for a wrong argument count.
    pub fn argument_count(operation: &str, expected: usize, actual: usize) -> Self {
        Self::validation(format!(
            "incorrect number of arguments for {operation}: expected {expected}, got {actual}"
        ))
    }

    /// Creates an unknown operation error.
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation { name: name.into() }
    }

    /// Creates a corrupt record error.
    pub fn corrupt_record(key: impl Into<String>, source: DecodeError) -> Self {
        Self::CorruptRecord {
            key: key.into(),
            source,
        }
    }

    /// Returns true if this is a [`CoreError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
