//! Record codec trait for stored values.

use crate::error::CoreResult;
use thiserror::Error;

/// A stored value that could not be decoded into a record.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The value is empty.
    #[error("value is empty")]
    Empty,

    /// The value is not well-formed for the record encoding.
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The value is well-formed but not a valid record.
    #[error("invalid record: {0}")]
    Invalid(String),
}

/// Trait for types that can be stored as ledger values.
///
/// Implementors must provide:
/// - `encode()`: Serializes to the persisted byte form
/// - `decode()`: Deserializes from the persisted byte form
///
/// Decoding returns a [`DecodeError`] rather than a [`crate::CoreError`] so
/// that range scans can keep the raw value and carry on.
///
/// # Example
///
/// ```rust
/// use motoledger_core::{CoreResult, DecodeError, RecordCodec};
///
/// struct Note(String);
///
/// impl RecordCodec for Note {
///     fn encode(&self) -> CoreResult<Vec<u8>> {
///         Ok(self.0.as_bytes().to_vec())
///     }
///
///     fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
///         std::str::from_utf8(bytes)
///             .map(|s| Note(s.to_string()))
///             .map_err(|e| DecodeError::Invalid(e.to_string()))
///     }
/// }
/// ```
pub trait RecordCodec: Sized {
    /// Encodes the record to its persisted bytes.
    ///
    /// The encoding must be deterministic - identical records
    /// must produce identical bytes.
    fn encode(&self) -> CoreResult<Vec<u8>>;

    /// Decodes a record from its persisted bytes.
    fn decode(bytes: &[u8]) -> Result<Self, DecodeError>;
}
