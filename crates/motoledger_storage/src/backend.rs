//! Ledger store trait definition.

use crate::error::StorageResult;

/// One key/value pair produced by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    /// The key at the cursor position.
    pub key: String,
    /// The raw stored value.
    pub value: Vec<u8>,
}

impl StoreEntry {
    /// Creates a new entry.
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The result of a single cursor step.
///
/// `entry` and `done` are independent signals. A store may hand back the
/// final entry together with `done = true`, or report `done` on a separate
/// step that carries no entry. Consumers must handle both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CursorStep {
    /// The entry at this step, if any.
    pub entry: Option<StoreEntry>,
    /// Whether the cursor has no further entries.
    pub done: bool,
}

impl CursorStep {
    /// A step carrying an entry.
    pub fn entry(entry: StoreEntry, done: bool) -> Self {
        Self {
            entry: Some(entry),
            done,
        }
    }

    /// A terminal step with no entry.
    pub fn finished() -> Self {
        Self {
            entry: None,
            done: true,
        }
    }
}

/// A live forward iterator over a key range.
///
/// The caller owns the cursor and must call [`StoreCursor::close`] once when
/// it is done with it, whether iteration finished or was abandoned.
pub trait StoreCursor {
    /// Advances the cursor by one step.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails, or [`crate::StorageError::Closed`]
    /// if the cursor was already closed.
    fn next(&mut self) -> StorageResult<CursorStep>;

    /// Releases the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails to release the cursor.
    fn close(&mut self) -> StorageResult<()>;
}

/// An ordered key-value ledger.
///
/// Stores are **opaque byte stores**. MotoLedger owns all value
/// interpretation - stores do not understand records.
///
/// # Invariants
///
/// - `get` returns exactly the bytes of the last `put` for that key
/// - `put` overwrites any previous value, no merging
/// - `range_scan(start, end)` visits every key `k` with `start <= k < end`
///   in byte-lexicographic order; `start >= end` visits nothing
/// - Stores must be `Send + Sync` for concurrent access
///
/// # Implementors
///
/// - [`super::InMemoryStore`] - For testing
/// - [`super::FileStore`] - For the command-line tool
pub trait LedgerStore: Send + Sync {
    /// Reads the value stored at `key`.
    ///
    /// Returns `None` if the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot serve the read.
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Writes `value` at `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be applied.
    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Opens a forward cursor over `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor cannot be opened.
    fn range_scan(&self, start: &str, end: &str) -> StorageResult<Box<dyn StoreCursor + '_>>;
}
