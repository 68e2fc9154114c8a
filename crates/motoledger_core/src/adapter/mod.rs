//! Record store adapter.
//!
//! [`RecordStore`] translates record-level reads, writes and range scans into
//! calls on an injected [`LedgerStore`]. It owns no state and applies no
//! business rules; store errors are passed through unchanged and never retried.

mod cursor;

pub use cursor::{CursorState, ScanCursor};

use crate::error::{CoreError, CoreResult};
use motoledger_storage::LedgerStore;
use std::sync::Arc;
use tracing::debug;

/// Thin adapter over an external ledger store.
///
/// # Example
///
/// ```rust
/// use motoledger_core::RecordStore;
/// use motoledger_storage::InMemoryStore;
/// use std::sync::Arc;
///
/// let store = RecordStore::new(Arc::new(InMemoryStore::new()));
/// store.put("Record0", b"{}").unwrap();
/// assert_eq!(store.get("Record0").unwrap(), b"{}");
/// assert!(store.get("Record1").unwrap_err().is_not_found());
/// ```
pub struct RecordStore<S: LedgerStore + ?Sized> {
    store: Arc<S>,
}

impl<S: LedgerStore + ?Sized> RecordStore<S> {
    /// Creates an adapter over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn inner(&self) -> &Arc<S> {
        &self.store
    }

    /// Reads the value at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if the key has no value or an empty
    /// value, or [`CoreError::Storage`] if the store fails.
    pub fn get(&self, key: &str) -> CoreResult<Vec<u8>> {
        match self.store.get(key)? {
            Some(bytes) if !bytes.is_empty() => Ok(bytes),
            _ => Err(CoreError::not_found(key)),
        }
    }

    /// Writes `value` at `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Storage`] if the store fails.
    pub fn put(&self, key: &str, value: &[u8]) -> CoreResult<()> {
        self.store.put(key, value)?;
        Ok(())
    }

    /// Opens a scoped cursor over `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Storage`] if the store cannot open the cursor.
    pub fn range_scan(&self, start: &str, end: &str) -> CoreResult<ScanCursor<'_>> {
        let inner = self.store.range_scan(start, end)?;
        debug!(start, end, "opened range cursor");
        Ok(ScanCursor::new(inner, start, end))
    }
}

impl<S: LedgerStore + ?Sized> Clone for RecordStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LedgerStore + ?Sized> std::fmt::Debug for RecordStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motoledger_storage::InMemoryStore;

    fn adapter() -> (Arc<InMemoryStore>, RecordStore<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        (Arc::clone(&store), RecordStore::new(store))
    }

    #[test]
    fn get_missing_is_not_found() {
        let (_, records) = adapter();
        let err = records.get("Record42").unwrap_err();
        assert!(matches!(err, CoreError::NotFound { ref key } if key == "Record42"));
    }

    #[test]
    fn get_empty_value_is_not_found() {
        let (store, records) = adapter();
        store.put("Record1", b"").unwrap();
        assert!(records.get("Record1").unwrap_err().is_not_found());
    }

    #[test]
    fn get_returns_bytes_unchanged() {
        let (_, records) = adapter();
        records.put("Record1", b"\x00raw\xff").unwrap();
        assert_eq!(records.get("Record1").unwrap(), b"\x00raw\xff");
    }

    #[test]
    fn range_scan_opens_one_cursor() {
        let (store, records) = adapter();
        let cursor = records.range_scan("Record0", "Record999").unwrap();
        assert_eq!(cursor.state(), CursorState::Open);
        assert_eq!(store.stats().cursors_opened(), 1);
        cursor.close().unwrap();
        assert_eq!(store.stats().cursors_closed(), 1);
    }

    #[test]
    fn works_over_trait_objects() {
        let store: Arc<dyn LedgerStore> = Arc::new(InMemoryStore::new());
        let records = RecordStore::new(store);
        records.put("k", b"v").unwrap();
        assert_eq!(records.get("k").unwrap(), b"v");
    }
}
