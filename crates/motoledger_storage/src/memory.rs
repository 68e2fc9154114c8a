//! In-memory ledger store for testing.

use crate::backend::{CursorStep, LedgerStore, StoreCursor, StoreEntry};
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::iter::Peekable;
use std::ops::Bound;
use std::sync::atomic::{AtomicU64, Ordering};
use std::vec::IntoIter;

/// How an [`InMemoryStore`] cursor reports the end of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// The last entry arrives on the same step as `done = true`.
    #[default]
    DoneWithLast,
    /// Every entry arrives with `done = false`, followed by one empty
    /// `done = true` step.
    TrailingDone,
}

/// Call counters for an [`InMemoryStore`].
#[derive(Debug, Default)]
pub struct StoreStats {
    gets: AtomicU64,
    puts: AtomicU64,
    cursors_opened: AtomicU64,
    cursors_closed: AtomicU64,
}

impl StoreStats {
    /// Number of `get` calls served.
    pub fn gets(&self) -> u64 {
        self.gets.load(Ordering::Relaxed)
    }

    /// Number of `put` calls applied.
    pub fn puts(&self) -> u64 {
        self.puts.load(Ordering::Relaxed)
    }

    /// Number of cursors opened.
    pub fn cursors_opened(&self) -> u64 {
        self.cursors_opened.load(Ordering::Relaxed)
    }

    /// Number of cursors closed.
    pub fn cursors_closed(&self) -> u64 {
        self.cursors_closed.load(Ordering::Relaxed)
    }

    /// Number of cursors opened but not yet closed.
    pub fn open_cursors(&self) -> u64 {
        self.cursors_opened().saturating_sub(self.cursors_closed())
    }
}

/// An in-memory ledger store.
///
/// Keys are kept in a `BTreeMap`, so range scans follow byte-lexicographic
/// key order. This store is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral ledgers that don't need persistence
///
/// Cursors iterate a snapshot of the range taken when they are opened;
/// writes made while a cursor is live are not visible to it.
///
/// # Example
///
/// ```rust
/// use motoledger_storage::{InMemoryStore, LedgerStore};
///
/// let store = InMemoryStore::new();
/// store.put("Record1", b"one").unwrap();
/// assert_eq!(store.get("Record1").unwrap().as_deref(), Some(&b"one"[..]));
/// assert_eq!(store.get("Record2").unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
    mode: CursorMode,
    stats: StoreStats,
}

impl InMemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose cursors use the given end-of-range signalling.
    #[must_use]
    pub fn with_mode(mode: CursorMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Creates a store pre-populated with entries.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        let data = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            data: RwLock::new(data),
            ..Self::default()
        }
    }

    /// Returns the cursor mode.
    #[must_use]
    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    /// Returns the call counters.
    #[must_use]
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Returns true if no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Returns a copy of all entries in key order.
    #[must_use]
    pub fn entries(&self) -> Vec<StoreEntry> {
        self.data
            .read()
            .iter()
            .map(|(k, v)| StoreEntry::new(k.clone(), v.clone()))
            .collect()
    }

    /// Clears all entries.
    pub fn clear(&self) {
        self.data.write().clear();
    }

    fn snapshot_range(&self, start: &str, end: &str) -> Vec<StoreEntry> {
        if start >= end {
            return Vec::new();
        }
        self.data
            .read()
            .range::<str, _>((Bound::Included(start), Bound::Excluded(end)))
            .map(|(k, v)| StoreEntry::new(k.clone(), v.clone()))
            .collect()
    }
}

impl LedgerStore for InMemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        self.stats.gets.fetch_add(1, Ordering::Relaxed);
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        self.stats.puts.fetch_add(1, Ordering::Relaxed);
        self.data.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn range_scan(&self, start: &str, end: &str) -> StorageResult<Box<dyn StoreCursor + '_>> {
        let entries = self.snapshot_range(start, end);
        self.stats.cursors_opened.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(InMemoryCursor {
            entries: entries.into_iter().peekable(),
            mode: self.mode,
            closed: false,
            stats: &self.stats,
        }))
    }
}

/// Cursor over a snapshot of an [`InMemoryStore`] range.
struct InMemoryCursor<'a> {
    entries: Peekable<IntoIter<StoreEntry>>,
    mode: CursorMode,
    closed: bool,
    stats: &'a StoreStats,
}

impl StoreCursor for InMemoryCursor<'_> {
    fn next(&mut self) -> StorageResult<CursorStep> {
        if self.closed {
            return Err(StorageError::Closed);
        }

        let step = match (self.entries.next(), self.mode) {
            (Some(entry), CursorMode::DoneWithLast) => {
                let done = self.entries.peek().is_none();
                CursorStep::entry(entry, done)
            }
            (Some(entry), CursorMode::TrailingDone) => CursorStep::entry(entry, false),
            (None, _) => CursorStep::finished(),
        };
        Ok(step)
    }

    fn close(&mut self) -> StorageResult<()> {
        if self.closed {
            return Err(StorageError::Closed);
        }
        self.closed = true;
        self.stats.cursors_closed.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(store: &InMemoryStore, start: &str, end: &str) -> Vec<CursorStep> {
        let mut cursor = store.range_scan(start, end).unwrap();
        let mut steps = Vec::new();
        loop {
            let step = cursor.next().unwrap();
            let done = step.done;
            steps.push(step);
            if done {
                break;
            }
        }
        cursor.close().unwrap();
        steps
    }

    #[test]
    fn memory_new_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn memory_get_missing_returns_none() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("nope").unwrap(), None);
        assert_eq!(store.stats().gets(), 1);
    }

    #[test]
    fn memory_put_overwrites() {
        let store = InMemoryStore::new();
        store.put("k", b"first").unwrap();
        store.put("k", b"second").unwrap();
        assert_eq!(store.get("k").unwrap().unwrap(), b"second");
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().puts(), 2);
    }

    #[test]
    fn memory_range_is_half_open() {
        let store = InMemoryStore::with_entries([("a", "1"), ("b", "2"), ("c", "3")]);
        let steps = collect(&store, "a", "c");
        let keys: Vec<_> = steps
            .iter()
            .filter_map(|s| s.entry.as_ref().map(|e| e.key.as_str()))
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn memory_range_is_lexicographic() {
        let store = InMemoryStore::with_entries([
            ("Record10", "x"),
            ("Record2", "x"),
            ("Record1", "x"),
        ]);
        let steps = collect(&store, "Record0", "Record999");
        let keys: Vec<_> = steps
            .iter()
            .filter_map(|s| s.entry.as_ref().map(|e| e.key.clone()))
            .collect();
        assert_eq!(keys, vec!["Record1", "Record10", "Record2"]);
    }

    #[test]
    fn memory_done_with_last_entry() {
        let store = InMemoryStore::with_entries([("a", "1"), ("b", "2")]);
        let steps = collect(&store, "a", "z");
        assert_eq!(steps.len(), 2);
        assert!(!steps[0].done);
        assert!(steps[1].done);
        assert_eq!(steps[1].entry.as_ref().unwrap().key, "b");
    }

    #[test]
    fn memory_trailing_done_step() {
        let store = InMemoryStore::with_mode(CursorMode::TrailingDone);
        store.put("a", b"1").unwrap();
        let steps = collect(&store, "a", "z");
        assert_eq!(steps.len(), 2);
        assert!(!steps[0].done);
        assert_eq!(steps[1], CursorStep::finished());
    }

    #[test]
    fn memory_empty_and_inverted_ranges() {
        let store = InMemoryStore::with_entries([("a", "1")]);
        assert_eq!(collect(&store, "a", "a"), vec![CursorStep::finished()]);
        assert_eq!(collect(&store, "z", "a"), vec![CursorStep::finished()]);
    }

    #[test]
    fn memory_cursor_counts_open_and_close() {
        let store = InMemoryStore::new();
        let mut cursor = store.range_scan("a", "b").unwrap();
        assert_eq!(store.stats().open_cursors(), 1);
        cursor.close().unwrap();
        assert_eq!(store.stats().cursors_closed(), 1);
        assert_eq!(store.stats().open_cursors(), 0);
    }

    #[test]
    fn memory_cursor_rejects_use_after_close() {
        let store = InMemoryStore::with_entries([("a", "1")]);
        let mut cursor = store.range_scan("a", "b").unwrap();
        cursor.close().unwrap();
        assert!(matches!(cursor.next(), Err(StorageError::Closed)));
        assert!(matches!(cursor.close(), Err(StorageError::Closed)));
        assert_eq!(store.stats().cursors_closed(), 1);
    }

    #[test]
    fn memory_cursor_sees_snapshot() {
        let store = InMemoryStore::with_entries([("a", "1")]);
        let mut cursor = store.range_scan("a", "z").unwrap();
        store.put("b", b"2").unwrap();
        let step = cursor.next().unwrap();
        assert!(step.done);
        assert_eq!(step.entry.unwrap().key, "a");
        cursor.close().unwrap();
    }

    proptest::proptest! {
        #[test]
        fn range_scan_matches_filtered_keys(
            keys in proptest::collection::btree_set("[a-e]{1,3}", 0..30),
            start in "[a-e]{0,3}",
            end in "[a-f]{0,3}",
        ) {
            let store = InMemoryStore::with_entries(keys.iter().map(|k| (k.clone(), "v")));
            let expected: Vec<String> = keys
                .iter()
                .filter(|k| k.as_str() >= start.as_str() && k.as_str() < end.as_str())
                .cloned()
                .collect();

            let scanned: Vec<String> = collect(&store, &start, &end)
                .into_iter()
                .filter_map(|step| step.entry.map(|e| e.key))
                .collect();
            proptest::prop_assert_eq!(scanned, expected);
            proptest::prop_assert_eq!(store.stats().open_cursors(), 0);
        }
    }
}
