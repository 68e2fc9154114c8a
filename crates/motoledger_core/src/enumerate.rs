//! Range-scan enumeration.
//!
//! [`RecordEnumerator::scan_all`] drives one cursor over `[start, end)` to
//! completion and materializes every non-empty value:
//!
//! - values that decode become [`ScanValue::Record`]
//! - values that don't are kept as [`ScanValue::Raw`] and the scan carries on
//! - empty values are absent records and are skipped
//!
//! Entries come back in store order. There is no paging; callers bound the
//! key range themselves.

use crate::adapter::RecordStore;
use crate::error::CoreResult;
use crate::record::RecordCodec;
use motoledger_storage::LedgerStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The value half of a [`ScanEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScanValue<T> {
    /// The value decoded into a record.
    Record(T),
    /// The value did not decode; this is its lossy UTF-8 text.
    Raw(String),
}

/// One key of a range scan and what was stored there.
///
/// Serializes as `{"Key": ..., "Record": ...}`, where `Record` is either the
/// decoded object or, for a raw fallback, the original text as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEntry<T> {
    /// The key at the cursor position.
    #[serde(rename = "Key")]
    pub key: String,
    /// The decoded record or raw fallback.
    #[serde(rename = "Record")]
    pub value: ScanValue<T>,
}

impl<T> ScanEntry<T> {
    /// Returns the decoded record, if decoding succeeded.
    pub fn record(&self) -> Option<&T> {
        match &self.value {
            ScanValue::Record(record) => Some(record),
            ScanValue::Raw(_) => None,
        }
    }

    /// Returns the raw fallback text, if decoding failed.
    pub fn raw_value(&self) -> Option<&str> {
        match &self.value {
            ScanValue::Record(_) => None,
            ScanValue::Raw(raw) => Some(raw),
        }
    }

    /// Returns true if this entry holds a raw fallback.
    pub fn is_raw(&self) -> bool {
        matches!(self.value, ScanValue::Raw(_))
    }
}

/// Counts gathered during a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Entries whose value decoded.
    pub decoded: usize,
    /// Entries kept as raw fallbacks.
    pub raw: usize,
    /// Keys skipped because their value was empty.
    pub skipped_empty: usize,
}

impl ScanSummary {
    /// Total entries returned.
    pub fn returned(&self) -> usize {
        self.decoded + self.raw
    }
}

/// Drives range scans and materializes their results.
pub struct RecordEnumerator<S: LedgerStore + ?Sized> {
    store: RecordStore<S>,
}

impl<S: LedgerStore + ?Sized> RecordEnumerator<S> {
    /// Creates an enumerator over the given adapter.
    pub fn new(store: RecordStore<S>) -> Self {
        Self { store }
    }

    /// Scans `[start, end)` and decodes every entry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Storage`] if the store fails to open, step
    /// or close the cursor. Decode failures are never errors.
    pub fn scan_all<T: RecordCodec>(&self, start: &str, end: &str) -> CoreResult<Vec<ScanEntry<T>>> {
        self.scan_all_with_summary(start, end).map(|(entries, _)| entries)
    }

    /// Like [`Self::scan_all`], also returning counts for the scan.
    ///
    /// # Errors
    ///
    /// See [`Self::scan_all`].
    pub fn scan_all_with_summary<T: RecordCodec>(
        &self,
        start: &str,
        end: &str,
    ) -> CoreResult<(Vec<ScanEntry<T>>, ScanSummary)> {
        let mut cursor = self.store.range_scan(start, end)?;
        let mut entries = Vec::new();
        let mut summary = ScanSummary::default();

        // A failing step returns through `?`; dropping the guard closes the cursor.
        while let Some(entry) = cursor.next_entry()? {
            if entry.value.is_empty() {
                summary.skipped_empty += 1;
                debug!(key = %entry.key, "skipping empty value");
                continue;
            }

            let value = match T::decode(&entry.value) {
                Ok(record) => {
                    summary.decoded += 1;
                    ScanValue::Record(record)
                }
                Err(e) => {
                    summary.raw += 1;
                    debug!(key = %entry.key, error = %e, "keeping raw value");
                    ScanValue::Raw(String::from_utf8_lossy(&entry.value).into_owned())
                }
            };
            entries.push(ScanEntry {
                key: entry.key,
                value,
            });
        }

        cursor.close()?;
        debug!(
            start,
            end,
            decoded = summary.decoded,
            raw = summary.raw,
            skipped = summary.skipped_empty,
            "scan complete"
        );
        Ok((entries, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{VehicleRecord, RECORD_DOC_TYPE};
    use motoledger_storage::{CursorMode, InMemoryStore};
    use std::sync::Arc;

    fn enumerator(store: &Arc<InMemoryStore>) -> RecordEnumerator<InMemoryStore> {
        RecordEnumerator::new(RecordStore::new(Arc::clone(store)))
    }

    fn put_vehicle(store: &InMemoryStore, key: &str, owner: &str) {
        let record = VehicleRecord::new("Honda", "Kinetic", "black", "123MHK45", "100CC", owner);
        store.put(key, &record.encode().unwrap()).unwrap();
    }

    #[test]
    fn scan_returns_entries_in_key_order() {
        let store = Arc::new(InMemoryStore::new());
        put_vehicle(&store, "Record2", "Vani");
        put_vehicle(&store, "Record0", "Seshu");
        put_vehicle(&store, "Record1", "Pavan");

        let entries: Vec<ScanEntry<VehicleRecord>> =
            enumerator(&store).scan_all("Record0", "Record999").unwrap();
        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["Record0", "Record1", "Record2"]);
        assert_eq!(entries[1].record().unwrap().owner(), "Pavan");
        assert_eq!(store.stats().cursors_closed(), 1);
    }

    #[test]
    fn malformed_value_is_kept_raw() {
        let store = Arc::new(InMemoryStore::new());
        put_vehicle(&store, "Record0", "Seshu");
        store.put("Record1", b"{not json").unwrap();
        put_vehicle(&store, "Record2", "Vani");

        let (entries, summary) = enumerator(&store)
            .scan_all_with_summary::<VehicleRecord>("Record0", "Record999")
            .unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].raw_value(), Some("{not json"));
        assert!(entries[2].record().is_some());
        assert_eq!(summary.decoded, 2);
        assert_eq!(summary.raw, 1);
    }

    #[test]
    fn malformed_last_entry_is_kept_raw() {
        let store = Arc::new(InMemoryStore::new());
        put_vehicle(&store, "Record0", "Seshu");
        store.put("Record1", b"\xff\xfe").unwrap();

        let entries = enumerator(&store)
            .scan_all::<VehicleRecord>("Record0", "Record999")
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[1].is_raw());
    }

    #[test]
    fn empty_values_are_skipped() {
        let store = Arc::new(InMemoryStore::new());
        put_vehicle(&store, "Record0", "Seshu");
        store.put("Record1", b"").unwrap();

        let (entries, summary) = enumerator(&store)
            .scan_all_with_summary::<VehicleRecord>("Record0", "Record999")
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(summary.skipped_empty, 1);
        assert_eq!(summary.returned(), 1);
    }

    #[test]
    fn empty_range_closes_cursor_once() {
        let store = Arc::new(InMemoryStore::new());
        put_vehicle(&store, "Record0", "Seshu");

        let entries = enumerator(&store)
            .scan_all::<VehicleRecord>("Record5", "Record5")
            .unwrap();
        assert!(entries.is_empty());
        assert_eq!(store.stats().cursors_opened(), 1);
        assert_eq!(store.stats().cursors_closed(), 1);
    }

    #[test]
    fn single_entry_range_with_trailing_done() {
        let store = Arc::new(InMemoryStore::with_mode(CursorMode::TrailingDone));
        put_vehicle(&store, "Record0", "Seshu");

        let entries = enumerator(&store)
            .scan_all::<VehicleRecord>("Record0", "Record999")
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(store.stats().cursors_closed(), 1);
    }

    #[test]
    fn entry_serializes_with_wire_names() {
        let entry = ScanEntry {
            key: "Record0".to_string(),
            value: ScanValue::Record(VehicleRecord::new("TVS", "", "green", "236KJ12", "150CC", "Anand")),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["Key"], "Record0");
        assert_eq!(json["Record"]["docType"], RECORD_DOC_TYPE);
        assert_eq!(json["Record"]["owner"], "Anand");

        let raw: ScanEntry<VehicleRecord> = ScanEntry {
            key: "Record1".to_string(),
            value: ScanValue::Raw("oops".to_string()),
        };
        let json = serde_json::to_value(&raw).unwrap();
        assert_eq!(json["Record"], "oops");
    }
}
