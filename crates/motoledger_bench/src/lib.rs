//! Benchmark utilities.

use motoledger_core::{RecordCodec, VehicleRecord};
use motoledger_storage::{InMemoryStore, LedgerStore, StoreEntry};

/// Builds the record stored at index `i`.
pub fn record(i: usize) -> VehicleRecord {
    VehicleRecord::new(
        "Royal Enfield",
        "Classic 350",
        "black",
        format!("VIN{i:06}"),
        "350CC",
        format!("owner-{i}"),
    )
}

/// Generates `count` encoded records keyed `Record0..`.
pub fn generate_entries(count: usize) -> Vec<StoreEntry> {
    (0..count)
        .map(|i| {
            let value = record(i).encode().expect("record encodes");
            StoreEntry::new(format!("Record{i}"), value)
        })
        .collect()
}

/// Creates an in-memory store holding `count` records.
pub fn populated_store(count: usize) -> InMemoryStore {
    let store = InMemoryStore::new();
    for entry in generate_entries(count) {
        store.put(&entry.key, &entry.value).expect("put succeeds");
    }
    store
}
