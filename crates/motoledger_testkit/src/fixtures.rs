//! Test fixtures and ledger helpers.
//!
//! Provides convenience functions for setting up test ledgers
//! and common test scenarios.

use motoledger_core::{Contract, ContractConfig, CoreResult, Response};
use motoledger_storage::{CursorMode, FileStore, InMemoryStore};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// A contract over an in-memory store, with the store kept reachable
/// for inspection.
pub struct TestLedger {
    /// The backing store.
    pub store: Arc<InMemoryStore>,
    /// The contract under test.
    pub contract: Contract<InMemoryStore>,
}

impl TestLedger {
    /// Creates an empty ledger.
    pub fn memory() -> Self {
        Self::from_store(InMemoryStore::new())
    }

    /// Creates an empty ledger whose cursors use the given mode.
    pub fn with_mode(mode: CursorMode) -> Self {
        Self::from_store(InMemoryStore::with_mode(mode))
    }

    /// Creates a ledger seeded with the sample records.
    pub fn seeded() -> Self {
        let ledger = Self::memory();
        ledger
            .invoke("initLedger", &[])
            .expect("Failed to seed ledger");
        ledger
    }

    /// Wraps an existing store.
    pub fn from_store(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            contract: Contract::new(Arc::clone(&store), ContractConfig::default()),
            store,
        }
    }

    /// Invokes an operation with string-slice arguments.
    pub fn invoke(&self, operation: &str, args: &[&str]) -> CoreResult<Response> {
        self.contract.invoke(operation, &to_args(args))
    }
}

impl std::ops::Deref for TestLedger {
    type Target = Contract<InMemoryStore>;

    fn deref(&self) -> &Self::Target {
        &self.contract
    }
}

/// A contract over a file store in a temporary directory.
pub struct FileLedger {
    /// The contract under test.
    pub contract: Contract<FileStore>,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: TempDir,
    path: PathBuf,
}

impl FileLedger {
    /// Creates an empty file-backed ledger.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("ledger.cbor");
        let store = FileStore::open(&path).expect("Failed to open file store");
        Self {
            contract: Contract::new(Arc::new(store), ContractConfig::default()),
            _temp_dir: temp_dir,
            path,
        }
    }

    /// Returns the snapshot file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Default for FileLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a test with a fresh in-memory ledger.
///
/// # Example
///
/// ```rust
/// use motoledger_testkit::with_test_ledger;
///
/// with_test_ledger(|ledger| {
///     assert!(ledger.invoke("queryRecord", &["Record0"]).is_err());
/// });
/// ```
pub fn with_test_ledger<F, R>(f: F) -> R
where
    F: FnOnce(&TestLedger) -> R,
{
    let ledger = TestLedger::memory();
    f(&ledger)
}

/// Converts string slices into an owned argument list.
pub fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;
    use motoledger_core::{RecordCodec, VehicleRecord};
    use motoledger_storage::LedgerStore;

    /// Creates a ledger holding `count` records at `Record0..Record{count-1}`.
    pub fn populated_ledger(count: usize) -> TestLedger {
        let ledger = TestLedger::memory();
        for i in 0..count {
            let record = VehicleRecord::new(
                "Honda",
                "Activa",
                "gold",
                format!("VIN{i:05}"),
                "100CC",
                format!("owner-{i}"),
            );
            ledger
                .store
                .put(&format!("Record{i}"), &record.encode().expect("Failed to encode"))
                .expect("Failed to put record");
        }
        ledger
    }

    /// Creates a seeded ledger where one key holds a malformed value.
    pub fn ledger_with_malformed(key: &str, value: &[u8]) -> TestLedger {
        let ledger = TestLedger::seeded();
        ledger.store.put(key, value).expect("Failed to put value");
        ledger
    }
}
