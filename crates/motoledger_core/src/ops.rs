//! Record operations.

use crate::adapter::RecordStore;
use crate::config::ContractConfig;
use crate::dispatch::{CreateRecordRequest, TransferOwnerRequest};
use crate::enumerate::{RecordEnumerator, ScanEntry};
use crate::error::{CoreError, CoreResult};
use crate::record::{replace_owner, RecordCodec, VehicleRecord};
use crate::seed::sample_records;
use motoledger_storage::LedgerStore;
use tracing::info;

/// Provides vehicle-record operations over a ledger store.
///
/// The `VehicleRegistry` holds no record state between calls. Every
/// operation reads from and writes to the injected store, and each mutation
/// is a single `put`.
pub struct VehicleRegistry<S: LedgerStore + ?Sized> {
    store: RecordStore<S>,
    enumerator: RecordEnumerator<S>,
    config: ContractConfig,
}

impl<S: LedgerStore + ?Sized> VehicleRegistry<S> {
    /// Creates a registry over the given adapter.
    pub fn new(store: RecordStore<S>, config: ContractConfig) -> Self {
        Self {
            enumerator: RecordEnumerator::new(store.clone()),
            store,
            config,
        }
    }

    /// Returns the store adapter.
    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Returns the raw bytes stored at `key`.
    pub fn query_record(&self, key: &str) -> CoreResult<Vec<u8>> {
        self.store.get(key)
    }

    /// Returns the decoded record stored at `key`.
    pub fn get_record(&self, key: &str) -> CoreResult<VehicleRecord> {
        let bytes = self.store.get(key)?;
        VehicleRecord::decode(&bytes).map_err(|e| CoreError::corrupt_record(key, e))
    }

    /// Writes a new record at the request key, replacing anything there.
    pub fn create_record(&self, request: &CreateRecordRequest) -> CoreResult<VehicleRecord> {
        let record = request.to_record();
        self.store.put(&request.key, &record.encode()?)?;
        info!(key = %request.key, owner = record.owner(), "created record");
        Ok(record)
    }

    /// Replaces the owner of an existing record.
    ///
    /// The stored object is rewritten in place: every field other than
    /// `owner` keeps its value and position, including fields outside the
    /// vehicle schema.
    pub fn transfer_owner(&self, request: &TransferOwnerRequest) -> CoreResult<VehicleRecord> {
        let key = request.key.as_str();
        let bytes = self.store.get(key)?;
        let current =
            VehicleRecord::decode(&bytes).map_err(|e| CoreError::corrupt_record(key, e))?;
        let rewritten = replace_owner(&bytes, &request.new_owner)
            .map_err(|e| CoreError::corrupt_record(key, e))?;
        self.store.put(key, &rewritten)?;
        info!(
            key = %key,
            from = %current.owner(),
            to = %request.new_owner,
            "transferred record"
        );
        Ok(current.with_owner(request.new_owner.as_str()))
    }

    /// Writes the fixed sample records at `<prefix>0..<prefix>N-1`.
    ///
    /// Returns the number of records written.
    pub fn init_ledger(&self) -> CoreResult<usize> {
        let samples = sample_records();
        for (index, record) in samples.iter().enumerate() {
            let key = self.config.seed_key(index);
            self.store.put(&key, &record.encode()?)?;
            info!(key = %key, owner = record.owner(), "added sample record");
        }
        Ok(samples.len())
    }

    /// Scans the configured record range.
    pub fn query_all_records(&self) -> CoreResult<Vec<ScanEntry<VehicleRecord>>> {
        self.query_records_by_range(&self.config.scan_start, &self.config.scan_end)
    }

    /// Scans `[start, end)`.
    pub fn query_records_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> CoreResult<Vec<ScanEntry<VehicleRecord>>> {
        self.enumerator.scan_all(start, end)
    }
}
