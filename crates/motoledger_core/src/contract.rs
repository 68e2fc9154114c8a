//! Contract entry point.

use crate::adapter::RecordStore;
use crate::config::ContractConfig;
use crate::dispatch::{
    CreateRecordHandler, Handler, InitLedgerHandler, Operation, QueryAllRecordsHandler,
    QueryRecordHandler, QueryRecordsByRangeHandler, Request, Response, TransferOwnerHandler,
};
use crate::error::CoreResult;
use crate::ops::VehicleRegistry;
use motoledger_storage::LedgerStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// The invocable record contract.
///
/// A `Contract` is constructed explicitly around an injected store; there
/// is no process-wide instance. Each [`Contract::invoke`] runs one operation
/// to completion.
///
/// # Example
///
/// ```rust
/// use motoledger_core::{Contract, ContractConfig};
/// use motoledger_storage::InMemoryStore;
/// use std::sync::Arc;
///
/// let contract = Contract::new(Arc::new(InMemoryStore::new()), ContractConfig::default());
/// contract.invoke("initLedger", &[]).unwrap();
///
/// let response = contract.invoke("queryRecord", &["Record0".to_string()]).unwrap();
/// assert!(response.payload().is_some());
/// ```
pub struct Contract<S: LedgerStore + ?Sized> {
    registry: VehicleRegistry<S>,
}

impl<S: LedgerStore + ?Sized> Contract<S> {
    /// Creates a contract over the given store.
    pub fn new(store: Arc<S>, config: ContractConfig) -> Self {
        Self {
            registry: VehicleRegistry::new(RecordStore::new(store), config),
        }
    }

    /// Returns the registry backing this contract.
    pub fn registry(&self) -> &VehicleRegistry<S> {
        &self.registry
    }

    /// Invokes an operation by wire name with positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::UnknownOperation`] for an unregistered
    /// name, [`crate::CoreError::Validation`] for malformed arguments, or
    /// whatever the operation itself fails with.
    pub fn invoke(&self, name: &str, args: &[String]) -> CoreResult<Response> {
        let request = name
            .parse::<Operation>()
            .and_then(|operation| Request::parse(operation, args));

        match request {
            Ok(request) => self.execute(request),
            Err(e) => {
                warn!(operation = name, error = %e, "rejected invocation");
                Err(e)
            }
        }
    }

    /// Executes an already-parsed request.
    ///
    /// # Errors
    ///
    /// Returns whatever the operation fails with.
    pub fn execute(&self, request: Request) -> CoreResult<Response> {
        let operation = request.operation();
        debug!(%operation, "dispatching");

        let registry = &self.registry;
        let result = match request {
            Request::QueryRecord(r) => QueryRecordHandler.handle(registry, r),
            Request::InitLedger(r) => InitLedgerHandler.handle(registry, r),
            Request::CreateRecord(r) => CreateRecordHandler.handle(registry, r),
            Request::QueryAllRecords(r) => QueryAllRecordsHandler.handle(registry, r),
            Request::TransferOwner(r) => TransferOwnerHandler.handle(registry, r),
            Request::QueryRecordsByRange(r) => QueryRecordsByRangeHandler.handle(registry, r),
        };

        if let Err(e) = &result {
            warn!(%operation, error = %e, "operation failed");
        }
        result
    }
}
