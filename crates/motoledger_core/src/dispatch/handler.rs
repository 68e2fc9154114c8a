//! Per-operation handlers.

use crate::dispatch::request::{
    CreateRecordRequest, FromArgs, InitLedgerRequest, QueryAllRecordsRequest, QueryRecordRequest,
    RangeRequest, TransferOwnerRequest,
};
use crate::dispatch::Response;
use crate::error::CoreResult;
use crate::ops::VehicleRegistry;
use motoledger_storage::LedgerStore;

/// Executes one operation against a registry.
///
/// Each operation has exactly one handler, keyed by its request type.
pub trait Handler<S: LedgerStore + ?Sized> {
    /// The typed request this handler accepts.
    type Request: FromArgs;

    /// Runs the operation to completion.
    ///
    /// # Errors
    ///
    /// Returns any error the operation raises; no partial result is returned.
    fn handle(&self, registry: &VehicleRegistry<S>, request: Self::Request) -> CoreResult<Response>;
}

/// Handles `queryRecord`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryRecordHandler;

impl<S: LedgerStore + ?Sized> Handler<S> for QueryRecordHandler {
    type Request = QueryRecordRequest;

    fn handle(&self, registry: &VehicleRegistry<S>, request: Self::Request) -> CoreResult<Response> {
        registry
            .query_record(&request.key)
            .map(Response::with_payload)
    }
}

/// Handles `initLedger`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitLedgerHandler;

impl<S: LedgerStore + ?Sized> Handler<S> for InitLedgerHandler {
    type Request = InitLedgerRequest;

    fn handle(&self, registry: &VehicleRegistry<S>, _request: Self::Request) -> CoreResult<Response> {
        registry.init_ledger()?;
        Ok(Response::empty())
    }
}

/// Handles `createRecord`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateRecordHandler;

impl<S: LedgerStore + ?Sized> Handler<S> for CreateRecordHandler {
    type Request = CreateRecordRequest;

    fn handle(&self, registry: &VehicleRegistry<S>, request: Self::Request) -> CoreResult<Response> {
        registry.create_record(&request)?;
        Ok(Response::empty())
    }
}

/// Handles `queryAllRecords`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryAllRecordsHandler;

impl<S: LedgerStore + ?Sized> Handler<S> for QueryAllRecordsHandler {
    type Request = QueryAllRecordsRequest;

    fn handle(&self, registry: &VehicleRegistry<S>, _request: Self::Request) -> CoreResult<Response> {
        let entries = registry.query_all_records()?;
        Ok(Response::with_payload(serde_json::to_vec(&entries)?))
    }
}

/// Handles `transferOwner`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferOwnerHandler;

impl<S: LedgerStore + ?Sized> Handler<S> for TransferOwnerHandler {
    type Request = TransferOwnerRequest;

    fn handle(&self, registry: &VehicleRegistry<S>, request: Self::Request) -> CoreResult<Response> {
        registry.transfer_owner(&request)?;
        Ok(Response::empty())
    }
}

/// Handles `queryRecordsByRange`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryRecordsByRangeHandler;

impl<S: LedgerStore + ?Sized> Handler<S> for QueryRecordsByRangeHandler {
    type Request = RangeRequest;

    fn handle(&self, registry: &VehicleRegistry<S>, request: Self::Request) -> CoreResult<Response> {
        let entries = registry.query_records_by_range(&request.start, &request.end)?;
        Ok(Response::with_payload(serde_json::to_vec(&entries)?))
    }
}
