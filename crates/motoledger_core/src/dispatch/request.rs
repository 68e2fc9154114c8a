//! Typed requests parsed from positional arguments.

use crate::dispatch::Operation;
use crate::error::{CoreError, CoreResult};
use crate::record::VehicleRecord;

/// A request that can be parsed from a positional argument list.
pub trait FromArgs: Sized {
    /// The operation this request belongs to.
    const OPERATION: Operation;

    /// Parses the request, checking the argument count exactly.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the arguments have the wrong
    /// count or a required key is empty.
    fn from_args(args: &[String]) -> CoreResult<Self>;
}

fn take<const N: usize>(operation: Operation, args: &[String]) -> CoreResult<[String; N]> {
    <[String; N]>::try_from(args.to_vec())
        .map_err(|args| CoreError::argument_count(operation.name(), N, args.len()))
}

fn require_key(operation: Operation, key: &str) -> CoreResult<()> {
    if key.is_empty() {
        return Err(CoreError::validation(format!(
            "{operation}: key must not be empty"
        )));
    }
    Ok(())
}

/// `queryRecord [key]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecordRequest {
    /// Key to read.
    pub key: String,
}

impl FromArgs for QueryRecordRequest {
    const OPERATION: Operation = Operation::QueryRecord;

    fn from_args(args: &[String]) -> CoreResult<Self> {
        let [key] = take::<1>(Self::OPERATION, args)?;
        require_key(Self::OPERATION, &key)?;
        Ok(Self { key })
    }
}

/// `initLedger []`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitLedgerRequest;

impl FromArgs for InitLedgerRequest {
    const OPERATION: Operation = Operation::InitLedger;

    fn from_args(args: &[String]) -> CoreResult<Self> {
        let [] = take::<0>(Self::OPERATION, args)?;
        Ok(Self)
    }
}

/// `createRecord [key, make, model, color, vin, engineCC, owner]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRecordRequest {
    /// Key to write.
    pub key: String,
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Paint color.
    pub color: String,
    /// Vehicle identification number.
    pub vin: String,
    /// Engine displacement.
    pub engine_cc: String,
    /// Initial owner.
    pub owner: String,
}

impl CreateRecordRequest {
    /// Builds the tagged record this request describes.
    pub fn to_record(&self) -> VehicleRecord {
        VehicleRecord::new(
            self.make.as_str(),
            self.model.as_str(),
            self.color.as_str(),
            self.vin.as_str(),
            self.engine_cc.as_str(),
            self.owner.as_str(),
        )
    }
}

impl FromArgs for CreateRecordRequest {
    const OPERATION: Operation = Operation::CreateRecord;

    fn from_args(args: &[String]) -> CoreResult<Self> {
        let [key, make, model, color, vin, engine_cc, owner] = take::<7>(Self::OPERATION, args)?;
        require_key(Self::OPERATION, &key)?;
        Ok(Self {
            key,
            make,
            model,
            color,
            vin,
            engine_cc,
            owner,
        })
    }
}

/// `queryAllRecords []`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryAllRecordsRequest;

impl FromArgs for QueryAllRecordsRequest {
    const OPERATION: Operation = Operation::QueryAllRecords;

    fn from_args(args: &[String]) -> CoreResult<Self> {
        let [] = take::<0>(Self::OPERATION, args)?;
        Ok(Self)
    }
}

/// `transferOwner [key, newOwner]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOwnerRequest {
    /// Key of the record to update.
    pub key: String,
    /// Owner to set.
    pub new_owner: String,
}

impl FromArgs for TransferOwnerRequest {
    const OPERATION: Operation = Operation::TransferOwner;

    fn from_args(args: &[String]) -> CoreResult<Self> {
        let [key, new_owner] = take::<2>(Self::OPERATION, args)?;
        require_key(Self::OPERATION, &key)?;
        Ok(Self { key, new_owner })
    }
}

/// `queryRecordsByRange [startKey, endKey]`
///
/// The range is half-open. An empty or inverted range is valid and
/// yields no entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRequest {
    /// Inclusive lower bound.
    pub start: String,
    /// Exclusive upper bound.
    pub end: String,
}

impl FromArgs for RangeRequest {
    const OPERATION: Operation = Operation::QueryRecordsByRange;

    fn from_args(args: &[String]) -> CoreResult<Self> {
        let [start, end] = take::<2>(Self::OPERATION, args)?;
        Ok(Self { start, end })
    }
}

/// A parsed request for any operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// See [`QueryRecordRequest`].
    QueryRecord(QueryRecordRequest),
    /// See [`InitLedgerRequest`].
    InitLedger(InitLedgerRequest),
    /// See [`CreateRecordRequest`].
    CreateRecord(CreateRecordRequest),
    /// See [`QueryAllRecordsRequest`].
    QueryAllRecords(QueryAllRecordsRequest),
    /// See [`TransferOwnerRequest`].
    TransferOwner(TransferOwnerRequest),
    /// See [`RangeRequest`].
    QueryRecordsByRange(RangeRequest),
}

impl Request {
    /// Parses the arguments for `operation`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the arguments don't fit the operation.
    pub fn parse(operation: Operation, args: &[String]) -> CoreResult<Self> {
        Ok(match operation {
            Operation::QueryRecord => Request::QueryRecord(FromArgs::from_args(args)?),
            Operation::InitLedger => Request::InitLedger(FromArgs::from_args(args)?),
            Operation::CreateRecord => Request::CreateRecord(FromArgs::from_args(args)?),
            Operation::QueryAllRecords => Request::QueryAllRecords(FromArgs::from_args(args)?),
            Operation::TransferOwner => Request::TransferOwner(FromArgs::from_args(args)?),
            Operation::QueryRecordsByRange => {
                Request::QueryRecordsByRange(FromArgs::from_args(args)?)
            }
        })
    }

    /// Returns the operation this request belongs to.
    pub fn operation(&self) -> Operation {
        match self {
            Request::QueryRecord(_) => Operation::QueryRecord,
            Request::InitLedger(_) => Operation::InitLedger,
            Request::CreateRecord(_) => Operation::CreateRecord,
            Request::QueryAllRecords(_) => Operation::QueryAllRecords,
            Request::TransferOwner(_) => Operation::TransferOwner,
            Request::QueryRecordsByRange(_) => Operation::QueryRecordsByRange,
        }
    }
}
