//! Operation dispatch.
//!
//! Invocations arrive as an operation name plus a positional string argument
//! list. The name is resolved to an [`Operation`], the arguments are parsed
//! into that operation's typed request, and the request is routed to its
//! [`Handler`]. Unknown names and malformed arguments are rejected before
//! any store access.

mod handler;
mod request;

pub use handler::{
    CreateRecordHandler, Handler, InitLedgerHandler, QueryAllRecordsHandler, QueryRecordHandler,
    QueryRecordsByRangeHandler, TransferOwnerHandler,
};
pub use request::{
    CreateRecordRequest, FromArgs, InitLedgerRequest, QueryAllRecordsRequest, QueryRecordRequest,
    RangeRequest, Request, TransferOwnerRequest,
};

use crate::error::CoreError;
use std::fmt;
use std::str::FromStr;

/// An invocable operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Fetch one record's raw bytes.
    QueryRecord,
    /// Seed the fixed sample records.
    InitLedger,
    /// Write a new record.
    CreateRecord,
    /// Scan the configured record range.
    QueryAllRecords,
    /// Change a record's owner.
    TransferOwner,
    /// Scan a caller-chosen key range.
    QueryRecordsByRange,
}

impl Operation {
    /// Every operation, in wire-name order of introduction.
    pub const ALL: [Operation; 6] = [
        Operation::QueryRecord,
        Operation::InitLedger,
        Operation::CreateRecord,
        Operation::QueryAllRecords,
        Operation::TransferOwner,
        Operation::QueryRecordsByRange,
    ];

    /// Returns the wire name of the operation.
    pub const fn name(&self) -> &'static str {
        match self {
            Operation::QueryRecord => "queryRecord",
            Operation::InitLedger => "initLedger",
            Operation::CreateRecord => "createRecord",
            Operation::QueryAllRecords => "queryAllRecords",
            Operation::TransferOwner => "transferOwner",
            Operation::QueryRecordsByRange => "queryRecordsByRange",
        }
    }

    /// Returns true if the operation writes to the store.
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Operation::InitLedger | Operation::CreateRecord | Operation::TransferOwner
        )
    }
}

impl FromStr for Operation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| CoreError::unknown_operation(s))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The result of a successful invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Bytes returned to the invoker, if the operation produces any.
    pub payload: Option<Vec<u8>>,
}

impl Response {
    /// A response with no payload.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A response carrying `payload`.
    pub fn with_payload(payload: Vec<u8>) -> Self {
        Self {
            payload: Some(payload),
        }
    }

    /// Returns the payload, if any.
    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    /// Consumes the response and returns its payload.
    pub fn into_payload(self) -> Option<Vec<u8>> {
        self.payload
    }
}
