//! Record model.
//!
//! Provides the [`RecordCodec`] trait for values stored in the ledger and
//! the [`VehicleRecord`] that MotoLedger tracks.

mod codec;
mod vehicle;

pub use codec::{DecodeError, RecordCodec};
pub use vehicle::{replace_owner, VehicleRecord, RECORD_DOC_TYPE};
