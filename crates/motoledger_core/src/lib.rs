//! # MotoLedger Core
//!
//! Vehicle records over an ordered key-value ledger.
//!
//! This crate provides:
//! - The [`VehicleRecord`] model and the [`RecordCodec`] trait
//! - [`RecordStore`], a thin adapter over an injected [`LedgerStore`]
//! - [`RecordEnumerator`], which drives range scans to completion and keeps
//!   undecodable values as raw fallbacks
//! - [`VehicleRegistry`] operations: query, create, transfer, seed, scan
//! - [`Contract`], which routes named invocations to typed handlers
//!
//! The ledger itself is external; see `motoledger_storage` for the contract
//! it has to meet.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod adapter;
mod config;
mod contract;
pub mod dispatch;
mod enumerate;
mod error;
mod ops;
pub mod record;
mod seed;

pub use adapter::{CursorState, RecordStore, ScanCursor};
pub use config::ContractConfig;
pub use contract::Contract;
pub use dispatch::{Operation, Request, Response};
pub use enumerate::{RecordEnumerator, ScanEntry, ScanSummary, ScanValue};
pub use error::{CoreError, CoreResult};
pub use motoledger_storage::LedgerStore;
pub use ops::VehicleRegistry;
pub use record::{DecodeError, RecordCodec, VehicleRecord, RECORD_DOC_TYPE};
pub use seed::{sample_records, SAMPLE_RECORD_COUNT};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
