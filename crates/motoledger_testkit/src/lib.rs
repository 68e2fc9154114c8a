//! # MotoLedger Testkit
//!
//! Test utilities for MotoLedger.
//!
//! This crate provides:
//! - Test fixtures: ledgers over in-memory and file stores
//! - A fault-injecting store for cursor lifecycle tests
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use motoledger_testkit::prelude::*;
//!
//! let ledger = TestLedger::seeded();
//! let response = ledger.invoke("queryAllRecords", &[]).unwrap();
//! assert!(response.payload().is_some());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod faulty;
pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::faulty::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use faulty::*;
pub use fixtures::*;
pub use generators::*;
