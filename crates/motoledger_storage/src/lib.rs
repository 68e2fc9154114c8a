//! # MotoLedger Storage
//!
//! The ordered key-value store contract that MotoLedger runs against,
//! plus reference implementations of it.
//!
//! The ledger itself is an external collaborator. This crate only pins down
//! the three primitives MotoLedger needs from it:
//!
//! - point reads (`get`)
//! - unconditional upserts (`put`)
//! - forward range scans over `[start, end)` through a [`StoreCursor`]
//!
//! Stores are **opaque byte stores** - they do not interpret the values they
//! hold. Record encoding belongs to `motoledger_core`.
//!
//! ## Available Stores
//!
//! - [`InMemoryStore`] - For testing and ephemeral ledgers
//! - [`FileStore`] - A snapshot-file store for the command-line tool
//!
//! ## Example
//!
//! ```rust
//! use motoledger_storage::{InMemoryStore, LedgerStore};
//!
//! let store = InMemoryStore::new();
//! store.put("Record0", b"{}").unwrap();
//!
//! let mut cursor = store.range_scan("Record0", "Record9").unwrap();
//! let step = cursor.next().unwrap();
//! assert_eq!(step.entry.unwrap().key, "Record0");
//! assert!(step.done);
//! cursor.close().unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::{CursorStep, LedgerStore, StoreCursor, StoreEntry};
pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::{CursorMode, InMemoryStore, StoreStats};
