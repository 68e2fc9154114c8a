//! Snapshot-file ledger store for the command-line tool.

use crate::backend::{LedgerStore, StoreCursor};
use crate::error::{StorageError, StorageResult};
use crate::memory::{InMemoryStore, StoreStats};
use ciborium::Value;
use fs2::FileExt;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A file-backed ledger store.
///
/// The whole key space is held in memory and persisted as a CBOR map of
/// text keys to byte-string values. Every `put` rewrites the snapshot
/// through a temporary file and an atomic rename, so the file on disk is
/// always a complete snapshot.
///
/// # Locking
///
/// A sibling `<file>.lock` is held with an exclusive advisory lock for the
/// lifetime of the store. A second open of the same path fails with
/// [`StorageError::Locked`].
///
/// # Example
///
/// ```no_run
/// use motoledger_storage::{FileStore, LedgerStore};
/// use std::path::Path;
///
/// let store = FileStore::open(Path::new("ledger.cbor")).unwrap();
/// store.put("Record0", b"{}").unwrap();
/// ```
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: InMemoryStore,
    write_lock: Mutex<()>,
    _lock_file: File,
}

impl FileStore {
    /// Opens or creates a store at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Another process holds the store ([`StorageError::Locked`])
    /// - The snapshot exists but is not a valid store snapshot
    /// - An I/O error occurs
    pub fn open(path: &Path) -> StorageResult<Self> {
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path(path))?;

        if lock_file.try_lock_exclusive().is_err() {
            return Err(StorageError::Locked);
        }

        let inner = if path.exists() {
            let entries = read_snapshot(path)?;
            debug!(path = %path.display(), keys = entries.len(), "loaded ledger snapshot");
            InMemoryStore::with_entries(entries)
        } else {
            InMemoryStore::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            inner,
            write_lock: Mutex::new(()),
            _lock_file: lock_file,
        })
    }

    /// Opens or creates a store, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the store cannot be opened.
    pub fn open_with_create_dirs(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Self::open(path)
    }

    /// Returns the path to the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the call counters.
    #[must_use]
    pub fn stats(&self) -> &StoreStats {
        self.inner.stats()
    }

    /// Writes a snapshot of the current entries with `key` set to `value`.
    fn persist_with(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let mut entries: BTreeMap<String, Vec<u8>> = self
            .inner
            .entries()
            .into_iter()
            .map(|e| (e.key, e.value))
            .collect();
        entries.insert(key.to_string(), value.to_vec());

        let map = entries
            .into_iter()
            .map(|(k, v)| (Value::Text(k), Value::Bytes(v)))
            .collect();

        let tmp = tmp_path(&self.path);
        {
            let file = File::create(&tmp)?;
            let mut writer = BufWriter::new(file);
            ciborium::ser::into_writer(&Value::Map(map), &mut writer)
                .map_err(|e| StorageError::Corrupted(format!("snapshot encode failed: {e}")))?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl LedgerStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let _guard = self.write_lock.lock();
        // The snapshot lands first so a failed write leaves memory untouched.
        self.persist_with(key, value)?;
        self.inner.put(key, value)
    }

    fn range_scan(&self, start: &str, end: &str) -> StorageResult<Box<dyn StoreCursor + '_>> {
        self.inner.range_scan(start, end)
    }
}

fn lock_path(path: &Path) -> PathBuf {
    sibling_path(path, ".lock")
}

fn tmp_path(path: &Path) -> PathBuf {
    sibling_path(path, ".tmp")
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

fn read_snapshot(path: &Path) -> StorageResult<Vec<(String, Vec<u8>)>> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(Vec::new());
    }

    let value: Value = ciborium::de::from_reader(BufReader::new(file))
        .map_err(|e| StorageError::Corrupted(format!("snapshot decode failed: {e}")))?;

    let Value::Map(pairs) = value else {
        return Err(StorageError::Corrupted("snapshot is not a map".into()));
    };

    pairs
        .into_iter()
        .map(|pair| match pair {
            (Value::Text(key), Value::Bytes(value)) => Ok((key, value)),
            _ => Err(StorageError::Corrupted(
                "snapshot entry is not a text key with a byte value".into(),
            )),
        })
        .collect()
}
