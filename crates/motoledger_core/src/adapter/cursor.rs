//! Scoped range-scan cursor.

use crate::error::{CoreError, CoreResult};
use motoledger_storage::{StorageError, StorageResult, StoreCursor, StoreEntry};
use tracing::{debug, warn};

/// Lifecycle state of a [`ScanCursor`].
///
/// ```text
/// Open ──► HasNext ──► Exhausted ──► Closed
///   │         │  ▲          ▲
///   │         └──┘          │
///   └───────────────────────┘
/// ```
///
/// `Closed` is terminal and is reachable from every other state: on normal
/// exhaustion, on an explicit [`ScanCursor::close`], and on drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Opened; no step taken yet.
    Open,
    /// The last step produced an entry and more may follow.
    HasNext,
    /// The store reported `done`, or a step failed. No further steps are issued.
    Exhausted,
    /// The underlying cursor has been released.
    Closed,
}

impl CursorState {
    /// Returns true if another store step may be issued.
    pub fn can_advance(&self) -> bool {
        matches!(self, CursorState::Open | CursorState::HasNext)
    }
}

/// A live range scan that releases its store cursor exactly once.
///
/// The store signals entries and completion independently: a step may carry
/// the final entry *and* `done = true`. [`ScanCursor::next_entry`] folds that
/// into a plain sequence of entries followed by `None`, so the terminal
/// entry is neither dropped nor repeated.
///
/// The store cursor is closed by [`ScanCursor::close`], or on drop if the
/// guard goes out of scope first (for example when an error is propagated
/// with `?`). Close errors seen on drop are logged.
pub struct ScanCursor<'a> {
    inner: Box<dyn StoreCursor + 'a>,
    state: CursorState,
    range: (String, String),
}

impl<'a> ScanCursor<'a> {
    pub(crate) fn new(inner: Box<dyn StoreCursor + 'a>, start: &str, end: &str) -> Self {
        Self {
            inner,
            state: CursorState::Open,
            range: (start.to_string(), end.to_string()),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Returns the next entry, or `None` once the range is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Storage`] if the store step fails. The cursor
    /// then counts as exhausted; it still has to be closed.
    pub fn next_entry(&mut self) -> CoreResult<Option<StoreEntry>> {
        loop {
            match self.state {
                CursorState::Open | CursorState::HasNext => {}
                CursorState::Exhausted => return Ok(None),
                CursorState::Closed => return Err(CoreError::Storage(StorageError::Closed)),
            }

            let step = match self.inner.next() {
                Ok(step) => step,
                Err(e) => {
                    self.state = CursorState::Exhausted;
                    return Err(e.into());
                }
            };

            self.state = if step.done {
                CursorState::Exhausted
            } else {
                CursorState::HasNext
            };

            match step.entry {
                Some(entry) => return Ok(Some(entry)),
                None if step.done => {
                    debug!(start = %self.range.0, end = %self.range.1, "cursor exhausted");
                    return Ok(None);
                }
                None => continue,
            }
        }
    }

    /// Closes the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Storage`] if the store fails to release the cursor.
    pub fn close(mut self) -> CoreResult<()> {
        self.release()?;
        Ok(())
    }

    fn release(&mut self) -> StorageResult<()> {
        if self.state == CursorState::Closed {
            return Ok(());
        }
        self.state = CursorState::Closed;
        self.inner.close()
    }
}

impl Drop for ScanCursor<'_> {
    fn drop(&mut self) {
        if self.state == CursorState::Closed {
            return;
        }
        if let Err(e) = self.release() {
            warn!(
                start = %self.range.0,
                end = %self.range.1,
                error = %e,
                "failed to close range cursor"
            );
        }
    }
}

impl std::fmt::Debug for ScanCursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanCursor")
            .field("state", &self.state)
            .field("start", &self.range.0)
            .field("end", &self.range.1)
            .finish()
    }
}
