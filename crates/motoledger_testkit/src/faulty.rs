//! Fault-injecting ledger store.
//!
//! [`FaultyStore`] wraps an [`InMemoryStore`] and fails chosen calls, so
//! tests can check that cursors are released on every exit path and that
//! store errors surface unchanged.

use motoledger_storage::{
    CursorStep, InMemoryStore, LedgerStore, StorageError, StorageResult, StoreCursor,
};
use std::sync::atomic::{AtomicU64, Ordering};

/// Which calls a [`FaultyStore`] should fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaultPlan {
    /// Fail the cursor's `next()` on this zero-based step.
    pub fail_next_at: Option<usize>,
    /// Fail every cursor `close()` (after releasing the inner cursor).
    pub fail_close: bool,
    /// Fail `range_scan` itself.
    pub fail_open: bool,
    /// Fail every `get`.
    pub fail_get: bool,
    /// Fail every `put`.
    pub fail_put: bool,
    /// Insert an empty, not-done step before every real step.
    pub stutter: bool,
}

impl FaultPlan {
    /// No faults.
    pub fn none() -> Self {
        Self::default()
    }

    /// Fails `next()` on the given step.
    #[must_use]
    pub fn fail_next_at(mut self, step: usize) -> Self {
        self.fail_next_at = Some(step);
        self
    }

    /// Fails every `close()`.
    #[must_use]
    pub fn fail_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    /// Fails every `range_scan`.
    #[must_use]
    pub fn fail_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Fails every `get`.
    #[must_use]
    pub fn fail_get(mut self) -> Self {
        self.fail_get = true;
        self
    }

    /// Fails every `put`.
    #[must_use]
    pub fn fail_put(mut self) -> Self {
        self.fail_put = true;
        self
    }

    /// Interleaves empty, not-done steps.
    #[must_use]
    pub fn stutter(mut self) -> Self {
        self.stutter = true;
        self
    }
}

/// A store that injects failures according to a [`FaultPlan`].
#[derive(Debug)]
pub struct FaultyStore {
    inner: InMemoryStore,
    plan: FaultPlan,
    next_calls: AtomicU64,
    close_calls: AtomicU64,
}

impl FaultyStore {
    /// Wraps `inner` with the given plan.
    pub fn new(inner: InMemoryStore, plan: FaultPlan) -> Self {
        Self {
            inner,
            plan,
            next_calls: AtomicU64::new(0),
            close_calls: AtomicU64::new(0),
        }
    }

    /// Returns the wrapped store.
    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }

    /// Number of cursor `next()` calls, including failed ones.
    pub fn next_calls(&self) -> u64 {
        self.next_calls.load(Ordering::Relaxed)
    }

    /// Number of cursor `close()` calls, including failed ones.
    pub fn close_calls(&self) -> u64 {
        self.close_calls.load(Ordering::Relaxed)
    }
}

fn injected(what: &str) -> StorageError {
    StorageError::Unavailable(format!("injected {what} failure"))
}

impl LedgerStore for FaultyStore {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        if self.plan.fail_get {
            return Err(injected("get"));
        }
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        if self.plan.fail_put {
            return Err(injected("put"));
        }
        self.inner.put(key, value)
    }

    fn range_scan(&self, start: &str, end: &str) -> StorageResult<Box<dyn StoreCursor + '_>> {
        if self.plan.fail_open {
            return Err(injected("range_scan"));
        }
        Ok(Box::new(FaultyCursor {
            inner: self.inner.range_scan(start, end)?,
            store: self,
            step: 0,
            stuttered: false,
        }))
    }
}

struct FaultyCursor<'a> {
    inner: Box<dyn StoreCursor + 'a>,
    store: &'a FaultyStore,
    step: usize,
    stuttered: bool,
}

impl StoreCursor for FaultyCursor<'_> {
    fn next(&mut self) -> StorageResult<CursorStep> {
        self.store.next_calls.fetch_add(1, Ordering::Relaxed);

        if self.store.plan.stutter && !self.stuttered {
            self.stuttered = true;
            return Ok(CursorStep::default());
        }
        self.stuttered = false;

        let step = self.step;
        self.step += 1;
        if self.store.plan.fail_next_at == Some(step) {
            return Err(injected("next"));
        }
        self.inner.next()
    }

    fn close(&mut self) -> StorageResult<()> {
        self.store.close_calls.fetch_add(1, Ordering::Relaxed);
        self.inner.close()?;
        if self.store.plan.fail_close {
            return Err(injected("close"));
        }
        Ok(())
    }
}
