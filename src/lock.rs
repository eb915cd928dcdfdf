//! Suspension of a caller-held execution lock around blocking codec work.
//!
//! Hosts that serialize all calls behind one global lock (an interpreter
//! lock, a cooperative scheduler) implement [`ExecutionLock`]. Phases that
//! only touch codec buffers (open, read, write, raw-byte extraction) run
//! inside a [`SuspendGuard`], so other images can make progress meanwhile.
//! The guard reacquires on drop, which happens before any error value is
//! constructed by the caller-facing layer.

use std::sync::Arc;

/// A lock held by the caller for the duration of every call.
pub trait ExecutionLock: Send + Sync {
    /// Give the lock up. Called on the thread that holds it.
    fn release(&self);

    /// Take the lock back. Called on the thread that released it.
    fn reacquire(&self);
}

/// Lock for callers that hold nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLock;

impl ExecutionLock for NoLock {
    fn release(&self) {}
    fn reacquire(&self) {}
}

/// The lock used when none is configured.
pub fn no_lock() -> Arc<dyn ExecutionLock> {
    Arc::new(NoLock)
}

/// RAII guard: the lock is released for the guard's lifetime.
#[must_use = "the lock is reacquired as soon as the guard is dropped"]
pub struct SuspendGuard<'a> {
    lock: &'a dyn ExecutionLock,
}

impl<'a> SuspendGuard<'a> {
    pub fn new(lock: &'a dyn ExecutionLock) -> Self {
        lock.release();
        Self { lock }
    }
}

impl Drop for SuspendGuard<'_> {
    fn drop(&mut self) {
        self.lock.reacquire();
    }
}

/// Run `f` with the lock released, reacquiring before returning its result.
pub fn unlocked<T>(lock: &dyn ExecutionLock, f: impl FnOnce() -> T) -> T {
    let _guard = SuspendGuard::new(lock);
    f()
}
