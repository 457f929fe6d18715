//! A read/write lock supporting optimistic, stamped, reads.
//!
//! Each lock carries a version, incremented when a writer acquires the lock and again when it releases it: an odd
//! version means a writer holds the lock.
//!
//! An optimistic reader takes a `Stamp` (the current, even, version), copies what it needs without ever blocking,
//! then validates that the version did not move in the meantime. If it did, the copy may mix states from before and
//! after a write, and must be discarded.
//!
//! The copy itself is performed under a non-blocking shared acquisition of the lock, so that readers never observe
//! a write in progress; the stamp validation extends the guarantee across several locks, or across two separate
//! reads of the same lock.

use std::{hint, ops};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;

use super::atomic::AcqRelU64;

/// Number of optimistic attempts performed by `read_with` before falling back to a blocking read.
pub const MAX_OPTIMISTIC_RETRIES: usize = 8;

//  Version of a StampedLock, as observed by an optimistic reader.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Stamp(u64);

//  StampedLock
pub struct StampedLock<T> {
    //  Even: no writer. Odd: a writer holds the lock.
    version: AcqRelU64,
    data: RwLock<T>,
}

impl<T> StampedLock<T> {
    //  Creates a new, unlocked, instance.
    pub fn new(value: T) -> Self {
        Self { version: AcqRelU64::new(0), data: RwLock::new(value) }
    }

    //  Returns a stamp, unless a writer currently holds the lock.
    pub fn try_optimistic_read(&self) -> Option<Stamp> {
        let version = self.version.load();
        (version % 2 == 0).then_some(Stamp(version))
    }

    //  Returns whether no writer acquired the lock since `stamp` was taken.
    pub fn validate(&self, stamp: Stamp) -> bool {
        self.version.load() == stamp.0
    }

    //  Applies `f` to the data without blocking.
    //
    //  Returns `None` if the lock is held by a writer, or if the stamp is no longer valid after `f` completed.
    pub fn read_optimistic<R, F>(&self, stamp: Stamp, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        let guard = self.data.try_read()?;
        let result = f(&guard);
        drop(guard);

        self.validate(stamp).then_some(result)
    }

    //  Applies `f` to the data, optimistically first, then under a blocking shared lock.
    pub fn read_with<R, F>(&self, f: F) -> R
    where
        F: Fn(&T) -> R,
    {
        for _ in 0..MAX_OPTIMISTIC_RETRIES {
            if let Some(result) = self.try_optimistic_read().and_then(|stamp| self.read_optimistic(stamp, &f)) {
                return result;
            }

            hint::spin_loop();
        }

        trace!(retries = MAX_OPTIMISTIC_RETRIES, "optimistic read failed, falling back to shared lock");

        f(&self.read())
    }

    //  Acquires the lock for shared reading, blocking.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.data.read()
    }

    //  Acquires the lock exclusively, blocking.
    //
    //  The lock is released when the guard is dropped, whichever way.
    pub fn write(&self) -> StampedWriteGuard<'_, T> {
        let guard = self.data.write();
        self.version.bump();

        StampedWriteGuard { version: &self.version, guard }
    }

    //  Consumes the lock, returning the data.
    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

//  Exclusive guard of a StampedLock.
pub struct StampedWriteGuard<'a, T> {
    version: &'a AcqRelU64,
    guard: RwLockWriteGuard<'a, T>,
}

impl<'a, T> ops::Deref for StampedWriteGuard<'a, T> {
    type Target = T;

    fn deref(&self) -> &T { &self.guard }
}

impl<'a, T> ops::DerefMut for StampedWriteGuard<'a, T> {
    fn deref_mut(&mut self) -> &mut T { &mut self.guard }
}

impl<'a, T> Drop for StampedWriteGuard<'a, T> {
    fn drop(&mut self) {
        //  Back to even; the inner guard is released right after.
        self.version.bump();
    }
}
