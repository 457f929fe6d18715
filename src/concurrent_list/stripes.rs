//! The stripe table of a ConcurrentList.
//!
//! The slots are split into partitions of equal size, each guarded by its own `StampedLock`: a stripe.
//!
//! Locking rules:
//!
//! -   Stripes are always locked in ascending order.
//! -   Any modification of the active count is performed while holding the exclusive lock of the stripe containing
//!     the index equal to the active count, hence holding any lock on that stripe freezes the active count.
//! -   The table itself is only replaced under the exclusive lock of the enclosing `RwLock`, which no holder of a
//!     stripe lock ever attempts to acquire.

use std::{hint, iter, mem};

use tracing::trace;

use super::atomic::AcqRelUsize;
use super::stamped::{Stamp, StampedLock, StampedWriteGuard, MAX_OPTIMISTIC_RETRIES};

type Partition<T> = Box<[Option<T>]>;

//  Stripes
//
//  Invariants:
//
//  -   Every stripe holds exactly `partition` slots.
//  -   There is always at least one stripe beyond those needed to cover the capacity, so that the index equal to the
//      capacity belongs to a stripe.
//  -   Outside of a locked section, slots `[0, active)` are `Some` and all others are `None`.
pub(crate) struct Stripes<T> {
    partition: usize,
    stripes: Vec<StampedLock<Partition<T>>>,
}

impl<T> Stripes<T> {
    //  Creates a table covering `capacity` slots, filled from `items`.
    //
    //  The items beyond the slots of the table are ignored.
    pub fn from_items<I>(items: I, capacity: usize, partition: usize) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        debug_assert!(partition > 0);

        Self { partition, stripes: Self::build(items, capacity, partition) }
    }

    //  Returns the number of stripes.
    pub fn len(&self) -> usize { self.stripes.len() }

    //  Returns the index of the stripe containing `index`, clamped to the last stripe.
    pub fn stripe_of(&self, index: usize) -> usize {
        (index / self.partition).min(self.stripes.len() - 1)
    }

    //  Replaces the table by one covering `capacity` slots, keeping the first `active` elements.
    pub fn resize(&mut self, active: usize, capacity: usize) {
        let stripes = mem::take(&mut self.stripes);
        let items = stripes.into_iter().flat_map(|stripe| stripe.into_inner().into_vec()).flatten().take(active);

        self.stripes = Self::build(items, capacity, self.partition);

        trace!(stripes = self.len(), partition = self.partition, "rebuilt stripe table");
    }

    //  Returns a copy of the element at `index`, if any.
    pub fn get(&self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        let stripe = self.stripes.get(index / self.partition)?;
        let offset = index % self.partition;

        stripe.read_with(|slots| slots[offset].clone())
    }

    //  Returns a consistent copy of the first `active` elements.
    //
    //  Attempts optimistic reads first, then falls back to shared locks of all stripes involved.
    pub fn snapshot(&self, active: &AcqRelUsize) -> Vec<T>
    where
        T: Clone,
    {
        for _ in 0..MAX_OPTIMISTIC_RETRIES {
            if let Some(items) = self.try_snapshot(active) {
                return items;
            }

            hint::spin_loop();
        }

        trace!(retries = MAX_OPTIMISTIC_RETRIES, "optimistic snapshot failed, falling back to shared locks");

        self.locked_snapshot(active)
    }

    //  Locks exclusively the stripes covering `[lo, active]`, with `lo` clamped to `active`.
    //
    //  Returns the active count, frozen for as long as the returned range is alive.
    pub fn lock_from(&self, lo: usize, active: &AcqRelUsize) -> (usize, LockedRange<'_, T>) {
        loop {
            let length = active.load();
            let first = self.stripe_of(lo.min(length));
            let last = self.stripe_of(length);

            let guards: Vec<_> = self.stripes[first..=last].iter().map(StampedLock::write).collect();

            if active.load() == length {
                return (length, LockedRange { partition: self.partition, first, guards });
            }

            drop(guards);
            hint::spin_loop();
        }
    }

    fn build<I>(items: I, capacity: usize, partition: usize) -> Vec<StampedLock<Partition<T>>>
    where
        I: IntoIterator<Item = T>,
    {
        let count = capacity.div_ceil(partition) + 1;
        let mut items = items.into_iter().fuse();

        (0..count)
            .map(|_| {
                let slots: Partition<T> = iter::repeat_with(|| items.next()).take(partition).collect();
                StampedLock::new(slots)
            })
            .collect()
    }

    fn try_snapshot(&self, active: &AcqRelUsize) -> Option<Vec<T>>
    where
        T: Clone,
    {
        let length = active.load();
        let stripes = &self.stripes[..=self.stripe_of(length)];

        let stamps: Vec<Stamp> = stripes.iter().map(StampedLock::try_optimistic_read).collect::<Option<_>>()?;

        let mut items = Vec::with_capacity(length);

        for (stripe, stamp) in stripes.iter().zip(stamps.iter().copied()) {
            let remaining = length - items.len();

            stripe.read_optimistic(stamp, |slots| items.extend(slots.iter().take(remaining).flatten().cloned()))?;
        }

        //  Each stripe was consistent on its own, they must also have been consistent with one another.
        let unmoved = stripes.iter().zip(stamps.iter().copied()).all(|(stripe, stamp)| stripe.validate(stamp));

        (unmoved && items.len() == length && active.load() == length).then_some(items)
    }

    fn locked_snapshot(&self, active: &AcqRelUsize) -> Vec<T>
    where
        T: Clone,
    {
        loop {
            let length = active.load();
            let guards: Vec<_> = self.stripes[..=self.stripe_of(length)].iter().map(StampedLock::read).collect();

            if active.load() == length {
                return guards.iter().flat_map(|slots| slots.iter()).take(length).flatten().cloned().collect();
            }

            drop(guards);
            hint::spin_loop();
        }
    }
}

//  Exclusive access to a range of consecutive stripes.
//
//  Indices are absolute, and must belong to one of the locked stripes.
pub(crate) struct LockedRange<'a, T> {
    partition: usize,
    first: usize,
    guards: Vec<StampedWriteGuard<'a, Partition<T>>>,
}

impl<'a, T> LockedRange<'a, T> {
    //  Stores `item` at `index`, shifting `[index, active)` one slot to the right.
    //
    //  The slot at `active` must be locked, and free.
    pub fn insert(&mut self, index: usize, active: usize, item: T) {
        debug_assert!(index <= active);

        for i in (index..active).rev() {
            let moved = self.take(i);
            *self.slot(i + 1) = moved;
        }

        *self.slot(index) = Some(item);
    }

    //  Removes the element at `index`, shifting `(index, active)` one slot to the left.
    pub fn remove(&mut self, index: usize, active: usize) -> Option<T> {
        debug_assert!(index < active);

        let removed = self.take(index);

        for i in (index + 1)..active {
            let moved = self.take(i);
            *self.slot(i - 1) = moved;
        }

        removed
    }

    //  Keeps the elements of `[0, active)` satisfying `keep`, packed at the front, and drops the others.
    //
    //  Returns the number of elements kept, and whether any of them moved. The range must start at the first stripe.
    pub fn retain<F>(&mut self, active: usize, mut keep: F) -> (usize, bool)
    where
        F: FnMut(&T) -> bool,
    {
        debug_assert_eq!(0, self.first);

        //  `keep` may panic: it is evaluated on every element before any slot is touched.
        let decisions: Vec<bool> = (0..active).map(|i| self.slot(i).as_ref().is_some_and(&mut keep)).collect();

        let mut kept = 0;
        let mut moved = false;

        for (i, decision) in decisions.into_iter().enumerate() {
            let item = self.take(i);

            if decision {
                moved |= kept != i;
                *self.slot(kept) = item;
                kept += 1;
            }
        }

        (kept, moved)
    }

    //  Reverses the order of `[0, active)`. The range must start at the first stripe.
    pub fn reverse(&mut self, active: usize) {
        debug_assert_eq!(0, self.first);

        for i in 0..(active / 2) {
            let j = active - 1 - i;

            let (left, right) = (self.take(i), self.take(j));
            *self.slot(i) = right;
            *self.slot(j) = left;
        }
    }

    fn take(&mut self, index: usize) -> Option<T> { self.slot(index).take() }

    fn slot(&mut self, index: usize) -> &mut Option<T> {
        let stripe = index / self.partition - self.first;

        &mut self.guards[stripe][index % self.partition]
    }
}
