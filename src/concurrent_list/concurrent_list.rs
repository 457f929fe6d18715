//! The ConcurrentList.

use std::{fmt, iter};

use parking_lot::RwLock;
use tracing::debug;

use super::atomic::{AcqRelU64, AcqRelUsize};
use super::capacity::{self, CapacityPolicy, DEFAULT_CAPACITY};
use super::failure::{panic_from_failure, Failure, Result};
use super::iterator::ConcurrentIter;
use super::list::{Nature, RandomAccessList};
use super::partition::PartitionSize;
use super::slots::{self, Slots};
use super::stripes::Stripes;

/// `ConcurrentList`
///
/// A growable list which may be shared, and modified, across threads.
pub struct ConcurrentList<T> {
    policy: CapacityPolicy,
    //  Capacity below which the list does not shrink.
    floor: usize,
    partition: PartitionSize,
    //  Only modified under the lock of the stripe containing its value.
    active: AcqRelUsize,
    //  Only modified under the exclusive lock of `table`.
    capacity: AcqRelUsize,
    generation: AcqRelU64,
    table: RwLock<Stripes<T>>,
}

impl<T> ConcurrentList<T> {
    /// Creates a new, empty, instance with the default capacity of 16.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::ConcurrentList;
    /// let list: ConcurrentList<i32> = ConcurrentList::new();
    ///
    /// assert!(list.is_empty());
    /// assert_eq!(16, list.max_capacity());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a new, empty, instance with `capacity` slots.
    ///
    /// A capacity of 0 is rounded up to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(capacity, CapacityPolicy::default(), PartitionSize::default())
    }

    /// Creates a new, empty, instance with `capacity` slots, resized according to `policy`.
    pub fn with_policy(capacity: usize, policy: CapacityPolicy) -> Self {
        Self::with_config(capacity, policy, PartitionSize::default())
    }

    /// Creates a new, empty, instance with `capacity` slots, locked by partitions of `partition` slots.
    pub fn with_partition(capacity: usize, partition: PartitionSize) -> Self {
        Self::with_config(capacity, CapacityPolicy::default(), partition)
    }

    /// Creates a new, empty, instance with `capacity` slots, resized according to `policy`, and locked by partitions
    /// of `partition` slots.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::ConcurrentList;
    /// #   use golden_list::capacity::CapacityPolicy;
    /// #   use golden_list::concurrent_list::PartitionSize;
    /// let list = ConcurrentList::with_config(4, CapacityPolicy::default(), PartitionSize::Custom(2));
    ///
    /// list.add_all(0..4).unwrap();
    ///
    /// assert_eq!(6, list.max_capacity());
    /// assert_eq!(PartitionSize::Custom(2), list.partition());
    /// ```
    pub fn with_config(capacity: usize, policy: CapacityPolicy, partition: PartitionSize) -> Self {
        Self::from_parts(iter::empty(), 0, capacity, policy, partition)
    }

    /// Creates a new instance with `capacity` slots, holding a copy of the elements of `other`.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::Overflow` if `capacity` is less than the number of elements of `other`.
    pub fn from_list(other: &Self, capacity: usize) -> Result<Self>
    where
        T: Clone,
    {
        let items = other.snapshot();

        if items.len() > capacity {
            return Err(Failure::Overflow);
        }

        let active = items.len();

        Ok(Self::from_parts(items, active, capacity, other.policy, other.partition))
    }

    /// Creates a new instance holding a copy of `items`.
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        items.iter().cloned().collect()
    }

    /// Creates a new instance from a sequence of possibly absent values.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::NullItem` if any value is absent.
    pub fn from_slots<I>(slots: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<T>>,
    {
        let result = Self::new();

        for slot in slots {
            result.try_add(slot.ok_or(Failure::NullItem)?)?;
        }

        Ok(result)
    }

    /// Returns the capacity policy.
    pub fn policy(&self) -> &CapacityPolicy { &self.policy }

    /// Returns the partition size.
    pub fn partition(&self) -> PartitionSize { self.partition }

    /// Returns the number of elements, at the time of the call.
    pub fn active_size(&self) -> usize { self.active.load() }

    /// Returns the number of slots, at the time of the call.
    pub fn max_capacity(&self) -> usize { self.capacity.load() }

    /// Returns whether the list contains no element, at the time of the call.
    pub fn is_empty(&self) -> bool { self.active_size() == 0 }

    /// Returns the generation, incremented on every structural modification.
    pub fn generation(&self) -> u64 { self.generation.load() }

    /// Returns a copy of the element at `index`.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::OutOfBounds` if `index` is not less than `active_size()`.
    pub fn get(&self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        self.table.read().get(index).ok_or(Failure::OutOfBounds)
    }

    /// Returns an iterator over a snapshot of the elements.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::ConcurrentList;
    /// let list = ConcurrentList::from_slice(&[1, 2, 3]);
    ///
    /// let iter = list.iter();
    /// list.add(4);
    ///
    /// assert_eq!(vec![1, 2, 3], iter.collect::<Vec<_>>());
    /// ```
    pub fn iter(&self) -> ConcurrentIter<T>
    where
        T: Clone,
    {
        ConcurrentIter::new(self.snapshot())
    }

    /// Appends an element.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::Overflow` if the capacity cannot be increased any further.
    pub fn try_add(&self, item: T) -> Result<()> {
        self.try_insert_at(None, item)
    }

    /// Appends an element.
    ///
    /// #   Panics
    ///
    /// Panics if the capacity cannot be increased any further.
    pub fn add(&self, item: T) {
        self.try_add(item).unwrap_or_else(panic_from_failure);
    }

    /// Inserts an element at `index`, shifting all subsequent elements to the right.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::OutOfBounds` if `index` is greater than `active_size()`.
    pub fn try_insert(&self, index: usize, item: T) -> Result<()> {
        self.try_insert_at(Some(index), item)
    }

    /// Inserts an element at `index`.
    ///
    /// #   Panics
    ///
    /// Panics if `index` is greater than `active_size()`.
    pub fn insert(&self, index: usize, item: T) {
        self.try_insert(index, item).unwrap_or_else(panic_from_failure);
    }

    /// Appends all elements of `items`, in order.
    ///
    /// The elements are appended one at a time, and may be interleaved with those appended by other threads.
    pub fn add_all<I>(&self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        items.into_iter().try_for_each(|item| self.try_add(item))
    }

    /// Removes all occurrences of `item`, returns whether any was found.
    pub fn remove(&self, item: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        let removed = {
            let table = self.table.read();
            let (active, mut range) = table.lock_from(0, &self.active);

            let (kept, _) = range.retain(active, |e| e != item);

            if kept != active {
                self.active.store(kept);
                self.generation.bump();
            }

            active - kept
        };

        self.check_shrink();

        Ok(removed > 0)
    }

    /// Removes the element at `index`, shifting all subsequent elements to the left.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::OutOfBounds` if `index` is not less than `active_size()`.
    pub fn remove_at(&self, index: usize) -> Result<bool> {
        let removed = {
            let table = self.table.read();
            let (active, mut range) = table.lock_from(index, &self.active);

            if index >= active {
                return Err(Failure::OutOfBounds);
            }

            let removed = range.remove(index, active);

            self.active.store(active - 1);
            self.generation.bump();

            removed
        };

        debug_assert!(removed.is_some());

        self.check_shrink();

        Ok(removed.is_some())
    }

    /// Returns whether `item` is contained in the list.
    pub fn contains(&self, item: &T) -> bool
    where
        T: Clone + PartialEq,
    {
        self.snapshot().contains(item)
    }

    /// Returns the index of the first occurrence of `item`, if any.
    pub fn first_index_of(&self, item: &T) -> Option<usize>
    where
        T: Clone + PartialEq,
    {
        self.snapshot().iter().position(|e| e == item)
    }

    /// Returns the index of the last occurrence of `item`, if any.
    pub fn last_index_of(&self, item: &T) -> Option<usize>
    where
        T: Clone + PartialEq,
    {
        self.snapshot().iter().rposition(|e| e == item)
    }

    /// Returns a consistent copy of all the elements.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::Underflow` if the list is empty.
    pub fn to_array(&self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        let items = self.snapshot();

        if items.is_empty() {
            return Err(Failure::Underflow);
        }

        Ok(items)
    }

    /// Returns a consistent copy of the elements from `start` onwards.
    pub fn to_array_from(&self, start: usize) -> Result<Vec<T>>
    where
        T: Clone,
    {
        let items = self.snapshot();
        let end = items.len();

        Self::slice_of(items, start, end)
    }

    /// Returns a consistent copy of the elements within `[start, end)`.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::Underflow` if the list, or the range, is empty, and `Failure::OutOfBounds` if the range is
    /// not within `[0, active_size())`.
    pub fn to_array_range(&self, start: usize, end: usize) -> Result<Vec<T>>
    where
        T: Clone,
    {
        Self::slice_of(self.snapshot(), start, end)
    }

    /// Reverses the order of the elements, in place.
    pub fn reverse(&self) -> Result<()> {
        let table = self.table.read();
        let (active, mut range) = table.lock_from(0, &self.active);

        range.reverse(active);
        self.generation.bump();

        Ok(())
    }

    /// Removes all elements, returns `false` if the list was already empty.
    ///
    /// The capacity is then shrunk as far as the capacity policy allows.
    pub fn remove_all(&self) -> Result<bool> {
        let mut table = self.table.write();

        let active = self.active.load();

        if active == 0 {
            return Ok(false);
        }

        let from = self.capacity.load();
        let mut to = from;

        while let Some(target) = self.policy.shrink_target(0, to, self.floor) {
            to = target;
        }

        debug!(from, to, active, "clearing ConcurrentList");

        table.resize(0, to);

        self.active.store(0);
        self.capacity.store(to);
        self.generation.bump();

        Ok(true)
    }

    /// Removes all elements.
    pub fn clear(&self) -> Result<()> {
        self.remove_all().map(|_| ())
    }

    /// Moves all elements to the front of the storage.
    ///
    /// The elements of a `ConcurrentList` are kept compact after each operation, so this is generally a no-op.
    pub fn compress(&self) -> Result<()> {
        let table = self.table.read();
        let (active, mut range) = table.lock_from(0, &self.active);

        let (kept, moved) = range.retain(active, |_| true);
        debug_assert_eq!(active, kept);

        if moved {
            self.generation.bump();
        }

        Ok(())
    }

    /// Grows the capacity by one step of the capacity policy.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::Overflow` if the capacity cannot be increased any further.
    pub fn grow(&self) -> Result<()> {
        self.force_grow(self.capacity.load())
    }

    /// Shrinks the capacity by one step of the capacity policy, if the policy allows a smaller capacity.
    pub fn shrink(&self) -> Result<()> {
        let capacity = self.capacity.load();

        if let Some(target) = self.policy.shrink_target(self.active.load(), capacity, self.floor) {
            self.resize_from(capacity, target);
        }

        Ok(())
    }

    /// Compares snapshots of both lists, in order.
    pub fn equals(&self, other: &Self) -> Result<bool>
    where
        T: Clone + PartialEq,
    {
        self.snapshot_slots().equals(&other.snapshot_slots())
    }

    /// Compares snapshots of both lists within `[start, end)`, in order.
    pub fn equals_range(&self, other: &Self, start: usize, end: usize) -> Result<bool>
    where
        T: Clone + PartialEq,
    {
        self.snapshot_slots().equals_range(&other.snapshot_slots(), start, end)
    }

    /// Returns whether snapshots of both lists have the same size, and this list contains every element of `other`.
    pub fn equivalence(&self, other: &Self) -> Result<bool>
    where
        T: Clone + PartialEq,
    {
        self.snapshot_slots().equivalence(&other.snapshot_slots())
    }

    /// Creates a new list made of the elements of `other`, followed by those of `self`.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::ConcurrentList;
    /// let one = ConcurrentList::from_slice(&[1, 2]);
    /// let two = ConcurrentList::from_slice(&[3, 4]);
    ///
    /// let merged = one.merge(&two).unwrap();
    ///
    /// assert_eq!(vec![3, 4, 1, 2], merged.to_array().unwrap());
    /// assert_eq!(32, merged.max_capacity());
    /// ```
    pub fn merge(&self, other: &Self) -> Result<Self>
    where
        T: Clone,
    {
        let other = other.snapshot_slots();
        let end = other.len();

        self.merge_slots(&other, 0, end)
    }

    /// Creates a new list made of the elements of `other` from `start` onwards, followed by those of `self`.
    pub fn merge_from(&self, other: &Self, start: usize) -> Result<Self>
    where
        T: Clone,
    {
        let other = other.snapshot_slots();
        let end = other.len();

        self.merge_slots(&other, start, end)
    }

    /// Creates a new list made of the elements of `other` within `[start, end)`, followed by those of `self`.
    ///
    /// The capacity of the new list is the sum of both capacities, minus `start`.
    pub fn merge_range(&self, other: &Self, start: usize, end: usize) -> Result<Self>
    where
        T: Clone,
    {
        self.merge_slots(&other.snapshot_slots(), start, end)
    }

    //  Creates a list holding `items`, with `active` their number.
    fn from_parts<I>(items: I, active: usize, capacity: usize, policy: CapacityPolicy, partition: PartitionSize) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let capacity = capacity.max(active).max(1);
        let table = Stripes::from_items(items, capacity, partition.slots());

        Self {
            policy,
            floor: capacity::shrink_floor(capacity),
            partition,
            active: AcqRelUsize::new(active),
            capacity: AcqRelUsize::new(capacity),
            generation: AcqRelU64::new(0),
            table: RwLock::new(table),
        }
    }

    //  Inserts `item` at `index`, or at the end if `None`.
    //
    //  The list is grown first if full, after releasing all locks.
    fn try_insert_at(&self, index: Option<usize>, item: T) -> Result<()> {
        loop {
            let capacity = {
                let table = self.table.read();
                let capacity = self.capacity.load();

                let (active, mut range) = table.lock_from(index.unwrap_or(usize::MAX), &self.active);
                let index = index.unwrap_or(active);

                if index > active {
                    return Err(Failure::OutOfBounds);
                }

                if active < capacity {
                    range.insert(index, active, item);

                    self.active.store(active + 1);
                    self.generation.bump();

                    drop(range);
                    drop(table);

                    self.check_grow();

                    return Ok(());
                }

                capacity
            };

            self.force_grow(capacity)?;
        }
    }

    //  Returns a consistent copy of the elements.
    fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.table.read().snapshot(&self.active)
    }

    //  Returns a consistent copy of the elements, along with the capacity at the time.
    fn snapshot_slots(&self) -> Slots<T>
    where
        T: Clone,
    {
        let table = self.table.read();
        let items = table.snapshot(&self.active);

        Slots::from_vec(items, self.capacity.load())
    }

    fn slice_of(mut items: Vec<T>, start: usize, end: usize) -> Result<Vec<T>> {
        if items.is_empty() {
            return Err(Failure::Underflow);
        }

        slots::check_range(start, end, items.len())?;

        items.truncate(end);
        items.drain(..start);

        Ok(items)
    }

    fn merge_slots(&self, other: &Slots<T>, start: usize, end: usize) -> Result<Self>
    where
        T: Clone,
    {
        let merged = self.snapshot_slots().merged(other, start, end)?;

        let (active, capacity) = (merged.len(), merged.capacity());
        let result = Self::from_parts(merged.into_items(), active, capacity, self.policy, self.partition);

        result.check_grow();

        Ok(result)
    }

    //  Grows as long as the policy requires.
    fn check_grow(&self) {
        loop {
            let capacity = self.capacity.load();

            if !self.policy.should_grow(self.active.load(), capacity) {
                return;
            }

            if self.force_grow(capacity).is_err() {
                return;
            }
        }
    }

    //  Shrinks as long as the policy requires.
    fn check_shrink(&self) {
        loop {
            let capacity = self.capacity.load();
            let active = self.active.load();

            if !self.policy.should_shrink(active, capacity) {
                return;
            }

            match self.policy.shrink_target(active, capacity, self.floor) {
                Some(target) => self.resize_from(capacity, target),
                None => return,
            }
        }
    }

    //  Grows by one step from `capacity`, unless another thread already did.
    fn force_grow(&self, capacity: usize) -> Result<()> {
        let target = self.policy.grow_target(capacity);

        if target == capacity {
            return Err(Failure::Overflow);
        }

        self.resize_from(capacity, target);

        Ok(())
    }

    //  Replaces the stripe table by one of `target` capacity, unless the capacity is no longer `expected`.
    //
    //  The target is raised to the active count, if need be.
    fn resize_from(&self, expected: usize, target: usize) {
        let mut table = self.table.write();

        let capacity = self.capacity.load();

        if capacity != expected {
            return;
        }

        let active = self.active.load();
        let target = target.max(active).max(1);

        if target == capacity {
            return;
        }

        debug!(from = capacity, to = target, active, "resizing ConcurrentList");

        table.resize(active, target);

        self.capacity.store(target);
        self.generation.bump();
    }
}

impl<T: Clone> Clone for ConcurrentList<T> {
    fn clone(&self) -> Self {
        let slots = self.snapshot_slots();
        let (active, capacity) = (slots.len(), slots.capacity());

        let mut result = Self::from_parts(slots.into_items(), active, capacity, self.policy, self.partition);
        result.floor = self.floor;

        result
    }
}

impl<T> Default for ConcurrentList<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Clone + fmt::Debug> fmt::Debug for ConcurrentList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.snapshot_slots().debug("ConcurrentList", f)
    }
}

impl<T> iter::FromIterator<T> for ConcurrentList<T> {
    fn from_iter<C>(collection: C) -> Self
    where
        C: IntoIterator<Item = T>,
    {
        let mut result = ConcurrentList::new();
        result.extend(collection);
        result
    }
}

impl<T> iter::Extend<T> for ConcurrentList<T> {
    fn extend<C>(&mut self, collection: C)
    where
        C: IntoIterator<Item = T>,
    {
        (&*self).extend(collection);
    }
}

impl<'a, T> iter::Extend<T> for &'a ConcurrentList<T> {
    fn extend<C>(&mut self, collection: C)
    where
        C: IntoIterator<Item = T>,
    {
        for item in collection {
            self.add(item);
        }
    }
}

impl<'a, T: Clone> iter::IntoIterator for &'a ConcurrentList<T> {
    type Item = T;
    type IntoIter = ConcurrentIter<T>;

    fn into_iter(self) -> ConcurrentIter<T> { self.iter() }
}

impl<T: Clone + PartialEq> RandomAccessList<T> for ConcurrentList<T> {
    fn nature(&self) -> Nature { Nature::ThreadSafe }

    fn active_size(&self) -> usize { ConcurrentList::active_size(self) }

    fn max_capacity(&self) -> usize { ConcurrentList::max_capacity(self) }

    fn try_add(&mut self, item: T) -> Result<()> { ConcurrentList::try_add(self, item) }

    fn try_insert(&mut self, index: usize, item: T) -> Result<()> { ConcurrentList::try_insert(self, index, item) }

    fn remove(&mut self, item: &T) -> Result<bool> { ConcurrentList::remove(self, item) }

    fn remove_at(&mut self, index: usize) -> Result<bool> { ConcurrentList::remove_at(self, index) }

    fn get(&self, index: usize) -> Result<T> { ConcurrentList::get(self, index) }

    fn contains(&self, item: &T) -> bool { ConcurrentList::contains(self, item) }

    fn first_index_of(&self, item: &T) -> Option<usize> { ConcurrentList::first_index_of(self, item) }

    fn last_index_of(&self, item: &T) -> Option<usize> { ConcurrentList::last_index_of(self, item) }

    fn to_array(&self) -> Result<Vec<T>> { ConcurrentList::to_array(self) }

    fn iterator(&self) -> Box<dyn Iterator<Item = T> + '_> { Box::new(ConcurrentList::iter(self)) }

    fn to_array_from(&self, start: usize) -> Result<Vec<T>> { ConcurrentList::to_array_from(self, start) }

    fn to_array_range(&self, start: usize, end: usize) -> Result<Vec<T>> {
        ConcurrentList::to_array_range(self, start, end)
    }

    fn reverse(&mut self) -> Result<()> { ConcurrentList::reverse(self) }

    fn remove_all(&mut self) -> Result<bool> { ConcurrentList::remove_all(self) }

    fn compress(&mut self) -> Result<()> { ConcurrentList::compress(self) }

    fn grow(&mut self) -> Result<()> { ConcurrentList::grow(self) }

    fn shrink(&mut self) -> Result<()> { ConcurrentList::shrink(self) }

    fn add_all<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        ConcurrentList::add_all(self, items)
    }

    fn equals(&self, other: &Self) -> Result<bool> { ConcurrentList::equals(self, other) }

    fn equals_range(&self, other: &Self, start: usize, end: usize) -> Result<bool> {
        ConcurrentList::equals_range(self, other, start, end)
    }

    fn equivalence(&self, other: &Self) -> Result<bool> { ConcurrentList::equivalence(self, other) }

    fn merge(&self, other: &Self) -> Result<Self> { ConcurrentList::merge(self, other) }

    fn merge_from(&self, other: &Self, start: usize) -> Result<Self> {
        ConcurrentList::merge_from(self, other, start)
    }

    fn merge_range(&self, other: &Self, start: usize, end: usize) -> Result<Self> {
        ConcurrentList::merge_range(self, other, start, end)
    }
}

#[cfg(test)]
mod tests {

use super::*;

use std::panic;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use crate::utils::tester::*;

fn stripes_of<T>(list: &ConcurrentList<T>) -> usize { list.table.read().len() }

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn trait_send_sync() {
    assert_send_sync::<ConcurrentList<String>>();
    assert_send_sync::<ConcurrentIter<String>>();
}

#[test]
fn trait_debug() {
    let list = ConcurrentList::from_slice(&[1, 2, 3]);

    assert_eq!("ConcurrentList { capacity: 16, length: 3, elements: [1, 2, 3] }", format!("{:?}", list));
}

#[test]
fn trait_clone() {
    let list = ConcurrentList::with_partition(8, PartitionSize::Custom(2));
    list.add_all(0..4).unwrap();

    let copy = list.clone();
    list.add(4);

    assert_eq!(8, copy.max_capacity());
    assert_eq!(PartitionSize::Custom(2), copy.partition());
    assert_eq!(vec![0, 1, 2, 3], copy.to_array().unwrap());
}

#[test]
fn trait_extend_shared() {
    let list = ConcurrentList::new();
    (&list).extend(0..3);

    let mut list = list;
    list.extend(3..5);

    assert_eq!(vec![0, 1, 2, 3, 4], list.iter().collect::<Vec<_>>());
}

#[test]
fn stripe_count_follows_capacity() {
    let list = ConcurrentList::with_partition(16, PartitionSize::Custom(4));
    assert_eq!(5, stripes_of(&list));

    list.add_all(0..13).unwrap();
    assert_eq!(25, list.max_capacity());
    assert_eq!(8, stripes_of(&list));

    list.remove_all().unwrap();
    assert_eq!(16, list.max_capacity());
    assert_eq!(5, stripes_of(&list));
}

#[test]
fn add_grow_on_thirteenth() {
    let list = ConcurrentList::new();

    list.add_all(0..12).unwrap();
    assert_eq!(16, list.max_capacity());

    let generation = list.generation();
    list.add(12);

    assert_eq!(25, list.max_capacity());
    assert!(list.generation() > generation);
    assert_eq!((0..13).collect::<Vec<_>>(), list.to_array().unwrap());
}

#[test]
fn add_grows_when_full() {
    let policy = CapacityPolicy::new(1.0, 0.0, 2.0).unwrap();
    let list = ConcurrentList::with_config(2, policy, PartitionSize::Custom(1));

    list.add_all(0..5).unwrap();

    assert_eq!(8, list.max_capacity());
    assert_eq!(vec![0, 1, 2, 3, 4], list.to_array().unwrap());
}

#[test]
fn insert_across_stripes() {
    let list = ConcurrentList::with_partition(8, PartitionSize::Custom(2));
    list.add_all([1, 2, 3, 4, 5]).unwrap();

    list.insert(0, 0);
    list.insert(3, 9);
    list.insert(7, 6);

    assert_eq!(vec![0, 1, 2, 9, 3, 4, 5, 6], list.to_array().unwrap());
    assert_eq!(Err(Failure::OutOfBounds), list.try_insert(9, 7));
    assert_eq!(Ok(9), list.get(3));
    assert_eq!(Ok(6), list.get(7));
    assert_eq!(Err(Failure::OutOfBounds), list.get(8));
}

#[test]
#[should_panic(expected = "OutOfBounds")]
fn insert_out_of_bounds_panics() {
    let list = ConcurrentList::new();
    list.insert(1, 1);
}

#[test]
fn remove_all_occurrences() {
    let list = ConcurrentList::with_partition(16, PartitionSize::Custom(3));
    list.add_all([1, 2, 1, 3, 1, 4, 1]).unwrap();

    assert_eq!(Ok(true), list.remove(&1));
    assert_eq!(3, list.active_size());
    assert_eq!(vec![2, 3, 4], list.to_array().unwrap());

    assert_eq!(Ok(false), list.remove(&1));
}

#[test]
fn get_waits_for_locked_stripe() {
    let list = ConcurrentList::from_slice(&[1, 2, 3]);
    let released = AtomicBool::new(false);

    crossbeam_utils::thread::scope(|s| {
        let table = list.table.read();
        let (length, mut range) = table.lock_from(0, &list.active);

        let reader = s.spawn(|_| {
            let value = list.get(0);
            assert!(released.load(Ordering::SeqCst));
            value
        });

        thread::sleep(Duration::from_millis(50));

        range.insert(0, length, 9);
        list.active.store(length + 1);
        released.store(true, Ordering::SeqCst);
        drop(range);
        drop(table);

        assert_eq!(Ok(9), reader.join().unwrap());
    })
    .unwrap();

    assert_eq!(vec![9, 1, 2, 3], list.to_array().unwrap());
}

#[test]
fn remove_panicking_comparison() {
    let list = ConcurrentList::with_partition(16, PartitionSize::Custom(2));
    list.add_all([0, 1, 2, 3, 1, 5].map(|i| if i == 3 { PanickyEq::panicky(i) } else { PanickyEq::new(i) })).unwrap();

    let result = panic::catch_unwind(panic::AssertUnwindSafe(|| list.remove(&PanickyEq::new(1))));
    assert!(result.is_err());

    assert_eq!(6, list.active_size());
    assert_eq!(Ok(6), list.to_array().map(|a| a.len()));
    assert_eq!(Ok(1), list.get(1).map(|e| e.0));
    assert_eq!(Ok(3), list.get(3).map(|e| e.0));

    //  The list remains usable.
    list.add(PanickyEq::new(6));
    assert_eq!(7, list.active_size());
}

#[test]
fn remove_at_shifts() {
    let list = ConcurrentList::with_partition(16, PartitionSize::Custom(2));
    list.add_all(0..6).unwrap();

    assert_eq!(Ok(true), list.remove_at(1));
    assert_eq!(Ok(true), list.remove_at(4));
    assert_eq!(Err(Failure::OutOfBounds), list.remove_at(4));

    assert_eq!(vec![0, 2, 3, 4], list.to_array().unwrap());
}

#[test]
fn shrink_below_quarter() {
    let list = ConcurrentList::new();
    list.add_all(0..13).unwrap();
    assert_eq!(25, list.max_capacity());

    for _ in 0..6 {
        list.remove_at(0).unwrap();
    }

    assert_eq!(7, list.active_size());
    assert_eq!(25, list.max_capacity());

    list.remove_at(0).unwrap();

    assert_eq!(6, list.active_size());
    assert_eq!(16, list.max_capacity());
    assert_eq!((7..13).collect::<Vec<_>>(), list.to_array().unwrap());
}

#[test]
fn remove_all_empty_is_noop() {
    let list: ConcurrentList<i32> = ConcurrentList::with_capacity(40);
    let generation = list.generation();

    assert_eq!(Ok(false), list.remove_all());
    assert_eq!(40, list.max_capacity());
    assert_eq!(generation, list.generation());

    list.add(1);

    assert_eq!(Ok(true), list.remove_all());
    assert_eq!(16, list.max_capacity());
    assert!(list.is_empty());
    assert!(list.iter().next().is_none());
}

#[test]
fn removals_drop() {
    let count = SpyCount::zero();
    let list: ConcurrentList<_> = (0..20).map(|i| SpyElement::new(&count, i)).collect();

    assert_eq!(20, count.get());

    list.remove(&SpyElement::new(&count, 3)).unwrap();
    assert_eq!(19, count.get());

    list.remove_at(0).unwrap();
    assert_eq!(18, count.get());

    list.remove_all().unwrap();
    assert_eq!(0, count.get());
}

#[test]
fn explicit_resize() {
    let list: ConcurrentList<i32> = ConcurrentList::new();

    list.grow().unwrap();
    assert_eq!(25, list.max_capacity());

    list.shrink().unwrap();
    assert_eq!(16, list.max_capacity());

    //  Never below the floor.
    list.shrink().unwrap();
    assert_eq!(16, list.max_capacity());
}

#[test]
fn reverse_compress() {
    let list = ConcurrentList::with_partition(8, PartitionSize::Custom(2));
    list.add_all(0..5).unwrap();

    list.reverse().unwrap();
    assert_eq!(vec![4, 3, 2, 1, 0], list.to_array().unwrap());

    let generation = list.generation();
    list.compress().unwrap();
    assert_eq!(generation, list.generation());
}

#[test]
fn lookups() {
    let list = ConcurrentList::from_slice(&[1, 2, 1, 3]);

    assert!(list.contains(&3));
    assert!(!list.contains(&4));
    assert_eq!(Some(0), list.first_index_of(&1));
    assert_eq!(Some(2), list.last_index_of(&1));
    assert_eq!(None, list.last_index_of(&4));
}

#[test]
fn arrays() {
    let list = ConcurrentList::from_slice(&[0, 1, 2, 3]);

    assert_eq!(Ok(vec![2, 3]), list.to_array_from(2));
    assert_eq!(Ok(vec![1, 2]), list.to_array_range(1, 3));
    assert_eq!(Err(Failure::Underflow), list.to_array_from(4));
    assert_eq!(Err(Failure::OutOfBounds), list.to_array_range(3, 5));
    assert_eq!(Err(Failure::OutOfBounds), list.to_array_range(2, 1));

    let empty: ConcurrentList<i32> = ConcurrentList::new();

    assert_eq!(Err(Failure::Underflow), empty.to_array());
    assert_eq!(Err(Failure::Underflow), empty.to_array_range(0, 0));
}

#[test]
fn comparisons() {
    let one = ConcurrentList::from_slice(&[1, 2, 3]);
    let two = ConcurrentList::from_slice(&[3, 2, 1]);

    assert_eq!(Ok(false), one.equals(&two));
    assert_eq!(Ok(true), one.equals(&one.clone()));
    assert_eq!(Ok(true), one.equivalence(&two));
    assert_eq!(Ok(true), one.equals_range(&two, 1, 2));
    assert_eq!(Err(Failure::Underflow), one.equivalence(&ConcurrentList::new()));
}

#[test]
fn merges() {
    let one = ConcurrentList::from_slice(&[1, 2]);
    let two = ConcurrentList::from_slice(&[3, 4, 5, 6]);

    let merged = one.merge_from(&two, 2).unwrap();
    assert_eq!(vec![5, 6, 1, 2], merged.to_array().unwrap());
    assert_eq!(30, merged.max_capacity());

    let merged = one.merge_range(&two, 1, 2).unwrap();
    assert_eq!(vec![4, 1, 2], merged.to_array().unwrap());

    assert_eq!(Some(Failure::Underflow), one.merge(&ConcurrentList::new()).err());
    assert_eq!(Some(Failure::OutOfBounds), one.merge_from(&two, 5).err());
}

#[test]
fn from_list_and_slots() {
    let list = ConcurrentList::from_slice(&[1, 2, 3]);

    assert_eq!(3, ConcurrentList::from_list(&list, 3).unwrap().max_capacity());
    assert_eq!(Some(Failure::Overflow), ConcurrentList::from_list(&list, 2).err());

    assert_eq!(Some(Failure::NullItem), ConcurrentList::from_slots([Some(1), None]).err());
    assert_eq!(Ok(vec![1, 2]), ConcurrentList::from_slots([Some(1), Some(2)]).unwrap().to_array());
}

#[test]
fn nature_dispatch() {
    let mut list = ConcurrentList::from_slice(&[1, 2]);

    {
        let list: &mut dyn RandomAccessList<i32> = &mut list;

        assert_eq!(Nature::ThreadSafe, list.nature());
        assert!(list.is_thread_safe());

        list.try_add(3).unwrap();
        list.clear().unwrap();
    }

    assert!(list.is_empty());
}

#[test]
fn concurrent_adds() {
    const THREADS: usize = 4;
    const ADDS: usize = 2_000;

    let list = ConcurrentList::with_partition(16, PartitionSize::Custom(64));
    let done = AtomicUsize::new(0);

    let snapshots = crossbeam_utils::thread::scope(|s| {
        for t in 0..THREADS {
            let (list, done) = (&list, &done);

            s.spawn(move |_| {
                for i in 0..ADDS {
                    list.add(t * ADDS + i);
                }

                done.fetch_add(1, Ordering::Relaxed);
            });
        }

        let reader = s.spawn(|_| {
            let mut snapshots = Vec::new();

            while done.load(Ordering::Relaxed) < THREADS && snapshots.len() < 64 {
                if let Ok(snapshot) = list.to_array() {
                    snapshots.push(snapshot);
                }
            }

            snapshots
        });

        reader.join().unwrap()
    })
    .unwrap();

    assert_eq!(THREADS * ADDS, list.active_size());
    assert!(list.active_size() <= list.max_capacity());

    let all = list.to_array().unwrap();

    for snapshot in &snapshots {
        assert!(all.starts_with(snapshot));
    }

    //  Each thread's elements appear in the order it added them.
    for t in 0..THREADS {
        let mine: Vec<_> = all.iter().copied().filter(|e| e / ADDS == t).collect();
        assert_eq!((t * ADDS..(t + 1) * ADDS).collect::<Vec<_>>(), mine);
    }
}

#[test]
fn concurrent_add_remove() {
    const THREADS: usize = 4;
    const ROUNDS: usize = 500;

    let list = ConcurrentList::with_partition(16, PartitionSize::Custom(8));

    crossbeam_utils::thread::scope(|s| {
        for t in 0..THREADS {
            let list = &list;

            s.spawn(move |_| {
                for i in 0..ROUNDS {
                    list.add(t * ROUNDS + i);
                    list.insert(0, t * ROUNDS + i);

                    //  At least one element, ours, is present.
                    assert_eq!(Ok(true), list.remove_at(0));
                }
            });
        }

        s.spawn(|_| {
            for _ in 0..ROUNDS {
                let size = list.iter().len();
                assert!(size <= THREADS * (ROUNDS + 1));
            }
        });
    })
    .unwrap();

    assert_eq!(THREADS * ROUNDS, list.active_size());
    assert!(list.active_size() <= list.max_capacity());
    assert_eq!(THREADS * ROUNDS, list.iter().count());
}

}
