//! #   The ArrayList.
//!
//! The `ArrayList` is a growable, single-threaded, list of contiguous slots.
//!
//! ##  Under the covers.
//!
//! The capacity of the `ArrayList` is managed by its `CapacityPolicy`:
//!
//! -   Once an insertion makes the list more than 3/4 full, the capacity is multiplied by the golden ratio.
//! -   Once a removal makes the list less than 1/4 full, the capacity is divided by the golden ratio, though never
//!     below the number of elements, nor below the initial capacity (capped at 16).
//!
//! Every structural modification increments the generation of the list, which is used by a `Cursor` to detect
//! modifications behind its back.
//!
//! #   Example: basic
//!
//! ```
//! use golden_list::ArrayList;
//!
//! let mut list: ArrayList<_> = ArrayList::new();
//! list.add(1);
//! list.add(2);
//! list.insert(0, 0);
//!
//! assert_eq!(3, list.active_size());
//! assert_eq!(Ok(&0), list.get(0));
//! assert_eq!(vec![0, 1, 2], list.to_array().unwrap());
//!
//! list.reverse().unwrap();
//! assert_eq!(vec![2, 1, 0], list.iter().copied().collect::<Vec<_>>());
//! ```
//!
//! #   Example: capacity
//!
//! ```
//! use golden_list::ArrayList;
//!
//! let mut list: ArrayList<_> = ArrayList::new();
//! assert_eq!(16, list.max_capacity());
//!
//! list.extend(0..12);
//! assert_eq!(16, list.max_capacity());
//!
//! //  13 / 16 > 0.75
//! list.add(12);
//! assert_eq!(25, list.max_capacity());
//!
//! list.remove_all().unwrap();
//! assert_eq!(16, list.max_capacity());
//! ```

use std::{fmt, iter, ops};

use tracing::debug;

use super::capacity::{self, CapacityPolicy, DEFAULT_CAPACITY};
use super::cursor::{Cursor, CursorState};
use super::failure::{panic_from_failure, Failure, Result};
use super::list::{Nature, RandomAccessList};
use super::slots::{Iter, Slots};

/// `ArrayList`
pub struct ArrayList<T> {
    policy: CapacityPolicy,
    //  Capacity below which the list does not shrink.
    floor: usize,
    slots: Slots<T>,
}

impl<T> ArrayList<T> {
    /// Creates a new, empty, instance with the default capacity of 16.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::ArrayList;
    /// let list: ArrayList<i32> = ArrayList::new();
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
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::ArrayList;
    /// let list: ArrayList<i32> = ArrayList::with_capacity(4);
    ///
    /// assert_eq!(4, list.max_capacity());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_policy(capacity, CapacityPolicy::default())
    }

    /// Creates a new, empty, instance with `capacity` slots, resized according to `policy`.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::ArrayList;
    /// #   use golden_list::capacity::CapacityPolicy;
    /// let policy = CapacityPolicy::new(0.5, 0.125, 2.0).unwrap();
    /// let mut list = ArrayList::with_policy(8, policy);
    ///
    /// list.extend(0..5);
    /// assert_eq!(16, list.max_capacity());
    /// ```
    pub fn with_policy(capacity: usize, policy: CapacityPolicy) -> Self {
        let capacity = capacity.max(1);

        Self { policy, floor: capacity::shrink_floor(capacity), slots: Slots::with_capacity(capacity) }
    }

    /// Creates a new instance with `capacity` slots, holding a copy of the elements of `other`.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::Overflow` if `capacity` is less than the number of elements of `other`.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::ArrayList;
    /// #   use golden_list::failure::Failure;
    /// let list = ArrayList::from_slice(&[1, 2, 3]);
    ///
    /// let copy = ArrayList::from_list(&list, 3).unwrap();
    /// assert_eq!(3, copy.max_capacity());
    /// assert_eq!(Ok(true), copy.equals(&list));
    ///
    /// assert_eq!(Some(Failure::Overflow), ArrayList::from_list(&list, 2).err());
    /// ```
    pub fn from_list(other: &Self, capacity: usize) -> Result<Self>
    where
        T: Clone,
    {
        let capacity = capacity.max(1);
        let slots = Slots::from_items(other.iter().cloned(), capacity)?;

        Ok(Self { policy: other.policy, floor: capacity::shrink_floor(capacity), slots })
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
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::ArrayList;
    /// #   use golden_list::failure::Failure;
    /// let list = ArrayList::from_slots([Some(1), Some(2)]).unwrap();
    /// assert_eq!(2, list.active_size());
    ///
    /// assert_eq!(Some(Failure::NullItem), ArrayList::from_slots([Some(1), None]).err());
    /// ```
    pub fn from_slots<I>(slots: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<T>>,
    {
        let mut result = Self::new();

        for slot in slots {
            result.try_add(slot.ok_or(Failure::NullItem)?)?;
        }

        Ok(result)
    }

    /// Returns the capacity policy.
    pub fn policy(&self) -> &CapacityPolicy { &self.policy }

    /// Returns the number of elements.
    pub fn active_size(&self) -> usize { self.slots.len() }

    /// Returns the number of slots currently allocated.
    pub fn max_capacity(&self) -> usize { self.slots.capacity() }

    /// Returns whether the list contains no element.
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    /// Returns the generation, incremented on every structural modification.
    pub fn generation(&self) -> u64 { self.slots.generation() }

    /// Returns a reference to the element at `index`.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::OutOfBounds` if `index` is not less than `active_size()`.
    pub fn get(&self, index: usize) -> Result<&T> { self.slots.get(index) }

    /// Returns an iterator over the elements, in order.
    pub fn iter(&self) -> Iter<'_, T> { self.slots.iter() }

    /// Appends an element.
    ///
    /// The `ArrayList` grows as necessary, hence this call always succeeds; it exists for symmetry with the other
    /// lists.
    pub fn try_add(&mut self, item: T) -> Result<()> {
        if self.slots.is_full() {
            self.grow_step();
        }

        self.slots.push(item);
        self.check_grow();

        Ok(())
    }

    /// Appends an element.
    pub fn add(&mut self, item: T) {
        self.try_add(item).unwrap_or_else(panic_from_failure);
    }

    /// Inserts an element at `index`, shifting all subsequent elements to the right.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::OutOfBounds` if `index` is greater than `active_size()`.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::ArrayList;
    /// #   use golden_list::failure::Failure;
    /// let mut list = ArrayList::from_slice(&[1, 3]);
    ///
    /// assert_eq!(Ok(()), list.try_insert(1, 2));
    /// assert_eq!(Ok(()), list.try_insert(3, 4));
    /// assert_eq!(Err(Failure::OutOfBounds), list.try_insert(5, 5));
    ///
    /// assert_eq!(vec![1, 2, 3, 4], list.to_array().unwrap());
    /// ```
    pub fn try_insert(&mut self, index: usize, item: T) -> Result<()> {
        if index > self.slots.len() {
            return Err(Failure::OutOfBounds);
        }

        //  The shift requires one free slot.
        self.check_grow();
        if self.slots.is_full() {
            self.grow_step();
        }

        self.slots.insert(index, item)?;
        self.check_grow();

        Ok(())
    }

    /// Inserts an element at `index`.
    ///
    /// #   Panics
    ///
    /// Panics if `index` is greater than `active_size()`.
    pub fn insert(&mut self, index: usize, item: T) {
        self.try_insert(index, item).unwrap_or_else(panic_from_failure);
    }

    /// Removes all occurrences of `item`, returns whether any was found.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::ArrayList;
    /// let mut list = ArrayList::from_slice(&[1, 2, 1, 3]);
    ///
    /// assert_eq!(Ok(true), list.remove(&1));
    /// assert_eq!(Ok(false), list.remove(&1));
    /// assert_eq!(vec![2, 3], list.to_array().unwrap());
    /// ```
    pub fn remove(&mut self, item: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        let removed = self.slots.remove_item(item);

        if removed > 0 {
            self.check_shrink();
        }

        Ok(removed > 0)
    }

    /// Removes the element at `index`, shifting all subsequent elements to the left.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::OutOfBounds` if `index` is not less than `active_size()`.
    pub fn remove_at(&mut self, index: usize) -> Result<bool> {
        let removed = self.slots.remove_at(index)?.is_some();

        if removed {
            self.check_shrink();
        }

        Ok(removed)
    }

    /// Returns whether `item` is contained in the list.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.slots.contains(item)
    }

    /// Returns the index of the first occurrence of `item`, if any.
    pub fn first_index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.slots.first_index_of(item)
    }

    /// Returns the index of the last occurrence of `item`, if any.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::ArrayList;
    /// let list = ArrayList::from_slice(&[1, 2, 1]);
    ///
    /// assert_eq!(Some(2), list.last_index_of(&1));
    /// assert_eq!(Some(1), list.last_index_of(&2));
    /// assert_eq!(None, list.last_index_of(&3));
    /// ```
    pub fn last_index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.slots.last_index_of(item)
    }

    /// Returns a copy of all the elements.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::Underflow` if the list is empty.
    pub fn to_array(&self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.slots.to_array_range(0, self.slots.len())
    }

    /// Returns a copy of the elements from `start` onwards.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::Underflow` if the list, or the range, is empty, and `Failure::OutOfBounds` if `start` is
    /// greater than `active_size()`.
    pub fn to_array_from(&self, start: usize) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.slots.to_array_range(start, self.slots.len())
    }

    /// Returns a copy of the elements within `[start, end)`.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::Underflow` if the list, or the range, is empty, and `Failure::OutOfBounds` unless
    /// `start <= end <= active_size()`.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::ArrayList;
    /// #   use golden_list::failure::Failure;
    /// let list = ArrayList::from_slice(&[1, 2, 3, 4]);
    ///
    /// assert_eq!(Ok(vec![2, 3]), list.to_array_range(1, 3));
    /// assert_eq!(Err(Failure::Underflow), list.to_array_range(2, 2));
    /// assert_eq!(Err(Failure::OutOfBounds), list.to_array_range(3, 5));
    /// ```
    pub fn to_array_range(&self, start: usize, end: usize) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.slots.to_array_range(start, end)
    }

    /// Reverses the order of the elements, in place.
    pub fn reverse(&mut self) -> Result<()> {
        self.slots.reverse();
        Ok(())
    }

    /// Removes all elements, then sheds the excess capacity.
    ///
    /// Returns `false`, leaving the capacity untouched, if the list was already empty.
    pub fn remove_all(&mut self) -> Result<bool> {
        if !self.slots.clear() {
            return Ok(false);
        }

        while let Some(target) = self.policy.shrink_target(0, self.slots.capacity(), self.floor) {
            self.resize_to(target);
        }

        Ok(true)
    }

    /// Removes all elements.
    pub fn clear(&mut self) -> Result<()> {
        self.remove_all().map(|_| ())
    }

    /// Moves all elements to the front of the storage.
    ///
    /// The elements of an `ArrayList` are kept compact after each operation, so this is generally a no-op.
    pub fn compress(&mut self) -> Result<()> {
        if self.slots.compact() {
            self.slots.bump();
        }

        Ok(())
    }

    /// Grows the capacity by one step of the policy, regardless of the load.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::ArrayList;
    /// let mut list: ArrayList<i32> = ArrayList::new();
    ///
    /// list.grow().unwrap();
    /// assert_eq!(25, list.max_capacity());
    /// ```
    pub fn grow(&mut self) -> Result<()> {
        self.grow_step();
        Ok(())
    }

    /// Shrinks the capacity by one step of the policy, regardless of the load.
    ///
    /// The capacity never drops below the number of elements, nor below the shrink floor.
    pub fn shrink(&mut self) -> Result<()> {
        if let Some(target) = self.policy.shrink_target(self.slots.len(), self.slots.capacity(), self.floor) {
            self.resize_to(target);
        }

        Ok(())
    }

    /// Compares the elements of both lists, in order.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::Underflow` if both lists are empty.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::ArrayList;
    /// let list = ArrayList::from_slice(&[1, 2]);
    ///
    /// assert_eq!(Ok(true), list.equals(&ArrayList::from_slice(&[1, 2])));
    /// assert_eq!(Ok(false), list.equals(&ArrayList::from_slice(&[2, 1])));
    /// assert_eq!(Ok(false), list.equals(&ArrayList::from_slice(&[1])));
    /// ```
    pub fn equals(&self, other: &Self) -> Result<bool>
    where
        T: PartialEq,
    {
        self.slots.equals(&other.slots)
    }

    /// Compares the elements of both lists within `[start, end)`, in order.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::OutOfBounds` if `end < start` or if `end` exceeds either list, and `Failure::Underflow` if
    /// the range is empty.
    pub fn equals_range(&self, other: &Self, start: usize, end: usize) -> Result<bool>
    where
        T: PartialEq,
    {
        self.slots.equals_range(&other.slots, start, end)
    }

    /// Returns whether both lists have the same size, and this list contains every element of `other`.
    ///
    /// Neither order nor multiplicity matter.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::Underflow` if either list is empty.
    pub fn equivalence(&self, other: &Self) -> Result<bool>
    where
        T: PartialEq,
    {
        self.slots.equivalence(&other.slots)
    }

    /// Creates a new list made of the elements of `other`, followed by those of `self`.
    ///
    /// The capacity of the new list is the sum of both capacities.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::Underflow` if `other` is empty.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::ArrayList;
    /// let one = ArrayList::from_slice(&[1, 2]);
    /// let two = ArrayList::from_slice(&[3, 4]);
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
        self.merge_range(other, 0, other.active_size())
    }

    /// Creates a new list made of the elements of `other` from `start` onwards, followed by those of `self`.
    ///
    /// The capacity of the new list is the sum of both capacities, minus `start`.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::OutOfBounds` if `start` exceeds `other`, and `Failure::Underflow` if no element of `other`
    /// is selected.
    pub fn merge_from(&self, other: &Self, start: usize) -> Result<Self>
    where
        T: Clone,
    {
        self.merge_range(other, start, other.active_size())
    }

    /// Creates a new list made of the elements of `other` within `[start, end)`, followed by those of `self`.
    ///
    /// The capacity of the new list is the sum of both capacities, minus `start`.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::OutOfBounds` unless `start <= end <= other.active_size()`, and `Failure::Underflow` if the
    /// range is empty.
    pub fn merge_range(&self, other: &Self, start: usize, end: usize) -> Result<Self>
    where
        T: Clone,
    {
        let slots = self.slots.merged(&other.slots, start, end)?;

        let mut result = Self { policy: self.policy, floor: capacity::shrink_floor(slots.capacity()), slots };
        result.check_grow();

        Ok(result)
    }

    /// Creates a fail-fast `Cursor` at the start of the list.
    pub fn cursor(&self) -> Cursor { self.slots.cursor() }

    /// Returns whether the list was modified behind the back of `cursor`.
    pub fn cursor_state(&self, cursor: &Cursor) -> CursorState { self.slots.cursor_state(cursor) }

    /// Returns whether `cursor` has an element to yield.
    pub fn cursor_has_next(&self, cursor: &Cursor) -> bool { self.slots.cursor_has_next(cursor) }

    /// Advances `cursor`, returns the element it stepped over.
    pub fn cursor_next(&self, cursor: &mut Cursor) -> Option<&T> { self.slots.cursor_next(cursor) }

    /// Removes the element last returned by `cursor_next`.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::ConcurrentModification` if the list was structurally modified other than through `cursor`
    /// since it was created or reset; the cursor is then reset to the start of the list.
    ///
    /// Returns `Failure::OutOfBounds` if no element was yielded since the last removal.
    pub fn cursor_remove(&mut self, cursor: &mut Cursor) -> Result<T> {
        let removed = self.slots.cursor_remove(cursor)?;

        self.check_shrink();
        cursor.resync(self.slots.generation());

        Ok(removed)
    }

    //  Grows as long as the policy requires.
    fn check_grow(&mut self) {
        while self.policy.should_grow(self.slots.len(), self.slots.capacity()) {
            self.grow_step();
        }
    }

    //  Shrinks as long as the policy requires.
    fn check_shrink(&mut self) {
        while self.policy.should_shrink(self.slots.len(), self.slots.capacity()) {
            match self.policy.shrink_target(self.slots.len(), self.slots.capacity(), self.floor) {
                Some(target) => self.resize_to(target),
                None => break,
            }
        }
    }

    fn grow_step(&mut self) {
        let target = self.policy.grow_target(self.slots.capacity());
        self.resize_to(target);
    }

    fn resize_to(&mut self, capacity: usize) {
        debug!(from = self.slots.capacity(), to = capacity, active = self.slots.len(), "resizing ArrayList");

        self.slots.resize(capacity);
    }
}

impl<T: Clone> Clone for ArrayList<T> {
    fn clone(&self) -> Self {
        Self { policy: self.policy, floor: self.floor, slots: self.slots.clone() }
    }
}

impl<T> Default for ArrayList<T> {
    fn default() -> Self { Self::new() }
}

impl<T: fmt::Debug> fmt::Debug for ArrayList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.slots.debug("ArrayList", f)
    }
}

impl<T: PartialEq> PartialEq for ArrayList<T> {
    fn eq(&self, other: &Self) -> bool { self.slots == other.slots }
}

impl<T> iter::FromIterator<T> for ArrayList<T> {
    fn from_iter<C>(collection: C) -> Self
    where
        C: IntoIterator<Item = T>,
    {
        let mut result = ArrayList::new();
        result.extend(collection);
        result
    }
}

impl<T> iter::Extend<T> for ArrayList<T> {
    fn extend<C>(&mut self, collection: C)
    where
        C: IntoIterator<Item = T>,
    {
        for item in collection {
            self.add(item);
        }
    }
}

impl<'a, T> iter::IntoIterator for &'a ArrayList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

impl<T> ops::Index<usize> for ArrayList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index).expect("Valid index")
    }
}

impl<T: Clone + PartialEq> RandomAccessList<T> for ArrayList<T> {
    fn nature(&self) -> Nature { Nature::Mutable }

    fn active_size(&self) -> usize { ArrayList::active_size(self) }

    fn max_capacity(&self) -> usize { ArrayList::max_capacity(self) }

    fn try_add(&mut self, item: T) -> Result<()> { ArrayList::try_add(self, item) }

    fn try_insert(&mut self, index: usize, item: T) -> Result<()> { ArrayList::try_insert(self, index, item) }

    fn remove(&mut self, item: &T) -> Result<bool> { ArrayList::remove(self, item) }

    fn remove_at(&mut self, index: usize) -> Result<bool> { ArrayList::remove_at(self, index) }

    fn get(&self, index: usize) -> Result<T> { ArrayList::get(self, index).cloned() }

    fn contains(&self, item: &T) -> bool { ArrayList::contains(self, item) }

    fn first_index_of(&self, item: &T) -> Option<usize> { ArrayList::first_index_of(self, item) }

    fn last_index_of(&self, item: &T) -> Option<usize> { ArrayList::last_index_of(self, item) }

    fn to_array(&self) -> Result<Vec<T>> { ArrayList::to_array(self) }

    fn iterator(&self) -> Box<dyn Iterator<Item = T> + '_> { Box::new(self.iter().cloned()) }

    fn to_array_from(&self, start: usize) -> Result<Vec<T>> { ArrayList::to_array_from(self, start) }

    fn to_array_range(&self, start: usize, end: usize) -> Result<Vec<T>> {
        ArrayList::to_array_range(self, start, end)
    }

    fn reverse(&mut self) -> Result<()> { ArrayList::reverse(self) }

    fn remove_all(&mut self) -> Result<bool> { ArrayList::remove_all(self) }

    fn compress(&mut self) -> Result<()> { ArrayList::compress(self) }

    fn grow(&mut self) -> Result<()> { ArrayList::grow(self) }

    fn shrink(&mut self) -> Result<()> { ArrayList::shrink(self) }

    fn equals(&self, other: &Self) -> Result<bool> { ArrayList::equals(self, other) }

    fn equals_range(&self, other: &Self, start: usize, end: usize) -> Result<bool> {
        ArrayList::equals_range(self, other, start, end)
    }

    fn equivalence(&self, other: &Self) -> Result<bool> { ArrayList::equivalence(self, other) }

    fn merge(&self, other: &Self) -> Result<Self> { ArrayList::merge(self, other) }

    fn merge_from(&self, other: &Self, start: usize) -> Result<Self> { ArrayList::merge_from(self, other, start) }

    fn merge_range(&self, other: &Self, start: usize, end: usize) -> Result<Self> {
        ArrayList::merge_range(self, other, start, end)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use std::panic;

    use crate::utils::tester::*;

    fn assert_bounded<T>(list: &ArrayList<T>) {
        assert!(list.active_size() <= list.max_capacity());
    }

    #[test]
    fn trait_debug() {
        let list = ArrayList::from_slice(&[1, 2, 3]);

        assert_eq!("ArrayList { capacity: 16, length: 3, elements: [1, 2, 3] }", format!("{:?}", list));
    }

    #[test]
    fn trait_from_iterator() {
        let list: ArrayList<_> = (0..5).collect();

        assert_eq!(5, list.active_size());
        assert_eq!(4, list[4]);
    }

    #[test]
    fn with_capacity_zero() {
        let mut list = ArrayList::with_capacity(0);
        assert_eq!(1, list.max_capacity());

        list.add(1);
        list.add(2);
        assert_eq!(vec![1, 2], list.to_array().unwrap());
        assert_bounded(&list);
    }

    #[test]
    fn remove_panicking_comparison() {
        let items = [0, 1, 2, 3, 1, 5].map(|i| if i == 3 { PanickyEq::panicky(i) } else { PanickyEq::new(i) });
        let mut list = ArrayList::from_slice(&items);

        let result = panic::catch_unwind(panic::AssertUnwindSafe(|| list.remove(&PanickyEq::new(1))));
        assert!(result.is_err());

        assert_eq!(6, list.active_size());
        assert_eq!(Ok(6), list.to_array().map(|a| a.len()));
        assert_eq!(1, list.get(1).unwrap().0);
        assert_eq!(1, list.get(4).unwrap().0);
    }

    #[test]
    fn grow_on_thirteenth() {
        let mut list = ArrayList::new();

        for i in 0..12 {
            list.add(i);
            assert_eq!(16, list.max_capacity());
        }

        list.add(12);
        assert_eq!(25, list.max_capacity());
        assert_eq!((0..13).collect::<Vec<_>>(), list.to_array().unwrap());
    }

    #[test]
    fn grow_keeps_bounded() {
        let mut list = ArrayList::with_capacity(1);

        for i in 0..1_000 {
            list.add(i);
            assert_bounded(&list);
            assert!(!list.policy().should_grow(list.active_size(), list.max_capacity()));
        }
    }

    #[test]
    fn insert_grows() {
        let mut list = ArrayList::with_capacity(2);

        list.insert(0, 2);
        list.insert(0, 1);
        list.insert(2, 3);

        assert_eq!(vec![1, 2, 3], list.to_array().unwrap());
        assert_bounded(&list);
    }

    #[test]
    #[should_panic(expected = "OutOfBounds")]
    fn insert_out_of_bounds_panics() {
        let mut list = ArrayList::new();
        list.insert(1, 1);
    }

    #[test]
    fn shrink_below_quarter() {
        let mut list: ArrayList<_> = ArrayList::new();
        list.extend(0..13);
        assert_eq!(25, list.max_capacity());

        for i in 0..6 {
            list.remove(&i).unwrap();
            assert_eq!(25, list.max_capacity());
        }

        //  6 / 25 < 0.25
        list.remove(&6).unwrap();
        assert_eq!(16, list.max_capacity());
        assert_eq!((7..13).collect::<Vec<_>>(), list.to_array().unwrap());
    }

    #[test]
    fn shrink_idempotent() {
        let mut list: ArrayList<_> = (0..20).collect();
        for i in 1..20 {
            list.remove(&i).unwrap();
        }

        let capacity = list.max_capacity();
        let generation = list.generation();

        list.shrink().unwrap();
        list.shrink().unwrap();

        assert_eq!(capacity, list.max_capacity());
        assert_eq!(generation, list.generation());
    }

    #[test]
    fn remove_decrements_per_occurrence() {
        let mut list = ArrayList::from_slice(&[1, 2, 1, 3, 1]);

        assert_eq!(Ok(true), list.remove(&1));
        assert_eq!(2, list.active_size());
        assert_eq!(vec![2, 3], list.to_array().unwrap());
    }

    #[test]
    fn remove_at_bounds() {
        let mut list = ArrayList::from_slice(&[1, 2, 3]);

        assert_eq!(Ok(true), list.remove_at(0));
        assert_eq!(Err(Failure::OutOfBounds), list.remove_at(2));
        assert_eq!(vec![2, 3], list.to_array().unwrap());
    }

    #[test]
    fn get_out_of_bounds() {
        let list = ArrayList::from_slice(&[1]);

        assert_eq!(Ok(&1), list.get(0));
        assert_eq!(Err(Failure::OutOfBounds), list.get(1));
    }

    #[test]
    fn to_array_empty() {
        let list: ArrayList<i32> = ArrayList::new();

        assert_eq!(Err(Failure::Underflow), list.to_array());
        assert_eq!(Err(Failure::Underflow), list.to_array_from(0));
    }

    #[test]
    fn to_array_from_bounds() {
        let list = ArrayList::from_slice(&[1, 2, 3]);

        assert_eq!(Ok(vec![2, 3]), list.to_array_from(1));
        assert_eq!(Err(Failure::Underflow), list.to_array_from(3));
        assert_eq!(Err(Failure::OutOfBounds), list.to_array_from(4));
    }

    #[test]
    fn remove_all_empty_is_noop() {
        let mut list: ArrayList<i32> = ArrayList::with_capacity(40);
        let generation = list.generation();

        assert_eq!(Ok(false), list.remove_all());
        assert_eq!(40, list.max_capacity());
        assert_eq!(generation, list.generation());
    }

    #[test]
    fn remove_all_shrinks_to_floor() {
        let mut list: ArrayList<_> = (0..100).collect();
        assert!(list.max_capacity() > 100);

        assert_eq!(Ok(true), list.remove_all());
        assert!(list.is_empty());
        assert_eq!(16, list.max_capacity());
    }

    #[test]
    fn remove_all_drops() {
        let count = SpyCount::zero();

        let mut list: ArrayList<_> = (0..5).map(|i| SpyElement::new(&count, i)).collect();
        assert_eq!(5, count.get());

        list.clear().unwrap();
        assert_eq!(0, count.get());
    }

    #[test]
    fn remove_drops_every_occurrence() {
        let count = SpyCount::zero();

        let mut list: ArrayList<_> = [1, 2, 1].iter().map(|&i| SpyElement::new(&count, i)).collect();
        let needle = SpyElement::new(&count, 1);
        assert_eq!(4, count.get());

        assert_eq!(Ok(true), list.remove(&needle));
        assert_eq!(2, count.get());
    }

    #[test]
    fn reverse_bumps_generation() {
        let mut list = ArrayList::from_slice(&[1, 2, 3]);
        let generation = list.generation();

        list.reverse().unwrap();

        assert_eq!(vec![3, 2, 1], list.to_array().unwrap());
        assert_eq!(generation + 1, list.generation());
    }

    #[test]
    fn compress_is_noop_when_compact() {
        let mut list = ArrayList::from_slice(&[1, 2, 3]);
        let generation = list.generation();

        list.compress().unwrap();

        assert_eq!(generation, list.generation());
    }

    #[test]
    fn equals_empty_underflow() {
        let one: ArrayList<i32> = ArrayList::new();
        let two: ArrayList<i32> = ArrayList::new();

        assert_eq!(Err(Failure::Underflow), one.equals(&two));
    }

    #[test]
    fn equals_range_checks() {
        let one = ArrayList::from_slice(&[1, 2, 3, 4]);
        let two = ArrayList::from_slice(&[0, 2, 3]);

        assert_eq!(Ok(true), one.equals_range(&two, 1, 3));
        assert_eq!(Ok(false), one.equals_range(&two, 0, 2));
        assert_eq!(Err(Failure::OutOfBounds), one.equals_range(&two, 2, 1));
        assert_eq!(Err(Failure::OutOfBounds), one.equals_range(&two, 1, 4));
    }

    #[test]
    fn equivalence_unordered() {
        let one = ArrayList::from_slice(&[1, 2, 3]);

        assert_eq!(Ok(true), one.equivalence(&ArrayList::from_slice(&[3, 1, 2])));
        assert_eq!(Ok(false), one.equivalence(&ArrayList::from_slice(&[3, 1])));
        assert_eq!(Ok(false), one.equivalence(&ArrayList::from_slice(&[3, 1, 4])));
        assert_eq!(Err(Failure::Underflow), one.equivalence(&ArrayList::new()));
    }

    #[test]
    fn merge_capacity_sum() {
        let one = ArrayList::from_slice(&[1, 2]);
        let two = ArrayList::from_slice(&[3, 4]);

        let merged = one.merge(&two).unwrap();

        assert_eq!(4, merged.active_size());
        assert_eq!(32, merged.max_capacity());
        assert_eq!(vec![3, 4, 1, 2], merged.to_array().unwrap());
    }

    #[test]
    fn merge_ranges() {
        let one = ArrayList::from_slice(&[1, 2]);
        let two = ArrayList::from_slice(&[3, 4, 5, 6]);

        let merged = one.merge_from(&two, 2).unwrap();
        assert_eq!(vec![5, 6, 1, 2], merged.to_array().unwrap());
        assert_eq!(30, merged.max_capacity());

        let merged = one.merge_range(&two, 1, 2).unwrap();
        assert_eq!(vec![4, 1, 2], merged.to_array().unwrap());
        assert_eq!(31, merged.max_capacity());

        assert_eq!(Some(Failure::Underflow), one.merge(&ArrayList::new()).err());
        assert_eq!(Some(Failure::Underflow), one.merge_from(&two, 4).err());
        assert_eq!(Some(Failure::OutOfBounds), one.merge_from(&two, 5).err());
        assert_eq!(Some(Failure::OutOfBounds), one.merge_range(&two, 3, 2).err());
    }

    #[test]
    fn merge_grows_when_loaded() {
        let one = ArrayList::from_list(&ArrayList::from_slice(&[1, 2, 3]), 3).unwrap();
        let two = ArrayList::from_list(&ArrayList::from_slice(&[4, 5, 6]), 3).unwrap();

        let merged = one.merge(&two).unwrap();

        assert_eq!(6, merged.active_size());
        assert!(!merged.policy().should_grow(merged.active_size(), merged.max_capacity()));
    }

    #[test]
    fn cursor_fail_fast() {
        let mut list = ArrayList::from_slice(&[1, 2, 3]);
        let mut cursor = list.cursor();

        assert_eq!(Some(&1), list.cursor_next(&mut cursor));
        assert_eq!(Some(&2), list.cursor_next(&mut cursor));

        list.add(4);

        //  Stepping does not check the generation.
        assert!(list.cursor_has_next(&cursor));
        assert_eq!(CursorState::Stale, list.cursor_state(&cursor));

        assert_eq!(Err(Failure::ConcurrentModification), list.cursor_remove(&mut cursor));
        assert_eq!(0, cursor.position());
        assert_eq!(vec![1, 2, 3, 4], list.to_array().unwrap());

        //  The reset cursor is usable again.
        assert_eq!(Some(&1), list.cursor_next(&mut cursor));
        assert_eq!(Ok(1), list.cursor_remove(&mut cursor));
        assert_eq!(vec![2, 3, 4], list.to_array().unwrap());
    }

    #[test]
    fn cursor_remove_through_shrink() {
        let mut list: ArrayList<_> = (0..13).collect();
        assert_eq!(25, list.max_capacity());

        let mut cursor = list.cursor();
        while list.cursor_next(&mut cursor).is_some() {
            list.cursor_remove(&mut cursor).unwrap();
        }

        assert!(list.is_empty());
        assert_eq!(16, list.max_capacity());
        assert_eq!(CursorState::Valid, list.cursor_state(&cursor));
    }

    #[test]
    fn nature_dispatch() {
        let list: ArrayList<i32> = ArrayList::new();
        let list: &dyn RandomAccessList<i32> = &list;

        assert_eq!(Nature::Mutable, list.nature());
        assert!(list.is_mutable());
        assert!(!list.is_thread_safe());
    }

    #[test]
    fn trait_add_all() {
        let mut list = ArrayList::new();

        RandomAccessList::add_all(&mut list, 0..20).unwrap();

        assert_eq!(20, list.active_size());
        assert_bounded(&list);
    }
}
