//! #   The FixedList.
//!
//! The `FixedList` is a single-threaded list whose capacity is set in stone at construction.
//!
//! It shares its storage, and its fail-fast `Cursor`, with the `ArrayList`, however:
//!
//! -   Inserting into a full `FixedList` fails with `Failure::Overflow`.
//! -   Explicitly growing or shrinking a `FixedList` fails with `Failure::Unsupported`.
//!
//! ```
//! use golden_list::FixedList;
//! use golden_list::failure::Failure;
//!
//! let mut list = FixedList::with_capacity(2);
//! list.add(1);
//! list.add(2);
//!
//! assert_eq!(Err(Failure::Overflow), list.try_add(3));
//! assert_eq!(Err(Failure::Unsupported), list.grow());
//!
//! list.remove(&1).unwrap();
//! assert_eq!(Ok(()), list.try_add(3));
//! assert_eq!(vec![2, 3], list.to_array().unwrap());
//! ```

use std::{fmt, iter, ops};

use super::capacity::DEFAULT_CAPACITY;
use super::cursor::{Cursor, CursorState};
use super::failure::{panic_from_failure, Failure, Result};
use super::list::{Nature, RandomAccessList};
use super::slots::{Iter, Slots};

/// `FixedList`
pub struct FixedList<T> {
    slots: Slots<T>,
}

impl<T> FixedList<T> {
    /// Creates a new, empty, instance with the default capacity of 16.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a new, empty, instance with exactly `capacity` slots.
    ///
    /// A `FixedList` of capacity 0 is always full.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { slots: Slots::with_capacity(capacity) }
    }

    /// Creates a new instance with exactly `capacity` slots, holding a copy of the elements of `other`.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::Overflow` if `capacity` is less than the number of elements of `other`.
    pub fn from_list(other: &Self, capacity: usize) -> Result<Self>
    where
        T: Clone,
    {
        Self::from_items(other.iter().cloned(), capacity)
    }

    /// Creates a new instance with exactly `capacity` slots, holding `items`.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::Overflow` if `items` do not fit.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::FixedList;
    /// #   use golden_list::failure::Failure;
    /// let list = FixedList::from_items(0..3, 4).unwrap();
    /// assert_eq!(3, list.active_size());
    /// assert_eq!(4, list.max_capacity());
    ///
    /// assert_eq!(Some(Failure::Overflow), FixedList::from_items(0..5, 4).err());
    /// ```
    pub fn from_items<I>(items: I, capacity: usize) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Ok(Self { slots: Slots::from_items(items, capacity)? })
    }

    /// Creates a new, full, instance holding a copy of `items`.
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        Self { slots: Slots::from_vec(items.to_vec(), items.len()) }
    }

    /// Creates a new, full, instance from a sequence of possibly absent values.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::NullItem` if any value is absent.
    pub fn from_slots<I>(slots: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<T>>,
    {
        let items: Vec<T> = slots.into_iter().collect::<Option<_>>().ok_or(Failure::NullItem)?;
        let capacity = items.len();

        Self::from_items(items, capacity)
    }

    /// Returns the number of elements.
    pub fn active_size(&self) -> usize { self.slots.len() }

    /// Returns the number of slots, fixed at construction.
    pub fn max_capacity(&self) -> usize { self.slots.capacity() }

    /// Returns whether the list contains no element.
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    /// Returns whether the list cannot accept any further element.
    pub fn is_full(&self) -> bool { self.slots.is_full() }

    /// Returns the generation, incremented on every structural modification.
    pub fn generation(&self) -> u64 { self.slots.generation() }

    /// Returns a reference to the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T> { self.slots.get(index) }

    /// Returns an iterator over the elements, in order.
    pub fn iter(&self) -> Iter<'_, T> { self.slots.iter() }

    /// Appends an element.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::Overflow` if the list is full.
    pub fn try_add(&mut self, item: T) -> Result<()> {
        if self.slots.is_full() {
            return Err(Failure::Overflow);
        }

        self.slots.push(item);

        Ok(())
    }

    /// Appends an element.
    ///
    /// #   Panics
    ///
    /// Panics if the list is full.
    pub fn add(&mut self, item: T) {
        self.try_add(item).unwrap_or_else(panic_from_failure);
    }

    /// Inserts an element at `index`, shifting all subsequent elements to the right.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::OutOfBounds` if `index` is greater than `active_size()`, and `Failure::Overflow` if the list
    /// is full.
    pub fn try_insert(&mut self, index: usize, item: T) -> Result<()> {
        if index > self.slots.len() {
            return Err(Failure::OutOfBounds);
        }

        if self.slots.is_full() {
            return Err(Failure::Overflow);
        }

        self.slots.insert(index, item)
    }

    /// Inserts an element at `index`.
    ///
    /// #   Panics
    ///
    /// Panics if `index` is greater than `active_size()`, or if the list is full.
    pub fn insert(&mut self, index: usize, item: T) {
        self.try_insert(index, item).unwrap_or_else(panic_from_failure);
    }

    /// Appends all elements of `items`, stopping at the first failure.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::Overflow` if the list fills up; the elements appended until then are kept.
    pub fn add_all<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        items.into_iter().try_for_each(|item| self.try_add(item))
    }

    /// Removes all occurrences of `item`, returns whether any was found.
    pub fn remove(&mut self, item: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        Ok(self.slots.remove_item(item) > 0)
    }

    /// Removes the element at `index`, shifting all subsequent elements to the left.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::OutOfBounds` if `index` is not less than `active_size()`.
    pub fn remove_at(&mut self, index: usize) -> Result<bool> {
        Ok(self.slots.remove_at(index)?.is_some())
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
    pub fn last_index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.slots.last_index_of(item)
    }

    /// Returns a copy of all the elements.
    pub fn to_array(&self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.slots.to_array_range(0, self.slots.len())
    }

    /// Returns a copy of the elements from `start` onwards.
    pub fn to_array_from(&self, start: usize) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.slots.to_array_range(start, self.slots.len())
    }

    /// Returns a copy of the elements within `[start, end)`.
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

    /// Removes all elements, returns `false` if the list was already empty.
    ///
    /// The capacity is unaffected.
    pub fn remove_all(&mut self) -> Result<bool> {
        Ok(self.slots.clear())
    }

    /// Removes all elements.
    pub fn clear(&mut self) -> Result<()> {
        self.remove_all().map(|_| ())
    }

    /// Moves all elements to the front of the storage.
    pub fn compress(&mut self) -> Result<()> {
        if self.slots.compact() {
            self.slots.bump();
        }

        Ok(())
    }

    /// Always fails with `Failure::Unsupported`: the capacity is fixed.
    pub fn grow(&mut self) -> Result<()> {
        Err(Failure::Unsupported)
    }

    /// Always fails with `Failure::Unsupported`: the capacity is fixed.
    pub fn shrink(&mut self) -> Result<()> {
        Err(Failure::Unsupported)
    }

    /// Compares the elements of both lists, in order.
    pub fn equals(&self, other: &Self) -> Result<bool>
    where
        T: PartialEq,
    {
        self.slots.equals(&other.slots)
    }

    /// Compares the elements of both lists within `[start, end)`, in order.
    pub fn equals_range(&self, other: &Self, start: usize, end: usize) -> Result<bool>
    where
        T: PartialEq,
    {
        self.slots.equals_range(&other.slots, start, end)
    }

    /// Returns whether both lists have the same size, and this list contains every element of `other`.
    pub fn equivalence(&self, other: &Self) -> Result<bool>
    where
        T: PartialEq,
    {
        self.slots.equivalence(&other.slots)
    }

    /// Creates a new list made of the elements of `other`, followed by those of `self`.
    ///
    /// The capacity of the new list is the sum of both capacities.
    pub fn merge(&self, other: &Self) -> Result<Self>
    where
        T: Clone,
    {
        self.merge_range(other, 0, other.active_size())
    }

    /// Creates a new list made of the elements of `other` from `start` onwards, followed by those of `self`.
    pub fn merge_from(&self, other: &Self, start: usize) -> Result<Self>
    where
        T: Clone,
    {
        self.merge_range(other, start, other.active_size())
    }

    /// Creates a new list made of the elements of `other` within `[start, end)`, followed by those of `self`.
    ///
    /// The capacity of the new list is the sum of both capacities, minus `start`, which is always sufficient.
    pub fn merge_range(&self, other: &Self, start: usize, end: usize) -> Result<Self>
    where
        T: Clone,
    {
        Ok(Self { slots: self.slots.merged(&other.slots, start, end)? })
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
    /// See `ArrayList::cursor_remove`.
    pub fn cursor_remove(&mut self, cursor: &mut Cursor) -> Result<T> {
        self.slots.cursor_remove(cursor)
    }

    //  Returns the storage, for the ImmutableList.
    pub(crate) fn slots(&self) -> &Slots<T> { &self.slots }
}

impl<T: Clone> Clone for FixedList<T> {
    fn clone(&self) -> Self { Self { slots: self.slots.clone() } }
}

impl<T> Default for FixedList<T> {
    fn default() -> Self { Self::new() }
}

impl<T: fmt::Debug> fmt::Debug for FixedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.slots.debug("FixedList", f)
    }
}

impl<T: PartialEq> PartialEq for FixedList<T> {
    fn eq(&self, other: &Self) -> bool { self.slots == other.slots }
}

/// Collects into a full `FixedList`.
impl<T> iter::FromIterator<T> for FixedList<T> {
    fn from_iter<C>(collection: C) -> Self
    where
        C: IntoIterator<Item = T>,
    {
        Self { slots: Slots::from_vec(collection.into_iter().collect(), 0) }
    }
}

impl<'a, T> iter::IntoIterator for &'a FixedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

impl<T> ops::Index<usize> for FixedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index).expect("Valid index")
    }
}

impl<T: Clone + PartialEq> RandomAccessList<T> for FixedList<T> {
    fn nature(&self) -> Nature { Nature::FixedLength }

    fn active_size(&self) -> usize { FixedList::active_size(self) }

    fn max_capacity(&self) -> usize { FixedList::max_capacity(self) }

    fn try_add(&mut self, item: T) -> Result<()> { FixedList::try_add(self, item) }

    fn try_insert(&mut self, index: usize, item: T) -> Result<()> { FixedList::try_insert(self, index, item) }

    fn remove(&mut self, item: &T) -> Result<bool> { FixedList::remove(self, item) }

    fn remove_at(&mut self, index: usize) -> Result<bool> { FixedList::remove_at(self, index) }

    fn get(&self, index: usize) -> Result<T> { FixedList::get(self, index).cloned() }

    fn contains(&self, item: &T) -> bool { FixedList::contains(self, item) }

    fn first_index_of(&self, item: &T) -> Option<usize> { FixedList::first_index_of(self, item) }

    fn last_index_of(&self, item: &T) -> Option<usize> { FixedList::last_index_of(self, item) }

    fn to_array(&self) -> Result<Vec<T>> { FixedList::to_array(self) }

    fn iterator(&self) -> Box<dyn Iterator<Item = T> + '_> { Box::new(self.iter().cloned()) }

    fn to_array_from(&self, start: usize) -> Result<Vec<T>> { FixedList::to_array_from(self, start) }

    fn to_array_range(&self, start: usize, end: usize) -> Result<Vec<T>> {
        FixedList::to_array_range(self, start, end)
    }

    fn reverse(&mut self) -> Result<()> { FixedList::reverse(self) }

    fn remove_all(&mut self) -> Result<bool> { FixedList::remove_all(self) }

    fn compress(&mut self) -> Result<()> { FixedList::compress(self) }

    fn grow(&mut self) -> Result<()> { FixedList::grow(self) }

    fn shrink(&mut self) -> Result<()> { FixedList::shrink(self) }

    fn add_all<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        FixedList::add_all(self, items)
    }

    fn equals(&self, other: &Self) -> Result<bool> { FixedList::equals(self, other) }

    fn equals_range(&self, other: &Self, start: usize, end: usize) -> Result<bool> {
        FixedList::equals_range(self, other, start, end)
    }

    fn equivalence(&self, other: &Self) -> Result<bool> { FixedList::equivalence(self, other) }

    fn merge(&self, other: &Self) -> Result<Self> { FixedList::merge(self, other) }

    fn merge_from(&self, other: &Self, start: usize) -> Result<Self> { FixedList::merge_from(self, other, start) }

    fn merge_range(&self, other: &Self, start: usize, end: usize) -> Result<Self> {
        FixedList::merge_range(self, other, start, end)
    }
}
