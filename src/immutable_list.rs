//! #   The ImmutableList.
//!
//! An `ImmutableList` is a read-only copy of a list, taken at construction.
//!
//! Its inherent API only offers read accesses. Through `RandomAccessList`, every modification is refused with
//! `Failure::Immutable`, leaving the list untouched.
//!
//! ```
//! use golden_list::{FixedList, ImmutableList};
//! use golden_list::failure::Failure;
//! use golden_list::list::RandomAccessList;
//!
//! let fixed = FixedList::from_slice(&[1, 2, 3]);
//! let mut list = ImmutableList::from_fixed(&fixed);
//!
//! assert_eq!(Err(Failure::Immutable), list.try_add(4));
//! assert_eq!(Err(Failure::Immutable), list.reverse());
//!
//! assert_eq!(vec![1, 2, 3], list.to_array().unwrap());
//! ```

use std::{fmt, iter, ops};

use super::failure::{Failure, Result};
use super::fixed_list::FixedList;
use super::list::{Nature, RandomAccessList};
use super::slots::{Iter, Slots};

/// `ImmutableList`
pub struct ImmutableList<T> {
    slots: Slots<T>,
}

impl<T> ImmutableList<T> {
    /// Creates a copy of `list`, with the same capacity.
    pub fn from_fixed(list: &FixedList<T>) -> Self
    where
        T: Clone,
    {
        Self { slots: list.slots().clone() }
    }

    /// Creates a new instance holding a copy of `items`.
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        items.iter().cloned().collect()
    }

    /// Returns the number of elements.
    pub fn active_size(&self) -> usize { self.slots.len() }

    /// Returns the number of slots of the list this copy was taken from.
    pub fn max_capacity(&self) -> usize { self.slots.capacity() }

    /// Returns whether the list contains no element.
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    /// Returns the generation, which never changes.
    pub fn generation(&self) -> u64 { self.slots.generation() }

    /// Returns a reference to the element at `index`.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::OutOfBounds` if `index` is not less than `active_size()`.
    pub fn get(&self, index: usize) -> Result<&T> { self.slots.get(index) }

    /// Returns an iterator over the elements, in order.
    pub fn iter(&self) -> Iter<'_, T> { self.slots.iter() }

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
}

impl<T: Clone> Clone for ImmutableList<T> {
    fn clone(&self) -> Self { Self { slots: self.slots.clone() } }
}

impl<T: fmt::Debug> fmt::Debug for ImmutableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.slots.debug("ImmutableList", f)
    }
}

impl<T: PartialEq> PartialEq for ImmutableList<T> {
    fn eq(&self, other: &Self) -> bool { self.slots == other.slots }
}

impl<T: Clone> From<&FixedList<T>> for ImmutableList<T> {
    fn from(list: &FixedList<T>) -> Self { Self::from_fixed(list) }
}

impl<T> iter::FromIterator<T> for ImmutableList<T> {
    fn from_iter<C>(collection: C) -> Self
    where
        C: IntoIterator<Item = T>,
    {
        Self { slots: Slots::from_vec(collection.into_iter().collect(), 0) }
    }
}

impl<'a, T> iter::IntoIterator for &'a ImmutableList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

impl<T> ops::Index<usize> for ImmutableList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index).expect("Valid index")
    }
}

impl<T: Clone + PartialEq> RandomAccessList<T> for ImmutableList<T> {
    fn nature(&self) -> Nature { Nature::Immutable }

    fn active_size(&self) -> usize { ImmutableList::active_size(self) }

    fn max_capacity(&self) -> usize { ImmutableList::max_capacity(self) }

    fn try_add(&mut self, _: T) -> Result<()> { Err(Failure::Immutable) }

    fn try_insert(&mut self, _: usize, _: T) -> Result<()> { Err(Failure::Immutable) }

    fn remove(&mut self, _: &T) -> Result<bool> { Err(Failure::Immutable) }

    fn remove_at(&mut self, _: usize) -> Result<bool> { Err(Failure::Immutable) }

    fn get(&self, index: usize) -> Result<T> { ImmutableList::get(self, index).cloned() }

    fn contains(&self, item: &T) -> bool { ImmutableList::contains(self, item) }

    fn first_index_of(&self, item: &T) -> Option<usize> { ImmutableList::first_index_of(self, item) }

    fn last_index_of(&self, item: &T) -> Option<usize> { ImmutableList::last_index_of(self, item) }

    fn to_array(&self) -> Result<Vec<T>> { ImmutableList::to_array(self) }

    fn iterator(&self) -> Box<dyn Iterator<Item = T> + '_> { Box::new(self.iter().cloned()) }

    fn to_array_from(&self, start: usize) -> Result<Vec<T>> { ImmutableList::to_array_from(self, start) }

    fn to_array_range(&self, start: usize, end: usize) -> Result<Vec<T>> {
        ImmutableList::to_array_range(self, start, end)
    }

    fn reverse(&mut self) -> Result<()> { Err(Failure::Immutable) }

    fn remove_all(&mut self) -> Result<bool> { Err(Failure::Immutable) }

    fn clear(&mut self) -> Result<()> { Err(Failure::Immutable) }

    fn compress(&mut self) -> Result<()> { Err(Failure::Immutable) }

    fn grow(&mut self) -> Result<()> { Err(Failure::Immutable) }

    fn shrink(&mut self) -> Result<()> { Err(Failure::Immutable) }

    //  Refuses up-front, rather than on the first item.
    fn add_all<I>(&mut self, _: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        Err(Failure::Immutable)
    }

    fn equals(&self, other: &Self) -> Result<bool> { ImmutableList::equals(self, other) }

    fn equals_range(&self, other: &Self, start: usize, end: usize) -> Result<bool> {
        ImmutableList::equals_range(self, other, start, end)
    }

    fn equivalence(&self, other: &Self) -> Result<bool> { ImmutableList::equivalence(self, other) }

    fn merge(&self, _: &Self) -> Result<Self> { Err(Failure::Immutable) }

    fn merge_from(&self, _: &Self, _: usize) -> Result<Self> { Err(Failure::Immutable) }

    fn merge_range(&self, _: &Self, _: usize, _: usize) -> Result<Self> { Err(Failure::Immutable) }
}
