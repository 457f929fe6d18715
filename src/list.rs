//! The common contract of all lists.
//!
//! Each list of this library is one of a small closed set of natures, which determines which operations it accepts.
//! The `RandomAccessList` trait exposes the operations shared by all of them, so that code can be written once
//! against any list.
//!
//! ```
//! use golden_list::list::{Nature, RandomAccessList};
//! use golden_list::{ArrayList, ConcurrentList, FixedList, ImmutableList};
//!
//! let lists: Vec<Box<dyn RandomAccessList<i32>>> = vec![
//!     Box::new(ArrayList::from_slice(&[1, 2, 3])),
//!     Box::new(FixedList::from_slice(&[1, 2, 3])),
//!     Box::new(ImmutableList::from_slice(&[1, 2, 3])),
//!     Box::new(ConcurrentList::from_slice(&[1, 2, 3])),
//! ];
//!
//! let natures: Vec<_> = lists.iter().map(|l| l.nature()).collect();
//! assert_eq!(vec![Nature::Mutable, Nature::FixedLength, Nature::Immutable, Nature::ThreadSafe], natures);
//!
//! for list in &lists {
//!     assert_eq!(Ok(2), list.get(1));
//!     assert_eq!(Some(2), list.last_index_of(&3));
//!     assert_eq!(6, list.iterator().sum::<i32>());
//! }
//! ```

use super::failure::Result;

/// The nature of a list.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Nature {
    /// Growable, single-threaded.
    Mutable,
    /// Fixed capacity, single-threaded.
    FixedLength,
    /// Read-only.
    Immutable,
    /// Growable, shareable across threads.
    ThreadSafe,
}

impl Nature {
    /// Returns whether lists of this nature accept modifications.
    pub fn is_mutable(self) -> bool {
        !matches!(self, Nature::Immutable)
    }

    /// Returns whether lists of this nature may be shared across threads, and modified concurrently.
    pub fn is_thread_safe(self) -> bool {
        matches!(self, Nature::ThreadSafe)
    }

    /// Returns whether lists of this nature may change capacity after construction.
    pub fn is_resizable(self) -> bool {
        matches!(self, Nature::Mutable | Nature::ThreadSafe)
    }
}

/// `RandomAccessList`
///
/// The operations shared by all lists.
///
/// Operations which a given nature of list refuses fail, rather than being absent, so that the trait can be used as
/// a trait object.
///
/// Ranges are half-open: `start` is included and `end` is excluded.
pub trait RandomAccessList<T> {
    /// Returns the nature of the list.
    fn nature(&self) -> Nature;

    /// Returns whether the list accepts modifications.
    fn is_mutable(&self) -> bool { self.nature().is_mutable() }

    /// Returns whether the list may be shared across threads.
    fn is_thread_safe(&self) -> bool { self.nature().is_thread_safe() }

    /// Returns the number of elements.
    fn active_size(&self) -> usize;

    /// Returns the number of slots currently allocated.
    fn max_capacity(&self) -> usize;

    /// Returns whether the list contains no element.
    fn is_empty(&self) -> bool { self.active_size() == 0 }

    /// Appends an element.
    fn try_add(&mut self, item: T) -> Result<()>;

    /// Inserts an element at `index`, shifting the subsequent elements to the right.
    fn try_insert(&mut self, index: usize, item: T) -> Result<()>;

    /// Removes all occurrences of `item`, returns whether any was found.
    fn remove(&mut self, item: &T) -> Result<bool>;

    /// Removes the element at `index`, returns whether a element was removed.
    fn remove_at(&mut self, index: usize) -> Result<bool>;

    /// Returns a copy of the element at `index`.
    fn get(&self, index: usize) -> Result<T>;

    /// Returns whether `item` is contained in the list.
    fn contains(&self, item: &T) -> bool;

    /// Returns the index of the first occurrence of `item`, if any.
    fn first_index_of(&self, item: &T) -> Option<usize>;

    /// Returns the index of the last occurrence of `item`, if any.
    fn last_index_of(&self, item: &T) -> Option<usize>;

    /// Returns a copy of all the elements.
    fn to_array(&self) -> Result<Vec<T>>;

    /// Returns a copy of the elements from `start` onwards.
    fn to_array_from(&self, start: usize) -> Result<Vec<T>>;

    /// Returns a copy of the elements in `[start, end)`.
    fn to_array_range(&self, start: usize, end: usize) -> Result<Vec<T>>;

    /// Returns an iterator over copies of the elements, in order.
    fn iterator(&self) -> Box<dyn Iterator<Item = T> + '_>;

    /// Reverses the order of the elements.
    fn reverse(&mut self) -> Result<()>;

    /// Removes all elements, returns whether any element was removed.
    fn remove_all(&mut self) -> Result<bool>;

    /// Removes all elements.
    fn clear(&mut self) -> Result<()> { self.remove_all().map(|_| ()) }

    /// Moves all elements to the front of the storage.
    fn compress(&mut self) -> Result<()>;

    /// Grows the capacity by one step of the capacity policy.
    fn grow(&mut self) -> Result<()>;

    /// Shrinks the capacity by one step of the capacity policy.
    fn shrink(&mut self) -> Result<()>;

    /// Appends all elements of `items`, in order.
    fn add_all<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        items.into_iter().try_for_each(|item| self.try_add(item))
    }

    /// Compares the elements of two lists, in order.
    fn equals(&self, other: &Self) -> Result<bool>
    where
        Self: Sized;

    /// Compares the elements of two lists within `[start, end)`, in order.
    fn equals_range(&self, other: &Self, start: usize, end: usize) -> Result<bool>
    where
        Self: Sized;

    /// Returns whether both lists have the same size and this list contains every element of `other`.
    fn equivalence(&self, other: &Self) -> Result<bool>
    where
        Self: Sized;

    /// Creates a new list made of the elements of `other`, followed by those of `self`.
    fn merge(&self, other: &Self) -> Result<Self>
    where
        Self: Sized;

    /// Creates a new list made of the elements of `other` from `start`, followed by those of `self`.
    fn merge_from(&self, other: &Self, start: usize) -> Result<Self>
    where
        Self: Sized;

    /// Creates a new list made of the elements of `other` within `[start, end)`, followed by those of `self`.
    fn merge_range(&self, other: &Self, start: usize, end: usize) -> Result<Self>
    where
        Self: Sized;
}
