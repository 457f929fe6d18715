//! The slot storage shared by the single-threaded lists.
//!
//! `Slots` holds the elements, the number of active elements and the generation, and implements every algorithm
//! which does not depend on whether the list may grow. The lists layer their own capacity management on top.

use std::{fmt, iter, slice};

use super::cursor::{Cursor, CursorState};
use super::failure::{Failure, Result};

//  Slots
//
//  Invariants:
//
//  -   `slots.len()` is the capacity.
//  -   `active <= slots.len()`.
//  -   `slots[..active]` are all `Some`, `slots[active..]` are all `None`, outside of the middle of an operation.
//  -   `generation` is bumped by every structural modification.
#[derive(Clone)]
pub(crate) struct Slots<T> {
    slots: Vec<Option<T>>,
    active: usize,
    generation: u64,
}

impl<T> Slots<T> {
    //  Creates an instance with `capacity` empty slots.
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = iter::repeat_with(|| None).take(capacity).collect();

        Self { slots, active: 0, generation: 0 }
    }

    //  Creates an instance with `capacity` slots, filled from `items`.
    //
    //  Fails with `Overflow` if `items` does not fit.
    pub fn from_items<I>(items: I, capacity: usize) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut result = Self::with_capacity(capacity);

        for item in items {
            if result.is_full() {
                return Err(Failure::Overflow);
            }

            result.push(item);
        }

        Ok(result)
    }

    //  Creates an instance holding `items`, with `capacity` slots or just enough for `items` if larger.
    pub fn from_vec(items: Vec<T>, capacity: usize) -> Self {
        let active = items.len();
        let slots = items.into_iter().map(Some).chain(iter::repeat_with(|| None)).take(capacity.max(active)).collect();

        Self { slots, active, generation: 0 }
    }

    //  Returns the number of active elements.
    pub fn len(&self) -> usize { self.active }

    //  Returns the number of slots.
    pub fn capacity(&self) -> usize { self.slots.len() }

    //  Returns whether there is no active element.
    pub fn is_empty(&self) -> bool { self.active == 0 }

    //  Returns whether all slots are occupied.
    pub fn is_full(&self) -> bool { self.active == self.slots.len() }

    //  Returns the current generation.
    pub fn generation(&self) -> u64 { self.generation }

    //  Returns a reference to the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.active {
            return Err(Failure::OutOfBounds);
        }

        self.slots[index].as_ref().ok_or(Failure::OutOfBounds)
    }

    //  Returns an iterator over the active elements.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.slots[..self.active].iter() }
    }

    //  Consumes the instance, returning the active elements in order.
    pub fn into_items(self) -> impl Iterator<Item = T> {
        self.slots.into_iter().flatten()
    }

    //  Appends an element.
    //
    //  The caller is responsible for ensuring a free slot exists.
    pub fn push(&mut self, item: T) {
        debug_assert!(!self.is_full());

        self.slots[self.active] = Some(item);
        self.active += 1;
        self.bump();
    }

    //  Inserts an element at `index`.
    //
    //  The caller is responsible for ensuring a free slot exists.
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        if index > self.active {
            return Err(Failure::OutOfBounds);
        }

        debug_assert!(!self.is_full());

        //  The free slot at `active` receives the item, then rotates into place.
        self.slots[self.active] = Some(item);
        self.slots[index..=self.active].rotate_right(1);

        self.active += 1;
        self.bump();

        Ok(())
    }

    //  Removes all occurrences of `item`, returns the number of occurrences removed.
    pub fn remove_item(&mut self, item: &T) -> usize
    where
        T: PartialEq,
    {
        //  Comparisons may panic: all are performed before any slot is touched.
        let matches: Vec<usize> = (0..self.active).filter(|&index| self.slots[index].as_ref() == Some(item)).collect();

        let removed = matches.len();

        for index in matches {
            self.slots[index] = None;
            self.bump();
        }

        if removed > 0 {
            self.compact();
            debug_assert_eq!(self.active, self.slots[..self.active].iter().filter(|s| s.is_some()).count());
        }

        removed
    }

    //  Removes the element at `index`, if the slot is occupied.
    pub fn remove_at(&mut self, index: usize) -> Result<Option<T>> {
        if index >= self.active {
            return Err(Failure::OutOfBounds);
        }

        let removed = self.slots[index].take();

        if removed.is_some() {
            self.compact();
            self.bump();
        }

        Ok(removed)
    }

    //  Moves all occupied slots within `[0, active)` to the front, preserving their order, then sets `active` to the
    //  number of occupied slots.
    //
    //  Returns whether any slot moved.
    pub fn compact(&mut self) -> bool {
        let mut write = 0;
        let mut moved = false;

        for read in 0..self.active {
            if self.slots[read].is_some() {
                if read != write {
                    self.slots.swap(read, write);
                    moved = true;
                }
                write += 1;
            }
        }

        self.active = write;

        moved
    }

    //  Reverses the active elements.
    pub fn reverse(&mut self) {
        self.slots[..self.active].reverse();
        self.bump();
    }

    //  Empties all slots, returns whether any element was removed.
    pub fn clear(&mut self) -> bool {
        if self.active == 0 {
            return false;
        }

        let active = self.active;

        //  Elements may panic on drop; the instance is consistent beforehand.
        self.active = 0;
        self.bump();

        for slot in &mut self.slots[..active] {
            *slot = None;
        }

        true
    }

    //  Changes the number of slots.
    //
    //  The caller is responsible for ensuring `capacity >= self.len()`.
    pub fn resize(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.active);

        if capacity == self.slots.len() {
            return;
        }

        let mut slots: Vec<Option<T>> = Vec::with_capacity(capacity);
        slots.extend(self.slots.drain(..self.active));
        slots.resize_with(capacity, || None);

        self.slots = slots;
        self.bump();
    }

    //  Increments the generation.
    pub fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    //  Returns whether `item` is contained.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|e| e == item)
    }

    //  Returns the index of the first occurrence of `item`.
    pub fn first_index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|e| e == item)
    }

    //  Returns the index of the last occurrence of `item`, scanning down to index 0 included.
    pub fn last_index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().rposition(|e| e == item)
    }

    //  Returns a copy of the elements within `[start, end)`.
    pub fn to_array_range(&self, start: usize, end: usize) -> Result<Vec<T>>
    where
        T: Clone,
    {
        if self.is_empty() {
            return Err(Failure::Underflow);
        }

        check_range(start, end, self.active)?;

        Ok(self.iter().skip(start).take(end - start).cloned().collect())
    }

    //  Compares two instances, in order.
    pub fn equals(&self, other: &Self) -> Result<bool>
    where
        T: PartialEq,
    {
        if self.active != other.active {
            return Ok(false);
        }

        if self.is_empty() {
            return Err(Failure::Underflow);
        }

        Ok(self.iter().eq(other.iter()))
    }

    //  Compares two instances within `[start, end)`, in order.
    pub fn equals_range(&self, other: &Self, start: usize, end: usize) -> Result<bool>
    where
        T: PartialEq,
    {
        check_range(start, end, self.active.min(other.active))?;

        let length = end - start;

        Ok(self.iter().skip(start).take(length).eq(other.iter().skip(start).take(length)))
    }

    //  Returns whether both instances have the same size, and `self` contains every element of `other`.
    pub fn equivalence(&self, other: &Self) -> Result<bool>
    where
        T: PartialEq,
    {
        if self.is_empty() || other.is_empty() {
            return Err(Failure::Underflow);
        }

        Ok(self.active == other.active && other.iter().all(|e| self.contains(e)))
    }

    //  Creates a new instance holding `other[start..end]` followed by the elements of `self`.
    //
    //  The capacity of the result is the sum of both capacities, minus `start`.
    pub fn merged(&self, other: &Self, start: usize, end: usize) -> Result<Self>
    where
        T: Clone,
    {
        check_range(start, end, other.active)?;

        //  `start <= other.active <= other.capacity()`.
        let capacity = self.capacity().checked_add(other.capacity() - start).ok_or(Failure::Overflow)?;

        let items = other.iter().skip(start).take(end - start).chain(self.iter()).cloned();

        let result = Self::from_items(items, capacity);
        debug_assert!(result.is_ok());

        result
    }

    //  Creates a cursor at the start of the instance.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.generation)
    }

    //  Returns the state of `cursor` relative to this instance.
    pub fn cursor_state(&self, cursor: &Cursor) -> CursorState {
        if cursor.generation() == self.generation {
            CursorState::Valid
        } else {
            CursorState::Stale
        }
    }

    //  Returns whether `cursor` has an element to yield.
    //
    //  Does not check staleness.
    pub fn cursor_has_next(&self, cursor: &Cursor) -> bool {
        cursor.position() < self.active
    }

    //  Advances `cursor`, returning the element it steps over.
    //
    //  Does not check staleness.
    pub fn cursor_next(&self, cursor: &mut Cursor) -> Option<&T> {
        let index = cursor.position();

        if index >= self.active {
            return None;
        }

        cursor.step(index);

        self.slots[index].as_ref()
    }

    //  Removes the element last returned by `cursor_next`.
    //
    //  On staleness, resets the cursor and fails with `ConcurrentModification`.
    pub fn cursor_remove(&mut self, cursor: &mut Cursor) -> Result<T> {
        if self.cursor_state(cursor) == CursorState::Stale {
            cursor.reset(self.generation);
            return Err(Failure::ConcurrentModification);
        }

        let index = cursor.take_current().ok_or(Failure::OutOfBounds)?;
        let removed = self.remove_at(index)?.ok_or(Failure::OutOfBounds)?;

        cursor.rewind(index, self.generation);

        Ok(removed)
    }

    //  Formats the instance for `Debug`.
    pub fn debug(&self, name: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        T: fmt::Debug,
    {
        f.debug_struct(name)
            .field("capacity", &self.capacity())
            .field("length", &self.active)
            .field("elements", &DebugElements(self))
            .finish()
    }
}

impl<T: PartialEq> PartialEq for Slots<T> {
    fn eq(&self, other: &Self) -> bool { self.iter().eq(other.iter()) }
}

//  Checks that `[start, end)` is a non-empty range within `[0, length)`.
pub(crate) fn check_range(start: usize, end: usize, length: usize) -> Result<()> {
    if start > end || end > length {
        return Err(Failure::OutOfBounds);
    }

    if start == end {
        return Err(Failure::Underflow);
    }

    Ok(())
}

/// `Iter`
///
/// An iterator over the elements of a single-threaded list, in order.
pub struct Iter<'a, T> {
    inner: slice::Iter<'a, Option<T>>,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self { Self { inner: self.inner.clone() } }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.by_ref().find_map(Option::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        //  All active slots are occupied.
        let length = self.inner.len();
        (length, Some(length))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.by_ref().rev().find_map(Option::as_ref)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> iter::FusedIterator for Iter<'a, T> {}

impl<'a, T: fmt::Debug> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

struct DebugElements<'a, T>(&'a Slots<T>);

impl<'a, T: fmt::Debug> fmt::Debug for DebugElements<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

#[cfg(test)]
mod tests {

use super::*;

use crate::utils::tester::*;

fn slots(items: &[i32], capacity: usize) -> Slots<i32> {
    Slots::from_items(items.iter().copied(), capacity).unwrap()
}

fn elements(slots: &Slots<i32>) -> Vec<i32> {
    slots.iter().copied().collect()
}

#[test]
fn from_items_overflow() {
    assert_eq!(Err(Failure::Overflow), Slots::from_items([1, 2, 3], 2).map(|s| s.len()));
}

#[test]
fn insert_shifts_right() {
    let mut s = slots(&[1, 2, 3], 8);

    s.insert(0, 0).unwrap();
    s.insert(2, 9).unwrap();
    s.insert(5, 4).unwrap();

    assert_eq!(vec![0, 1, 9, 2, 3, 4], elements(&s));
    assert_eq!(Err(Failure::OutOfBounds), s.insert(7, 7));
}

#[test]
fn remove_item_all_occurrences() {
    let mut s = slots(&[1, 2, 1, 3, 1], 8);
    let before = s.generation();

    assert_eq!(3, s.remove_item(&1));
    assert_eq!(vec![2, 3], elements(&s));
    assert_eq!(2, s.len());
    assert_eq!(before + 3, s.generation());

    assert_eq!(0, s.remove_item(&1));
    assert_eq!(before + 3, s.generation());
}

#[test]
fn remove_at_compacts() {
    let mut s = slots(&[1, 2, 3, 4], 8);

    assert_eq!(Ok(Some(2)), s.remove_at(1));
    assert_eq!(vec![1, 3, 4], elements(&s));
    assert_eq!(Err(Failure::OutOfBounds), s.remove_at(3));
}

#[test]
fn compact_reports_moves() {
    let mut s = slots(&[1, 2, 3], 4);
    assert!(!s.compact());
    assert_eq!(3, s.len());
}

#[test]
fn reverse_bumps_once() {
    let mut s = slots(&[1, 2, 3, 4, 5], 8);
    let before = s.generation();

    s.reverse();

    assert_eq!(vec![5, 4, 3, 2, 1], elements(&s));
    assert_eq!(before + 1, s.generation());
}

#[test]
fn clear_drops_elements() {
    let count = SpyCount::zero();

    let mut s = Slots::from_items((0..4).map(|i| SpyElement::new(&count, i)), 4).unwrap();
    assert_eq!(4, count.get());

    assert!(s.clear());
    assert_eq!(0, count.get());
    assert!(!s.clear());
}

#[test]
fn resize_preserves_elements() {
    let mut s = slots(&[1, 2, 3], 4);

    s.resize(10);
    assert_eq!(10, s.capacity());
    assert_eq!(vec![1, 2, 3], elements(&s));

    s.resize(3);
    assert_eq!(3, s.capacity());
    assert!(s.is_full());
    assert_eq!(vec![1, 2, 3], elements(&s));
}

#[test]
fn last_index_of_reaches_zero() {
    let s = slots(&[7, 1, 2], 4);

    assert_eq!(Some(0), s.last_index_of(&7));
    assert_eq!(Some(0), s.first_index_of(&7));
    assert_eq!(None, s.last_index_of(&9));
}

#[test]
fn to_array_range_bounds() {
    let s = slots(&[1, 2, 3], 4);

    assert_eq!(Ok(vec![2, 3]), s.to_array_range(1, 3));
    assert_eq!(Err(Failure::OutOfBounds), s.to_array_range(2, 1));
    assert_eq!(Err(Failure::OutOfBounds), s.to_array_range(0, 4));
    assert_eq!(Err(Failure::Underflow), s.to_array_range(1, 1));

    let empty = slots(&[], 4);
    assert_eq!(Err(Failure::Underflow), empty.to_array_range(0, 0));
}

#[test]
fn equals_sizes() {
    let one = slots(&[1, 2], 4);
    let two = slots(&[1, 2], 8);
    let three = slots(&[1], 4);
    let empty = slots(&[], 4);

    assert_eq!(Ok(true), one.equals(&two));
    assert_eq!(Ok(false), one.equals(&three));
    assert_eq!(Ok(false), one.equals(&empty));
    assert_eq!(Err(Failure::Underflow), empty.equals(&empty));
}

#[test]
fn equivalence_ignores_order() {
    let one = slots(&[1, 2, 2], 4);
    let two = slots(&[2, 1, 1], 4);
    let three = slots(&[2, 1], 4);

    assert_eq!(Ok(true), one.equivalence(&two));
    assert_eq!(Ok(false), one.equivalence(&three));
    assert_eq!(Err(Failure::Underflow), one.equivalence(&slots(&[], 4)));
}

#[test]
fn merged_capacity() {
    let one = slots(&[1, 2], 16);
    let two = slots(&[3, 4, 5], 16);

    let merged = one.merged(&two, 1, 3).unwrap();

    assert_eq!(vec![4, 5, 1, 2], elements(&merged));
    assert_eq!(31, merged.capacity());
}

#[test]
fn cursor_walk() {
    let s = slots(&[1, 2, 3], 4);
    let mut cursor = s.cursor();

    let mut seen = Vec::new();
    while s.cursor_has_next(&cursor) {
        seen.push(*s.cursor_next(&mut cursor).unwrap());
    }

    assert_eq!(vec![1, 2, 3], seen);
    assert_eq!(None, s.cursor_next(&mut cursor));
}

#[test]
fn cursor_remove_lock_step() {
    let mut s = slots(&[1, 2, 3, 4], 4);
    let mut cursor = s.cursor();

    while let Some(&e) = s.cursor_next(&mut cursor) {
        if e % 2 == 0 {
            assert_eq!(Ok(e), s.cursor_remove(&mut cursor));
        }
    }

    assert_eq!(vec![1, 3], elements(&s));
    assert_eq!(CursorState::Valid, s.cursor_state(&cursor));
}

#[test]
fn cursor_remove_stale() {
    let mut s = slots(&[1, 2, 3], 4);
    let mut cursor = s.cursor();

    s.cursor_next(&mut cursor);
    s.push(4);

    assert_eq!(CursorState::Stale, s.cursor_state(&cursor));
    assert_eq!(Err(Failure::ConcurrentModification), s.cursor_remove(&mut cursor));
    assert_eq!(0, cursor.position());
    assert_eq!(CursorState::Valid, s.cursor_state(&cursor));
}

#[test]
fn cursor_remove_without_next() {
    let mut s = slots(&[1], 4);
    let mut cursor = s.cursor();

    assert_eq!(Err(Failure::OutOfBounds), s.cursor_remove(&mut cursor));
}

#[test]
fn iter_double_ended() {
    let s = slots(&[1, 2, 3], 4);

    assert_eq!(3, s.iter().len());
    assert_eq!(vec![3, 2, 1], s.iter().rev().copied().collect::<Vec<_>>());
}

}
