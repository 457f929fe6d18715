//! The fail-fast Cursor of the single-threaded lists.
//!
//! A `Cursor` is a detached position within an `ArrayList` or a `FixedList`: it does not borrow the list, and is
//! instead handed to the list on each step. As a result, the list may be modified while a cursor exists.
//!
//! The cursor remembers the generation of the list at the time it was created, and removal through the cursor is
//! only permitted as long as the list was not structurally modified by any other means since. Otherwise, the cursor
//! is reset to the start of the list and `Failure::ConcurrentModification` is returned.
//!
//! Stepping through the list with `cursor_has_next` and `cursor_next` does not check the generation.
//!
//! ```
//! use golden_list::ArrayList;
//! use golden_list::cursor::CursorState;
//! use golden_list::failure::Failure;
//!
//! let mut list: ArrayList<_> = [1, 2, 3, 4].iter().copied().collect();
//! let mut cursor = list.cursor();
//!
//! //  Removal through the cursor keeps it valid.
//! while let Some(&e) = list.cursor_next(&mut cursor) {
//!     if e % 2 == 0 {
//!         list.cursor_remove(&mut cursor).unwrap();
//!     }
//! }
//! assert_eq!(vec![1, 3], list.to_array().unwrap());
//! assert_eq!(CursorState::Valid, list.cursor_state(&cursor));
//!
//! //  Any other modification makes it stale.
//! list.add(5);
//! assert_eq!(CursorState::Stale, list.cursor_state(&cursor));
//!
//! assert_eq!(Err(Failure::ConcurrentModification), list.cursor_remove(&mut cursor));
//! assert_eq!(0, cursor.position());
//! assert_eq!(CursorState::Valid, list.cursor_state(&cursor));
//! ```

/// The state of a `Cursor`, relative to a list.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum CursorState {
    /// The list was not modified behind the cursor's back.
    Valid,
    /// The list was modified behind the cursor's back.
    ///
    /// The only way back to `Valid` is the reset performed by a failed `cursor_remove`.
    Stale,
}

/// `Cursor`
///
/// A fail-fast position within a single-threaded list.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Cursor {
    //  Index of the next element to yield.
    position: usize,
    //  Generation of the list the cursor is synchronized with.
    generation: u64,
    //  Index of the element last yielded, if it can be removed.
    current: Option<usize>,
}

impl Cursor {
    //  Creates a new instance, at the start of a list of the given generation.
    pub(crate) fn new(generation: u64) -> Self {
        Self { position: 0, generation, current: None }
    }

    /// Returns the index of the next element to yield.
    pub fn position(&self) -> usize { self.position }

    /// Returns the generation of the list the cursor is synchronized with.
    pub fn generation(&self) -> u64 { self.generation }

    //  Records that the element at `index` was yielded.
    pub(crate) fn step(&mut self, index: usize) {
        self.current = Some(index);
        self.position = index + 1;
    }

    //  Returns the removable element, if any, forgetting it.
    pub(crate) fn take_current(&mut self) -> Option<usize> {
        self.current.take()
    }

    //  Moves back to `index`, which now holds the element following the one removed.
    pub(crate) fn rewind(&mut self, index: usize, generation: u64) {
        self.position = index;
        self.generation = generation;
    }

    //  Follows the list through a modification performed on behalf of the cursor.
    pub(crate) fn resync(&mut self, generation: u64) {
        self.generation = generation;
    }

    //  Moves back to the start of a list of the given generation.
    pub(crate) fn reset(&mut self, generation: u64) {
        *self = Self::new(generation);
    }
}
