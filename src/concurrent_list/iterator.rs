//! The iterator of a ConcurrentList.

use std::{iter, vec};

/// `ConcurrentIter`
///
/// An iterator over a snapshot of a `ConcurrentList`, taken at its creation.
///
/// Modifications of the list after the creation of the iterator are not reflected, and never cause it to fail.
#[derive(Clone, Debug)]
pub struct ConcurrentIter<T> {
    inner: vec::IntoIter<T>,
}

impl<T> ConcurrentIter<T> {
    pub(crate) fn new(items: Vec<T>) -> Self { Self { inner: items.into_iter() } }

    /// Returns the elements not yet yielded, as a slice.
    pub fn as_slice(&self) -> &[T] { self.inner.as_slice() }
}

impl<T> Iterator for ConcurrentIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> { self.inner.next() }

    fn size_hint(&self) -> (usize, Option<usize>) { self.inner.size_hint() }
}

impl<T> DoubleEndedIterator for ConcurrentIter<T> {
    fn next_back(&mut self) -> Option<T> { self.inner.next_back() }
}

impl<T> ExactSizeIterator for ConcurrentIter<T> {}

impl<T> iter::FusedIterator for ConcurrentIter<T> {}
