//! The Failure and Result types of this library.
//!
//! Every list operation which may be refused reports the cause as a `Failure`.
//!
//! Insertion comes in two versions:
//!
//! -   A faillible `try_xxx` version, which returns a `Result` with `Failure` as the error type.
//! -   A convenience `xxx` version, which invokes the `try_xxx` version and panics in case of error.
//!
//! All other operations return a `Result` directly.

use std::result;

use thiserror::Error;

/// Universal Failure type of this library.
#[derive(Clone, Copy, Debug, Error, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Failure {
    /// An element was inserted into a full fixed-capacity list, or a copy was requested into a capacity smaller than
    /// the number of elements to copy.
    #[error("Overflow: the list is full")]
    Overflow,
    /// A read or derive operation was attempted on an empty list, or an empty operand.
    #[error("Underflow: the list, or the requested range, is empty")]
    Underflow,
    /// An index or a range lies outside of the valid bounds.
    #[error("OutOfBounds: index or range outside of the list")]
    OutOfBounds,
    /// A mutating operation was attempted on an immutable list.
    #[error("Immutable: the list cannot be modified")]
    Immutable,
    /// The operation is not supported by this kind of list, such as resizing a fixed list.
    #[error("Unsupported: the operation is not supported by this list")]
    Unsupported,
    /// An absent value was offered for storage.
    #[error("NullItem: an absent value cannot be stored")]
    NullItem,
    /// The list was structurally modified behind the back of a cursor.
    ///
    /// The cursor has been reset to the start of the list, and may be used again.
    #[error("ConcurrentModification: the list was modified since the cursor was created")]
    ConcurrentModification,
    /// The parameters of a `CapacityPolicy` are inconsistent.
    #[error("InvalidPolicy: inconsistent capacity policy parameters")]
    InvalidPolicy,
}

/// Universal Result type of this library.
pub type Result<T> = result::Result<T, Failure>;

//  Panics with the failure as message.
//
//  Used by the panicking counterparts of `try_xxx` methods.
#[cold]
#[inline(never)]
pub(crate) fn panic_from_failure(failure: Failure) {
    panic!("{}", failure);
}
