//  Lints
#![allow(clippy::module_inception)]

//! #   The Golden List Library
//!
//! A family of random-access lists, whose capacity follows the golden ratio.
//! -   The `ArrayList`: a growable list.
//! -   The `FixedList`: a list of fixed capacity.
//! -   The `ImmutableList`: a read-only copy of a list.
//! -   The `ConcurrentList`: a growable list, shareable across threads.
//!
//! All lists implement the `RandomAccessList` trait, and report their `Nature`, so that generic code may dispatch on
//! their capabilities.

pub mod array_list;
pub mod capacity;
pub mod concurrent_list;
pub mod cursor;
pub mod failure;
pub mod fixed_list;
pub mod immutable_list;
pub mod list;

mod slots;
mod utils;

pub use self::array_list::ArrayList;
pub use self::concurrent_list::ConcurrentList;
pub use self::fixed_list::FixedList;
pub use self::immutable_list::ImmutableList;
pub use self::slots::Iter;

use self::utils::atomic;
use self::utils::stamped;
