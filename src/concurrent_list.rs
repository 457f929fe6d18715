//! #   The ConcurrentList.
//!
//! The `ConcurrentList` is the thread-safe equivalent of the `ArrayList`: all its operations take `&self`, and it may
//! be shared across threads by reference, or within an `Arc`.
//!
//! ##  Under the covers.
//!
//! Under the covers the `ConcurrentList` is a table of stripes: fixed size partitions of slots, each guarded by its
//! own lock.
//!
//! The main consequences are:
//!
//! -   Modifications lock only the stripes they touch, from the first index they affect up to the end of the list,
//!     in ascending order. Appending, in particular, only ever locks the last stripe.
//! -   Reads are optimistic: they copy the stripes without blocking, then validate that no writer intervened,
//!     retrying a few times before falling back to shared locks. All reads spanning several stripes, from
//!     `to_array` to `iter`, operate on a consistent snapshot.
//! -   Resizing, according to the `CapacityPolicy`, rebuilds the whole table, excluding all other operations for its
//!     duration.
//!
//! #   Example: basic
//!
//! ```
//! use golden_list::ConcurrentList;
//!
//! let list = ConcurrentList::new();
//! list.add(1);
//! list.add(3);
//! list.insert(1, 2);
//!
//! assert_eq!(Ok(2), list.get(1));
//! assert_eq!(vec![1, 2, 3], list.to_array().unwrap());
//! ```
//!
//! #   Example: sharing is caring
//!
//! ```
//! use std::{sync::Arc, thread};
//!
//! use golden_list::ConcurrentList;
//! use golden_list::concurrent_list::PartitionSize;
//!
//! let list = Arc::new(ConcurrentList::with_partition(16, PartitionSize::Small));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let list = Arc::clone(&list);
//!         thread::spawn(move || list.add_all((0..100).map(|i| t * 100 + i)).unwrap())
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(400, list.active_size());
//! assert!(list.max_capacity() >= 400);
//! ```

mod concurrent_list;
mod iterator;
mod partition;
mod stripes;

pub use self::concurrent_list::ConcurrentList;
pub use self::iterator::ConcurrentIter;
pub use self::partition::PartitionSize;

use super::atomic;
use super::capacity;
use super::failure;
use super::list;
use super::slots;
use super::stamped;
