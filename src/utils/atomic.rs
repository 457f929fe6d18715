//! A collection of specialized atomics.
//!
//! It is perfectly possible to use a mix of Ordering on the same instance of an Atomic, depending on the situation.
//!
//! In practice, this is rarely needed and only makes auditing harder, so these little types come with pre-established
//! memory ordering.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

macro_rules! atomic {
    ($name:ident, $underlying:ident, $raw:ident, $load_ordering:expr, $store_ordering:expr, $rmw_ordering:expr) => {
        pub struct $name($underlying);

        impl $name {
            pub fn new(v: $raw) -> Self { Self($underlying::new(v)) }
            pub fn load(&self) -> $raw { self.0.load($load_ordering) }
            pub fn store(&self, v: $raw) { self.0.store(v, $store_ordering); }

            //  Increments the value, wrapping around, returns the previous value.
            pub fn bump(&self) -> $raw { self.0.fetch_add(1, $rmw_ordering) }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.load())
            }
        }
    }
}

atomic!{ AcqRelUsize, AtomicUsize, usize, Ordering::Acquire, Ordering::Release, Ordering::AcqRel }

atomic!{ AcqRelU64, AtomicU64, u64, Ordering::Acquire, Ordering::Release, Ordering::AcqRel }
