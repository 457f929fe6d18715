//! Internal testing utilities

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

//  SpyCount
//
//  A counter of the number of instances of elements.
pub struct SpyCount(AtomicUsize);

impl SpyCount {
    pub fn zero() -> Self { SpyCount(AtomicUsize::new(0)) }

    pub fn get(&self) -> usize { self.0.load(Ordering::Relaxed) }

    fn decrement(&self) { self.0.fetch_sub(1, Ordering::Relaxed); }

    fn increment(&self) { self.0.fetch_add(1, Ordering::Relaxed); }
}

//  Spy Element
//
//  An element tracking the number of instances, helpful to ensure proper drop.
//
//  Elements compare by `id`.
pub struct SpyElement<'a> {
    count: &'a SpyCount,
    id: u32,
}

impl<'a> SpyElement<'a> {
    pub fn new(count: &'a SpyCount, id: u32) -> Self {
        count.increment();
        SpyElement { count, id }
    }
}

impl<'a> Clone for SpyElement<'a> {
    fn clone(&self) -> Self { Self::new(self.count, self.id) }
}

impl<'a> PartialEq for SpyElement<'a> {
    fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl<'a> fmt::Debug for SpyElement<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Spy({})", self.id)
    }
}

impl<'a> Drop for SpyElement<'a> {
    fn drop(&mut self) {
        self.count.decrement();
    }
}

//  A value which may panic when compared.
#[derive(Clone, Copy, Debug)]
pub struct PanickyEq(pub u32, bool);

impl PanickyEq {
    //  Creates a normal instance.
    pub fn new(value: u32) -> Self { Self(value, false) }

    //  Creates a panicky instance.
    pub fn panicky(value: u32) -> Self { Self(value, true) }
}

impl PartialEq for PanickyEq {
    fn eq(&self, other: &Self) -> bool {
        if self.1 || other.1 { panic!("Oh No!") }

        self.0 == other.0
    }
}
