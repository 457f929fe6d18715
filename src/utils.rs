//! Internal building blocks.

pub mod atomic;
pub mod stamped;

#[cfg(test)]
pub mod tester;
