//! Capacity Policy of the lists.
//!
//! Decides when, and to what, the storage of a growable list is resized.
//!
//! The default policy grows a list once it is more than 3/4 full, multiplying its capacity by the golden ratio, and
//! shrinks it once it is less than 1/4 full, dividing its capacity by the golden ratio.
//!
//! ```
//! use golden_list::capacity::CapacityPolicy;
//!
//! let policy = CapacityPolicy::default();
//!
//! assert!(!policy.should_grow(12, 16));
//! assert!(policy.should_grow(13, 16));
//! assert_eq!(25, policy.grow_target(16));
//!
//! assert!(policy.should_shrink(6, 25));
//! assert_eq!(Some(16), policy.shrink_target(6, 25, 16));
//! ```

use super::failure::{Failure, Result};

/// The golden ratio, growth factor of the default policy.
pub const GOLDEN_RATIO: f64 = 1.61803398875;

/// Load above which a list grows, in the default policy.
pub const DEFAULT_GROW_LOAD: f64 = 0.75;

/// Load below which a list shrinks, in the default policy.
pub const DEFAULT_SHRINK_LOAD: f64 = 0.25;

/// Initial capacity of lists created without an explicit capacity.
pub const DEFAULT_CAPACITY: usize = 16;

/// `CapacityPolicy`
///
/// A set of pure functions computing when and how to resize storage, given the number of active elements and the
/// current capacity.
///
/// All checks are idempotent: evaluating a check again, without intervening mutation, yields the same answer, and
/// applying a target which is not an actual change is a no-op for the lists.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct CapacityPolicy {
    grow_load: f64,
    shrink_load: f64,
    growth_factor: f64,
}

impl CapacityPolicy {
    /// Creates a new policy.
    ///
    /// #   Errors
    ///
    /// Returns `Failure::InvalidPolicy` unless `0 <= shrink_load < grow_load <= 1` and `growth_factor > 1`.
    ///
    /// #   Example
    ///
    /// ```
    /// #   use golden_list::capacity::CapacityPolicy;
    /// #   use golden_list::failure::Failure;
    /// let policy = CapacityPolicy::new(0.5, 0.125, 2.0).unwrap();
    /// assert_eq!(32, policy.grow_target(16));
    ///
    /// assert_eq!(Err(Failure::InvalidPolicy), CapacityPolicy::new(0.25, 0.5, 2.0));
    /// assert_eq!(Err(Failure::InvalidPolicy), CapacityPolicy::new(0.75, 0.25, 1.0));
    /// ```
    pub fn new(grow_load: f64, shrink_load: f64, growth_factor: f64) -> Result<Self> {
        let valid = (0.0..=1.0).contains(&shrink_load)
            && (0.0..=1.0).contains(&grow_load)
            && shrink_load < grow_load
            && growth_factor > 1.0
            && growth_factor.is_finite();

        if !valid {
            return Err(Failure::InvalidPolicy);
        }

        Ok(Self { grow_load, shrink_load, growth_factor })
    }

    /// Returns the load above which a list grows.
    pub fn grow_load(&self) -> f64 { self.grow_load }

    /// Returns the load below which a list shrinks.
    pub fn shrink_load(&self) -> f64 { self.shrink_load }

    /// Returns the factor by which capacity is multiplied on growth, and divided on shrink.
    pub fn growth_factor(&self) -> f64 { self.growth_factor }

    /// Returns whether a list with `active` elements and `capacity` slots should grow.
    ///
    /// A list without any slot always needs to grow.
    pub fn should_grow(&self, active: usize, capacity: usize) -> bool {
        capacity == 0 || load(active, capacity) > self.grow_load
    }

    /// Returns whether a list with `active` elements and `capacity` slots should shrink.
    pub fn should_shrink(&self, active: usize, capacity: usize) -> bool {
        capacity != 0 && load(active, capacity) < self.shrink_load
    }

    /// Returns the capacity to grow to, from `capacity`.
    ///
    /// The result is always strictly greater than `capacity`, unless `capacity` is `usize::MAX`.
    pub fn grow_target(&self, capacity: usize) -> usize {
        let scaled = (capacity as f64 * self.growth_factor).floor() as usize;
        scaled.max(capacity.saturating_add(1))
    }

    /// Returns the capacity to shrink to, or `None` if shrinking would not reduce `capacity`.
    ///
    /// The target never drops below `active`, nor below `floor`.
    pub fn shrink_target(&self, active: usize, capacity: usize, floor: usize) -> Option<usize> {
        let scaled = (capacity as f64 / self.growth_factor).floor() as usize;
        let target = scaled.max(active).max(floor);

        (target < capacity).then_some(target)
    }
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self { grow_load: DEFAULT_GROW_LOAD, shrink_load: DEFAULT_SHRINK_LOAD, growth_factor: GOLDEN_RATIO }
    }
}

/// Returns the capacity below which lists created with `initial` slots do not shrink.
pub fn shrink_floor(initial: usize) -> usize {
    initial.min(DEFAULT_CAPACITY)
}

//  Returns the load of a list.
fn load(active: usize, capacity: usize) -> f64 {
    active as f64 / capacity as f64
}
