//! The partition size of a ConcurrentList.

/// `PartitionSize`
///
/// The number of consecutive slots guarded by a single lock of a `ConcurrentList`.
///
/// Smaller partitions allow more concurrency between modifications of distant indices, at the cost of more locks to
/// acquire for operations spanning the whole list.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub enum PartitionSize {
    /// 512 slots.
    Small,
    /// 1024 slots.
    #[default]
    Medium,
    /// 2048 slots.
    Large,
    /// A user-defined number of slots, at least 1.
    Custom(usize),
}

impl PartitionSize {
    /// Returns the number of slots of a partition.
    ///
    /// ```
    /// #   use golden_list::concurrent_list::PartitionSize;
    /// assert_eq!(1024, PartitionSize::default().slots());
    /// assert_eq!(1, PartitionSize::Custom(0).slots());
    /// ```
    pub fn slots(self) -> usize {
        match self {
            PartitionSize::Small => 512,
            PartitionSize::Medium => 1024,
            PartitionSize::Large => 2048,
            PartitionSize::Custom(n) => n.max(1),
        }
    }
}
