//! Partition-based row highlight buckets.
//!
//! Applied filters arrive as a list of key groups. Rows belonging to the
//! same group alternate between two visual styles so adjacent filter
//! groups stay distinguishable; rows outside every group take the bucket
//! determined by the group count. Purely cosmetic; the only contract is
//! that resolution is deterministic.

use indexmap::IndexMap;

use crate::model::RowKey;

/// Alternating visual style bucket for a highlighted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightBucket {
    Even,
    Odd,
}

impl HighlightBucket {
    const fn from_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Even
        } else {
            Self::Odd
        }
    }
}

/// Key-to-partition index derived from the applied filter groups.
///
/// When a key appears in more than one group, the last group wins,
/// matching the order the groups were supplied in.
#[derive(Debug, Clone, Default)]
pub struct FilterPartition {
    index_by_key: IndexMap<RowKey, usize>,
    partition_count: usize,
}

impl FilterPartition {
    /// Build the partition map from the applied filter groups.
    #[must_use]
    pub fn new(filters: &[Vec<RowKey>]) -> Self {
        let mut index_by_key = IndexMap::new();
        for (index, group) in filters.iter().enumerate() {
            for key in group {
                index_by_key.insert(key.clone(), index);
            }
        }
        Self {
            index_by_key,
            partition_count: filters.len(),
        }
    }

    /// Number of filter groups the map was built from.
    #[must_use]
    pub const fn partition_count(&self) -> usize {
        self.partition_count
    }

    /// Index of the group containing the key, if any.
    #[must_use]
    pub fn partition_of(&self, key: &RowKey) -> Option<usize> {
        self.index_by_key.get(key).copied()
    }

    /// Resolve the highlight bucket for a key.
    ///
    /// Partitioned keys alternate by group index; unpartitioned keys all
    /// share the bucket given by the group count parity.
    #[must_use]
    pub fn bucket_for(&self, key: &RowKey) -> HighlightBucket {
        match self.partition_of(key) {
            Some(index) => HighlightBucket::from_index(index),
            None => HighlightBucket::from_index(self.partition_count),
        }
    }
}
