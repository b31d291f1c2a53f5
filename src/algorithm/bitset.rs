use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over dense row or key indices
///
/// Used by the search engine for the live row universe and the set of open
/// primary keys. Cloning is a flat copy, which makes copy-on-branch state
/// cheap. Provides O(1) membership testing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexSet {
    bits: BitVec,
}

impl IndexSet {
    /// Create a set with no members
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a set containing every index below `capacity`
    pub fn full(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
        }
    }

    /// Insert an index, ignoring indices beyond capacity
    pub fn insert(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Remove an index, returning whether it was present
    pub fn remove(&mut self, index: usize) -> bool {
        let present = self.contains(index);
        if present {
            self.bits.set(index, false);
        }
        present
    }

    /// Test membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Test if no index is present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count members
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Number of indices the set can hold
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Iterate members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all members as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Display for IndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndexSet({} members: {:?})", self.count(), self.to_vec())
    }
}
