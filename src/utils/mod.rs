/*!
# Utilities

Abstractions over [`Set`] and [`Map`] collections so that algorithms can pick
the backend fitting their access pattern (dense bitsets for traversals,
hash maps for sparse index spaces), plus the [`FromCapacity`] construction
helper shared by both.
*/

use std::{
    collections::{HashMap, HashSet},
    hash::RandomState,
};

use fxhash::{FxBuildHasher, FxHashMap, FxHashSet};
use stream_bitset::{PrimIndex, bitset::BitSetImpl};

pub mod map;
pub mod set;

pub use map::Map;
pub use set::Set;

/// Helper trait for datastructures that can be initialized with capacity.
/// Can be interpreted as reserved space or guaranteed used space.
pub trait FromCapacity: Sized {
    /// Create a new instance with a given capacity
    fn from_capacity(capacity: usize) -> Self {
        Self::from_total_used_capacity(capacity, capacity)
    }

    /// Creates a new instance from the total capacity (i.e. max-value) and the
    /// actual capacity that will be used (space-wise).
    ///
    /// If you only have one value as an upper bound, provide it as both
    /// arguments if possible.
    fn from_total_used_capacity(total: usize, used: usize) -> Self;
}

impl<I> FromCapacity for BitSetImpl<I>
where
    I: PrimIndex,
{
    fn from_total_used_capacity(total: usize, _used: usize) -> Self {
        // A bitset must be sized to the maximum element
        Self::new(I::from_usize(total).unwrap())
    }
}

impl<T> FromCapacity for HashSet<T, RandomState> {
    fn from_total_used_capacity(_total: usize, used: usize) -> Self {
        Self::with_capacity(used)
    }
}

impl<T> FromCapacity for FxHashSet<T> {
    fn from_total_used_capacity(_total: usize, used: usize) -> Self {
        Self::with_capacity_and_hasher(used, FxBuildHasher::default())
    }
}

impl<K, V> FromCapacity for HashMap<K, V, RandomState> {
    fn from_total_used_capacity(_total: usize, used: usize) -> Self {
        Self::with_capacity(used)
    }
}

impl<K, V> FromCapacity for FxHashMap<K, V> {
    fn from_total_used_capacity(_total: usize, used: usize) -> Self {
        Self::with_capacity_and_hasher(used, FxBuildHasher::default())
    }
}
