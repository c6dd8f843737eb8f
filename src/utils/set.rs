/*!
# Generalized Sets

Abstractions over `Set` data structures, allowing algorithms to choose the
most efficient implementation based on context:

- Sparse sets -> `HashSet` / `FxHashSet`
- Dense sets -> `BitSetImpl` (e.g. [`NodeBitSet`](crate::node::NodeBitSet))
*/

use std::{
    collections::HashSet,
    hash::{BuildHasher, Hash},
};

use num::ToPrimitive;
use stream_bitset::{PrimIndex, bitset::BitSetImpl};

/// Minimalist trait for a set-like collection.
pub trait Set<T> {
    /// Inserts `value` into the set.
    /// Returns `true` if the element was already present.
    fn insert(&mut self, value: T) -> bool;

    /// Removes `value` from the set.
    /// Returns `true` if the element was present.
    fn remove(&mut self, value: &T) -> bool;

    /// Returns `true` if `value` is in the set.
    fn contains(&self, value: &T) -> bool;

    /// Returns the number of elements currently in the set.
    fn len(&self) -> usize;

    /// Returns `true` if the set has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, S> Set<T> for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn insert(&mut self, value: T) -> bool {
        !HashSet::insert(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        HashSet::remove(self, value)
    }

    fn contains(&self, value: &T) -> bool {
        HashSet::contains(self, value)
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

impl<I, T> Set<T> for BitSetImpl<I>
where
    I: PrimIndex,
    T: ToPrimitive + Copy,
{
    fn insert(&mut self, value: T) -> bool {
        self.set_bit(I::from_usize(value.to_usize().unwrap()).unwrap())
    }

    fn remove(&mut self, value: &T) -> bool {
        self.clear_bit(I::from_usize(value.to_usize().unwrap()).unwrap())
    }

    fn contains(&self, value: &T) -> bool {
        self.get_bit(I::from_usize(value.to_usize().unwrap()).unwrap())
    }

    fn len(&self) -> usize {
        self.cardinality() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, NodeBitSet};
    use fxhash::FxHashSet;

    fn exercise<S: Set<Node>>(set: &mut S) {
        assert!(set.is_empty());
        assert!(!set.insert(3));
        assert!(set.insert(3));
        assert!(set.contains(&3));
        assert!(!set.contains(&4));
        assert_eq!(set.len(), 1);
        assert!(set.remove(&3));
        assert!(!set.remove(&3));
        assert!(set.is_empty());
    }

    #[test]
    fn bitset_backend() {
        exercise(&mut NodeBitSet::new(10));
    }

    #[test]
    fn hash_backend() {
        exercise(&mut FxHashSet::default());
    }
}
