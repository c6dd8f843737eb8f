/*!
# Fenwick Tree (Point Update, Range Query)

The classic binary indexed tree: a 1-indexed array where each cell owns the
dyadic subrange determined by the lowest set bit of its index. Updates walk
`i += i & -i`, queries walk `i -= i & -i`; both touch `O(log n)` cells.

The public API is 0-indexed; only the internal array is 1-indexed.
*/

use std::ops::RangeInclusive;

/// Cell values of the Fenwick trees.
pub type Value = i64;

#[derive(Clone)]
pub struct FenwickTree {
    tree: Vec<Value>,
}

impl FenwickTree {
    /// Creates a tree over indices `0..n`, all values zero.
    pub fn new(n: usize) -> Self {
        Self {
            tree: vec![0; n + 1],
        }
    }

    /// Builds a tree holding the given values in `O(n)` by pushing each
    /// cell's sum to its parent once.
    pub fn from_values(values: &[Value]) -> Self {
        let n = values.len();
        let mut tree = vec![0; n + 1];
        tree[1..].copy_from_slice(values);
        for i in 1..=n {
            let parent = i + (i & i.wrapping_neg());
            if parent <= n {
                tree[parent] += tree[i];
            }
        }
        Self { tree }
    }

    /// Number of indexable cells.
    pub fn len(&self) -> usize {
        self.tree.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds `x` to the value at `i`.
    /// ** Panics if `i >= n` **
    pub fn add(&mut self, i: usize, x: Value) {
        assert!(i < self.len());
        let mut i = i + 1;
        while i <= self.len() {
            self.tree[i] += x;
            i += i & i.wrapping_neg();
        }
    }

    /// Sum of all values in `0..=i`; `i` may exceed the size, clamping to
    /// the full sum.
    pub fn prefix_sum(&self, i: usize) -> Value {
        let mut i = (i + 1).min(self.len());
        let mut sum = 0;
        while i > 0 {
            sum += self.tree[i];
            i -= i & i.wrapping_neg();
        }
        sum
    }

    /// Sum of all values in the inclusive index range.
    pub fn sum(&self, range: RangeInclusive<usize>) -> Value {
        let (l, r) = (*range.start(), *range.end());
        if l > r {
            return 0;
        }
        let left = if l == 0 { 0 } else { self.prefix_sum(l - 1) };
        self.prefix_sum(r) - left
    }

    /// The value at `i`.
    pub fn at(&self, i: usize) -> Value {
        self.sum(i..=i)
    }

    /// Overwrites the value at `i`.
    pub fn set(&mut self, i: usize, x: Value) {
        self.add(i, x - self.at(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn small_example() {
        let mut t = FenwickTree::new(5);
        t.add(0, 1);
        t.add(2, 7);
        t.add(4, -2);

        assert_eq!(t.prefix_sum(4), 6);
        assert_eq!(t.sum(0..=1), 1);
        assert_eq!(t.sum(2..=4), 5);
        assert_eq!(t.at(2), 7);

        t.set(2, 3);
        assert_eq!(t.at(2), 3);
        assert_eq!(t.sum(0..=4), 2);
    }

    #[test]
    fn from_values_matches_adds() {
        let values = [3, -1, 4, 1, -5, 9, 2, 6];
        let built = FenwickTree::from_values(&values);
        let mut added = FenwickTree::new(values.len());
        for (i, &v) in values.iter().enumerate() {
            added.add(i, v);
        }

        for i in 0..values.len() {
            assert_eq!(built.prefix_sum(i), added.prefix_sum(i));
        }
    }

    #[test]
    fn empty_and_reversed_ranges() {
        let t = FenwickTree::new(3);
        assert_eq!(t.sum(2..=1), 0);
        assert!(FenwickTree::new(0).is_empty());
    }

    #[test]
    fn agrees_with_naive_array() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0xF00);
        let n = 64;

        let mut tree = FenwickTree::new(n);
        let mut naive = vec![0i64; n];

        for _ in 0..500 {
            let i = rng.random_range(0..n);
            if rng.random_bool(0.7) {
                let x = rng.random_range(-50..50);
                tree.add(i, x);
                naive[i] += x;
            } else {
                let x = rng.random_range(-50..50);
                tree.set(i, x);
                naive[i] = x;
            }

            let l = rng.random_range(0..n);
            let r = rng.random_range(l..n);
            let expected: i64 = naive[l..=r].iter().sum();
            assert_eq!(tree.sum(l..=r), expected);
        }
    }
}
