/*!
# Coordinate-Compressed Fenwick Tree

A Fenwick tree over a huge index space (up to `2^62`) that stores only the
cells actually touched, keyed through the [`Map`] abstraction (hash map by
default). Range updates and range queries both walk the usual dyadic
chains, so memory grows with `O(log size)` per update.

This variant uses the 0-indexed chain pair `i |= i + 1` (up) and
`i = (i & (i + 1)) - 1` (down), which avoids reserving an index for the
classical 1-based scheme.
*/

use std::ops::RangeInclusive;

use fxhash::FxHashMap;

use super::Value;
use crate::utils::Map;

/// Range-update/range-query Fenwick tree over sparse `u64` indices.
///
/// Two maps `mul` and `add` represent the linear function applied to a
/// prefix query: `prefix(x) = mul(x) * x + add(x)`.
pub struct CompressedFenwick<M = FxHashMap<u64, Value>>
where
    M: Map<u64, Value>,
{
    mul: M,
    add: M,
    size: u64,
}

impl<M> CompressedFenwick<M>
where
    M: Map<u64, Value> + Default,
{
    /// Creates a tree over indices `0..size`.
    pub fn new(size: u64) -> Self {
        assert!(size <= 1 << 62);
        Self {
            mul: M::default(),
            add: M::default(),
            size,
        }
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of map cells currently allocated.
    pub fn allocated_cells(&self) -> usize {
        self.mul.len() + self.add.len()
    }

    fn internal_update(&mut self, at: u64, mul: Value, add: Value) {
        let mut i = at;
        while i < self.size {
            *self.mul.get_mut_or_default(i) += mul;
            *self.add.get_mut_or_default(i) += add;
            i |= i + 1;
        }
    }

    /// Adds `inc` to every value in the inclusive index range.
    /// ** Panics if the range end is `>= size` **
    pub fn add(&mut self, range: RangeInclusive<u64>, inc: Value) {
        let (l, r) = (*range.start(), *range.end());
        if l > r {
            return;
        }
        assert!(r < self.size);

        self.internal_update(l, inc, -inc * (l as Value - 1));
        self.internal_update(r, -inc, inc * r as Value);
    }

    /// Adds `inc` to the single index `i`.
    pub fn add_point(&mut self, i: u64, inc: Value) {
        self.add(i..=i, inc);
    }

    /// Sum of all values in `0..=x`, clamped to the index space.
    pub fn prefix_sum(&self, x: u64) -> Value {
        let x = x.min(self.size.saturating_sub(1));
        let mut mul = 0;
        let mut add = 0;
        let mut i = x as i64;
        while i >= 0 {
            if let Some(m) = self.mul.get(&(i as u64)) {
                mul += m;
            }
            if let Some(a) = self.add.get(&(i as u64)) {
                add += a;
            }
            i = (i & (i + 1)) - 1;
        }
        mul * x as Value + add
    }

    /// Sum of all values in the inclusive index range.
    pub fn sum(&self, range: RangeInclusive<u64>) -> Value {
        let (l, r) = (*range.start(), *range.end());
        if l > r {
            return 0;
        }
        let left = if l == 0 { 0 } else { self.prefix_sum(l - 1) };
        self.prefix_sum(r) - left
    }

    /// The value at `i`.
    pub fn at(&self, i: u64) -> Value {
        self.sum(i..=i)
    }

    /// Overwrites the value at `i`.
    pub fn set(&mut self, i: u64, v: Value) {
        self.add(i..=i, v - self.at(i));
    }
}

impl Default for CompressedFenwick {
    fn default() -> Self {
        Self::new(1 << 62)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn sparse_billion_scale_indices() {
        let mut t = CompressedFenwick::default();
        t.add(500_000_001..=500_000_010, 3);
        t.add(500_000_011..=500_000_015, 5);
        t.set(500_000_000, 10);

        assert_eq!(t.sum(500_000_000..=500_000_015), 65);
        assert_eq!(t.at(500_000_000), 10);
        assert_eq!(t.at(500_000_012), 5);
        assert_eq!(t.sum(0..=400_000_000), 0);
    }

    #[test]
    fn memory_scales_with_touched_indices() {
        let mut t = CompressedFenwick::default();
        for i in 0..10u64 {
            t.add_point(i * 1_000_000_007, 1);
        }
        // ~62 chain cells per update, in two maps
        assert!(t.allocated_cells() <= 2 * 2 * 62 * 10);
        assert_eq!(t.sum(0..=(1 << 61)), 10);
    }

    #[test]
    fn agrees_with_dense_counterpart() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0xF04);
        let n = 50u64;

        let mut sparse = CompressedFenwick::new(n);
        let mut naive = vec![0i64; n as usize];

        for _ in 0..400 {
            let l = rng.random_range(0..n);
            let r = rng.random_range(l..n);
            let x = rng.random_range(-20..20);
            sparse.add(l..=r, x);
            for v in &mut naive[l as usize..=r as usize] {
                *v += x;
            }

            let ql = rng.random_range(0..n);
            let qr = rng.random_range(ql..n);
            let expected: i64 = naive[ql as usize..=qr as usize].iter().sum();
            assert_eq!(sparse.sum(ql..=qr), expected);
        }
    }
}
