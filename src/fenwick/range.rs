/*!
# Fenwick Tree (Range Update, Range Query)

Two plain Fenwick arrays `t1`, `t2` maintained such that

```text
sum(0..=i) = (i + 1) * prefix(t1, i) - prefix(t2, i)
```

(with 1-indexed cells internally). A range add of `x` on `[l, r]` touches
four cells: `x` at `t1[l]`, `-x` at `t1[r+1]`, `x * (l - 1)` at `t2[l]` and
`-x * r` at `t2[r+1]`.
*/

use std::ops::RangeInclusive;

use super::Value;

#[derive(Clone)]
pub struct RangeFenwick {
    t1: Vec<Value>,
    t2: Vec<Value>,
}

impl RangeFenwick {
    /// Creates a tree over indices `0..n`, all values zero.
    pub fn new(n: usize) -> Self {
        Self {
            t1: vec![0; n + 2],
            t2: vec![0; n + 2],
        }
    }

    pub fn len(&self) -> usize {
        self.t1.len() - 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn raw_add(tree: &mut [Value], mut i: usize, x: Value) {
        while i < tree.len() {
            tree[i] += x;
            i += i & i.wrapping_neg();
        }
    }

    fn raw_prefix(tree: &[Value], mut i: usize) -> Value {
        let mut sum = 0;
        while i > 0 {
            sum += tree[i];
            i -= i & i.wrapping_neg();
        }
        sum
    }

    /// Adds `x` to every value in the inclusive index range.
    /// ** Panics if the range end is `>= n` **
    pub fn add(&mut self, range: RangeInclusive<usize>, x: Value) {
        let (l, r) = (*range.start(), *range.end());
        if l > r {
            return;
        }
        assert!(r < self.len());

        // shift to 1-indexed cells
        let (l, r) = (l + 1, r + 1);
        Self::raw_add(&mut self.t1, l, x);
        Self::raw_add(&mut self.t1, r + 1, -x);
        Self::raw_add(&mut self.t2, l, x * (l as Value - 1));
        Self::raw_add(&mut self.t2, r + 1, -x * r as Value);
    }

    /// Sum of all values in `0..=i`; `i` may exceed the size, clamping to
    /// the full sum.
    pub fn prefix_sum(&self, i: usize) -> Value {
        let i = (i + 1).min(self.len());
        i as Value * Self::raw_prefix(&self.t1, i) - Self::raw_prefix(&self.t2, i)
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
        self.add(i..=i, x - self.at(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn range_add_then_query() {
        let mut t = RangeFenwick::new(10);
        t.add(2..=6, 3);
        t.add(4..=9, -1);

        assert_eq!(t.at(1), 0);
        assert_eq!(t.at(2), 3);
        assert_eq!(t.at(5), 2);
        assert_eq!(t.at(9), -1);
        assert_eq!(t.sum(0..=9), 3 * 5 - 6);
        assert_eq!(t.sum(4..=6), 6);
    }

    #[test]
    fn full_range_update() {
        let mut t = RangeFenwick::new(4);
        t.add(0..=3, 7);
        assert_eq!(t.sum(0..=3), 28);
        assert_eq!(t.prefix_sum(100), 28);
    }

    #[test]
    fn set_and_at() {
        let mut t = RangeFenwick::new(5);
        t.add(0..=4, 2);
        t.set(3, 10);
        assert_eq!(t.at(3), 10);
        assert_eq!(t.sum(0..=4), 2 * 4 + 10);
    }

    #[test]
    fn agrees_with_naive_array() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0xF01);
        let n = 48;

        let mut tree = RangeFenwick::new(n);
        let mut naive = vec![0i64; n];

        for _ in 0..500 {
            let l = rng.random_range(0..n);
            let r = rng.random_range(l..n);
            let x = rng.random_range(-30..30);
            tree.add(l..=r, x);
            for v in &mut naive[l..=r] {
                *v += x;
            }

            let ql = rng.random_range(0..n);
            let qr = rng.random_range(ql..n);
            let expected: i64 = naive[ql..=qr].iter().sum();
            assert_eq!(tree.sum(ql..=qr), expected);
        }
    }
}
