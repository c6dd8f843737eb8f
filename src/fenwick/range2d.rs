/*!
# 2D Fenwick Tree (Range Update, Range Query)

A rectangular increment decomposes bilinearly over the prefix sums, so four
plain 2D trees `t1..t4` suffice:

```text
prefix(x, y) = s1*x*y + s2*x + s3*y + s4
```

where `s1..s4` are the respective prefix sums at `(x, y)` (1-indexed).
A rectangle add touches the four corners of each affected tree.
*/

use super::Value;

#[derive(Clone)]
pub struct RangeFenwick2d {
    t1: Tree,
    t2: Tree,
    t3: Tree,
    t4: Tree,
    rows: usize,
    cols: usize,
}

#[derive(Clone)]
struct Tree(Vec<Vec<Value>>);

impl Tree {
    fn new(rows: usize, cols: usize) -> Self {
        Self(vec![vec![0; cols + 2]; rows + 2])
    }

    /// Adds `v` at the 1-indexed cell `(x, y)`; coordinates beyond the
    /// index space are silent no-ops, which the corner updates rely on.
    fn add(&mut self, x: usize, y: usize, v: Value) {
        let (rows, cols) = (self.0.len() - 2, self.0[0].len() - 2);
        let mut i = x;
        while i <= rows {
            let mut j = y;
            while j <= cols {
                self.0[i][j] += v;
                j += j & j.wrapping_neg();
            }
            i += i & i.wrapping_neg();
        }
    }

    /// Prefix sum over the 1-indexed rectangle `(1..=x, 1..=y)`.
    fn prefix(&self, x: usize, y: usize) -> Value {
        let mut sum = 0;
        let mut i = x;
        while i > 0 {
            let mut j = y;
            while j > 0 {
                sum += self.0[i][j];
                j -= j & j.wrapping_neg();
            }
            i -= i & i.wrapping_neg();
        }
        sum
    }
}

impl RangeFenwick2d {
    /// Creates a tree over the index space `(0..rows, 0..cols)`.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            t1: Tree::new(rows, cols),
            t2: Tree::new(rows, cols),
            t3: Tree::new(rows, cols),
            t4: Tree::new(rows, cols),
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `a[i][j] += v` for all `(i, j)` in `(1..=x, 1..=y)`, 1-indexed.
    fn add_prefix(&mut self, x: usize, y: usize, v: Value) {
        self.t1.add(1, 1, v);

        self.t1.add(1, y + 1, -v);
        self.t2.add(1, y + 1, v * y as Value);

        self.t1.add(x + 1, 1, -v);
        self.t3.add(x + 1, 1, v * x as Value);

        self.t1.add(x + 1, y + 1, v);
        self.t2.add(x + 1, y + 1, -v * y as Value);
        self.t3.add(x + 1, y + 1, -v * x as Value);
        self.t4.add(x + 1, y + 1, v * x as Value * y as Value);
    }

    /// Adds `v` to every cell of the rectangle with inclusive corners
    /// `(x1, y1)` and `(x2, y2)`.
    /// ** Panics if `x2 >= rows || y2 >= cols` **
    pub fn add(&mut self, x1: usize, y1: usize, x2: usize, y2: usize, v: Value) {
        if x1 > x2 || y1 > y2 {
            return;
        }
        assert!(x2 < self.rows && y2 < self.cols);

        let (x1, y1, x2, y2) = (x1 + 1, y1 + 1, x2 + 1, y2 + 1);
        self.add_prefix(x2, y2, v);
        self.add_prefix(x1 - 1, y2, -v);
        self.add_prefix(x2, y1 - 1, -v);
        self.add_prefix(x1 - 1, y1 - 1, v);
    }

    /// Adds `v` to the single cell `(x, y)`.
    pub fn add_point(&mut self, x: usize, y: usize, v: Value) {
        self.add(x, y, x, y, v);
    }

    /// Sum over the rectangle `(0..=x, 0..=y)`, clamped to the index space.
    pub fn prefix_sum(&self, x: usize, y: usize) -> Value {
        let x = (x + 1).min(self.rows);
        let y = (y + 1).min(self.cols);
        let s1 = self.t1.prefix(x, y);
        let s2 = self.t2.prefix(x, y);
        let s3 = self.t3.prefix(x, y);
        let s4 = self.t4.prefix(x, y);
        s1 * x as Value * y as Value + s2 * x as Value + s3 * y as Value + s4
    }

    /// Sum over the rectangle with inclusive corners `(x1, y1)`, `(x2, y2)`.
    pub fn sum(&self, x1: usize, y1: usize, x2: usize, y2: usize) -> Value {
        if x1 > x2 || y1 > y2 {
            return 0;
        }
        let mut sum = self.prefix_sum(x2, y2);
        if x1 > 0 {
            sum -= self.prefix_sum(x1 - 1, y2);
        }
        if y1 > 0 {
            sum -= self.prefix_sum(x2, y1 - 1);
        }
        if x1 > 0 && y1 > 0 {
            sum += self.prefix_sum(x1 - 1, y1 - 1);
        }
        sum
    }

    /// The value at `(x, y)`.
    pub fn at(&self, x: usize, y: usize) -> Value {
        self.sum(x, y, x, y)
    }

    /// Overwrites the value at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, v: Value) {
        self.add_point(x, y, v - self.at(x, y));
    }
}
