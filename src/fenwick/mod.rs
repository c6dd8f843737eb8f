/*!
# Fenwick-Tree Family

Prefix-sum trees in one and two dimensions, with point or range updates,
plus a coordinate-compressed variant for sparse index spaces:

- [`FenwickTree`]: point update, range query,
- [`RangeFenwick`]: range update, range query (two arrays),
- [`FenwickTree2d`] / [`RangeFenwick2d`]: the 2D counterparts,
- [`CompressedFenwick`]: map-backed, indices up to `2^62`.

All trees store `i64` values and expose 0-indexed `add`, `sum`, `set` and
`at` operations.
*/

mod compressed;
mod point;
mod point2d;
mod range;
mod range2d;

pub use compressed::*;
pub use point::*;
pub use point2d::*;
pub use range::*;
pub use range2d::*;
