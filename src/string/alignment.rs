/*!
# Sequence Comparison and Alignment

Classical dynamic programs over two strings:

- [`edit_distance`]: Levenshtein distance with two rows of storage,
- [`longest_common_subsequence`] / [`longest_common_substring`],
- [`align`]: minimum-cost alignment with a full table and traceback,
- [`hirschberg_align`]: the same alignment in linear space, recursing on
  the split point found from one forward and one backward cost row.

An alignment of two strings inserts [`GAP`] characters to make the lengths
equal; its cost is `gap * #gaps + substitution * #mismatches`. Costs must be
non-negative.
*/

/// Character used to pad alignments.
pub const GAP: u8 = b'_';

/// Gap and substitution costs of an alignment.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentCosts {
    pub gap: i64,
    pub substitution: i64,
}

impl Default for AlignmentCosts {
    fn default() -> Self {
        Self {
            gap: 1,
            substitution: 1,
        }
    }
}

/// Levenshtein distance between `s1` and `s2` (unit insert, delete and
/// substitute costs), using `O(min(|s1|, |s2|))` space.
pub fn edit_distance(s1: &[u8], s2: &[u8]) -> usize {
    if s1.len() < s2.len() {
        return edit_distance(s2, s1);
    }

    let mut prev: Vec<usize> = (0..=s2.len()).collect();
    let mut cur = vec![0; s2.len() + 1];

    for (i, &c1) in s1.iter().enumerate() {
        cur[0] = i + 1;
        for (j, &c2) in s2.iter().enumerate() {
            cur[j + 1] = if c1 == c2 {
                prev[j]
            } else {
                1 + prev[j].min(prev[j + 1]).min(cur[j])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[s2.len()]
}

/// The longest string that is a subsequence of both inputs, reconstructed
/// from the full DP table in `O(|s1| * |s2|)`.
pub fn longest_common_subsequence(s1: &[u8], s2: &[u8]) -> Vec<u8> {
    let (n, m) = (s1.len(), s2.len());
    let mut dp = vec![vec![0usize; m + 1]; n + 1];

    for i in 0..n {
        for j in 0..m {
            dp[i + 1][j + 1] = if s1[i] == s2[j] {
                dp[i][j] + 1
            } else {
                dp[i + 1][j].max(dp[i][j + 1])
            };
        }
    }

    let mut ret = Vec::with_capacity(dp[n][m]);
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        if s1[i - 1] == s2[j - 1] {
            ret.push(s1[i - 1]);
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] < dp[i][j - 1] {
            j -= 1;
        } else {
            i -= 1;
        }
    }

    ret.reverse();
    ret
}

/// The longest contiguous string occurring in both inputs. On ties the
/// match ending first in `s1` wins.
pub fn longest_common_substring(s1: &[u8], s2: &[u8]) -> Vec<u8> {
    let m = s2.len();
    let mut prev = vec![0usize; m + 1];
    let mut cur = vec![0usize; m + 1];

    let mut best_len = 0;
    let mut best_end = 0;

    for (i, &c1) in s1.iter().enumerate() {
        for (j, &c2) in s2.iter().enumerate() {
            cur[j + 1] = if c1 == c2 { prev[j] + 1 } else { 0 };
            if cur[j + 1] > best_len {
                best_len = cur[j + 1];
                best_end = i + 1;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    s1[best_end - best_len..best_end].to_vec()
}

/// Minimum-cost alignment via the full `O(|s1| * |s2|)` table, following
/// the cost-minimal path backwards to build the padded strings.
pub fn align(s1: &[u8], s2: &[u8], costs: AlignmentCosts) -> (Vec<u8>, Vec<u8>) {
    let (n, m) = (s1.len(), s2.len());
    let mut dp = vec![vec![0i64; m + 1]; n + 1];
    for i in 0..=n {
        dp[i][0] = i as i64 * costs.gap;
    }
    for j in 0..=m {
        dp[0][j] = j as i64 * costs.gap;
    }
    for i in 1..=n {
        for j in 1..=m {
            dp[i][j] = if s1[i - 1] == s2[j - 1] {
                dp[i - 1][j - 1]
            } else {
                (dp[i - 1][j - 1] + costs.substitution)
                    .min(dp[i - 1][j].min(dp[i][j - 1]) + costs.gap)
            };
        }
    }

    let mut res1 = Vec::new();
    let mut res2 = Vec::new();
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        if s1[i - 1] == s2[j - 1] || dp[i][j] == dp[i - 1][j - 1] + costs.substitution {
            i -= 1;
            j -= 1;
            res1.push(s1[i]);
            res2.push(s2[j]);
        } else if dp[i][j] == dp[i - 1][j] + costs.gap {
            i -= 1;
            res1.push(s1[i]);
            res2.push(GAP);
        } else {
            j -= 1;
            res1.push(GAP);
            res2.push(s2[j]);
        }
    }
    while i > 0 || j > 0 {
        if i > 0 {
            i -= 1;
            res1.push(s1[i]);
            res2.push(GAP);
        } else {
            j -= 1;
            res1.push(GAP);
            res2.push(s2[j]);
        }
    }

    res1.reverse();
    res2.reverse();
    (res1, res2)
}

/// One row of the alignment DP: cost of aligning all of `s1` against every
/// prefix of `s2`.
fn last_row(s1: &[u8], s2: &[u8], costs: AlignmentCosts) -> Vec<i64> {
    let mut prev: Vec<i64> = (0..=s2.len()).map(|j| j as i64 * costs.gap).collect();
    let mut cur = vec![0i64; s2.len() + 1];

    for (i, &c1) in s1.iter().enumerate() {
        cur[0] = (i as i64 + 1) * costs.gap;
        for (j, &c2) in s2.iter().enumerate() {
            cur[j + 1] = if c1 == c2 {
                prev[j]
            } else {
                (prev[j] + costs.substitution).min(prev[j + 1].min(cur[j]) + costs.gap)
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev
}

fn hirschberg_rec(s1: &[u8], s2: &[u8], costs: AlignmentCosts, out1: &mut Vec<u8>, out2: &mut Vec<u8>) {
    if s1.is_empty() {
        out1.extend(std::iter::repeat_n(GAP, s2.len()));
        out2.extend_from_slice(s2);
        return;
    }

    if s1.len() == 1 {
        let c = s1[0];
        if s2.is_empty() {
            out1.push(c);
            out2.push(GAP);
            return;
        }

        match s2.iter().position(|&x| x == c) {
            Some(p) => {
                for (i, &x) in s2.iter().enumerate() {
                    out1.push(if i == p { c } else { GAP });
                    out2.push(x);
                }
            }
            None if costs.substitution > 2 * costs.gap => {
                // dropping c entirely is cheaper than one substitution
                out1.push(c);
                out2.push(GAP);
                out1.extend(std::iter::repeat_n(GAP, s2.len()));
                out2.extend_from_slice(s2);
            }
            None => {
                for (i, &x) in s2.iter().enumerate() {
                    out1.push(if i == 0 { c } else { GAP });
                    out2.push(x);
                }
            }
        }
        return;
    }

    let mid1 = s1.len() / 2;
    let rev1: Vec<u8> = s1[mid1..].iter().rev().copied().collect();
    let rev2: Vec<u8> = s2.iter().rev().copied().collect();

    let fwd = last_row(&s1[..mid1], s2, costs);
    let rev = last_row(&rev1, &rev2, costs);

    let split = (0..=s2.len())
        .min_by_key(|&k| fwd[k] + rev[s2.len() - k])
        .unwrap();

    hirschberg_rec(&s1[..mid1], &s2[..split], costs, out1, out2);
    hirschberg_rec(&s1[mid1..], &s2[split..], costs, out1, out2);
}

/// Minimum-cost alignment in `O(min(|s1|, |s2|))` space.
///
/// Hirschberg's scheme: split `s1` at its midpoint, locate the cost-optimal
/// split of `s2` by adding one forward and one backward DP row, and recurse
/// on both halves. Time stays `O(|s1| * |s2|)`; the recursion depth is
/// logarithmic. The cost of the result always equals that of [`align`],
/// though ties may resolve to a different optimal alignment.
pub fn hirschberg_align(s1: &[u8], s2: &[u8], costs: AlignmentCosts) -> (Vec<u8>, Vec<u8>) {
    if s1.len() < s2.len() {
        let (a2, a1) = hirschberg_align(s2, s1, costs);
        return (a1, a2);
    }

    let mut out1 = Vec::with_capacity(s1.len());
    let mut out2 = Vec::with_capacity(s1.len());
    hirschberg_rec(s1, s2, costs, &mut out1, &mut out2);
    (out1, out2)
}
