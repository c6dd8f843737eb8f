/*!
# Suffix Arrays

Two constructions with identical output:

- [`suffix_array`]: Manber–Myers doubling with a counting sort per round,
  `O(n log n)`,
- [`suffix_array_dc3`]: the linear DC3/skew algorithm of Kärkkäinen &
  Sanders, recursing on the mod-1/mod-2 suffixes.

plus [`lcp_array`] (Kasai) and a binary-search lookup over the array.
*/

/// Builds the suffix array of `s`: `sa[i]` is the start of the i-th
/// lexicographically smallest suffix.
///
/// Doubling construction: round `gap` sorts by the pair (rank at `i`, rank
/// at `i + gap`), refreshing ranks with a single adjacent-comparison pass
/// and re-placing suffixes with a counting sort.
pub fn suffix_array(s: &[u8]) -> Vec<usize> {
    let n = s.len();
    if n == 0 {
        return Vec::new();
    }

    // initial order: position n-1 first, so that within equal characters the
    // shorter suffix precedes the longer one after the stable sort
    let mut sa: Vec<usize> = (0..n).map(|i| n - 1 - i).collect();
    sa.sort_by_key(|&i| s[i]);
    let mut rank: Vec<usize> = s.iter().map(|&c| c as usize).collect();

    let mut gap = 1;
    while gap < n {
        let prev_rank = rank.clone();
        let prev_sa = sa.clone();
        let mut cnt: Vec<usize> = (0..n).collect();

        for i in 0..n {
            rank[sa[i]] = if i > 0
                && prev_rank[sa[i - 1]] == prev_rank[sa[i]]
                && sa[i - 1] + gap < n
                && prev_rank[sa[i - 1] + gap / 2] == prev_rank[sa[i] + gap / 2]
            {
                rank[sa[i - 1]]
            } else {
                i
            };
        }

        // suffixes with a predecessor at distance gap are re-placed into
        // their rank bucket in order of that predecessor; the remaining
        // (short) suffixes already sit at their final bucket positions
        for i in 0..n {
            if prev_sa[i] >= gap {
                let s1 = prev_sa[i] - gap;
                sa[cnt[rank[s1]]] = s1;
                cnt[rank[s1]] += 1;
            }
        }

        gap *= 2;
    }

    sa
}

fn leq2(a1: usize, a2: usize, b1: usize, b2: usize) -> bool {
    a1 < b1 || (a1 == b1 && a2 <= b2)
}

fn leq3(a1: usize, a2: usize, a3: usize, b1: usize, b2: usize, b3: usize) -> bool {
    a1 < b1 || (a1 == b1 && leq2(a2, a3, b2, b3))
}

/// Stable counting sort of `a` into `b` by `keys[a[i]]`, keys in `0..=k`.
fn radix_pass(a: &[usize], b: &mut [usize], keys: &[usize], k: usize) {
    let mut cnt = vec![0usize; k + 1];
    for &x in a {
        cnt[keys[x]] += 1;
    }
    let mut sum = 0;
    for c in cnt.iter_mut() {
        let t = *c;
        *c = sum;
        sum += t;
    }
    for &x in a {
        b[cnt[keys[x]]] = x;
        cnt[keys[x]] += 1;
    }
}

/// Core of the skew algorithm over `s[0..n]` with symbols in `1..=k` and
/// `s[n] == s[n+1] == s[n+2] == 0` padding.
fn dc3(s: &[usize], sa: &mut [usize], n: usize, k: usize) {
    let n0 = (n + 2) / 3;
    let n1 = (n + 1) / 3;
    let n2 = n / 3;
    let n02 = n0 + n2;

    let mut s12 = vec![0usize; n02 + 3];
    let mut sa12 = vec![0usize; n02 + 3];
    let mut s0 = vec![0usize; n0];
    let mut sa0 = vec![0usize; n0];

    // mod-1 and mod-2 positions; a dummy mod-1 position is added if n % 3 == 1
    let mut j = 0;
    for i in 0..n + n0 - n1 {
        if i % 3 != 0 {
            s12[j] = i;
            j += 1;
        }
    }

    // sort the mod-1/mod-2 suffixes by their leading character triples,
    // least significant character first
    radix_pass(&s12[..n02], &mut sa12[..n02], &s[2..], k);
    radix_pass(&sa12[..n02], &mut s12[..n02], &s[1..], k);
    radix_pass(&s12[..n02], &mut sa12[..n02], s, k);

    // name the triples; equal triples share a name
    let mut name = 0;
    let (mut c0, mut c1, mut c2) = (usize::MAX, usize::MAX, usize::MAX);
    for i in 0..n02 {
        let x = sa12[i];
        if s[x] != c0 || s[x + 1] != c1 || s[x + 2] != c2 {
            name += 1;
            c0 = s[x];
            c1 = s[x + 1];
            c2 = s[x + 2];
        }
        if x % 3 == 1 {
            s12[x / 3] = name;
        } else {
            s12[x / 3 + n0] = name;
        }
    }

    if name < n02 {
        // names are not yet unique: recurse on the packed string
        dc3(&s12, &mut sa12, n02, name);
        for i in 0..n02 {
            s12[sa12[i]] = i + 1;
        }
    } else {
        for i in 0..n02 {
            sa12[s12[i] - 1] = i;
        }
    }

    // sort the mod-0 suffixes by (first char, rank of following mod-1 suffix),
    // piggybacking on the already sorted sa12
    let mut j = 0;
    for i in 0..n02 {
        if sa12[i] < n0 {
            s0[j] = 3 * sa12[i];
            j += 1;
        }
    }
    radix_pass(&s0, &mut sa0, s, k);

    // merge both sorted sequences with constant-time suffix comparisons
    let mut p = 0;
    let mut t = n0 - n1; // skip the dummy suffix, if any
    let mut k_out = 0;

    let pos12 = |t: usize, sa12: &[usize]| {
        if sa12[t] < n0 {
            3 * sa12[t] + 1
        } else {
            3 * (sa12[t] - n0) + 2
        }
    };

    loop {
        let i = pos12(t, &sa12);
        let j = sa0[p];

        let take12 = if sa12[t] < n0 {
            leq2(s[i], s12[sa12[t] + n0], s[j], s12[j / 3])
        } else {
            leq3(
                s[i],
                s[i + 1],
                s12[sa12[t] - n0 + 1],
                s[j],
                s[j + 1],
                s12[j / 3 + n0],
            )
        };

        if take12 {
            sa[k_out] = i;
            k_out += 1;
            t += 1;
            if t == n02 {
                while p < n0 {
                    sa[k_out] = sa0[p];
                    k_out += 1;
                    p += 1;
                }
                break;
            }
        } else {
            sa[k_out] = j;
            k_out += 1;
            p += 1;
            if p == n0 {
                while t < n02 {
                    sa[k_out] = pos12(t, &sa12);
                    k_out += 1;
                    t += 1;
                }
                break;
            }
        }
    }
}

/// Builds the suffix array of `s` in linear time with the DC3/skew
/// algorithm. Output is identical to [`suffix_array`].
pub fn suffix_array_dc3(s: &[u8]) -> Vec<usize> {
    let n = s.len();
    if n == 0 {
        return Vec::new();
    }

    // shift symbols to 1..=256 and append one 0 sentinel plus padding
    let mut t: Vec<usize> = s.iter().map(|&c| c as usize + 1).collect();
    t.extend([0, 0, 0, 0]);

    let mut sa = vec![0usize; n + 1];
    dc3(&t, &mut sa, n + 1, 256);

    // drop the sentinel suffix, which always sorts first
    debug_assert_eq!(sa[0], n);
    sa.remove(0);
    sa
}

/// Computes the LCP array with Kasai's algorithm: `lcp[i]` is the length of
/// the longest common prefix of the suffixes `sa[i]` and `sa[i + 1]`.
/// The result has length `n - 1` (empty for `n <= 1`).
pub fn lcp_array(s: &[u8], sa: &[usize]) -> Vec<usize> {
    let n = s.len();
    assert_eq!(sa.len(), n);
    if n <= 1 {
        return Vec::new();
    }

    let mut rank = vec![0usize; n];
    for (i, &suffix) in sa.iter().enumerate() {
        rank[suffix] = i;
    }

    let mut lcp = vec![0usize; n - 1];
    let mut k = 0usize;
    for i in 0..n {
        if rank[i] < n - 1 {
            let j = sa[rank[i] + 1];
            while i.max(j) + k < n && s[i + k] == s[j + k] {
                k += 1;
            }
            lcp[rank[i]] = k;
            k = k.saturating_sub(1);
        } else {
            k = 0;
        }
    }

    lcp
}

/// Binary search over the suffix array: returns the position of one
/// occurrence of `needle` in `s` (not necessarily the first), or `None`.
pub fn find_occurrence(s: &[u8], sa: &[usize], needle: &[u8]) -> Option<usize> {
    let (mut lo, mut hi) = (0isize, sa.len() as isize - 1);
    while lo <= hi {
        let mid = (lo + (hi - lo) / 2) as usize;
        let suffix = &s[sa[mid]..];
        let prefix = &suffix[..needle.len().min(suffix.len())];
        match prefix.cmp(needle) {
            std::cmp::Ordering::Less => lo = mid as isize + 1,
            std::cmp::Ordering::Greater => hi = mid as isize - 1,
            std::cmp::Ordering::Equal if prefix.len() == needle.len() => return Some(sa[mid]),
            std::cmp::Ordering::Equal => lo = mid as isize + 1,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn naive_suffix_array(s: &[u8]) -> Vec<usize> {
        (0..s.len()).sorted_by_key(|&i| &s[i..]).collect()
    }

    #[test]
    fn banana() {
        let s = b"banana";
        assert_eq!(suffix_array(s), vec![5, 3, 1, 0, 4, 2]);
        assert_eq!(suffix_array_dc3(s), vec![5, 3, 1, 0, 4, 2]);
        assert_eq!(lcp_array(s, &suffix_array(s)), vec![1, 3, 0, 0, 2]);
    }

    #[test]
    fn tiny_inputs() {
        assert_eq!(suffix_array(b""), Vec::<usize>::new());
        assert_eq!(suffix_array_dc3(b""), Vec::<usize>::new());
        assert_eq!(suffix_array(b"a"), vec![0]);
        assert_eq!(suffix_array_dc3(b"a"), vec![0]);
        assert_eq!(suffix_array(b"aa"), vec![1, 0]);
        assert_eq!(suffix_array_dc3(b"aa"), vec![1, 0]);
        assert_eq!(lcp_array(b"aa", &[1, 0]), vec![1]);
    }

    #[test]
    fn constructions_agree_with_naive() {
        let rng = &mut Pcg64::seed_from_u64(0x5A);

        for len in [2usize, 3, 5, 10, 30, 100] {
            for _ in 0..10 {
                let s: Vec<u8> = (0..len).map(|_| rng.random_range(b'a'..=b'c')).collect();
                let expected = naive_suffix_array(&s);
                assert_eq!(suffix_array(&s), expected, "s={s:?}");
                assert_eq!(suffix_array_dc3(&s), expected, "s={s:?}");
            }
        }
    }

    #[test]
    fn sa_is_sorted_permutation() {
        let s = b"mississippi";
        let sa = suffix_array(s);

        assert_eq!(sa.iter().copied().sorted().collect_vec(), (0..s.len()).collect_vec());
        for w in sa.windows(2) {
            assert!(s[w[0]..] < s[w[1]..]);
        }
    }

    #[test]
    fn lcp_matches_definition() {
        let rng = &mut Pcg64::seed_from_u64(0x1C9);

        for _ in 0..20 {
            let s: Vec<u8> = (0..rng.random_range(2..50))
                .map(|_| rng.random_range(b'a'..=b'b'))
                .collect();
            let sa = suffix_array_dc3(&s);
            let lcp = lcp_array(&s, &sa);

            for i in 0..s.len() - 1 {
                let (a, b) = (&s[sa[i]..], &s[sa[i + 1]..]);
                let common = a.iter().zip(b).take_while(|(x, y)| x == y).count();
                assert_eq!(lcp[i], common);

                // the common prefix is a prefix of both adjacent suffixes
                assert_eq!(a[..common], b[..common]);
            }
        }
    }

    #[test]
    fn find_in_banana() {
        let s = b"banana";
        let sa = suffix_array(s);
        assert_eq!(find_occurrence(s, &sa, b"ana"), Some(1));
        assert_eq!(find_occurrence(s, &sa, b"x"), None);
        assert_eq!(find_occurrence(s, &sa, b"banana"), Some(0));
        assert_eq!(find_occurrence(s, &sa, b"nan"), Some(2));
    }
}
