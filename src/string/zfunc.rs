/*!
# Z-Function

For a string `s`, `z[i]` is the length of the longest substring starting at
`s[i]` that is also a prefix of `s`. Searching with the Z-function reports
exactly the positions KMP reports, with the same linear complexity.
*/

/// Computes the Z-array of `s` with `z[0] = s.len()`.
pub fn z_array(s: &[u8]) -> Vec<usize> {
    let n = s.len();
    let mut z = vec![0; n];
    if n == 0 {
        return z;
    }
    z[0] = n;

    let (mut l, mut r) = (0, 0);
    for i in 1..n {
        if i < r {
            z[i] = (r - i).min(z[i - l]);
        }
        while i + z[i] < n && s[z[i]] == s[i + z[i]] {
            z[i] += 1;
        }
        if i + z[i] > r {
            l = i;
            r = i + z[i];
        }
    }

    z
}

/// Returns the starting positions of all occurrences of `pattern` in `text`
/// using the Z-array of the pattern, without concatenating the inputs (so no
/// separator symbol has to be reserved).
///
/// The contract is identical to [`kmp_search`](super::kmp_search).
pub fn z_search(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    let (n, m) = (text.len(), pattern.len());
    if m == 0 {
        return (0..=n).collect();
    }

    let zp = z_array(pattern);
    let mut matches = Vec::new();

    // prefix-match lengths of the pattern against text[i..], reusing the
    // pattern's self-similarity exactly like the concatenated variant would
    let (mut l, mut r) = (0, 0);
    for i in 0..n {
        let mut k = if i < r { (r - i).min(zp[i - l]) } else { 0 };
        while k < m && i + k < n && text[i + k] == pattern[k] {
            k += 1;
        }
        if i + k > r {
            l = i;
            r = i + k;
        }
        if k == m {
            matches.push(i);
        }
    }

    matches
}
