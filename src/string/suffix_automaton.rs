/*!
# Suffix Automaton

The minimal DFA accepting all suffixes of a string, built online one
character at a time. Every substring of the text corresponds to exactly one
state; a text of length `n >= 2` produces at most `2n - 1` states.

States live in an arena addressed by `u32` indices. Besides membership
queries, the automaton answers occurrence listings (via the suffix-link
tree) and longest-common-substring queries (by walking the other string and
resetting over suffix links on mismatch).
*/

use fxhash::FxHashMap;
use std::collections::VecDeque;

type StateId = u32;

const NONE: StateId = StateId::MAX;
const ROOT: StateId = 0;

struct SamState {
    /// Length of the longest substring in this state's equivalence class.
    len: usize,
    /// Suffix link; the links form a tree rooted at the initial state.
    link: StateId,
    /// End position of the first occurrence; `usize::MAX` on clone states,
    /// which the occurrence listing skips.
    first_pos: usize,
    next: FxHashMap<u8, StateId>,
}

/// Suffix automaton of a byte string.
pub struct SuffixAutomaton {
    states: Vec<SamState>,
    last: StateId,
    text_len: usize,
}

impl SuffixAutomaton {
    /// Creates the automaton of the empty string.
    pub fn empty() -> Self {
        Self {
            states: vec![SamState {
                len: 0,
                link: NONE,
                first_pos: usize::MAX,
                next: FxHashMap::default(),
            }],
            last: ROOT,
            text_len: 0,
        }
    }

    /// Builds the automaton of `s`.
    pub fn new(s: &[u8]) -> Self {
        let mut sam = Self::empty();
        for &c in s {
            sam.push(c);
        }
        sam
    }

    /// Number of states including the initial one.
    pub fn number_of_states(&self) -> usize {
        self.states.len()
    }

    /// Length of the text consumed so far.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    fn add_state(&mut self, len: usize, link: StateId, first_pos: usize) -> StateId {
        self.states.push(SamState {
            len,
            link,
            first_pos,
            next: FxHashMap::default(),
        });
        (self.states.len() - 1) as StateId
    }

    /// Appends one character to the underlying text.
    ///
    /// Standard online construction: a fresh state for the new longest
    /// suffix, transitions added along the suffix-link chain, and a clone
    /// whenever an existing state would otherwise have to represent two
    /// incompatible right-extension classes.
    pub fn push(&mut self, c: u8) {
        let pos = self.text_len;
        self.text_len += 1;

        let curr = self.add_state(pos + 1, NONE, pos);

        let mut p = self.last;
        while p != NONE && !self.states[p as usize].next.contains_key(&c) {
            self.states[p as usize].next.insert(c, curr);
            p = self.states[p as usize].link;
        }

        if p == NONE {
            self.states[curr as usize].link = ROOT;
        } else {
            let q = self.states[p as usize].next[&c];
            if self.states[p as usize].len + 1 == self.states[q as usize].len {
                self.states[curr as usize].link = q;
            } else {
                let clone = self.add_state(
                    self.states[p as usize].len + 1,
                    self.states[q as usize].link,
                    usize::MAX,
                );
                let inherited = self.states[q as usize].next.clone();
                self.states[clone as usize].next = inherited;

                let mut p = p;
                while p != NONE && self.states[p as usize].next.get(&c) == Some(&q) {
                    self.states[p as usize].next.insert(c, clone);
                    p = self.states[p as usize].link;
                }
                self.states[q as usize].link = clone;
                self.states[curr as usize].link = clone;
            }
        }

        self.last = curr;
        debug_assert!(self.text_len < 2 || self.states.len() <= 2 * self.text_len - 1);
    }

    fn walk(&self, query: &[u8]) -> Option<StateId> {
        let mut state = ROOT;
        for c in query {
            state = *self.states[state as usize].next.get(c)?;
        }
        Some(state)
    }

    /// Substring membership in `O(|query|)`.
    pub fn contains(&self, query: &[u8]) -> bool {
        self.walk(query).is_some()
    }

    /// All starting positions of `query` in the text, sorted increasingly.
    ///
    /// Costs `O(|query| + z + number_of_states)`: the suffix-link subtree of
    /// the query's state is traversed, and every non-clone state in it
    /// contributes one occurrence.
    pub fn occurrences(&self, query: &[u8]) -> Vec<usize> {
        let Some(start) = self.walk(query) else {
            return Vec::new();
        };
        if query.is_empty() {
            return (0..=self.text_len).collect();
        }

        // children lists of the suffix-link tree
        let mut link_children: Vec<Vec<StateId>> = vec![Vec::new(); self.states.len()];
        for (id, state) in self.states.iter().enumerate().skip(1) {
            link_children[state.link as usize].push(id as StateId);
        }

        let mut positions = Vec::new();
        let mut queue = VecDeque::from(vec![start]);
        while let Some(u) = queue.pop_front() {
            if self.states[u as usize].first_pos != usize::MAX {
                positions.push(self.states[u as usize].first_pos + 1 - query.len());
            }
            queue.extend(&link_children[u as usize]);
        }

        positions.sort_unstable();
        positions
    }

    /// The longest substring common to the automaton's text and `other`,
    /// computed by walking `other` through the automaton and falling back
    /// over suffix links on mismatch. Linear in `|other|`.
    pub fn longest_common_substring(&self, other: &[u8]) -> Vec<u8> {
        let mut len = 0usize;
        let mut best_len = 0usize;
        let mut best_end = 0usize;
        let mut cur = ROOT;

        for (i, &c) in other.iter().enumerate() {
            if !self.states[cur as usize].next.contains_key(&c) {
                while cur != NONE && !self.states[cur as usize].next.contains_key(&c) {
                    cur = self.states[cur as usize].link;
                }
                if cur == NONE {
                    cur = ROOT;
                    len = 0;
                    continue;
                }
                len = self.states[cur as usize].len;
            }
            len += 1;
            cur = self.states[cur as usize].next[&c];
            if best_len < len {
                best_len = len;
                best_end = i;
            }
        }

        if best_len == 0 {
            return Vec::new();
        }
        other[best_end + 1 - best_len..=best_end].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string::kmp_search;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    #[test]
    fn occurrences_in_bananas() {
        let sam = SuffixAutomaton::new(b"bananas");

        assert_eq!(sam.occurrences(b"a"), vec![1, 3, 5]);
        assert_eq!(sam.occurrences(b"an"), vec![1, 3]);
        assert_eq!(sam.occurrences(b"ana"), vec![1, 3]);
        assert_eq!(sam.occurrences(b"nas"), vec![4]);
        assert_eq!(sam.occurrences(b"x"), Vec::<usize>::new());
    }

    #[test]
    fn membership() {
        let sam = SuffixAutomaton::new(b"abcbc");
        for sub in [&b"a"[..], b"abc", b"bcbc", b"cb", b"abcbc"] {
            assert!(sam.contains(sub));
        }
        for not_sub in [&b"ba"[..], b"cc", b"abcbcb", b"d"] {
            assert!(!sam.contains(not_sub));
        }
        assert!(sam.contains(b""));
    }

    #[test]
    fn longest_common_substring_example() {
        let sam = SuffixAutomaton::new(b"bbbabca");
        assert_eq!(sam.longest_common_substring(b"aababcd"), b"babc");
    }

    #[test]
    fn no_common_substring() {
        let sam = SuffixAutomaton::new(b"aaa");
        assert_eq!(sam.longest_common_substring(b"bbb"), Vec::<u8>::new());
    }

    #[test]
    fn state_count_bound() {
        let sam = SuffixAutomaton::new(b"abcbcabcabcb");
        assert!(sam.number_of_states() <= 2 * sam.text_len() - 1);
    }

    #[test]
    fn occurrences_agree_with_kmp() {
        let rng = &mut Pcg64::seed_from_u64(7);

        for _ in 0..20 {
            let text: Vec<u8> = (0..rng.random_range(1..60))
                .map(|_| rng.random_range(b'a'..=b'b'))
                .collect();
            let sam = SuffixAutomaton::new(&text);

            for _ in 0..10 {
                let query: Vec<u8> = (0..rng.random_range(1..5))
                    .map(|_| rng.random_range(b'a'..=b'b'))
                    .collect();
                assert_eq!(
                    sam.occurrences(&query),
                    kmp_search(&text, &query),
                    "text={text:?} query={query:?}"
                );
            }
        }
    }

    #[test]
    fn online_extension() {
        let mut sam = SuffixAutomaton::empty();
        for (i, &c) in b"abcabx".iter().enumerate() {
            sam.push(c);
            assert_eq!(sam.text_len(), i + 1);
            assert!(sam.contains(&b"abcabx"[..=i]));
        }
    }
}
