/*!
# Aho–Corasick

Multi-pattern searching: all patterns are inserted into a trie, failure
links (deepest proper suffix that is again a trie path) are computed level
by level with a BFS, and output sets are closed transitively over the
failure links. Searching then consumes one text character at a time by
walking the goto-or-failure chain.

The trie lives in a growable arena of state records addressed by `u32`
indices; transitions are hash maps, so the alphabet is the full byte range
without a dense table per state.
*/

use fxhash::FxHashMap;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Id of a pattern, in insertion order.
pub type PatternId = u32;

type StateId = u32;

const ROOT: StateId = 0;

#[derive(Default)]
struct State {
    next: FxHashMap<u8, StateId>,
    fail: StateId,
    /// Patterns ending here, including those inherited over the failure link.
    out: SmallVec<[PatternId; 2]>,
}

/// The search automaton over a fixed set of patterns.
///
/// Construction is deterministic: building twice from the same patterns
/// yields identical transitions and output sets.
pub struct AhoCorasick {
    states: Vec<State>,
    pattern_lens: Vec<usize>,
}

impl AhoCorasick {
    /// Builds the automaton for the given patterns. Empty patterns are not
    /// allowed; pattern ids correspond to iteration order.
    ///
    /// Preprocessing is linear in the total pattern length (expected, via
    /// hash transitions).
    pub fn new<I, P>(patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let mut ac = Self {
            states: vec![State::default()],
            pattern_lens: Vec::new(),
        };

        for pattern in patterns {
            let pattern = pattern.as_ref();
            assert!(!pattern.is_empty(), "empty patterns are not supported");
            ac.insert(pattern);
        }

        ac.build_failure_links();
        ac
    }

    /// Number of trie states including the root.
    pub fn number_of_states(&self) -> usize {
        self.states.len()
    }

    /// Number of patterns the automaton was built from.
    pub fn number_of_patterns(&self) -> usize {
        self.pattern_lens.len()
    }

    /// Length of the pattern with the given id.
    pub fn pattern_len(&self, id: PatternId) -> usize {
        self.pattern_lens[id as usize]
    }

    fn insert(&mut self, pattern: &[u8]) {
        let id = self.pattern_lens.len() as PatternId;
        self.pattern_lens.push(pattern.len());

        let mut curr = ROOT;
        for &c in pattern {
            curr = match self.states[curr as usize].next.get(&c) {
                Some(&next) => next,
                None => {
                    let next = self.states.len() as StateId;
                    self.states.push(State::default());
                    self.states[curr as usize].next.insert(c, next);
                    next
                }
            };
        }
        self.states[curr as usize].out.push(id);
    }

    /// BFS over the trie. Processing states level by level guarantees that a
    /// state's failure link is already final when its children are handled.
    fn build_failure_links(&mut self) {
        let mut queue: VecDeque<StateId> = VecDeque::new();

        let first_level: Vec<StateId> = self.states[ROOT as usize].next.values().copied().collect();
        for s in first_level {
            self.states[s as usize].fail = ROOT;
            queue.push_back(s);
        }

        while let Some(s) = queue.pop_front() {
            let transitions: Vec<(u8, StateId)> = self.states[s as usize]
                .next
                .iter()
                .map(|(&c, &t)| (c, t))
                .collect();

            for (c, t) in transitions {
                // follow failure links of s until a state with a c-transition;
                // t has depth >= 2, so the found state is never t itself
                let mut f = self.states[s as usize].fail;
                let fail_t = loop {
                    if let Some(&g) = self.states[f as usize].next.get(&c) {
                        break g;
                    }
                    if f == ROOT {
                        break ROOT;
                    }
                    f = self.states[f as usize].fail;
                };

                self.states[t as usize].fail = fail_t;
                let inherited = self.states[fail_t as usize].out.clone();
                self.states[t as usize].out.extend(inherited);
                queue.push_back(t);
            }
        }
    }

    /// Advances the automaton from `state` by one text character.
    fn next_state(&self, mut state: StateId, c: u8) -> StateId {
        loop {
            if let Some(&next) = self.states[state as usize].next.get(&c) {
                return next;
            }
            if state == ROOT {
                return ROOT;
            }
            state = self.states[state as usize].fail;
        }
    }

    /// Reports all occurrences of all patterns in `text` as `(start
    /// position, pattern id)` pairs, ordered by end position (ties in
    /// output-set order).
    ///
    /// The scan costs `O(|text| + z)` expected, where `z` is the number of
    /// reported matches.
    pub fn find_all(&self, text: &[u8]) -> Vec<(usize, PatternId)> {
        let mut matches = Vec::new();
        let mut state = ROOT;

        for (i, &c) in text.iter().enumerate() {
            state = self.next_state(state, c);
            for &id in &self.states[state as usize].out {
                matches.push((i + 1 - self.pattern_lens[id as usize], id));
            }
        }

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string::kmp_search;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    #[test]
    fn wikipedia_example() {
        let patterns = ["a", "ab", "bab", "bc", "bca", "c", "caa"];
        let ac = AhoCorasick::new(patterns);

        let matches = ac.find_all(b"abccab");
        let by_pattern = |id: PatternId| {
            matches
                .iter()
                .filter(|&&(_, p)| p == id)
                .map(|&(s, _)| s)
                .collect_vec()
        };

        assert_eq!(by_pattern(0), vec![0, 4]); // "a"
        assert_eq!(by_pattern(1), vec![0, 4]); // "ab"
        assert_eq!(by_pattern(2), Vec::<usize>::new()); // "bab"
        assert_eq!(by_pattern(3), vec![1]); // "bc"
        assert_eq!(by_pattern(5), vec![2, 3]); // "c"
    }

    #[test]
    fn construction_is_idempotent() {
        let patterns = ["he", "she", "his", "hers"];
        let a = AhoCorasick::new(patterns);
        let b = AhoCorasick::new(patterns);

        assert_eq!(a.number_of_states(), b.number_of_states());
        for (sa, sb) in a.states.iter().zip(&b.states) {
            assert_eq!(sa.fail, sb.fail);
            assert_eq!(sa.out, sb.out);
            assert_eq!(
                sa.next.iter().sorted().collect_vec(),
                sb.next.iter().sorted().collect_vec()
            );
        }
    }

    #[test]
    fn nested_suffix_patterns() {
        // every pattern is a suffix of the next; all must be reported
        let ac = AhoCorasick::new(["a", "ba", "aba"]);
        let matches = ac.find_all(b"aba").into_iter().sorted().collect_vec();
        assert_eq!(matches, vec![(0, 0), (0, 2), (1, 1), (2, 0)]);
    }

    #[test]
    fn agrees_with_independent_kmp_searches() {
        let rng = &mut Pcg64::seed_from_u64(0xAC);

        for _ in 0..20 {
            let text: Vec<u8> = (0..rng.random_range(0..80))
                .map(|_| rng.random_range(b'a'..=b'b'))
                .collect();
            let patterns: Vec<Vec<u8>> = (0..rng.random_range(1..6))
                .map(|_| {
                    (0..rng.random_range(1..4))
                        .map(|_| rng.random_range(b'a'..=b'b'))
                        .collect()
                })
                .collect();

            let ac = AhoCorasick::new(&patterns);
            let ac_matches = ac.find_all(&text).into_iter().sorted().collect_vec();

            let kmp_matches = patterns
                .iter()
                .enumerate()
                .flat_map(|(id, p)| {
                    kmp_search(&text, p)
                        .into_iter()
                        .map(move |s| (s, id as PatternId))
                })
                .sorted()
                .collect_vec();

            assert_eq!(ac_matches, kmp_matches);
        }
    }
}
