/*!
# Matching Algorithms

This module provides algorithms for computing **matchings**:

- [`HopcroftKarp`] computes a **maximum matching** in an explicit bipartite
  graph in `O(m sqrt(n))` by augmenting along shortest alternating paths,
  phase by phase.
- [`Matching::maximal_undirected_matching`] computes a greedy **maximal
  matching** in an undirected graph (not necessarily optimal, but a 2-approximation
  and a useful lower bound).
*/

use super::*;
use std::collections::VecDeque;

/// Maximum bipartite matching via the Hopcroft–Karp algorithm.
///
/// The two sides are indexed independently: left nodes are `0..n_left`,
/// right nodes `0..n_right`, and edges always lead from left to right.
///
/// Each phase runs one BFS from all free left nodes simultaneously,
/// labelling left nodes with their alternating-path distance, followed by
/// DFS augmentations restricted to strictly increasing distance layers.
/// Every phase increases the matching size by at least one, and the number
/// of phases is `O(sqrt(n_left + n_right))`.
pub struct HopcroftKarp {
    n_right: NumNodes,
    adj: Vec<Vec<Node>>,
}

/// A matching computed by [`HopcroftKarp::compute`].
pub struct BipartiteMatching {
    match_left: Vec<Node>,
    match_right: Vec<Node>,
}

impl BipartiteMatching {
    /// Number of matched pairs.
    pub fn size(&self) -> NumNodes {
        self.match_left
            .iter()
            .filter(|&&v| v != INVALID_NODE)
            .count() as NumNodes
    }

    /// For each left node the matched right node, or `INVALID_NODE`.
    pub fn match_left(&self) -> &[Node] {
        &self.match_left
    }

    /// For each right node the matched left node, or `INVALID_NODE`.
    pub fn match_right(&self) -> &[Node] {
        &self.match_right
    }

    /// All matched pairs `(left, right)` ordered by left node.
    pub fn pairs(&self) -> impl Iterator<Item = (Node, Node)> + '_ {
        self.match_left
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != INVALID_NODE)
            .map(|(u, &v)| (u as Node, v))
    }
}

impl HopcroftKarp {
    /// Creates an empty bipartite graph with the given side sizes.
    pub fn new(n_left: NumNodes, n_right: NumNodes) -> Self {
        Self {
            n_right,
            adj: vec![Vec::new(); n_left as usize],
        }
    }

    pub fn number_of_left_nodes(&self) -> NumNodes {
        self.adj.len() as NumNodes
    }

    pub fn number_of_right_nodes(&self) -> NumNodes {
        self.n_right
    }

    /// Adds the edge between left node `u` and right node `v`.
    /// ** Panics if `u >= n_left || v >= n_right` **
    pub fn add_edge(&mut self, u: Node, v: Node) {
        assert!(v < self.n_right);
        self.adj[u as usize].push(v);
    }

    /// Adds all edges in the collection.
    pub fn add_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (Node, Node)>,
    {
        for (u, v) in edges {
            self.add_edge(u, v);
        }
    }

    /// Computes a maximum matching.
    ///
    /// Deterministic given the edge insertion order: rerunning yields the
    /// identical matching.
    pub fn compute(&self) -> BipartiteMatching {
        let n_left = self.adj.len();

        let mut match_right = vec![INVALID_NODE; self.n_right as usize];
        let mut matched_left = NodeBitSet::new(n_left as NumNodes);
        let mut dist = vec![INVALID_NODE; n_left];
        let mut vis = NodeBitSet::new(n_left as NumNodes);

        loop {
            self.bfs_layers(&match_right, &matched_left, &mut dist);
            vis.clear_all();

            let mut augmented = 0;
            for u in 0..n_left as Node {
                if !matched_left.get_bit(u)
                    && self.try_augment(u, &dist, &mut vis, &mut match_right, &mut matched_left)
                {
                    augmented += 1;
                }
            }

            if augmented == 0 {
                break;
            }
        }

        let mut match_left = vec![INVALID_NODE; n_left];
        for (v, &u) in match_right.iter().enumerate() {
            if u != INVALID_NODE {
                match_left[u as usize] = v as Node;
            }
        }

        BipartiteMatching {
            match_left,
            match_right,
        }
    }

    /// BFS from all free left nodes at once, labelling left nodes with their
    /// distance along alternating paths (free left node, edge, matched
    /// partner, ...).
    fn bfs_layers(&self, match_right: &[Node], matched_left: &NodeBitSet, dist: &mut [Node]) {
        dist.fill(INVALID_NODE);
        let mut queue = VecDeque::new();

        for u in 0..self.adj.len() as Node {
            if !matched_left.get_bit(u) {
                dist[u as usize] = 0;
                queue.push_back(u);
            }
        }

        while let Some(u) = queue.pop_front() {
            for &v in &self.adj[u as usize] {
                let w = match_right[v as usize];
                if w != INVALID_NODE && dist[w as usize] == INVALID_NODE {
                    dist[w as usize] = dist[u as usize] + 1;
                    queue.push_back(w);
                }
            }
        }
    }

    /// DFS from the free left node `root` along strictly increasing distance
    /// layers. On reaching a free right node, all matched/unmatched edges on
    /// the path are flipped. Uses an explicit stack of `(left node, edge
    /// index)` frames.
    fn try_augment(
        &self,
        root: Node,
        dist: &[Node],
        vis: &mut NodeBitSet,
        match_right: &mut [Node],
        matched_left: &mut NodeBitSet,
    ) -> bool {
        let mut stack: Vec<(Node, usize)> = vec![(root, 0)];
        vis.set_bit(root);

        while let Some(&(u, i)) = stack.last() {
            if i >= self.adj[u as usize].len() {
                stack.pop();
                if let Some(parent) = stack.last_mut() {
                    parent.1 += 1;
                }
                continue;
            }

            let v = self.adj[u as usize][i];
            let w = match_right[v as usize];

            if w == INVALID_NODE {
                // free right node: flip the whole alternating path
                for &(fu, fi) in &stack {
                    match_right[self.adj[fu as usize][fi] as usize] = fu;
                    matched_left.set_bit(fu);
                }
                return true;
            }

            if !vis.get_bit(w) && dist[w as usize] == dist[u as usize] + 1 {
                vis.set_bit(w);
                stack.push((w, 0));
            } else {
                stack.last_mut().unwrap().1 += 1;
            }
        }

        false
    }
}

/// A trait providing matching algorithms on undirected graphs.
pub trait Matching: AdjacencyList + GraphType<Dir = Undirected> {
    /// Computes a **maximal matching** in an undirected graph.
    ///
    /// Each edge `{u, v}` in the matching is returned only once as `(u, v)`
    /// with `u <= v`. The resulting vector is sorted lexicographically.
    fn maximal_undirected_matching(&self) -> Vec<(Node, Node)> {
        self.maximal_undirected_matching_excluding(std::iter::empty())
    }

    /// Computes a **maximal matching** on the subgraph induced by excluding
    /// all vertices provided by `excl`.
    fn maximal_undirected_matching_excluding<I>(&self, excl: I) -> Vec<(Node, Node)>
    where
        I: IntoIterator<Item = Node>;
}

impl<G> Matching for G
where
    G: AdjacencyList + GraphType<Dir = Undirected>,
{
    /// Greedy implementation: iterate vertices, pick the first available
    /// unmatched neighbor, mark both endpoints as matched.
    fn maximal_undirected_matching_excluding<I>(&self, excl: I) -> Vec<(Node, Node)>
    where
        I: IntoIterator<Item = Node>,
    {
        let mut matching = Vec::new();
        let mut matched = NodeBitSet::new_with_bits_set(self.number_of_nodes(), excl);

        for u in self.vertices() {
            if matched.get_bit(u) {
                continue;
            }

            if let Some(v) = self.neighbors_of(u).find(|&v| v != u && !matched.get_bit(v)) {
                matched.set_bit(u);
                matched.set_bit(v);
                matching.push((u.min(v), u.max(v)));
            }
        }

        matching
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::FlowNetwork;
    use crate::repr::AdjArrayUndir;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    #[test]
    fn hopcroft_karp_example() {
        let mut hk = HopcroftKarp::new(3, 4);
        hk.add_edges([(0, 1), (1, 0), (1, 1), (1, 2), (2, 2), (2, 3)]);

        let matching = hk.compute();
        assert_eq!(matching.size(), 3);

        for (u, v) in matching.pairs() {
            assert_eq!(matching.match_right()[v as usize], u);
        }
    }

    #[test]
    fn unmatchable_side() {
        let mut hk = HopcroftKarp::new(3, 1);
        hk.add_edges([(0, 0), (1, 0), (2, 0)]);

        let matching = hk.compute();
        assert_eq!(matching.size(), 1);
        assert_eq!(
            matching
                .match_left()
                .iter()
                .filter(|&&v| v == INVALID_NODE)
                .count(),
            2
        );
    }

    #[test]
    fn empty_graph() {
        let hk = HopcroftKarp::new(4, 4);
        assert_eq!(hk.compute().size(), 0);
    }

    #[test]
    fn perfect_matching_on_cycle() {
        // even cycle as bipartite graph: left i adjacent to right i and i+1
        let n = 6;
        let mut hk = HopcroftKarp::new(n, n);
        for u in 0..n {
            hk.add_edge(u, u);
            hk.add_edge(u, (u + 1) % n);
        }
        assert_eq!(hk.compute().size(), n);
    }

    #[test]
    fn agrees_with_flow_reduction() {
        let rng = &mut Pcg64::seed_from_u64(1234);

        for _ in 0..20 {
            let n1 = rng.random_range(1..10u32);
            let n2 = rng.random_range(1..10u32);

            let mut hk = HopcroftKarp::new(n1, n2);
            let mut net = FlowNetwork::new(n1 + n2 + 2);
            let (s, t) = (n1 + n2, n1 + n2 + 1);

            for u in 0..n1 {
                net.add_edge(s, u, 1);
            }
            for v in 0..n2 {
                net.add_edge(n1 + v, t, 1);
            }

            for u in 0..n1 {
                for v in 0..n2 {
                    if rng.random_bool(0.3) {
                        hk.add_edge(u, v);
                        net.add_edge(u, n1 + v, 1);
                    }
                }
            }

            assert_eq!(hk.compute().size() as i64, net.dinic(s, t));
        }
    }

    #[test]
    fn maximal_undirected_matching() {
        // 0 - 1 - 2 - 3
        let graph = AdjArrayUndir::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
        let matching = graph.maximal_undirected_matching();
        assert!(matching == vec![(0, 1), (2, 3)] || matching == vec![(1, 2)]);
    }

    #[test]
    fn maximal_undirected_matching_excluding() {
        let graph = AdjArrayUndir::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
        let matching = graph.maximal_undirected_matching_excluding(std::iter::once(1));
        assert_eq!(matching, vec![(2, 3)]);
    }
}
