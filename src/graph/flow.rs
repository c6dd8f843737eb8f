/*!
# Maximum Flow

A residual [`FlowNetwork`] over paired forward/reverse edges, with three
augmenting strategies:

- [`FlowNetwork::dinic`]: BFS level graph plus blocking flow with
  current-edge pointers,
- [`FlowNetwork::edmonds_karp`]: repeated shortest augmenting paths,
- [`FlowNetwork::ford_fulkerson`]: arbitrary (DFS) augmenting paths;
  integer capacities only.

All three leave the flow assignment in the `flow` field of every edge and
return the flow value. For integer capacities the returned values agree.
*/

use super::*;
use std::collections::VecDeque;

/// Flow amounts and capacities.
pub type Flow = i64;

/// A directed edge of a [`FlowNetwork`].
///
/// Edges come in pairs: for every edge `e` in `adj[u]`, `adj[e.v][e.rev]` is
/// its partner, created with capacity 0. Pushing `f` units over `e` subtracts
/// `f` from the partner's flow, so `e.flow + partner.flow == 0` holds at all
/// times and the partner's residual capacity grows as `e` is used.
#[derive(Debug, Clone, Copy)]
pub struct FlowEdge {
    /// Head of the edge.
    pub v: Node,
    /// Index of the partner edge within `adj[v]`.
    rev: NumEdges,
    /// Capacity; 0 for reverse edges.
    pub cap: Flow,
    /// Current flow; negative on reverse edges carrying residual.
    pub flow: Flow,
}

impl FlowEdge {
    /// Remaining capacity.
    pub fn residual(&self) -> Flow {
        self.cap - self.flow
    }
}

/// A flow network over nodes `0..n` with non-negative capacities.
pub struct FlowNetwork {
    adj: Vec<Vec<FlowEdge>>,
}

impl FlowNetwork {
    /// Creates a network with `n` nodes and no edges.
    pub fn new(n: NumNodes) -> Self {
        Self {
            adj: vec![Vec::new(); n as usize],
        }
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.adj.len() as NumNodes
    }

    /// Adds a directed edge `u -> v` with the given capacity, along with its
    /// zero-capacity partner `v -> u`.
    /// ** Panics if `u >= n || v >= n` or `cap < 0` **
    pub fn add_edge(&mut self, u: Node, v: Node, cap: Flow) {
        assert!(u < self.number_of_nodes() && v < self.number_of_nodes());
        assert!(cap >= 0);

        let rev_u = self.adj[v as usize].len() as NumEdges;
        let rev_v = self.adj[u as usize].len() as NumEdges;
        self.adj[u as usize].push(FlowEdge {
            v,
            rev: rev_u,
            cap,
            flow: 0,
        });
        self.adj[v as usize].push(FlowEdge {
            v: u,
            rev: rev_v,
            cap: 0,
            flow: 0,
        });
    }

    /// The edges leaving `u`, including the zero-capacity partners of edges
    /// entering `u`.
    /// ** Panics if `u >= n` **
    pub fn edges_of(&self, u: Node) -> &[FlowEdge] {
        &self.adj[u as usize]
    }

    /// Resets all flows to zero, keeping the capacities.
    pub fn reset_flow(&mut self) {
        for nbs in &mut self.adj {
            for e in nbs {
                e.flow = 0;
            }
        }
    }

    /// The net flow currently leaving `u`. After a max-flow run this equals
    /// the returned flow value for `u = s` (and its negation for `u = t`).
    pub fn net_outflow(&self, u: Node) -> Flow {
        self.adj[u as usize].iter().map(|e| e.flow).sum()
    }

    fn push_along(&mut self, u: Node, i: usize, f: Flow) {
        let e = &mut self.adj[u as usize][i];
        e.flow += f;
        let (v, rev) = (e.v, e.rev);
        self.adj[v as usize][rev as usize].flow -= f;

        let e = self.adj[u as usize][i];
        debug_assert!(e.cap == 0 || (0..=e.cap).contains(&e.flow));
        debug_assert_eq!(
            e.flow + self.adj[v as usize][rev as usize].flow,
            0,
            "partner flows must cancel"
        );
    }

    /// BFS over residual edges, labelling nodes with their level.
    /// Returns the labels iff `t` is reachable.
    fn bfs_levels(&self, s: Node, t: Node) -> Option<Vec<Node>> {
        let mut level = vec![INVALID_NODE; self.adj.len()];
        level[s as usize] = 0;
        let mut queue = VecDeque::from(vec![s]);

        while let Some(u) = queue.pop_front() {
            for e in &self.adj[u as usize] {
                if level[e.v as usize] == INVALID_NODE && e.residual() > 0 {
                    level[e.v as usize] = level[u as usize] + 1;
                    queue.push_back(e.v);
                }
            }
        }

        (level[t as usize] != INVALID_NODE).then_some(level)
    }

    /// Follows the current-edge pointers through the level graph to find one
    /// augmenting path, pushes its bottleneck, and returns it (0 if no path
    /// remains in this phase). Edges found useless are skipped by advancing
    /// `ptr`, so they are not revisited within the phase.
    fn dinic_augment(&mut self, s: Node, t: Node, level: &[Node], ptr: &mut [usize]) -> Flow {
        let mut path: Vec<(Node, usize)> = Vec::new();
        let mut u = s;

        loop {
            if u == t {
                let bottleneck = path
                    .iter()
                    .map(|&(w, i)| self.adj[w as usize][i].residual())
                    .min()
                    .unwrap();
                debug_assert!(bottleneck > 0);
                for &(w, i) in &path {
                    self.push_along(w, i, bottleneck);
                }
                return bottleneck;
            }

            if ptr[u as usize] < self.adj[u as usize].len() {
                let e = self.adj[u as usize][ptr[u as usize]];
                if level[e.v as usize] == level[u as usize] + 1 && e.residual() > 0 {
                    path.push((u, ptr[u as usize]));
                    u = e.v;
                } else {
                    ptr[u as usize] += 1;
                }
            } else if let Some((pu, _)) = path.pop() {
                // dead end: retire the edge that led here
                ptr[pu as usize] += 1;
                u = pu;
            } else {
                return 0;
            }
        }
    }

    /// Computes the maximum `s`-`t` flow with Dinic's algorithm and leaves
    /// the assignment in the edges.
    /// ** Panics if `s >= n || t >= n || s == t` **
    pub fn dinic(&mut self, s: Node, t: Node) -> Flow {
        assert!(s < self.number_of_nodes() && t < self.number_of_nodes());
        assert_ne!(s, t);

        let mut max_flow = 0;
        while let Some(level) = self.bfs_levels(s, t) {
            let mut ptr = vec![0; self.adj.len()];
            loop {
                let pushed = self.dinic_augment(s, t, &level, &mut ptr);
                if pushed == 0 {
                    break;
                }
                max_flow += pushed;
            }
        }
        max_flow
    }

    /// Computes the maximum `s`-`t` flow by repeatedly augmenting along a
    /// shortest residual path (Edmonds–Karp). The returned value equals
    /// [`FlowNetwork::dinic`] for integer capacities.
    /// ** Panics if `s >= n || t >= n || s == t` **
    pub fn edmonds_karp(&mut self, s: Node, t: Node) -> Flow {
        assert!(s < self.number_of_nodes() && t < self.number_of_nodes());
        assert_ne!(s, t);

        let mut max_flow = 0;

        loop {
            // BFS storing the edge over which each node was reached
            let mut pred: Vec<Option<(Node, usize)>> = vec![None; self.adj.len()];
            let mut queue = VecDeque::from(vec![s]);

            'bfs: while let Some(u) = queue.pop_front() {
                for (i, e) in self.adj[u as usize].iter().enumerate() {
                    if e.v != s && pred[e.v as usize].is_none() && e.residual() > 0 {
                        pred[e.v as usize] = Some((u, i));
                        if e.v == t {
                            break 'bfs;
                        }
                        queue.push_back(e.v);
                    }
                }
            }

            if pred[t as usize].is_none() {
                return max_flow;
            }

            let mut bottleneck = Flow::MAX;
            let mut v = t;
            while let Some((u, i)) = pred[v as usize] {
                bottleneck = bottleneck.min(self.adj[u as usize][i].residual());
                v = u;
            }

            let mut v = t;
            while let Some((u, i)) = pred[v as usize] {
                self.push_along(u, i, bottleneck);
                v = u;
            }

            max_flow += bottleneck;
        }
    }

    /// Computes the maximum `s`-`t` flow with plain Ford–Fulkerson (DFS
    /// augmenting paths).
    ///
    /// Only valid for integer capacities: with irrational capacities the
    /// method is not guaranteed to terminate, which is why the network only
    /// admits integer capacities in the first place.
    /// ** Panics if `s >= n || t >= n || s == t` **
    pub fn ford_fulkerson(&mut self, s: Node, t: Node) -> Flow {
        assert!(s < self.number_of_nodes() && t < self.number_of_nodes());
        assert_ne!(s, t);

        let mut max_flow = 0;
        loop {
            // iterative DFS for any augmenting path
            let mut pred: Vec<Option<(Node, usize)>> = vec![None; self.adj.len()];
            let mut stack = vec![s];

            'dfs: while let Some(u) = stack.pop() {
                for (i, e) in self.adj[u as usize].iter().enumerate() {
                    if e.v != s && pred[e.v as usize].is_none() && e.residual() > 0 {
                        pred[e.v as usize] = Some((u, i));
                        if e.v == t {
                            break 'dfs;
                        }
                        stack.push(e.v);
                    }
                }
            }

            if pred[t as usize].is_none() {
                return max_flow;
            }

            let mut bottleneck = Flow::MAX;
            let mut v = t;
            while let Some((u, i)) = pred[v as usize] {
                bottleneck = bottleneck.min(self.adj[u as usize][i].residual());
                v = u;
            }

            let mut v = t;
            while let Some((u, i)) = pred[v as usize] {
                self.push_along(u, i, bottleneck);
                v = u;
            }

            max_flow += bottleneck;
        }
    }

    /// Returns the source side of a minimum cut: all nodes reachable from `s`
    /// in the residual graph. Only meaningful after a max-flow run.
    pub fn min_cut_side(&self, s: Node) -> NodeBitSet {
        let mut side = NodeBitSet::new(self.number_of_nodes());
        side.set_bit(s);
        let mut stack = vec![s];
        while let Some(u) = stack.pop() {
            for e in &self.adj[u as usize] {
                if e.residual() > 0 && !side.set_bit(e.v) {
                    stack.push(e.v);
                }
            }
        }
        side
    }
}
