/*!
# Graph Representations

Two adjacency-array representations back all graph algorithms in this crate:

- [`AdjArray`]: a **directed** graph storing outgoing neighborhoods,
- [`AdjArrayUndir`]: an **undirected** graph where `add_edge(u, v)` inserts
  `v` into `adj[u]` and `u` into `adj[v]`, maintaining the symmetry invariant
  the biconnectivity algorithms rely on.

Both store each neighborhood as a `Vec<Node>` in insertion order; algorithms
are deterministic with respect to that order. Parallel edges and self-loops
are allowed.
*/

use crate::{edge::*, node::*, ops::*};

/// A directed graph storing outgoing neighborhoods as adjacency arrays.
#[derive(Clone, Default)]
pub struct AdjArray {
    out_nbs: Vec<Vec<Node>>,
    num_edges: NumEdges,
}

/// An undirected graph storing both endpoints' neighborhoods.
///
/// The symmetry invariant `v in adj[u] <=> u in adj[v]` holds by
/// construction. A self-loop is recorded once in its node's neighborhood.
#[derive(Clone, Default)]
pub struct AdjArrayUndir {
    nbs: Vec<Vec<Node>>,
    num_edges: NumEdges,
}

macro_rules! impl_common_graph_ops {
    ($graph:ident => $nbs:ident, $dir:ident) => {
        impl GraphType for $graph {
            type Dir = $dir;
        }

        impl GraphNodeOrder for $graph {
            fn number_of_nodes(&self) -> NumNodes {
                self.$nbs.len() as NumNodes
            }

            fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
                self.vertices_range()
            }
        }

        impl GraphEdgeOrder for $graph {
            fn number_of_edges(&self) -> NumEdges {
                self.num_edges
            }
        }

        impl AdjacencyList for $graph {
            type NeighborIter<'a>
                = std::iter::Copied<std::slice::Iter<'a, Node>>
            where
                Self: 'a;

            fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_> {
                self.$nbs[u as usize].iter().copied()
            }

            fn degree_of(&self, u: Node) -> NumNodes {
                self.$nbs[u as usize].len() as NumNodes
            }
        }

        impl AdjacencyTest for $graph {
            fn has_edge(&self, u: Node, v: Node) -> bool {
                assert!(v < self.number_of_nodes());
                self.$nbs[u as usize].contains(&v)
            }
        }

        impl GraphNew for $graph {
            fn new(n: NumNodes) -> Self {
                Self {
                    $nbs: vec![Vec::new(); n as usize],
                    num_edges: 0,
                }
            }
        }

        impl $graph {
            /// Read-only view of the neighborhood of `u` as a slice.
            /// ** Panics if `u >= n` **
            pub fn as_neighbors_slice(&self, u: Node) -> &[Node] {
                &self.$nbs[u as usize]
            }
        }
    };
}

impl_common_graph_ops!(AdjArray => out_nbs, Directed);
impl_common_graph_ops!(AdjArrayUndir => nbs, Undirected);

impl GraphEdgeEditing for AdjArray {
    fn add_edge(&mut self, u: Node, v: Node) {
        assert!(v < self.number_of_nodes());
        self.out_nbs[u as usize].push(v);
        self.num_edges += 1;
    }

    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool {
        assert!(v < self.number_of_nodes());
        let nbs = &mut self.out_nbs[u as usize];
        if let Some(i) = nbs.iter().position(|&w| w == v) {
            nbs.swap_remove(i);
            self.num_edges -= 1;
            true
        } else {
            false
        }
    }
}

impl GraphEdgeEditing for AdjArrayUndir {
    fn add_edge(&mut self, u: Node, v: Node) {
        assert!(u < self.number_of_nodes() && v < self.number_of_nodes());
        self.nbs[u as usize].push(v);
        if u != v {
            self.nbs[v as usize].push(u);
        }
        self.num_edges += 1;
    }

    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool {
        assert!(u < self.number_of_nodes() && v < self.number_of_nodes());
        let Some(i) = self.nbs[u as usize].iter().position(|&w| w == v) else {
            return false;
        };
        self.nbs[u as usize].swap_remove(i);
        if u != v {
            let j = self.nbs[v as usize].iter().position(|&w| w == u).unwrap();
            self.nbs[v as usize].swap_remove(j);
        }
        self.num_edges -= 1;
        true
    }
}

/// An adjacency array with a weight attached to every edge, used by the
/// weighted algorithms (shortest paths, minimum spanning trees).
///
/// Storage is directed; [`WeightedAdjArray::add_undirected_edge`] simply
/// inserts both directions.
#[derive(Clone, Default)]
pub struct WeightedAdjArray {
    nbs: Vec<Vec<(Node, Weight)>>,
    num_edges: NumEdges,
}

impl WeightedAdjArray {
    /// Creates a graph with `n` nodes and no edges.
    pub fn new(n: NumNodes) -> Self {
        Self {
            nbs: vec![Vec::new(); n as usize],
            num_edges: 0,
        }
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.nbs.len() as NumNodes
    }

    pub fn len(&self) -> usize {
        self.nbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nbs.is_empty()
    }

    pub fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }

    pub fn vertices(&self) -> std::ops::Range<Node> {
        0..self.number_of_nodes()
    }

    /// Adds the directed edge `(u, v)` with weight `w`.
    /// ** Panics if `u >= n || v >= n` **
    pub fn add_edge(&mut self, u: Node, v: Node, w: Weight) {
        assert!(v < self.number_of_nodes());
        self.nbs[u as usize].push((v, w));
        self.num_edges += 1;
    }

    /// Adds the edges `(u, v)` and `(v, u)`, both with weight `w`.
    /// ** Panics if `u >= n || v >= n` **
    pub fn add_undirected_edge(&mut self, u: Node, v: Node, w: Weight) {
        self.add_edge(u, v, w);
        self.add_edge(v, u, w);
    }

    /// Adds all weighted edges in the collection (directed).
    pub fn add_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = WeightedEdge>,
    {
        for WeightedEdge(u, v, w) in edges {
            self.add_edge(u, v, w);
        }
    }

    /// The weighted neighborhood of `u`.
    /// ** Panics if `u >= n` **
    pub fn weighted_neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, Weight)> + '_ {
        self.nbs[u as usize].iter().copied()
    }

    /// All directed weighted edges of the graph.
    pub fn weighted_edges(&self) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.vertices().flat_map(move |u| {
            self.weighted_neighbors_of(u)
                .map(move |(v, w)| WeightedEdge(u, v, w))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn directed_basic() {
        let mut g = AdjArray::new(4);
        g.add_edges([(0, 1), (0, 2), (2, 3), (3, 0)]);

        assert_eq!(g.number_of_nodes(), 4);
        assert_eq!(g.number_of_edges(), 4);
        assert_eq!(g.neighbors_of(0).collect_vec(), vec![1, 2]);
        assert_eq!(g.degree_of(3), 1);
        assert!(g.has_edge(2, 3));
        assert!(!g.has_edge(3, 2));

        assert!(g.try_remove_edge(0, 1));
        assert!(!g.try_remove_edge(0, 1));
        assert_eq!(g.number_of_edges(), 3);
    }

    #[test]
    fn undirected_symmetry() {
        let g = AdjArrayUndir::from_edges(5, [(0, 1), (1, 2), (2, 0), (3, 4)]);

        for Edge(u, v) in g.edges(false) {
            assert!(g.has_edge(v, u));
        }
        assert_eq!(g.number_of_edges(), 4);
        assert_eq!(g.degree_of(1), 2);
        assert_eq!(g.vertices_no_singletons().count(), 5);
    }

    #[test]
    fn undirected_parallel_edges() {
        let g = AdjArrayUndir::from_edges(2, [(0, 1), (0, 1)]);
        assert_eq!(g.number_of_edges(), 2);
        assert_eq!(g.degree_of(0), 2);
        assert_eq!(g.degree_of(1), 2);
    }

    #[test]
    fn self_loop_once() {
        let g = AdjArrayUndir::from_edges(2, [(1, 1)]);
        assert_eq!(g.degree_of(1), 1);
        assert!(g.has_self_loop(1));
    }

    #[test]
    fn ordered_edges() {
        let g = AdjArray::from_edges(3, [(2, 0), (0, 2), (1, 0)]);
        assert_eq!(
            g.ordered_edges(false).collect_vec(),
            vec![Edge(0, 2), Edge(1, 0), Edge(2, 0)]
        );
    }
}
