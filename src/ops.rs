/*!
# Graph Operation Traits

Algorithms in [`crate::graph`] are implemented against small capability
traits rather than concrete storage, so that any representation providing
the required accessors can be used. The split follows the usual lines:

- [`GraphNodeOrder`] / [`GraphEdgeOrder`]: sizes and vertex iteration,
- [`AdjacencyList`]: neighborhood access,
- [`DirectedAdjacencyList`]: the directed view (out-neighborhoods),
- [`GraphNew`] / [`GraphEdgeEditing`]: construction and mutation.

Nodes are integers in `0..n`; passing a node `>= n` to any accessor panics.
*/

use std::ops::Range;

use itertools::Itertools;

use crate::{edge::*, node::*};

/// Marker type for directed graphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Directed;

/// Marker type for undirected graphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Undirected;

/// Associates a graph with its directedness at the type level.
pub trait GraphType {
    type Dir;
}

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Returns the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> impl Iterator<Item = Node> + '_;

    /// Returns a range of vertices. In contrast to `self.vertices()`, the
    /// range does not borrow self and hence may be used where additional
    /// mutable references of self are needed.
    fn vertices_range(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns an empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;
}

/// Getters for neighborhoods & edges
pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Iterator over a neighborhood. This is an associated type (rather than
    /// an `impl Iterator` return) so that algorithms can store live neighbor
    /// iterators inside explicit stack frames.
    type NeighborIter<'a>: Iterator<Item = Node> + 'a
    where
        Self: 'a;

    /// Returns an iterator over the (open) neighborhood of a given vertex.
    /// ** Panics if `u >= n` **
    ///
    /// Note that for directed graphs, this is equivalent to `out_neighbors_of`
    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_>;

    /// Returns the number of (outgoing) neighbors of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns *true* if `u` has no incident edges at all
    /// ** Panics if `u >= n` **
    fn is_singleton(&self, u: Node) -> bool {
        self.degree_of(u) == 0
    }

    /// Returns an iterator over all vertices with at least one neighbor
    fn vertices_no_singletons(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices().filter(|&u| !self.is_singleton(u))
    }

    /// Returns the maximum degree in the graph
    fn max_degree(&self) -> NumNodes {
        self.vertices().map(|u| self.degree_of(u)).max().unwrap_or(0)
    }

    /// Returns an iterator over outgoing edges of a given vertex.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors_of(u)
            .map(move |v| Edge(u, v))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over all edges in the graph.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.vertices_range()
            .flat_map(move |u| self.edges_of(u, only_normalized))
    }

    /// Returns all edges in sorted order.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn ordered_edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> {
        self.edges(only_normalized).sorted()
    }
}

macro_rules! propagate {
    ($out_fn:ident => $fn:ident($($arg:ident : $type:ty),*) -> $ret:ty) => {
        #[inline]
        fn $out_fn(&self, $($arg: $type),*) -> $ret {
            self.$fn($($arg),*)
        }
    };
}

/// The directed view of an adjacency list: `neighbors_of` is read as the
/// out-neighborhood. Algorithms that only make sense on directed graphs
/// (SCC, topological order, condensation) bound on this trait.
pub trait DirectedAdjacencyList: AdjacencyList + GraphType<Dir = Directed> {
    propagate!(out_neighbors_of => neighbors_of(u: Node) -> Self::NeighborIter<'_>);
    propagate!(out_degree_of => degree_of(u: Node) -> NumNodes);
}

impl<G> DirectedAdjacencyList for G where G: AdjacencyList + GraphType<Dir = Directed> {}

/// Trait to test existence of edges in a graph.
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns *true* if the edge (u,v) exists in the graph.
    /// ** Panics if `u >= n || v >= n` **
    fn has_edge(&self, u: Node, v: Node) -> bool;

    /// Returns *true* if a self-loop (u,u) exists.
    /// ** Panics if `u >= n` **
    fn has_self_loop(&self, u: Node) -> bool {
        self.has_edge(u, u)
    }
}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates an empty graph with n singleton nodes
    fn new(n: NumNodes) -> Self;
}

/// Provides functions to insert/delete edges.
///
/// The representations in this crate permit parallel edges: `add_edge` never
/// checks for a prior copy. The biconnectivity routines rely on multi-edges
/// being representable (a doubled edge is never a bridge).
pub trait GraphEdgeEditing: GraphNew {
    /// Adds the edge *(u,v)* to the graph.
    /// ** Panics if `u >= n || v >= n` **
    fn add_edge(&mut self, u: Node, v: Node);

    /// Adds all edges in the collection
    fn add_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator,
        I::Item: Into<Edge>,
    {
        for Edge(u, v) in edges.into_iter().map(|d| d.into()) {
            self.add_edge(u, v);
        }
    }

    /// Removes one copy of the edge *(u,v)* from the graph.
    /// Returns *true* exactly if an edge was removed.
    /// ** Panics if `u >= n || v >= n` **
    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool;
}

/// A super trait for creating a graph from a set of edges and a number of nodes
pub trait GraphFromScratch {
    /// Create a graph from a number of nodes and an iterator over Edges
    fn from_edges<I>(n: NumNodes, edges: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Edge>;
}

impl<G: GraphNew + GraphEdgeEditing> GraphFromScratch for G {
    fn from_edges<I>(n: NumNodes, edges: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Edge>,
    {
        let mut graph = Self::new(n);
        graph.add_edges(edges);
        graph
    }
}
