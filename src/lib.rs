/*!
`algokit` is a library of classical algorithm kernels, organized as four
independent toolkits over a small shared substrate:

- [`graph`]: traversal, strongly connected components (Tarjan),
  biconnectivity with block forest, maximum flow (Dinic, Edmonds–Karp,
  Ford–Fulkerson), bipartite matching (Hopcroft–Karp), shortest paths and
  minimum spanning trees.
- [`string`]: KMP and Z-function searching, Aho–Corasick, suffix arrays
  (doubling and linear DC3) with LCP, suffix automata, sequence alignment
  (Hirschberg) and a small expression parser.
- [`math`]: 64-bit modular arithmetic, Miller–Rabin, Pollard-rho
  factorization, polynomial root finding (Laguerre and RPOLY/Jenkins–Traub)
  and adaptive Simpson quadrature.
- [`fenwick`]: Fenwick trees in 1D/2D with point or range updates, plus a
  coordinate-compressed variant for large index spaces.

# Representation

**Nodes** are `u32` in the range `0..n` where `n` is the number of nodes of
the graph; **edges** are the tuple-struct `Edge(Node, Node)`. Strings are
byte slices; positions are zero-based. All routines are pure computations
over in-memory inputs: they consume inputs by reference and return freshly
allocated results, never retaining references into caller memory.

# Design

Graph algorithms are implemented against the capability traits of [`ops`]
and blanket-implemented on every representation of [`repr`], so most entry
points are methods on the graph itself (`graph.strongly_connected_components()`,
`graph.bridges()`, ...). Configurable algorithms are structs with
*Builder*/*Setter* pairs before running. All DFS-based routines use explicit
stacks of resumable frames, so recursion depth never depends on input size.

Every randomized routine (Pollard rho, Laguerre's initial guesses) takes the
random source as a parameter; given the same seed, the output is reproducible
bit for bit.

# Errors

Fallible routines return [`error::Result`], whose [`error::Error`] kinds
cover invalid arguments, 64-bit overflow, failed numeric convergence and
negative cycles. Passing an out-of-range node to an accessor is a caller bug
and panics.
*/

pub mod edge;
pub mod error;
pub mod fenwick;
pub mod graph;
pub mod math;
pub mod node;
pub mod ops;
pub mod repr;
pub mod string;
pub mod utils;

/// `algokit::prelude` includes definitions for nodes and edges, the graph
/// operation traits, all graph representations, and the error types.
pub mod prelude {
    pub use super::{
        edge::*,
        error::{Error, Result},
        node::*,
        ops::*,
        repr::*,
    };
}
