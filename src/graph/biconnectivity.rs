/*!
# Biconnectivity

One depth-first traversal of an undirected graph computes discovery times
`tin` and low-links `low`, from which this module derives:

- the set of **bridges** (edges whose removal disconnects the graph),
- the set of **cut nodes** (articulation points),
- the partition into **edge-biconnected components**, and
- the **block forest** whose nodes are components and whose edges are the
  bridges between them.

The traversal uses an explicit stack of frames holding live neighbor
iterators, so inputs of arbitrary depth are fine. Multi-edges are handled
correctly: only the single edge used to enter a node is skipped as the tree
edge, any further copy of the parent in the neighborhood counts as a back
edge. A doubled edge is therefore never a bridge.
*/

use super::*;
use crate::repr::AdjArrayUndir;

/// Biconnectivity algorithms on undirected graphs.
///
/// The input must satisfy the symmetry invariant `v in adj[u] <=> u in
/// adj[v]`, which [`AdjArrayUndir`] guarantees by construction.
pub trait Biconnectivity: AdjacencyList + GraphType<Dir = Undirected> + Sized {
    /// Runs the full decomposition.
    fn biconnectivity(&self) -> BlockDecomposition {
        BiconnectivitySearch::new(self).compute()
    }

    /// Returns only the bridges, i.e. edges `(u, v)` (directed from DFS
    /// parent to child) whose removal disconnects their component.
    fn bridges(&self) -> Vec<Edge> {
        self.biconnectivity().into_bridges()
    }

    /// Returns only the cut nodes (articulation points).
    fn cut_nodes(&self) -> Vec<Node> {
        self.biconnectivity().into_cut_nodes()
    }
}

impl<G> Biconnectivity for G where G: AdjacencyList + GraphType<Dir = Undirected> + Sized {}

/// Result of a [`Biconnectivity::biconnectivity`] run.
pub struct BlockDecomposition {
    bridges: Vec<Edge>,
    cut_nodes: Vec<Node>,
    components: Vec<Vec<Node>>,
    comp_of: Vec<Node>,
    block_forest: AdjArrayUndir,
}

impl BlockDecomposition {
    /// Bridges in the order they were discovered, each as `Edge(parent,
    /// child)` of the DFS tree.
    pub fn bridges(&self) -> &[Edge] {
        &self.bridges
    }

    /// Cut nodes in the order their DFS frames completed.
    pub fn cut_nodes(&self) -> &[Node] {
        &self.cut_nodes
    }

    /// The edge-biconnected components. Every node appears in exactly one
    /// component; singletons form their own.
    pub fn components(&self) -> &[Vec<Node>] {
        &self.components
    }

    /// The component id of a node.
    /// ** Panics if `u >= n` **
    pub fn component_of(&self, u: Node) -> Node {
        self.comp_of[u as usize]
    }

    /// The block forest over component ids: components are adjacent iff a
    /// bridge connects them. The forest is acyclic by construction.
    pub fn block_forest(&self) -> &AdjArrayUndir {
        &self.block_forest
    }

    pub fn into_bridges(self) -> Vec<Edge> {
        self.bridges
    }

    pub fn into_cut_nodes(self) -> Vec<Node> {
        self.cut_nodes
    }
}

struct BiconnectivitySearch<'a, G>
where
    G: AdjacencyList + GraphType<Dir = Undirected>,
{
    graph: &'a G,
    timer: Node,
    states: Vec<NodeState>,
    path_stack: Vec<Node>,
    call_stack: Vec<StackFrame<'a, G>>,

    bridges: Vec<Edge>,
    cut_nodes: Vec<Node>,
    components: Vec<Vec<Node>>,
    comp_of: Vec<Node>,
}

struct StackFrame<'a, G>
where
    G: AdjacencyList + 'a,
{
    node: Node,
    parent: Node,
    /// One incident copy of the parent edge still has to be skipped as the
    /// tree edge; every further copy is a back edge.
    parent_edge_pending: bool,
    first_call: bool,
    children: Node,
    is_cut: bool,
    neighbors: G::NeighborIter<'a>,
}

#[derive(Debug, Clone, Copy, Default)]
struct NodeState {
    visited: bool,
    tin: Node,
    low: Node,
}

impl NodeState {
    fn visit(&mut self, timer: Node) {
        debug_assert!(!self.visited);
        self.visited = true;
        self.tin = timer;
        self.low = timer;
    }

    fn try_lower(&mut self, value: Node) {
        self.low = self.low.min(value);
    }
}

impl<'a, G> BiconnectivitySearch<'a, G>
where
    G: AdjacencyList + GraphType<Dir = Undirected>,
{
    fn new(graph: &'a G) -> Self {
        let n = graph.len();
        Self {
            graph,
            timer: 0,
            states: vec![NodeState::default(); n],
            path_stack: Vec::with_capacity(32),
            call_stack: Vec::with_capacity(32),
            bridges: Vec::new(),
            cut_nodes: Vec::new(),
            components: Vec::new(),
            comp_of: vec![INVALID_NODE; n],
        }
    }

    fn push_node(&mut self, node: Node, parent: Node) {
        self.call_stack.push(StackFrame {
            node,
            parent,
            parent_edge_pending: parent != INVALID_NODE,
            first_call: true,
            children: 0,
            is_cut: false,
            neighbors: self.graph.neighbors_of(node),
        });
    }

    fn compute(mut self) -> BlockDecomposition {
        for u in self.graph.vertices() {
            if !self.states[u as usize].visited {
                self.push_node(u, INVALID_NODE);
                self.search();
            }
        }

        let block_forest = self.build_block_forest();

        BlockDecomposition {
            bridges: self.bridges,
            cut_nodes: self.cut_nodes,
            components: self.components,
            comp_of: self.comp_of,
            block_forest,
        }
    }

    /// Runs the DFS rooted at the single frame currently on the call stack.
    /// Mirrors the explicit-stack structure of the Tarjan SCC iterator: all
    /// loop state lives in the frames, so a "recursive call" is a `continue`.
    fn search(&mut self) {
        'recurse: while let Some(frame) = self.call_stack.last_mut() {
            let u = frame.node;

            if frame.first_call {
                frame.first_call = false;
                self.states[u as usize].visit(self.timer);
                self.timer += 1;
                self.path_stack.push(u);
            }

            for w in frame.neighbors.by_ref() {
                if w == frame.parent && frame.parent_edge_pending {
                    frame.parent_edge_pending = false;
                    continue;
                }

                if self.states[w as usize].visited {
                    let w_tin = self.states[w as usize].tin;
                    self.states[u as usize].try_lower(w_tin);
                } else {
                    self.push_node(w, u);
                    continue 'recurse;
                }
            }

            let frame = self.call_stack.pop().unwrap();
            let state = self.states[u as usize];
            let is_root = frame.parent == INVALID_NODE;

            if (is_root && frame.children >= 2) || (!is_root && frame.is_cut) {
                self.cut_nodes.push(u);
            }

            if state.low == state.tin {
                self.harvest_component(u);
            }

            if let Some(parent_frame) = self.call_stack.last_mut() {
                parent_frame.children += 1;
                let parent_tin = self.states[parent_frame.node as usize].tin;

                parent_frame.is_cut |= state.low >= parent_tin;
                if state.low > parent_tin {
                    self.bridges.push(Edge(parent_frame.node, u));
                }

                let node = parent_frame.node;
                self.states[node as usize].try_lower(state.low);
            }
        }
    }

    /// Pops the node stack down to and including `root` and records the
    /// popped nodes as one edge-biconnected component.
    fn harvest_component(&mut self, root: Node) {
        let id = self.components.len() as Node;
        let mut component = Vec::new();
        loop {
            let v = self.path_stack.pop().unwrap();
            self.comp_of[v as usize] = id;
            component.push(v);
            if v == root {
                break;
            }
        }
        self.components.push(component);
    }

    /// Connects components along inter-component edges. Since those are
    /// exactly the bridges, the result is acyclic.
    fn build_block_forest(&self) -> AdjArrayUndir {
        let mut forest = AdjArrayUndir::new(self.components.len() as NumNodes);
        for Edge(u, v) in self.graph.edges(true) {
            let (cu, cv) = (self.comp_of[u as usize], self.comp_of[v as usize]);
            if cu != cv {
                forest.add_edge(cu, cv);
            }
        }
        forest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Connectivity, sort_components};
    use itertools::Itertools;

    #[test]
    fn bridges_in_path() {
        for n in [2 as NumNodes, 5, 10, 15] {
            let graph = AdjArrayUndir::from_edges(n, (0..n - 1).map(|u| (u, u + 1)));

            let mut bridges = graph.bridges();
            bridges.sort();

            // every edge of a path is a bridge
            assert_eq!(bridges, graph.ordered_edges(true).collect_vec());
        }
    }

    #[test]
    fn bridge_in_example() {
        let graph =
            AdjArrayUndir::from_edges(6, [(0, 1), (0, 2), (2, 1), (1, 3), (3, 4), (4, 5), (5, 3)]);

        assert_eq!(graph.bridges(), vec![Edge(1, 3)]);
        assert_eq!(graph.cut_nodes(), vec![3, 1]);
    }

    #[test]
    fn parallel_edge_is_no_bridge() {
        let graph = AdjArrayUndir::from_edges(3, [(0, 1), (0, 1), (1, 2)]);

        assert_eq!(graph.bridges(), vec![Edge(1, 2)]);
        // 0 and 1 are in the same component thanks to the doubled edge
        let bcc = graph.biconnectivity();
        assert_eq!(bcc.component_of(0), bcc.component_of(1));
        assert_ne!(bcc.component_of(1), bcc.component_of(2));
    }

    #[test]
    fn block_decomposition_example() {
        let graph = AdjArrayUndir::from_edges(8, [(0, 1), (0, 5), (1, 2), (1, 5), (3, 7), (4, 5)]);
        let bcc = graph.biconnectivity();

        assert_eq!(bcc.cut_nodes(), &[5, 1]);
        assert_eq!(bcc.bridges(), &[Edge(1, 2), Edge(5, 4), Edge(3, 7)]);
        assert_eq!(
            bcc.components(),
            &[
                vec![2],
                vec![4],
                vec![5, 1, 0],
                vec![7],
                vec![3],
                vec![6]
            ]
        );

        let forest = bcc.block_forest();
        assert_eq!(forest.number_of_nodes(), 6);
        assert_eq!(
            forest.ordered_edges(true).collect_vec(),
            vec![Edge(0, 2), Edge(1, 2), Edge(3, 4)]
        );
    }

    #[test]
    fn block_forest_is_acyclic() {
        // two triangles joined by a bridge plus a pendant path
        let graph = AdjArrayUndir::from_edges(
            8,
            [
                (0, 1),
                (1, 2),
                (2, 0),
                (2, 3),
                (3, 4),
                (4, 5),
                (5, 3),
                (5, 6),
                (6, 7),
            ],
        );
        let bcc = graph.biconnectivity();

        let forest = bcc.block_forest();
        let num_forest_components = forest.connected_components().count() as NumEdges;
        // acyclic: #edges == #nodes - #components
        assert_eq!(
            forest.number_of_edges(),
            forest.number_of_nodes() - num_forest_components
        );
    }

    #[test]
    fn components_partition_nodes() {
        let graph = AdjArrayUndir::from_edges(
            7,
            [(0, 1), (1, 2), (2, 0), (2, 3), (4, 5), (5, 6), (6, 4)],
        );
        let bcc = graph.biconnectivity();

        let all_nodes = sort_components(bcc.components().to_vec())
            .into_iter()
            .flatten()
            .sorted()
            .collect_vec();
        assert_eq!(all_nodes, (0..7).collect_vec());

        for (id, component) in bcc.components().iter().enumerate() {
            for &u in component {
                assert_eq!(bcc.component_of(u), id as Node);
            }
        }
    }
}
