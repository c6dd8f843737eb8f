/*!
# Connectivity

Connected components of undirected graphs and strongly connected components
(Tarjan) of directed graphs, both exposed as lazy iterators, plus the
condensation of a directed graph.
*/

use std::iter::FusedIterator;

use itertools::Itertools;

use super::*;
use crate::repr::AdjArray;

/// Connectivity algorithms, blanket-implemented on all graph representations.
pub trait Connectivity: AdjacencyList + Sized {
    /// Iterates the connected components of an undirected graph, one
    /// `Vec<Node>` at a time.
    fn connected_components(&self) -> ConnectedComponents<'_, Self>
    where
        Self: GraphType<Dir = Undirected>,
    {
        ConnectedComponents::new(self)
    }

    /// Returns the strongly connected components of the graph.
    /// See [`StronglyConnectedComponents`] for the emission order.
    fn strongly_connected_components(&self) -> StronglyConnectedComponents<'_, Self>
    where
        Self: DirectedAdjacencyList,
    {
        StronglyConnectedComponents::new(self)
    }

    /// Like [`Connectivity::strongly_connected_components`], but SCCs of size
    /// 1 are only included if the node has a self-loop.
    fn strongly_connected_components_no_singletons(&self) -> StronglyConnectedComponents<'_, Self>
    where
        Self: DirectedAdjacencyList,
    {
        StronglyConnectedComponents::new(self).include_singletons(false)
    }

    /// Contracts every SCC into a single node and returns the resulting
    /// acyclic graph together with the component label of every original
    /// node.
    ///
    /// Component ids are assigned in emission order of
    /// [`Connectivity::strongly_connected_components`], i.e. in reverse
    /// topological order: every edge `(u, v)` of the condensation satisfies
    /// `u > v`. Parallel edges between components are deduplicated.
    fn condensation(&self) -> (AdjArray, Vec<Node>)
    where
        Self: DirectedAdjacencyList,
    {
        let mut comp = vec![INVALID_NODE; self.len()];
        let mut num_comps: Node = 0;
        for component in self.strongly_connected_components() {
            for u in component {
                comp[u as usize] = num_comps;
            }
            num_comps += 1;
        }

        let mut dag = AdjArray::new(num_comps);
        let mut edges = Vec::new();
        for u in self.vertices() {
            for v in self.neighbors_of(u) {
                let (cu, cv) = (comp[u as usize], comp[v as usize]);
                if cu != cv {
                    edges.push((cu, cv));
                }
            }
        }
        edges.sort_unstable();
        edges.dedup();
        dag.add_edges(edges);

        (dag, comp)
    }
}

impl<G> Connectivity for G where G: AdjacencyList + Sized {}

/// Iterator over the connected components of an undirected graph.
///
/// Internally restarts a single BFS at unvisited nodes, so the total cost
/// over all components is linear.
pub struct ConnectedComponents<'a, G>
where
    G: AdjacencyList + GraphType<Dir = Undirected>,
{
    bfs: Bfs<'a, G>,
}

impl<'a, G> ConnectedComponents<'a, G>
where
    G: AdjacencyList + GraphType<Dir = Undirected>,
{
    pub fn new(graph: &'a G) -> Self {
        assert!(
            !graph.is_empty(),
            "Can't iterate connected components in a graph with no nodes!"
        );
        Self { bfs: graph.bfs(0) }
    }
}

impl<G> Iterator for ConnectedComponents<'_, G>
where
    G: AdjacencyList + GraphType<Dir = Undirected>,
{
    type Item = Vec<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let cc = self.bfs.by_ref().collect_vec();
            if !cc.is_empty() {
                return Some(cc);
            }

            if !self.bfs.try_restart_at_unvisited() {
                return None;
            }
        }
    }
}

/// Implementation of Tarjan's Algorithm for Strongly Connected Components.
/// It is designed as an iterator that emits the nodes of one strongly
/// connected component at a time. The order of nodes within a component
/// follows the pop order of the internal stack; the components themselves are
/// emitted in reverse topological order of the condensation (i.e. if each SCC
/// were contracted into a single node).
///
/// Rerunning the iterator on the same graph yields identical output, as the
/// traversal is fully determined by the adjacency order.
pub struct StronglyConnectedComponents<'a, G>
where
    G: DirectedAdjacencyList,
{
    graph: &'a G,
    idx: Node,

    states: Vec<NodeState>,
    potentially_unvisited: usize,

    include_singletons: bool,

    path_stack: Vec<Node>,

    call_stack: Vec<StackFrame<'a, G>>,
}

impl<'a, G> StronglyConnectedComponents<'a, G>
where
    G: DirectedAdjacencyList,
{
    /// Construct the iterator for some graph
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            idx: 0,
            states: vec![Default::default(); graph.len()],
            potentially_unvisited: 0,

            include_singletons: true,

            path_stack: Vec::with_capacity(32),
            call_stack: Vec::with_capacity(32),
        }
    }

    /// Each node that is not part of a cycle is returned as its own SCC.
    /// By setting `include = false`, those nodes are not returned (which can
    /// lead to a significant performance boost)
    pub fn set_include_singletons(&mut self, include: bool) {
        self.include_singletons = include;
    }

    /// Chainable version of [`Self::set_include_singletons`].
    pub fn include_singletons(mut self, include: bool) -> Self {
        self.set_include_singletons(include);
        self
    }

    /// Just like in a classic DFS computing a spanning forest, we need to
    /// visit each node at least once. We start with node 0 and cover all
    /// nodes reachable from there in `search`. Then we look for an untouched
    /// node here, and start over.
    fn next_unvisited_node(&mut self) -> Option<Node> {
        while self.potentially_unvisited < self.graph.len() {
            if !self.states[self.potentially_unvisited].visited {
                let v = self.potentially_unvisited as Node;
                self.push_node(v, None);
                return Some(v);
            }

            self.potentially_unvisited += 1;
        }
        None
    }

    /// Put a pristine stack frame on the call stack. Roughly speaking, this
    /// is the first step to a recursive call of search.
    fn push_node(&mut self, node: Node, parent: Option<Node>) {
        self.call_stack.push(StackFrame {
            node,
            parent: parent.unwrap_or(node),
            initial_stack_len: 0,
            first_call: true,
            has_self_loop: false,
            neighbors: self.graph.out_neighbors_of(node),
        });
    }

    fn search(&mut self) -> Option<Vec<Node>> {
        /*
        Tarjan's algorithm is typically described recursively, similarly to
        DFS with some extra steps. This design has two issues:
         1.) We cannot easily build an iterator from it
         2.) For large graphs we get stack overflows

        To overcome both, we use the explicit call stack `self.call_stack`
        that simulates recursive calls. On first visit a node v is assigned a
        DFS index and the same low_link value. The low_link stores the
        smallest index known to be reachable from v. We then process all of
        its neighbors (which may trigger "recursive calls"). Eventually, all
        nodes in an SCC have the same low_link and the unique node with this
        index becomes the arbitrary representative of the SCC (its root).

        The key design is that the whole computation is wrapped in a `while`
        loop and all state (including the live neighbor iterators) is stored
        in `self.call_stack`. So we either continue directly with another
        iteration, or pause, return a component, and resume by reentering the
        function.
        */

        'recurse: while let Some(frame) = self.call_stack.last_mut() {
            let v = frame.node;

            if frame.first_call {
                frame.first_call = false;
                frame.initial_stack_len = self.path_stack.len() as Node;

                self.states[v as usize].visit(self.idx);
                self.idx += 1;

                self.path_stack.push(v);
            }

            for w in frame.neighbors.by_ref() {
                let w_state = self.states[w as usize];
                frame.has_self_loop |= w == v;

                if !w_state.visited {
                    self.push_node(w, Some(v));
                    continue 'recurse;
                } else if w_state.on_stack {
                    self.states[frame.node as usize].try_lower_link(w_state.index);
                }
            }

            let frame = self.call_stack.pop().unwrap();
            let state = self.states[v as usize];

            self.states[frame.parent as usize].try_lower_link(state.low_link);

            if state.is_root() {
                if !self.include_singletons
                    && *self.path_stack.last().unwrap() == v
                    && !frame.has_self_loop
                {
                    // skip producing a component descriptor for the singleton,
                    // but we need to undo its stack entry
                    self.states[v as usize].on_stack = false;
                    self.path_stack.pop();
                } else {
                    // this component goes into the result, so produce a
                    // descriptor and clean up the stack while doing so
                    let component = self.path_stack
                        [frame.initial_stack_len as usize..self.path_stack.len()]
                        .iter()
                        .copied()
                        .collect_vec();

                    self.path_stack.truncate(frame.initial_stack_len as usize);

                    for &w in &component {
                        self.states[w as usize].on_stack = false;
                    }

                    debug_assert_eq!(*component.first().unwrap(), v);

                    return Some(component);
                }
            }
        }

        None
    }
}

impl<G> Iterator for StronglyConnectedComponents<'_, G>
where
    G: DirectedAdjacencyList,
{
    type Item = Vec<Node>;

    /// Returns either a vector of node ids that form an SCC or None if no
    /// further SCC was found
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(x) = self.search() {
                return Some(x);
            }

            self.next_unvisited_node()?;
        }
    }
}

impl<G> FusedIterator for StronglyConnectedComponents<'_, G> where G: DirectedAdjacencyList {}

struct StackFrame<'a, T>
where
    T: DirectedAdjacencyList + 'a,
{
    node: Node,
    parent: Node,
    initial_stack_len: Node,
    first_call: bool,
    has_self_loop: bool,
    neighbors: T::NeighborIter<'a>,
}

#[derive(Debug, Clone, Copy, Default)]
struct NodeState {
    visited: bool,
    on_stack: bool,
    index: Node,
    low_link: Node,
}

impl NodeState {
    fn visit(&mut self, u: Node) {
        debug_assert!(!self.visited);
        self.index = u;
        self.low_link = u;
        self.visited = true;
        self.on_stack = true;
    }

    fn try_lower_link(&mut self, l: Node) {
        self.low_link = self.low_link.min(l);
    }

    fn is_root(&self) -> bool {
        self.index == self.low_link
    }
}

/// Sorts the nodes in each component increasingly and then the components
/// themselves lexicographically.
pub fn sort_components(mut components: Vec<Vec<Node>>) -> Vec<Vec<Node>> {
    components.iter_mut().for_each(|comp| comp.sort_unstable());
    components.sort_by(|a, b| a[0].cmp(&b[0]));
    components
}
