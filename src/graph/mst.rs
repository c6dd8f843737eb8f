/*!
# Minimum Spanning Trees

Prim's algorithm over a [`WeightedAdjArray`]. The input is interpreted as
undirected: build it with
[`add_undirected_edge`](WeightedAdjArray::add_undirected_edge). On a
disconnected graph the result is a minimum spanning **forest**, obtained by
restarting the search in every component.
*/

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::*;
use crate::repr::WeightedAdjArray;

pub trait MinimumSpanningTree {
    /// Computes a minimum spanning forest with Prim's algorithm in
    /// `O(m log n)`. Returns the total weight and the tree edges, each as
    /// `Edge(parent, child)` of the search tree.
    fn prim_mst(&self) -> (Weight, Vec<Edge>);
}

impl MinimumSpanningTree for WeightedAdjArray {
    fn prim_mst(&self) -> (Weight, Vec<Edge>) {
        let mut in_tree = NodeBitSet::new(self.number_of_nodes());
        let mut total = 0;
        let mut tree_edges = Vec::new();
        // (weight, child, parent), min-heap via Reverse
        let mut heap: BinaryHeap<Reverse<(Weight, Node, Node)>> = BinaryHeap::new();

        for root in self.vertices() {
            if in_tree.get_bit(root) {
                continue;
            }

            in_tree.set_bit(root);
            for (v, w) in self.weighted_neighbors_of(root) {
                heap.push(Reverse((w, v, root)));
            }

            while let Some(Reverse((w, u, parent))) = heap.pop() {
                if in_tree.set_bit(u) {
                    continue;
                }

                total += w;
                tree_edges.push(Edge(parent, u));

                for (v, wv) in self.weighted_neighbors_of(u) {
                    if !in_tree.get_bit(v) {
                        heap.push(Reverse((wv, v, u)));
                    }
                }
            }
        }

        (total, tree_edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    #[test]
    fn triangle() {
        let mut g = WeightedAdjArray::new(3);
        g.add_undirected_edge(0, 1, 1);
        g.add_undirected_edge(1, 2, 2);
        g.add_undirected_edge(2, 0, 3);

        let (total, edges) = g.prim_mst();
        assert_eq!(total, 3);
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn classic_example() {
        let mut g = WeightedAdjArray::new(7);
        for (u, v, w) in [
            (0, 1, 7),
            (0, 3, 5),
            (1, 2, 8),
            (1, 3, 9),
            (1, 4, 7),
            (2, 4, 5),
            (3, 4, 15),
            (3, 5, 6),
            (4, 5, 8),
            (4, 6, 9),
            (5, 6, 11),
        ] {
            g.add_undirected_edge(u, v, w);
        }

        let (total, edges) = g.prim_mst();
        assert_eq!(total, 39);
        assert_eq!(edges.len(), 6);
    }

    #[test]
    fn forest_on_disconnected_graph() {
        let mut g = WeightedAdjArray::new(5);
        g.add_undirected_edge(0, 1, 2);
        g.add_undirected_edge(3, 4, 4);

        let (total, edges) = g.prim_mst();
        assert_eq!(total, 6);
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn spans_all_nodes_of_random_connected_graphs() {
        let rng = &mut Pcg64::seed_from_u64(99);

        for _ in 0..10 {
            let n = rng.random_range(2..30u32);
            let mut g = WeightedAdjArray::new(n);
            // random spanning path keeps the graph connected
            for u in 1..n {
                g.add_undirected_edge(u - 1, u, rng.random_range(1..100));
            }
            for _ in 0..n {
                g.add_undirected_edge(
                    rng.random_range(0..n),
                    rng.random_range(0..n),
                    rng.random_range(1..100),
                );
            }

            let (_, edges) = g.prim_mst();
            assert_eq!(edges.len() as NumNodes, n - 1);

            let nodes = edges
                .iter()
                .flat_map(|&Edge(u, v)| [u, v])
                .unique()
                .count();
            assert_eq!(nodes as NumNodes, n);
        }
    }
}
