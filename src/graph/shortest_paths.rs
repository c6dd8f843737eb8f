/*!
# Single-Source Shortest Paths

Two algorithms on [`WeightedAdjArray`]:

- [`SingleSourceShortestPaths::dijkstra`] for non-negative weights,
- [`SingleSourceShortestPaths::bellman_ford`] for arbitrary weights, which
  reports a reachable negative cycle as [`Error::NegativeCycle`] instead of
  producing meaningless distances.
*/

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::*;
use crate::error::{Error, Result};
use crate::repr::WeightedAdjArray;

/// Shortest-path distances from a source; `None` marks unreachable nodes.
pub type Distances = Vec<Option<Weight>>;

pub trait SingleSourceShortestPaths {
    /// Computes shortest-path distances from `source` using Dijkstra's
    /// algorithm with a binary heap in `O((n + m) log n)`.
    ///
    /// Fails with [`Error::InvalidArgument`] when a negative edge weight is
    /// encountered during the search.
    /// ** Panics if `source >= n` **
    fn dijkstra(&self, source: Node) -> Result<Distances>;

    /// Computes shortest-path distances from `source` using Bellman–Ford in
    /// `O(n * m)`. Supports negative weights; fails with
    /// [`Error::NegativeCycle`] if a negative cycle is reachable from
    /// `source`.
    /// ** Panics if `source >= n` **
    fn bellman_ford(&self, source: Node) -> Result<Distances>;
}

impl SingleSourceShortestPaths for WeightedAdjArray {
    fn dijkstra(&self, source: Node) -> Result<Distances> {
        assert!(source < self.number_of_nodes());

        let mut dist: Distances = vec![None; self.len()];
        let mut heap = BinaryHeap::new();

        dist[source as usize] = Some(0);
        heap.push(Reverse((0 as Weight, source)));

        while let Some(Reverse((d, u))) = heap.pop() {
            if dist[u as usize] != Some(d) {
                continue; // stale entry
            }

            for (v, w) in self.weighted_neighbors_of(u) {
                if w < 0 {
                    return Err(Error::invalid_argument(format!(
                        "dijkstra requires non-negative weights, found {w} on ({u},{v})"
                    )));
                }

                let cand = d + w;
                if dist[v as usize].is_none_or(|cur| cand < cur) {
                    dist[v as usize] = Some(cand);
                    heap.push(Reverse((cand, v)));
                }
            }
        }

        Ok(dist)
    }

    fn bellman_ford(&self, source: Node) -> Result<Distances> {
        assert!(source < self.number_of_nodes());

        let mut dist: Distances = vec![None; self.len()];
        dist[source as usize] = Some(0);

        // n - 1 relaxation rounds suffice for any shortest path
        for _ in 1..self.len().max(1) {
            let mut changed = false;
            for WeightedEdge(u, v, w) in self.weighted_edges() {
                if let Some(du) = dist[u as usize] {
                    if dist[v as usize].is_none_or(|dv| du + w < dv) {
                        dist[v as usize] = Some(du + w);
                        changed = true;
                    }
                }
            }
            if !changed {
                return Ok(dist);
            }
        }

        // any further improvement certifies a reachable negative cycle
        for WeightedEdge(u, v, w) in self.weighted_edges() {
            if let Some(du) = dist[u as usize] {
                if dist[v as usize].is_none_or(|dv| du + w < dv) {
                    return Err(Error::NegativeCycle(format!(
                        "relaxing ({u},{v}) still improves after {} rounds",
                        self.len() - 1
                    )));
                }
            }
        }

        Ok(dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn example() -> WeightedAdjArray {
        let mut g = WeightedAdjArray::new(5);
        g.add_edge(0, 1, 10);
        g.add_edge(0, 2, 3);
        g.add_edge(2, 1, 4);
        g.add_edge(1, 3, 2);
        g.add_edge(2, 3, 8);
        g.add_edge(3, 4, 7);
        g
    }

    #[test]
    fn dijkstra_example() {
        let dist = example().dijkstra(0).unwrap();
        assert_eq!(dist, vec![Some(0), Some(7), Some(3), Some(9), Some(16)]);
    }

    #[test]
    fn dijkstra_unreachable() {
        let mut g = WeightedAdjArray::new(3);
        g.add_edge(0, 1, 1);
        let dist = g.dijkstra(0).unwrap();
        assert_eq!(dist[2], None);
    }

    #[test]
    fn dijkstra_rejects_negative_weights() {
        let mut g = WeightedAdjArray::new(2);
        g.add_edge(0, 1, -1);
        assert!(matches!(g.dijkstra(0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn bellman_ford_negative_edges() {
        let mut g = WeightedAdjArray::new(4);
        g.add_edge(0, 1, 4);
        g.add_edge(0, 2, 5);
        g.add_edge(2, 1, -3);
        g.add_edge(1, 3, 2);
        let dist = g.bellman_ford(0).unwrap();
        assert_eq!(dist, vec![Some(0), Some(2), Some(5), Some(4)]);
    }

    #[test]
    fn bellman_ford_negative_cycle() {
        let mut g = WeightedAdjArray::new(3);
        g.add_edge(0, 1, 1);
        g.add_edge(1, 2, -5);
        g.add_edge(2, 1, 1);
        assert!(matches!(g.bellman_ford(0), Err(Error::NegativeCycle(_))));
    }

    #[test]
    fn unreachable_negative_cycle_is_fine() {
        let mut g = WeightedAdjArray::new(4);
        g.add_edge(0, 1, 1);
        // cycle 2 <-> 3 is negative but not reachable from 0
        g.add_edge(2, 3, -5);
        g.add_edge(3, 2, 1);
        let dist = g.bellman_ford(0).unwrap();
        assert_eq!(dist, vec![Some(0), Some(1), None, None]);
    }

    #[test]
    fn agree_on_random_non_negative_graphs() {
        let rng = &mut Pcg64::seed_from_u64(31337);

        for _ in 0..20 {
            let n = rng.random_range(2..20u32);
            let m = rng.random_range(1..60);

            let mut g = WeightedAdjArray::new(n);
            for _ in 0..m {
                g.add_edge(
                    rng.random_range(0..n),
                    rng.random_range(0..n),
                    rng.random_range(0..100),
                );
            }

            assert_eq!(g.dijkstra(0).unwrap(), g.bellman_ford(0).unwrap());
        }
    }
}
