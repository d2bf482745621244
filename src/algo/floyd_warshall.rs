//! All-pairs shortest paths (Floyd–Warshall) and predecessor-matrix path
//! recovery.

use fixedbitset::FixedBitSet;

use crate::algo::Measure;
use crate::error::GraphError;
use crate::graph::{Graph, IndexType, NodeId};
use crate::EdgeType;

/// The distance and predecessor matrices of an all-pairs shortest path
/// run, indexed by the compact node ordinals.
///
/// `prev[i][j]` holds the penultimate node ordinal on the shortest path
/// from `i` to `j`; `prev[i][i]` holds `i` itself. A missing entry means
/// no path.
#[derive(Clone, Debug)]
pub struct ApspMatrices<K> {
    dist: Vec<Vec<Option<K>>>,
    prev: Vec<Vec<Option<usize>>>,
}

impl<K: Copy> ApspMatrices<K> {
    /// Shortest distance from `i` to `j`, `None` when unreachable.
    pub fn distance<Ix: IndexType>(&self, i: NodeId<Ix>, j: NodeId<Ix>) -> Option<K> {
        self.dist
            .get(i.index())
            .and_then(|row| row.get(j.index()))
            .copied()
            .flatten()
    }

    /// Reconstruct the shortest path from `i` to `j` out of the
    /// predecessor matrix. Returns `Ok(None)` when `j` is unreachable.
    ///
    /// A predecessor matrix that did not come from a clean all-pairs run,
    /// in particular one encoding a negative cycle, would make the
    /// predecessor chain revisit a node; this is detected and reported as
    /// [`GraphError::NegativeCycle`] instead of recursing forever.
    pub fn recover_path<Ix: IndexType>(
        &self,
        i: NodeId<Ix>,
        j: NodeId<Ix>,
    ) -> Result<Option<Vec<NodeId<Ix>>>, GraphError> {
        if self.distance(i, j).is_none() {
            return Ok(None);
        }
        let mut seen = FixedBitSet::with_capacity(self.dist.len());
        let mut rev = vec![j];
        let mut cur = j.index();
        seen.insert(cur);
        while cur != i.index() {
            cur = match self.prev[i.index()][cur] {
                Some(p) => p,
                None => return Ok(None),
            };
            if seen.put(cur) {
                return Err(GraphError::NegativeCycle);
            }
            rev.push(NodeId::new(cur));
        }
        rev.reverse();
        Ok(Some(rev))
    }
}

/// The Floyd–Warshall all-pairs shortest path algorithm.
///
/// Computes the length of the shortest path between every pair of nodes,
/// for positive or negative arc weights, and the predecessor matrix for
/// [`ApspMatrices::recover_path`]. Uses no attribute state; the matrices
/// are dense over the compact node ordinals.
///
/// # Errors
/// [`GraphError::NegativeCycle`] if the graph contains a cycle of negative
/// total weight; no matrices are returned in that case.
///
/// # Complexity
/// **O(|V|³)** time, **O(|V|²)** space.
pub fn floyd_warshall<N, A, Ty, Ix, K, W>(
    g: &Graph<N, A, Ty, Ix>,
    mut weight: W,
) -> Result<ApspMatrices<K>, GraphError>
where
    Ty: EdgeType,
    Ix: IndexType,
    K: Measure + Copy,
    W: FnMut(&A) -> K,
{
    let n = g.node_count();
    let mut dist: Vec<Vec<Option<K>>> = vec![vec![None; n]; n];
    let mut prev: Vec<Vec<Option<usize>>> = vec![vec![None; n]; n];

    for arc in g.arcs() {
        let (s, t) = (arc.source().index(), arc.target().index());
        let w = weight(arc.info());
        if dist[s][t].map_or(true, |old| w < old) {
            dist[s][t] = Some(w);
            prev[s][t] = Some(s);
        }
        if !g.is_directed() && dist[t][s].map_or(true, |old| w < old) {
            dist[t][s] = Some(w);
            prev[t][s] = Some(t);
        }
    }
    for i in 0..n {
        dist[i][i] = Some(K::default());
        prev[i][i] = Some(i);
    }

    for k in 0..n {
        for i in 0..n {
            let Some(ik) = dist[i][k] else { continue };
            for j in 0..n {
                let Some(kj) = dist[k][j] else { continue };
                let through = ik + kj;
                if dist[i][j].map_or(true, |old| through < old) {
                    dist[i][j] = Some(through);
                    prev[i][j] = prev[k][j];
                }
            }
        }
    }

    // a diagonal entry below zero betrays a negative cycle
    for (i, row) in dist.iter().enumerate() {
        if let Some(d) = row[i] {
            if d < K::default() {
                return Err(GraphError::NegativeCycle);
            }
        }
    }

    Ok(ApspMatrices { dist, prev })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Digraph;

    fn sample() -> (Digraph<(), i32>, Vec<NodeId>) {
        let mut g = Digraph::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        let d = g.add_node(());
        g.extend_with_arcs([
            (a, b, 1),
            (a, c, 4),
            (a, d, 10),
            (b, c, 2),
            (b, d, 2),
            (c, d, 2),
        ])
        .unwrap();
        (g, vec![a, b, c, d])
    }

    #[test]
    fn distances_match_hand_computation() {
        let (g, ids) = sample();
        let apsp = floyd_warshall(&g, |w| *w).unwrap();
        assert_eq!(apsp.distance(ids[0], ids[2]), Some(3));
        assert_eq!(apsp.distance(ids[0], ids[3]), Some(3));
        assert_eq!(apsp.distance(ids[1], ids[3]), Some(2));
        assert_eq!(apsp.distance(ids[3], ids[0]), None);
        assert_eq!(apsp.distance(ids[2], ids[2]), Some(0));
    }

    #[test]
    fn recovered_path_is_the_shortest_one() {
        let (g, ids) = sample();
        let apsp = floyd_warshall(&g, |w| *w).unwrap();
        let path = apsp.recover_path(ids[0], ids[3]).unwrap().unwrap();
        assert_eq!(path, vec![ids[0], ids[1], ids[3]]);
        assert!(apsp.recover_path(ids[3], ids[0]).unwrap().is_none());
    }

    #[test]
    fn negative_cycle_is_detected() {
        let mut g = Digraph::<(), i32>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        g.extend_with_arcs([(a, b, 1), (b, a, -3)]).unwrap();
        assert!(matches!(
            floyd_warshall(&g, |w| *w),
            Err(GraphError::NegativeCycle)
        ));
    }

    #[test]
    fn negative_weights_without_cycle_are_fine() {
        let mut g = Digraph::<(), i32>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        g.extend_with_arcs([(a, b, 5), (b, c, -2), (a, c, 4)]).unwrap();
        let apsp = floyd_warshall(&g, |w| *w).unwrap();
        assert_eq!(apsp.distance(a, c), Some(3));
    }
}
