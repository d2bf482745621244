//! Single-source shortest paths: Dijkstra and A*.
//!
//! Both assume non-negative arc weights and use a binary heap of
//! `MinScored` entries with stale-entry skipping: instead of a decrease-key
//! operation, an improved node is pushed again and the outdated entry is
//! recognized on extraction by its settled mark. The contract is the same
//! as with an indexed heap; only constant factors differ.

use std::collections::BinaryHeap;

use crate::algo::Measure;
use crate::attr::{Cookie, GraphBit};
use crate::error::GraphError;
use crate::graph::{Graph, IndexType, NodeId};
use crate::path::Path;
use crate::scored::MinScored;
use crate::EdgeType;

/// The result of a single-source shortest-path run: per-node distances
/// from the source, `None` for unreachable nodes.
///
/// Parent arcs were left in the graph's node cookies, so paths can be
/// rebuilt with [`Distances::path_to`] as long as no other algorithm has
/// overwritten them.
#[derive(Clone, Debug)]
pub struct Distances<K, Ix = crate::graph::DefaultIx> {
    source: NodeId<Ix>,
    dist: Vec<Option<K>>,
}

impl<K: Copy, Ix: IndexType> Distances<K, Ix> {
    /// The source node of the run.
    pub fn source(&self) -> NodeId<Ix> {
        self.source
    }

    /// Distance from the source to `n`, or `None` if unreachable.
    pub fn distance(&self, n: NodeId<Ix>) -> Option<K> {
        self.dist.get(n.index()).copied().flatten()
    }

    /// Rebuild the shortest path from the source to `t` by walking the
    /// parent-arc cookies. Returns `Ok(None)` for an unreachable target.
    pub fn path_to<N, A, Ty>(
        &self,
        g: &Graph<N, A, Ty, Ix>,
        t: NodeId<Ix>,
    ) -> Result<Option<Path<Ix>>, GraphError>
    where
        Ty: EdgeType,
    {
        if self.distance(t).is_none() {
            return Ok(None);
        }
        crate::algo::find_path::reconstruct(g, self.source, t).map(Some)
    }
}

/// Dijkstra's shortest path algorithm.
///
/// Computes the distance from `s` to every reachable node, or only until
/// `goal` is settled when one is given. Arc weights come from the `weight`
/// closure and must be non-negative; the distance type only needs the
/// [`Measure`] operations.
///
/// Attribute use: resets the `Min` node bit (settled marks, left set on
/// every settled node) and the node cookies (parent arcs) on entry.
///
/// # Complexity
/// **O((|V| + |E|) log |V|)**.
pub fn dijkstra<N, A, Ty, Ix, K, W>(
    g: &mut Graph<N, A, Ty, Ix>,
    s: NodeId<Ix>,
    goal: Option<NodeId<Ix>>,
    mut weight: W,
) -> Result<Distances<K, Ix>, GraphError>
where
    Ty: EdgeType,
    Ix: IndexType,
    K: Measure + Copy,
    W: FnMut(&A) -> K,
{
    if !g.contains_node(s) {
        return Err(GraphError::InvalidNode(s.index()));
    }
    if let Some(t) = goal {
        if !g.contains_node(t) {
            return Err(GraphError::InvalidNode(t.index()));
        }
    }
    g.reset_node_bit(GraphBit::Min);
    for n in g.node_ids().collect::<Vec<_>>() {
        g.node_attr_mut(n).cookie = Cookie::Nil;
    }

    let mut dist: Vec<Option<K>> = vec![None; g.node_count()];
    dist[s.index()] = Some(K::default());

    let mut visit_next = BinaryHeap::new();
    visit_next.push(MinScored(K::default(), s));

    while let Some(MinScored(node_score, node)) = visit_next.pop() {
        if g.node_attr(node).bits.get(GraphBit::Min) {
            continue; // stale entry
        }
        g.node_attr_mut(node).bits.set(GraphBit::Min, true);
        if goal == Some(node) {
            break;
        }
        let mut walker = g.walker(node);
        while let Some((arc, next)) = walker.next(g) {
            if g.node_attr(next).bits.get(GraphBit::Min) {
                continue;
            }
            let next_score = node_score + weight(&g[arc]);
            let improved = match dist[next.index()] {
                Some(old) => next_score < old,
                None => true,
            };
            if improved {
                dist[next.index()] = Some(next_score);
                g.node_attr_mut(next).cookie = Cookie::Arc(arc);
                visit_next.push(MinScored(next_score, next));
            }
        }
    }

    Ok(Distances { source: s, dist })
}

/// A* shortest path from `s` to `t` with an admissible heuristic
/// `h(n)` estimating the remaining cost from `n` to `t`.
///
/// Same contract as [`dijkstra`] restricted to one target: returns the
/// cost and the path, or `Ok(None)` when `t` is unreachable. An
/// inadmissible heuristic (one that overestimates) voids the optimality
/// guarantee but not termination.
pub fn astar<N, A, Ty, Ix, K, W, H>(
    g: &mut Graph<N, A, Ty, Ix>,
    s: NodeId<Ix>,
    t: NodeId<Ix>,
    mut weight: W,
    mut heuristic: H,
) -> Result<Option<(K, Path<Ix>)>, GraphError>
where
    Ty: EdgeType,
    Ix: IndexType,
    K: Measure + Copy,
    W: FnMut(&A) -> K,
    H: FnMut(NodeId<Ix>) -> K,
{
    if !g.contains_node(s) {
        return Err(GraphError::InvalidNode(s.index()));
    }
    if !g.contains_node(t) {
        return Err(GraphError::InvalidNode(t.index()));
    }
    g.reset_node_bit(GraphBit::Min);
    for n in g.node_ids().collect::<Vec<_>>() {
        g.node_attr_mut(n).cookie = Cookie::Nil;
    }

    let mut score: Vec<Option<K>> = vec![None; g.node_count()];
    score[s.index()] = Some(K::default());

    let mut visit_next = BinaryHeap::new();
    visit_next.push(MinScored(heuristic(s), s));

    while let Some(MinScored(_, node)) = visit_next.pop() {
        if g.node_attr(node).bits.get(GraphBit::Min) {
            continue;
        }
        if node == t {
            let cost = score[t.index()].expect("settled target has a score");
            let path = crate::algo::find_path::reconstruct(g, s, t)?;
            return Ok(Some((cost, path)));
        }
        g.node_attr_mut(node).bits.set(GraphBit::Min, true);
        let node_score = score[node.index()].expect("queued node has a score");
        let mut walker = g.walker(node);
        while let Some((arc, next)) = walker.next(g) {
            if g.node_attr(next).bits.get(GraphBit::Min) {
                continue;
            }
            let next_score = node_score + weight(&g[arc]);
            let improved = match score[next.index()] {
                Some(old) => next_score < old,
                None => true,
            };
            if improved {
                score[next.index()] = Some(next_score);
                g.node_attr_mut(next).cookie = Cookie::Arc(arc);
                visit_next.push(MinScored(next_score + heuristic(next), next));
            }
        }
    }

    Ok(None)
}
