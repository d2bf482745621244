//! Minimum spanning tree algorithms: Prim and Kruskal.
//!
//! Both require an undirected, connected input. Prim grows a single tree
//! from an arbitrary start node with an arc heap; Kruskal consumes a
//! weight-ordered heap of all arcs and unions endpoints with a disjoint-set
//! structure. They produce the same set of tree arcs up to tie-breaks on
//! equal weights, which are resolved by the heap's extraction order.

use std::collections::BinaryHeap;

use crate::algo::Measure;
use crate::attr::{Cookie, GraphBit};
use crate::error::GraphError;
use crate::graph::{ArcId, Graph, IndexType, NodeId};
use crate::scored::MinScored;
use crate::unionfind::UnionFind;
use crate::EdgeType;

/// Compute a minimum spanning tree with Prim's algorithm, *painting* the
/// chosen arcs in place: every selected arc ends up with its
/// `SpanningTree` bit set, and no second graph is built.
///
/// Returns the total weight of the tree.
///
/// Attribute use: resets the `SpanningTree` bit on all arcs and the `Min`
/// bit on all nodes on entry; the `Min` node marks are scratch and are
/// cleared again before returning. On error all marks are cleared and the
/// graph carries no partial result.
///
/// # Errors
/// - [`GraphError::NotAnUndirectedGraph`] on directed input.
/// - [`GraphError::Disconnected`] if fewer than `|V|−1` arcs can be
///   selected.
///
/// # Complexity
/// **O((|V| + |E|) log |V|)** with the binary heap.
pub fn prim_paint<N, A, Ty, Ix, K, W>(
    g: &mut Graph<N, A, Ty, Ix>,
    mut weight: W,
) -> Result<K, GraphError>
where
    Ty: EdgeType,
    Ix: IndexType,
    K: Measure + Copy,
    W: FnMut(&A) -> K,
{
    if Ty::is_directed() {
        return Err(GraphError::NotAnUndirectedGraph);
    }
    g.reset_arc_bit(GraphBit::SpanningTree);
    g.reset_node_bit(GraphBit::Min);

    let mut total = K::default();
    let result = prim_run(g, &mut weight, |g, arc, _, w| {
        g.arc_attr_mut(arc).bits.set(GraphBit::SpanningTree, true);
        total = total + w;
    });
    match result {
        Ok(()) => {
            g.reset_node_bit(GraphBit::Min);
            Ok(total)
        }
        Err(e) => {
            g.reset_arc_bit(GraphBit::SpanningTree);
            g.reset_node_bit(GraphBit::Min);
            Err(e)
        }
    }
}

/// Compute a minimum spanning tree with Prim's algorithm, *building* a new
/// graph `T` containing a copy of every node and exactly `|V|−1` arcs.
///
/// The mapping from the input to the tree is recorded in the input's
/// cookies: every node's cookie holds the id of its copy in `T`, and every
/// selected arc's cookie holds the id of its counterpart; non-selected
/// arcs keep a nil cookie. Like any cookie use the mapping is transient.
///
/// On error the partially built tree is discarded and all attribute blocks
/// touched are reset.
pub fn prim_tree<N, A, Ty, Ix, K, W>(
    g: &mut Graph<N, A, Ty, Ix>,
    mut weight: W,
) -> Result<Graph<N, A, Ty, Ix>, GraphError>
where
    N: Clone,
    A: Clone,
    Ty: EdgeType,
    Ix: IndexType,
    K: Measure + Copy,
    W: FnMut(&A) -> K,
{
    if Ty::is_directed() {
        return Err(GraphError::NotAnUndirectedGraph);
    }
    g.reset_arc_bit(GraphBit::SpanningTree);
    g.reset_node_bit(GraphBit::Min);

    let mut tree: Graph<N, A, Ty, Ix> = Graph::with_capacity(
        g.node_count(),
        g.node_count().saturating_sub(1),
    );
    for n in g.node_ids().collect::<Vec<_>>() {
        let copy = tree.add_node(g[n].clone());
        g.node_attr_mut(n).cookie = Cookie::Node(copy);
    }

    let result = prim_run(g, &mut weight, |g, arc, (src, tgt), _| {
        let (mapped_src, mapped_tgt) = (
            g.node_attr(src).cookie.node().expect("node was mapped"),
            g.node_attr(tgt).cookie.node().expect("node was mapped"),
        );
        let copy = tree
            .add_arc(mapped_src, mapped_tgt, g[arc].clone())
            .expect("mapped endpoints are in the tree");
        g.arc_attr_mut(arc).bits.set(GraphBit::SpanningTree, true);
        g.arc_attr_mut(arc).cookie = Cookie::Arc(copy);
    });
    match result {
        Ok(()) => {
            g.reset_node_bit(GraphBit::Min);
            Ok(tree)
        }
        Err(e) => {
            g.reset_attrs();
            Err(e)
        }
    }
}

/// The shared Prim loop. `accept` is called once per selected arc with the
/// arc, its endpoints `(reached, fresh)` and its weight.
fn prim_run<N, A, Ty, Ix, K, W, F>(
    g: &mut Graph<N, A, Ty, Ix>,
    weight: &mut W,
    mut accept: F,
) -> Result<(), GraphError>
where
    Ty: EdgeType,
    Ix: IndexType,
    K: Measure + Copy,
    W: FnMut(&A) -> K,
    F: FnMut(&mut Graph<N, A, Ty, Ix>, ArcId<Ix>, (NodeId<Ix>, NodeId<Ix>), K),
{
    if g.node_count() == 0 {
        return Ok(());
    }

    let start = NodeId::new(0);
    g.node_attr_mut(start).bits.set(GraphBit::Min, true);

    let mut heap = BinaryHeap::with_capacity(g.arc_count());
    push_frontier(g, start, weight, &mut heap);

    let mut taken = 1usize;
    while let Some(MinScored(w, (arc, target))) = heap.pop() {
        if g.node_attr(target).bits.get(GraphBit::Min) {
            continue; // both endpoints already in the tree
        }
        let source = g.other_endpoint(arc, target)?;
        g.node_attr_mut(target).bits.set(GraphBit::Min, true);
        accept(g, arc, (source, target), w);
        taken += 1;
        if taken == g.node_count() {
            return Ok(());
        }
        push_frontier(g, target, weight, &mut heap);
    }

    if taken == g.node_count() {
        Ok(())
    } else {
        Err(GraphError::Disconnected)
    }
}

fn push_frontier<N, A, Ty, Ix, K, W>(
    g: &Graph<N, A, Ty, Ix>,
    n: NodeId<Ix>,
    weight: &mut W,
    heap: &mut BinaryHeap<MinScored<K, (ArcId<Ix>, NodeId<Ix>)>>,
) where
    Ty: EdgeType,
    Ix: IndexType,
    K: Measure + Copy,
    W: FnMut(&A) -> K,
{
    let mut walker = g.walker_incident(n);
    while let Some((arc, other)) = walker.next(g) {
        if !g.node_attr(other).bits.get(GraphBit::Min) {
            heap.push(MinScored(weight(&g[arc]), (arc, other)));
        }
    }
}

/// Compute a minimum spanning tree with Kruskal's algorithm, painting the
/// chosen arcs with the `SpanningTree` bit and returning the total weight.
///
/// Same contract and errors as [`prim_paint`]; the tie-break order is the
/// arc heap's, so Prim and Kruskal agree on graphs with distinct weights.
///
/// # Complexity
/// **O(|E| log |E|)**.
pub fn kruskal_paint<N, A, Ty, Ix, K, W>(
    g: &mut Graph<N, A, Ty, Ix>,
    mut weight: W,
) -> Result<K, GraphError>
where
    Ty: EdgeType,
    Ix: IndexType,
    K: Measure + Copy,
    W: FnMut(&A) -> K,
{
    if Ty::is_directed() {
        return Err(GraphError::NotAnUndirectedGraph);
    }
    g.reset_arc_bit(GraphBit::SpanningTree);

    let mut subtrees = UnionFind::new(g.node_count());
    let mut heap = BinaryHeap::with_capacity(g.arc_count());
    for arc in g.arcs() {
        heap.push(MinScored(
            weight(arc.info()),
            (arc.id(), arc.source(), arc.target()),
        ));
    }

    let mut total = K::default();
    let mut taken = 0usize;
    while let Some(MinScored(w, (arc, src, tgt))) = heap.pop() {
        if subtrees.union(src.index(), tgt.index()) {
            g.arc_attr_mut(arc).bits.set(GraphBit::SpanningTree, true);
            total = total + w;
            taken += 1;
        }
    }

    if g.node_count() == 0 || taken == g.node_count() - 1 {
        Ok(total)
    } else {
        g.reset_arc_bit(GraphBit::SpanningTree);
        Err(GraphError::Disconnected)
    }
}

/// Compute a minimum spanning tree with Kruskal's algorithm, building the
/// tree graph. The cookie mapping convention is that of [`prim_tree`].
pub fn kruskal_tree<N, A, Ty, Ix, K, W>(
    g: &mut Graph<N, A, Ty, Ix>,
    weight: W,
) -> Result<Graph<N, A, Ty, Ix>, GraphError>
where
    N: Clone,
    A: Clone,
    Ty: EdgeType,
    Ix: IndexType,
    K: Measure + Copy,
    W: FnMut(&A) -> K,
{
    kruskal_paint(g, weight)?;

    let mut tree: Graph<N, A, Ty, Ix> =
        Graph::with_capacity(g.node_count(), g.node_count().saturating_sub(1));
    for n in g.node_ids().collect::<Vec<_>>() {
        let copy = tree.add_node(g[n].clone());
        g.node_attr_mut(n).cookie = Cookie::Node(copy);
    }
    for arc in g.arc_ids().collect::<Vec<_>>() {
        if !g.arc_attr(arc).bits.get(GraphBit::SpanningTree) {
            continue;
        }
        let (src, tgt) = g.arc_endpoints(arc).expect("arc id from iteration");
        let (mapped_src, mapped_tgt) = (
            g.node_attr(src).cookie.node().expect("node was mapped"),
            g.node_attr(tgt).cookie.node().expect("node was mapped"),
        );
        let copy = tree
            .add_arc(mapped_src, mapped_tgt, g[arc].clone())
            .expect("mapped endpoints are in the tree");
        g.arc_attr_mut(arc).cookie = Cookie::Arc(copy);
    }
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Graph;

    /// 4-cycle with a diagonal; MST weight 6 over arcs 12, 23, 34.
    fn cycle_with_diagonal() -> (Graph<u32, i32>, Vec<NodeId>) {
        let mut g = Graph::new();
        let ids: Vec<_> = (1..=4).map(|i| g.add_node(i)).collect();
        g.extend_with_arcs([
            (ids[0], ids[1], 1),
            (ids[1], ids[2], 2),
            (ids[2], ids[3], 3),
            (ids[3], ids[0], 4),
            (ids[0], ids[2], 5),
        ])
        .unwrap();
        (g, ids)
    }

    #[test]
    fn prim_paint_marks_expected_arcs() {
        let (mut g, _) = cycle_with_diagonal();
        let total = prim_paint(&mut g, |w| *w).unwrap();
        assert_eq!(total, 6);
        let marked: Vec<i32> = g
            .arc_ids()
            .filter(|a| g.arc_attr(*a).bits.get(GraphBit::SpanningTree))
            .map(|a| g[a])
            .collect();
        assert_eq!(marked, vec![1, 2, 3]);
        // scratch node marks are cleared again
        for n in g.node_ids() {
            assert!(!g.node_attr(n).bits.get(GraphBit::Min));
        }
    }

    #[test]
    fn prim_tree_builds_mapped_copy() {
        let (mut g, ids) = cycle_with_diagonal();
        let tree = prim_tree(&mut g, |w| *w).unwrap();
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.arc_count(), 3);
        assert!(!crate::algo::is_cyclic_undirected(&tree));
        // the node mapping points at a copy with equal payload
        for n in &ids {
            let mapped = g.node_attr(*n).cookie.node().unwrap();
            assert_eq!(tree[mapped], g[*n]);
        }
    }

    #[test]
    fn kruskal_agrees_with_prim() {
        let (mut g, _) = cycle_with_diagonal();
        let prim_total = prim_paint(&mut g, |w| *w).unwrap();
        let kruskal_total = kruskal_paint(&mut g, |w| *w).unwrap();
        assert_eq!(prim_total, kruskal_total);
    }

    #[test]
    fn disconnected_input_is_an_error() {
        let mut g = Graph::<(), i32>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let _c = g.add_node(());
        g.add_arc(a, b, 1).unwrap();
        assert_eq!(prim_paint(&mut g, |w| *w), Err(GraphError::Disconnected));
        // no partial paint survives
        assert!(g
            .arc_ids()
            .all(|a| !g.arc_attr(a).bits.get(GraphBit::SpanningTree)));
        assert_eq!(
            kruskal_paint(&mut g, |w| *w),
            Err(GraphError::Disconnected)
        );
    }
}
