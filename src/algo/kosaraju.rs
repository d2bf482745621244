//! Strongly connected components, Kosaraju's algorithm.
//!
//! Two passes: a depth-first sweep of the graph recording finish order,
//! then component harvesting in reverse finish order over the *transpose*.
//! The container stores the incoming adjacency of every node, so the
//! transpose is traversed virtually instead of being materialized.

use crate::attr::{GraphBit, State};
use crate::error::GraphError;
use crate::graph::{ArcId, Graph, IndexType, NodeId};
use crate::{Direction, EdgeType};

/// Partition a digraph's nodes into strongly connected components.
///
/// Components come out in topological order of the condensation: every
/// cross-component arc points from a smaller color to a larger one. Each
/// node's `counter` is set to its 0-based component color.
///
/// Attribute use: the node `state` field, the `DepthFirst` node bit and
/// the `SpanningTree` arc bit, all reset on entry. On return every arc
/// joining two nodes of the same component has the `SpanningTree` bit
/// cleared; cross-component arcs retain the default state.
///
/// # Errors
/// [`GraphError::NotADirectedGraph`] on undirected input.
///
/// # Complexity
/// **O(|V| + |E|)**.
pub fn kosaraju_scc<N, A, Ty, Ix>(
    g: &mut Graph<N, A, Ty, Ix>,
) -> Result<Vec<Vec<NodeId<Ix>>>, GraphError>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    if !Ty::is_directed() {
        return Err(GraphError::NotADirectedGraph);
    }

    for n in g.node_ids().collect::<Vec<_>>() {
        g.node_attr_mut(n).state = State::Unprocessed;
    }
    g.reset_node_bit(GraphBit::DepthFirst);
    g.reset_arc_bit(GraphBit::SpanningTree);

    // Pass 1: postorder finish stack over the forward arcs.
    let mut finish = Vec::with_capacity(g.node_count());
    let mut stack = Vec::new();
    for root in g.node_ids().collect::<Vec<_>>() {
        if g.node_attr(root).state != State::Unprocessed {
            continue;
        }
        stack.push(root);
        while let Some(&n) = stack.last() {
            if g.node_attr(n).state == State::Unprocessed {
                g.node_attr_mut(n).state = State::Processing;
                let mut walker = g.walker_directed(n, Direction::Outgoing);
                while let Some((_, succ)) = walker.next(g) {
                    if g.node_attr(succ).state == State::Unprocessed {
                        stack.push(succ);
                    }
                }
            } else {
                stack.pop();
                if g.node_attr(n).state == State::Processing {
                    g.node_attr_mut(n).state = State::Processed;
                    finish.push(n);
                }
            }
        }
    }

    // Pass 2: harvest components over the incoming arcs, seeding in
    // reverse finish order.
    let mut components = Vec::new();
    for &seed in finish.iter().rev() {
        if g.node_attr(seed).bits.get(GraphBit::DepthFirst) {
            continue;
        }
        let color = components.len() as i64;
        let mut component = Vec::new();
        let mut stack = vec![seed];
        g.node_attr_mut(seed).bits.set(GraphBit::DepthFirst, true);
        while let Some(n) = stack.pop() {
            g.node_attr_mut(n).counter = color;
            component.push(n);
            let mut walker = g.walker_directed(n, Direction::Incoming);
            while let Some((_, pred)) = walker.next(g) {
                if !g.node_attr(pred).bits.get(GraphBit::DepthFirst) {
                    g.node_attr_mut(pred).bits.set(GraphBit::DepthFirst, true);
                    stack.push(pred);
                }
            }
        }
        components.push(component);
    }

    // arc post-condition: intra-component arcs end with the SpanningTree
    // bit cleared, cross-component arcs keep the default state
    for a in g.arc_ids().collect::<Vec<_>>() {
        let (src, tgt) = g.arc_endpoints(a).expect("arc id from iteration");
        if g.node_attr(src).counter == g.node_attr(tgt).counter {
            g.arc_attr_mut(a).bits.reset(GraphBit::SpanningTree);
        }
    }

    Ok(components)
}

/// Compute the strongly connected components and return each one as a
/// mapped subgraph copy.
///
/// Runs [`kosaraju_scc`] first, so colors are available in the node
/// counters afterwards. The mapping is recorded in the input's cookies:
/// every node and every intra-component arc points at its copy.
pub fn scc_subgraphs<N, A, Ty, Ix>(
    g: &mut Graph<N, A, Ty, Ix>,
) -> Result<Vec<Graph<N, A, Ty, Ix>>, GraphError>
where
    N: Clone,
    A: Clone,
    Ty: EdgeType,
    Ix: IndexType,
{
    let components = kosaraju_scc(g)?;

    let mut subgraphs: Vec<Graph<N, A, Ty, Ix>> = components
        .iter()
        .map(|c| Graph::with_capacity(c.len(), 0))
        .collect();
    for (color, component) in components.iter().enumerate() {
        for &n in component {
            let copy = subgraphs[color].add_node(g[n].clone());
            g.node_attr_mut(n).cookie = crate::attr::Cookie::Node(copy);
        }
    }
    for arc in g.arc_ids().collect::<Vec<_>>() {
        let (src, tgt) = g.arc_endpoints(arc).expect("arc id from iteration");
        let color = g.node_attr(src).counter;
        if color != g.node_attr(tgt).counter {
            continue; // cross-component arc
        }
        let (mapped_src, mapped_tgt) = (
            g.node_attr(src).cookie.node().expect("node was mapped"),
            g.node_attr(tgt).cookie.node().expect("node was mapped"),
        );
        let copy = subgraphs[color as usize]
            .add_arc(mapped_src, mapped_tgt, g[arc].clone())
            .expect("mapped endpoints are in the subgraph");
        g.arc_attr_mut(arc).cookie = crate::attr::Cookie::Arc(copy);
    }
    Ok(subgraphs)
}

/// Compute the strongly connected components and return the arcs whose
/// endpoints belong to two different components.
pub fn scc_cross_arcs<N, A, Ty, Ix>(
    g: &mut Graph<N, A, Ty, Ix>,
) -> Result<Vec<ArcId<Ix>>, GraphError>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    kosaraju_scc(g)?;
    let mut cross = Vec::new();
    for arc in g.arcs() {
        if g.node_attr(arc.source()).counter != g.node_attr(arc.target()).counter {
            cross.push(arc.id());
        }
    }
    Ok(cross)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Digraph;

    /// A -> B -> A, B -> C, C <-> D, D -> E, E <-> F.
    fn three_sccs() -> (Digraph<char, ()>, Vec<NodeId>) {
        let mut g = Digraph::new();
        let ids: Vec<_> = "ABCDEF".chars().map(|c| g.add_node(c)).collect();
        let (a, b, c, d, e, f) = (ids[0], ids[1], ids[2], ids[3], ids[4], ids[5]);
        g.extend_with_arcs([
            (a, b),
            (b, a),
            (b, c),
            (c, d),
            (d, c),
            (d, e),
            (e, f),
            (f, e),
        ])
        .unwrap();
        (g, ids)
    }

    fn color_set(g: &Digraph<char, ()>, ns: &[NodeId]) -> Vec<i64> {
        let mut colors: Vec<i64> = ns.iter().map(|n| g.node_attr(*n).counter).collect();
        colors.dedup();
        colors
    }

    #[test]
    fn partitions_into_three_components() {
        let (mut g, ids) = three_sccs();
        let components = kosaraju_scc(&mut g).unwrap();
        assert_eq!(components.len(), 3);
        // {A,B}, {C,D}, {E,F}: each pair shares a color, pairs differ
        assert_eq!(color_set(&g, &ids[0..2]).len(), 1);
        assert_eq!(color_set(&g, &ids[2..4]).len(), 1);
        assert_eq!(color_set(&g, &ids[4..6]).len(), 1);
        assert_ne!(g.node_attr(ids[0]).counter, g.node_attr(ids[2]).counter);
        assert_ne!(g.node_attr(ids[2]).counter, g.node_attr(ids[4]).counter);
    }

    #[test]
    fn cross_arcs_are_the_bridging_ones() {
        let (mut g, ids) = three_sccs();
        let cross = scc_cross_arcs(&mut g).unwrap();
        let mut pairs: Vec<(char, char)> = cross
            .iter()
            .map(|a| {
                let (s, t) = g.arc_endpoints(*a).unwrap();
                (g[s], g[t])
            })
            .collect();
        pairs.sort();
        assert_eq!(pairs, vec![('B', 'C'), ('D', 'E')]);
        let _ = ids;
    }

    #[test]
    fn subgraphs_are_mapped_copies() {
        let (mut g, _) = three_sccs();
        let subs = scc_subgraphs(&mut g).unwrap();
        assert_eq!(subs.len(), 3);
        for sub in &subs {
            assert_eq!(sub.node_count(), 2);
            // each two-node SCC keeps its internal 2-cycle
            assert_eq!(sub.arc_count(), 2);
        }
    }

    #[test]
    fn undirected_input_is_rejected() {
        let mut g = crate::Graph::<(), ()>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        g.add_arc(a, b, ()).unwrap();
        assert_eq!(kosaraju_scc(&mut g), Err(GraphError::NotADirectedGraph));
    }
}
