//! Maximum-flow front-ends of the Ford–Fulkerson family.
//!
//! Both entry points repeatedly find an augmenting path in the residual
//! overlay, push the bottleneck along it, and stop when no augmenting path
//! remains. [`edmonds_karp`] picks the path breadth-first (shortest in
//! arcs), which bounds the number of augmentations polynomially;
//! [`ford_fulkerson_dfs`] picks depth-first and terminates for integer
//! capacities. On return the final flow is in the arcs and the residual
//! overlay is left built, so the min-cut can be read off with [`min_cut`].

use std::collections::VecDeque;

use crate::attr::{Cookie, GraphBit};
use crate::error::GraphError;
use crate::graph::{ArcId, IndexType, NodeId};

use super::{ArcKind, FlowGraph, FlowMeasure};

/// Maximum flow from `source` to `sink`, augmenting along *shortest*
/// residual paths (the Edmonds–Karp rule).
///
/// Builds the residual overlay if it is not built yet and leaves it built.
/// The returned value is the flow pushed by this call, which is the
/// maximum flow when the arcs start out empty; the per-arc totals are in
/// the network either way.
///
/// Attribute use: the `MaxFlow` node bit and the node cookies, owned for
/// the duration of the call; arc cookies belong to the overlay links.
///
/// # Complexity
/// **O(|V| |E|²)**.
pub fn edmonds_karp<N, A, F, Ix>(
    net: &mut FlowGraph<N, A, F, Ix>,
    source: NodeId<Ix>,
    sink: NodeId<Ix>,
) -> Result<F, GraphError>
where
    A: Clone,
    F: FlowMeasure,
    Ix: IndexType,
{
    max_flow(net, source, sink, true)
}

/// Maximum flow from `source` to `sink`, augmenting along depth-first
/// residual paths.
///
/// Same contract as [`edmonds_karp`]. Termination is guaranteed for
/// integer capacities; prefer the breadth-first rule for real-valued ones.
pub fn ford_fulkerson_dfs<N, A, F, Ix>(
    net: &mut FlowGraph<N, A, F, Ix>,
    source: NodeId<Ix>,
    sink: NodeId<Ix>,
) -> Result<F, GraphError>
where
    A: Clone,
    F: FlowMeasure,
    Ix: IndexType,
{
    max_flow(net, source, sink, false)
}

fn max_flow<N, A, F, Ix>(
    net: &mut FlowGraph<N, A, F, Ix>,
    source: NodeId<Ix>,
    sink: NodeId<Ix>,
    breadth_first: bool,
) -> Result<F, GraphError>
where
    A: Clone,
    F: FlowMeasure,
    Ix: IndexType,
{
    if !net.g.contains_node(source) {
        return Err(GraphError::InvalidNode(source.index()));
    }
    if !net.g.contains_node(sink) {
        return Err(GraphError::InvalidNode(sink.index()));
    }
    if source == sink {
        return Err(GraphError::Infeasible("source equals sink"));
    }
    if !net.residual_built() {
        net.compute_residual()?;
    }

    let mut total = F::zero();
    while let Some(delta) = augment(net, source, sink, breadth_first) {
        total = total + delta;
    }
    Ok(total)
}

/// One augmentation: search for a positive-residual path, push its
/// bottleneck, and return it; `None` when no augmenting path exists.
fn augment<N, A, F, Ix>(
    net: &mut FlowGraph<N, A, F, Ix>,
    source: NodeId<Ix>,
    sink: NodeId<Ix>,
    breadth_first: bool,
) -> Option<F>
where
    F: FlowMeasure,
    Ix: IndexType,
{
    net.g.reset_node_bit(GraphBit::MaxFlow);

    let mut frontier = VecDeque::new();
    net.g
        .node_attr_mut(source)
        .bits
        .set(GraphBit::MaxFlow, true);
    frontier.push_back(source);

    fn take<T>(frontier: &mut VecDeque<T>, fifo: bool) -> Option<T> {
        if fifo {
            frontier.pop_front()
        } else {
            frontier.pop_back()
        }
    }

    let mut found = false;
    'search: while let Some(node) = take(&mut frontier, breadth_first) {
        let mut walker = net.g.walker(node);
        while let Some((arc, next)) = walker.next(&net.g) {
            if net.g.node_attr(next).bits.get(GraphBit::MaxFlow) {
                continue;
            }
            if !(net.residual_capacity(arc) > F::zero()) {
                continue;
            }
            let attr = net.g.node_attr_mut(next);
            attr.bits.set(GraphBit::MaxFlow, true);
            attr.cookie = Cookie::Arc(arc);
            if next == sink {
                found = true;
                break 'search;
            }
            frontier.push_back(next);
        }
    }
    if !found {
        return None;
    }

    // bottleneck of the path, walking the parent arcs back from the sink
    let mut delta = F::max();
    let mut cur = sink;
    while cur != source {
        let arc = parent_arc(net, cur);
        let rc = net.residual_capacity(arc);
        if rc < delta {
            delta = rc;
        }
        cur = net.g.arc_endpoints(arc).expect("arc is in the graph").0;
    }

    // apply it
    let mut cur = sink;
    while cur != source {
        let arc = parent_arc(net, cur);
        net.push_flow(arc, delta);
        cur = net.g.arc_endpoints(arc).expect("arc is in the graph").0;
    }
    Some(delta)
}

fn parent_arc<N, A, F, Ix>(net: &FlowGraph<N, A, F, Ix>, n: NodeId<Ix>) -> ArcId<Ix>
where
    F: FlowMeasure,
    Ix: IndexType,
{
    net.g
        .node_attr(n)
        .cookie
        .arc()
        .expect("search recorded a parent arc")
}

/// The minimum s-t cut under the current maximum flow: the saturated
/// forward arcs separating the residual-reachable side of `source` from
/// the rest, together with their total capacity (which equals the
/// max-flow value, by duality).
///
/// Computes the flow first if the residual overlay is not built.
///
/// # Errors
/// [`GraphError::Infeasible`] if `sink` is still reachable in the
/// residual network, i.e. the present flow is not maximal.
pub fn min_cut<N, A, F, Ix>(
    net: &mut FlowGraph<N, A, F, Ix>,
    source: NodeId<Ix>,
    sink: NodeId<Ix>,
) -> Result<(F, Vec<ArcId<Ix>>), GraphError>
where
    A: Clone,
    F: FlowMeasure,
    Ix: IndexType,
{
    if !net.residual_built() {
        max_flow(net, source, sink, true)?;
    }

    net.g.reset_node_bit(GraphBit::MaxFlow);
    let mut frontier = vec![source];
    net.g
        .node_attr_mut(source)
        .bits
        .set(GraphBit::MaxFlow, true);
    while let Some(node) = frontier.pop() {
        let mut walker = net.g.walker(node);
        while let Some((arc, next)) = walker.next(&net.g) {
            if net.g.node_attr(next).bits.get(GraphBit::MaxFlow) {
                continue;
            }
            if net.residual_capacity(arc) > F::zero() {
                net.g.node_attr_mut(next).bits.set(GraphBit::MaxFlow, true);
                frontier.push(next);
            }
        }
    }
    if net.g.node_attr(sink).bits.get(GraphBit::MaxFlow) {
        return Err(GraphError::Infeasible("flow is not maximal"));
    }

    let mut cut = Vec::new();
    let mut value = F::zero();
    for a in net.g.arc_ids() {
        if net.g[a].kind != ArcKind::Forward {
            continue;
        }
        let (src, tgt) = net.g.arc_endpoints(a).expect("arc id from iteration");
        if net.g.node_attr(src).bits.get(GraphBit::MaxFlow)
            && !net.g.node_attr(tgt).bits.get(GraphBit::MaxFlow)
        {
            value = value + net.g[a].cap();
            cut.push(a);
        }
    }
    Ok((value, cut))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The CLRS flow network; max flow 23.
    fn cormen() -> (FlowGraph<&'static str, (), i64>, NodeId, NodeId) {
        let mut net = FlowGraph::new();
        let s = net.add_node("s");
        let v1 = net.add_node("v1");
        let v2 = net.add_node("v2");
        let v3 = net.add_node("v3");
        let v4 = net.add_node("v4");
        let t = net.add_node("t");
        for (a, b, c) in [
            (s, v1, 16),
            (s, v2, 13),
            (v1, v3, 12),
            (v2, v1, 4),
            (v2, v4, 14),
            (v3, v2, 9),
            (v3, t, 20),
            (v4, v3, 7),
            (v4, t, 4),
        ] {
            net.add_arc(a, b, (), c).unwrap();
        }
        (net, s, t)
    }

    #[test]
    fn edmonds_karp_finds_23() {
        let (mut net, s, t) = cormen();
        let value = edmonds_karp(&mut net, s, t).unwrap();
        assert_eq!(value, 23);
        assert!(net.residual_built());
        assert_eq!(net.flow_value(s), 23);
    }

    #[test]
    fn dfs_variant_agrees() {
        let (mut net, s, t) = cormen();
        let value = ford_fulkerson_dfs(&mut net, s, t).unwrap();
        assert_eq!(value, 23);
    }

    #[test]
    fn flow_is_conserved_and_capacity_bounded() {
        let (mut net, s, t) = cormen();
        edmonds_karp(&mut net, s, t).unwrap();
        for a in net.inner().arc_ids() {
            if net.is_residual_arc(a) {
                continue;
            }
            let flow = net.flow(a).unwrap();
            let cap = net.capacity(a).unwrap();
            assert!(flow >= 0 && flow <= cap);
        }
        for n in net.inner().node_ids() {
            if n == s || n == t {
                continue;
            }
            assert_eq!(net.inner()[n].in_flow(), net.inner()[n].out_flow());
        }
    }

    #[test]
    fn min_cut_matches_max_flow() {
        let (mut net, s, t) = cormen();
        let value = edmonds_karp(&mut net, s, t).unwrap();
        let (cut_value, cut_arcs) = min_cut(&mut net, s, t).unwrap();
        assert_eq!(cut_value, value);
        assert!(!cut_arcs.is_empty());
        for a in cut_arcs {
            // every cut arc is saturated
            assert_eq!(net.flow(a).unwrap(), net.capacity(a).unwrap());
        }
    }

    #[test]
    fn feasibility_round_trip() {
        // producer a (4 units) feeding consumer c through b
        let mut net = FlowGraph::<(), (), i64>::new();
        let a = net.add_node(());
        let b = net.add_node(());
        let c = net.add_node(());
        net.add_arc(a, b, (), 5).unwrap();
        net.add_arc(b, c, (), 5).unwrap();
        net.set_supply(a, 4).unwrap();
        net.set_supply(c, -4).unwrap();
        assert!(net.solve_feasibility().unwrap());
        assert!(net.is_feasible());
        let (supply_short, demand_short) = net.non_feasible_nodes();
        assert!(supply_short.is_empty() && demand_short.is_empty());
    }

    #[test]
    fn bottlenecked_network_is_infeasible() {
        // a supplies 4 but the interior arc m->d only moves 2; the second
        // inlet of d hangs off a node nothing feeds, so conservation keeps
        // it dry
        let mut net = FlowGraph::<(), (), i64>::new();
        let a = net.add_node(());
        let m = net.add_node(());
        let e = net.add_node(());
        let d = net.add_node(());
        net.add_arc(a, m, (), 4).unwrap();
        net.add_arc(m, d, (), 2).unwrap();
        net.add_arc(e, d, (), 2).unwrap();
        net.set_supply(a, 4).unwrap();
        net.set_supply(d, -4).unwrap();
        assert!(!net.solve_feasibility().unwrap());
        assert!(!net.is_feasible());
        let (supply_short, demand_short) = net.non_feasible_nodes();
        assert_eq!(supply_short, vec![a]);
        assert_eq!(demand_short, vec![d]);
    }
}
