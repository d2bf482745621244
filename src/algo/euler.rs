//! Eulerian circuits and trails, Hierholzer's algorithm.
//!
//! An undirected graph has an eulerian circuit iff the arcs form one
//! connected component and every degree is even; it has an eulerian trail
//! iff at most two nodes have odd degree (with exactly two, the trail runs
//! between them). Isolated nodes are ignored by the connectivity test.

use crate::attr::GraphBit;
use crate::error::GraphError;
use crate::graph::{ArcId, Graph, IndexType, NodeId};
use crate::path::Path;
use crate::unionfind::UnionFind;
use crate::EdgeType;

/// Build an eulerian circuit: a closed walk using every arc exactly once.
///
/// `start` picks the first node of the walk; it defaults to the smallest
/// non-isolated node id. A graph without arcs yields the single-node path
/// at `start` (or the empty path when there is no node at all).
///
/// Attribute use: the `Euler` arc bit, reset on entry and left set on
/// every arc on success.
///
/// # Errors
/// - [`GraphError::NotAnUndirectedGraph`] on directed input.
/// - [`GraphError::NoEulerianCircuit`] if some degree is odd or the arcs
///   span more than one component.
///
/// # Complexity
/// **O(|V| + |E|)**.
pub fn euler_circuit<N, A, Ty, Ix>(
    g: &mut Graph<N, A, Ty, Ix>,
    start: Option<NodeId<Ix>>,
) -> Result<Path<Ix>, GraphError>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    if Ty::is_directed() {
        return Err(GraphError::NotAnUndirectedGraph);
    }
    if odd_nodes(g).is_empty() && arcs_connected(g) {
        let start = match start.or_else(|| default_start(g)) {
            Some(s) => s,
            None => return Ok(Path::new(g)),
        };
        hierholzer(g, start)
    } else {
        Err(GraphError::NoEulerianCircuit)
    }
}

/// Build an eulerian trail: a walk using every arc exactly once, closed or
/// open.
///
/// With zero odd-degree nodes this is a circuit; with exactly two, the
/// walk starts at one of them and ends at the other.
///
/// # Errors
/// - [`GraphError::NotAnUndirectedGraph`] on directed input.
/// - [`GraphError::NoEulerianTrail`] with more than two odd-degree nodes
///   or disconnected arcs.
pub fn euler_trail<N, A, Ty, Ix>(g: &mut Graph<N, A, Ty, Ix>) -> Result<Path<Ix>, GraphError>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    if Ty::is_directed() {
        return Err(GraphError::NotAnUndirectedGraph);
    }
    if !arcs_connected(g) {
        return Err(GraphError::NoEulerianTrail);
    }
    let odd = odd_nodes(g);
    let start = match odd.as_slice() {
        [] => match default_start(g) {
            Some(s) => s,
            None => return Ok(Path::new(g)),
        },
        [first, _second] => *first,
        _ => return Err(GraphError::NoEulerianTrail),
    };
    hierholzer(g, start)
}

fn default_start<N, A, Ty, Ix>(g: &Graph<N, A, Ty, Ix>) -> Option<NodeId<Ix>>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    g.node_ids().find(|n| g.degree(*n) > 0).or_else(|| g.node_ids().next())
}

fn odd_nodes<N, A, Ty, Ix>(g: &Graph<N, A, Ty, Ix>) -> Vec<NodeId<Ix>>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    g.node_ids().filter(|n| g.degree(*n) % 2 == 1).collect()
}

/// All arcs live in one connected component (isolated nodes aside).
fn arcs_connected<N, A, Ty, Ix>(g: &Graph<N, A, Ty, Ix>) -> bool
where
    Ty: EdgeType,
    Ix: IndexType,
{
    let mut sets = UnionFind::new(g.node_count());
    for arc in g.arcs() {
        sets.union(arc.source().index(), arc.target().index());
    }
    let mut root = None;
    for n in g.node_ids() {
        if g.degree(n) == 0 {
            continue;
        }
        let label = sets.find(n.index());
        match root {
            None => root = Some(label),
            Some(r) if r != label => return false,
            Some(_) => {}
        }
    }
    true
}

/// The stack form of Hierholzer's algorithm. Each node keeps a resumable
/// walker over its incident arcs, so every arc is inspected a bounded
/// number of times.
fn hierholzer<N, A, Ty, Ix>(
    g: &mut Graph<N, A, Ty, Ix>,
    start: NodeId<Ix>,
) -> Result<Path<Ix>, GraphError>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    if !g.contains_node(start) {
        return Err(GraphError::InvalidNode(start.index()));
    }
    g.reset_arc_bit(GraphBit::Euler);

    let mut walkers: Vec<_> = g.node_ids().map(|n| g.walker_incident(n)).collect();
    let mut stack: Vec<(NodeId<Ix>, Option<ArcId<Ix>>)> = vec![(start, None)];
    let mut walk = Vec::with_capacity(g.arc_count() + 1);

    while let Some(&(v, _)) = stack.last() {
        let mut advanced = false;
        while let Some((arc, other)) = walkers[v.index()].next(g) {
            if g.arc_attr(arc).bits.get(GraphBit::Euler) {
                continue;
            }
            g.arc_attr_mut(arc).bits.set(GraphBit::Euler, true);
            stack.push((other, Some(arc)));
            advanced = true;
            break;
        }
        if !advanced {
            walk.push(stack.pop().expect("loop guard"));
        }
    }
    walk.reverse();

    let mut path = Path::new(g);
    path.init(g, walk[0].0)?;
    for (_, arc) in &walk[1..] {
        path.append_arc(g, arc.expect("every later step records its arc"))?;
    }
    Ok(path)
}
