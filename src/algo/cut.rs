//! Cut nodes (articulation points).

use crate::attr::GraphBit;
use crate::graph::{ArcId, ArcWalker, Graph, IndexType, NodeId};
use crate::EdgeType;

struct Frame<Ix> {
    node: NodeId<Ix>,
    parent_arc: Option<ArcId<Ix>>,
    walker: ArcWalker<Ix>,
}

/// Find the cut nodes of a graph: the nodes whose removal disconnects some
/// pair of the remaining nodes.
///
/// The input is viewed as undirected. The classic low-link computation runs
/// on the in-place attribute model: each node's `counter` receives its
/// depth-first discovery number, a side array carries the low-links, and on
/// return the `Cut` bit is set on exactly the articulation nodes.
///
/// Attribute use: resets the `DepthFirst` node bit and the `Cut` node bit
/// on entry; leaves `DepthFirst` set on every node and `Cut` set on the cut
/// nodes.
///
/// Nodes are returned in discovery order of the condition, deterministic
/// relative to the graph's enumeration order.
///
/// # Complexity
/// **O(|V| + |E|)**.
pub fn cut_nodes<N, A, Ty, Ix>(g: &mut Graph<N, A, Ty, Ix>) -> Vec<NodeId<Ix>>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    g.reset_node_bit(GraphBit::DepthFirst);
    g.reset_node_bit(GraphBit::Cut);

    let mut low = vec![0i64; g.node_count()];
    let mut time = 0i64;
    let mut cuts = Vec::new();
    let mut frames: Vec<Frame<Ix>> = Vec::new();

    for root in g.node_ids().collect::<Vec<_>>() {
        if g.node_attr(root).bits.get(GraphBit::DepthFirst) {
            continue;
        }
        discover(g, root, &mut low, &mut time);
        frames.push(Frame {
            node: root,
            parent_arc: None,
            walker: g.walker_incident(root),
        });
        let mut root_children = 0usize;

        while !frames.is_empty() {
            let top = frames.len() - 1;
            match frames[top].walker.next(g) {
                Some((arc, other)) => {
                    if frames[top].parent_arc == Some(arc) {
                        continue;
                    }
                    let n = frames[top].node;
                    if g.node_attr(other).bits.get(GraphBit::DepthFirst) {
                        // back arc: the ancestor's discovery number caps our low-link
                        low[n.index()] = low[n.index()].min(g.node_attr(other).counter);
                    } else {
                        discover(g, other, &mut low, &mut time);
                        if n == root {
                            root_children += 1;
                        }
                        frames.push(Frame {
                            node: other,
                            parent_arc: Some(arc),
                            walker: g.walker_incident(other),
                        });
                    }
                }
                None => {
                    let done = frames.pop().expect("loop guard");
                    if let Some(parent) = frames.last() {
                        let p = parent.node;
                        low[p.index()] = low[p.index()].min(low[done.node.index()]);
                        if p != root && low[done.node.index()] >= g.node_attr(p).counter {
                            mark_cut(g, p, &mut cuts);
                        }
                    }
                }
            }
        }

        if root_children > 1 {
            mark_cut(g, root, &mut cuts);
        }
    }
    cuts
}

fn discover<N, A, Ty, Ix>(
    g: &mut Graph<N, A, Ty, Ix>,
    n: NodeId<Ix>,
    low: &mut [i64],
    time: &mut i64,
) where
    Ty: EdgeType,
    Ix: IndexType,
{
    let attr = g.node_attr_mut(n);
    attr.bits.set(GraphBit::DepthFirst, true);
    attr.counter = *time;
    low[n.index()] = *time;
    *time += 1;
}

fn mark_cut<N, A, Ty, Ix>(g: &mut Graph<N, A, Ty, Ix>, n: NodeId<Ix>, cuts: &mut Vec<NodeId<Ix>>)
where
    Ty: EdgeType,
    Ix: IndexType,
{
    let attr = g.node_attr_mut(n);
    if !attr.bits.get(GraphBit::Cut) {
        attr.bits.set(GraphBit::Cut, true);
        cuts.push(n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Graph;

    #[test]
    fn shared_vertex_of_two_triangles_is_the_cut() {
        // triangles {A,B,C} and {C,D,E}
        let mut g = Graph::<char, ()>::new();
        let ids: Vec<_> = "ABCDE".chars().map(|c| g.add_node(c)).collect();
        let (a, b, c, d, e) = (ids[0], ids[1], ids[2], ids[3], ids[4]);
        g.extend_with_arcs([(a, b), (b, c), (c, a), (c, d), (d, e), (e, c)])
            .unwrap();
        let cuts = cut_nodes(&mut g);
        assert_eq!(cuts, vec![c]);
        assert!(g.node_attr(c).bits.get(GraphBit::Cut));
        assert!(!g.node_attr(a).bits.get(GraphBit::Cut));
    }

    #[test]
    fn chain_interior_nodes_are_cuts() {
        let mut g = Graph::<u8, ()>::new();
        let ids: Vec<_> = (0..4).map(|i| g.add_node(i)).collect();
        g.extend_with_arcs([(ids[0], ids[1]), (ids[1], ids[2]), (ids[2], ids[3])])
            .unwrap();
        let mut cuts = cut_nodes(&mut g);
        cuts.sort();
        assert_eq!(cuts, vec![ids[1], ids[2]]);
    }

    #[test]
    fn cycle_has_no_cut_node() {
        let mut g = Graph::<u8, ()>::new();
        let ids: Vec<_> = (0..4).map(|i| g.add_node(i)).collect();
        g.extend_with_arcs([
            (ids[0], ids[1]),
            (ids[1], ids[2]),
            (ids[2], ids[3]),
            (ids[3], ids[0]),
        ])
        .unwrap();
        assert!(cut_nodes(&mut g).is_empty());
    }

    #[test]
    fn parallel_arcs_to_parent_are_not_a_bridge() {
        let mut g = Graph::<u8, ()>::new();
        let a = g.add_node(0);
        let b = g.add_node(1);
        let c = g.add_node(2);
        // two parallel arcs a-b, then a bridge b-c
        g.extend_with_arcs([(a, b), (a, b), (b, c)]).unwrap();
        let cuts = cut_nodes(&mut g);
        assert_eq!(cuts, vec![b]);
    }
}
