//! `Path`, a non-owning walk through a graph.

use crate::error::GraphError;
use crate::graph::{ArcId, DefaultIx, Graph, GraphToken, IndexType, NodeId};
use crate::EdgeType;

/// An ordered sequence of nodes and the arcs joining consecutive pairs.
///
/// A `Path` is a *view*: it owns neither nodes nor arcs and is bound to the
/// graph it was created against through the graph's identity token. Every
/// mutating operation revalidates that binding and the adjacency of the
/// appended arc, so a path can only ever contain elements that belonged to
/// its graph at the moment they were appended. Removing those elements from
/// the graph afterwards invalidates the path silently, like any other
/// non-owning view.
///
/// A path may be empty, or a single node with no arcs.
#[derive(Clone, Debug)]
pub struct Path<Ix = DefaultIx> {
    token: GraphToken,
    nodes: Vec<NodeId<Ix>>,
    arcs: Vec<ArcId<Ix>>,
}

impl<Ix: IndexType> Path<Ix> {
    /// Create an empty path bound to `g`.
    pub fn new<N, A, Ty: EdgeType>(g: &Graph<N, A, Ty, Ix>) -> Self {
        Path {
            token: g.token(),
            nodes: Vec::new(),
            arcs: Vec::new(),
        }
    }

    /// Reset the path to the single node `start`.
    pub fn init<N, A, Ty: EdgeType>(
        &mut self,
        g: &Graph<N, A, Ty, Ix>,
        start: NodeId<Ix>,
    ) -> Result<(), GraphError> {
        self.check_graph(g)?;
        if !g.contains_node(start) {
            return Err(GraphError::InvalidNode(start.index()));
        }
        self.nodes.clear();
        self.arcs.clear();
        self.nodes.push(start);
        Ok(())
    }

    /// Extend the path with `arc`, which must join the current last node to
    /// its other endpoint. On an empty path the arc's source becomes the
    /// first node (target for nothing: the arc orientation is taken as
    /// given).
    pub fn append_arc<N, A, Ty: EdgeType>(
        &mut self,
        g: &Graph<N, A, Ty, Ix>,
        arc: ArcId<Ix>,
    ) -> Result<(), GraphError> {
        self.check_graph(g)?;
        let (src, tgt) = g
            .arc_endpoints(arc)
            .ok_or(GraphError::InvalidArc(arc.index()))?;
        let tail = match self.nodes.last() {
            None => {
                self.nodes.push(src);
                src
            }
            Some(tail) => *tail,
        };
        let next = if tail == src {
            tgt
        } else if tail == tgt && !g.is_directed() {
            src
        } else {
            return Err(GraphError::PathDiscontinuity {
                arc: arc.index(),
                tail: tail.index(),
            });
        };
        self.arcs.push(arc);
        self.nodes.push(next);
        Ok(())
    }

    /// Drop the last arc and node of the path. A single-node path becomes
    /// empty. Returns the removed arc, if any.
    pub fn pop_arc(&mut self) -> Option<ArcId<Ix>> {
        if self.nodes.len() <= 1 {
            self.nodes.clear();
            return None;
        }
        self.nodes.pop();
        self.arcs.pop()
    }

    /// Empty the path, keeping the graph binding.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.arcs.clear();
    }

    /// Reverse the walk in place.
    ///
    /// Meaningful for undirected graphs and for reverse-cookie
    /// reconstruction, where the walk is discovered back to front.
    pub fn reverse(&mut self) {
        self.nodes.reverse();
        self.arcs.reverse();
    }

    /// True when the path holds no node at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of arcs in the path.
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// First node of the path, if any.
    pub fn first(&self) -> Option<NodeId<Ix>> {
        self.nodes.first().copied()
    }

    /// Last node of the path, if any.
    pub fn last(&self) -> Option<NodeId<Ix>> {
        self.nodes.last().copied()
    }

    /// The node sequence.
    pub fn nodes(&self) -> &[NodeId<Ix>] {
        &self.nodes
    }

    /// The arc sequence; one shorter than the node sequence.
    pub fn arcs(&self) -> &[ArcId<Ix>] {
        &self.arcs
    }

    /// Sum the path's arc payloads through `weight`.
    pub fn total_weight<N, A, Ty, K, W>(&self, g: &Graph<N, A, Ty, Ix>, mut weight: W) -> K
    where
        Ty: EdgeType,
        K: Default + core::ops::Add<K, Output = K>,
        W: FnMut(&A) -> K,
    {
        let mut total = K::default();
        for arc in &self.arcs {
            total = total + weight(&g[*arc]);
        }
        total
    }

    fn check_graph<N, A, Ty: EdgeType>(
        &self,
        g: &Graph<N, A, Ty, Ix>,
    ) -> Result<(), GraphError> {
        if g.token() == self.token {
            Ok(())
        } else {
            Err(GraphError::PathNotInGraph)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Digraph;

    #[test]
    fn append_checks_adjacency() {
        let mut g = Digraph::<(), ()>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        let ab = g.add_arc(a, b, ()).unwrap();
        let bc = g.add_arc(b, c, ()).unwrap();

        let mut path = Path::new(&g);
        path.init(&g, a).unwrap();
        path.append_arc(&g, ab).unwrap();
        path.append_arc(&g, bc).unwrap();
        assert_eq!(path.nodes(), &[a, b, c]);
        assert_eq!(path.arc_count(), 2);

        let mut bad = Path::new(&g);
        bad.init(&g, a).unwrap();
        assert!(matches!(
            bad.append_arc(&g, bc),
            Err(GraphError::PathDiscontinuity { .. })
        ));
    }

    #[test]
    fn undirected_arcs_append_in_either_orientation() {
        let mut g = crate::Graph::<(), ()>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let ab = g.add_arc(a, b, ()).unwrap();
        let mut path = Path::new(&g);
        path.init(&g, b).unwrap();
        path.append_arc(&g, ab).unwrap();
        assert_eq!(path.nodes(), &[b, a]);
    }

    #[test]
    fn rejects_foreign_graph() {
        let mut g1 = Digraph::<(), ()>::new();
        let a = g1.add_node(());
        let mut g2 = Digraph::<(), ()>::new();
        let _ = g2.add_node(());
        let mut path = Path::new(&g1);
        path.init(&g1, a).unwrap();
        assert_eq!(path.init(&g2, a), Err(GraphError::PathNotInGraph));
    }
}
