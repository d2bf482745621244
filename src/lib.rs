//! **listgraph** is an adjacency-list graph library in which every node and
//! arc carries a small embedded *attribute block* (a set of control bits, a
//! counter and one opaque back-reference slot) that the algorithms use as
//! scratch state instead of allocating per-call side maps.
//!
//! The central type is [`Graph`](crate::graph::Graph), an undirected or
//! directed graph with arbitrary associated node and arc data. On top of it
//! the crate provides:
//!
//! - traversal skeletons with visitor callbacks ([`visit`]),
//! - spanning trees, connectivity, path finding and all-pairs shortest
//!   paths ([`algo`]),
//! - node and arc indices for keyed lookup ([`index`]),
//! - capacitated flow networks with a residual overlay and supply/demand
//!   reductions ([`flow`]),
//! - stream serialization in a binary and a textual framing ([`io`]).
//!
//! Algorithms reset the attribute bits they use on entry and document the
//! state they leave behind; see the [`attr`] module for the discipline.

pub mod algo;
pub mod attr;
pub mod euclidean;
pub mod flow;
pub mod graph;
pub mod graph_to_tree;
pub mod index;
pub mod io;
pub mod path;
pub mod prelude;
pub mod unionfind;
pub mod visit;

mod error;
mod scored;

pub use crate::error::GraphError;
pub use crate::graph::{ArcId, Digraph, Graph, NodeId};
pub use crate::path::Path;
pub use crate::visit::{breadth_first_search, depth_first_search, Control};
pub use crate::Direction::{Incoming, Outgoing};

/// Arc direction, relative to a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// An `Outgoing` arc is an outward arc *from* the current node.
    Outgoing = 0,
    /// An `Incoming` arc is an inbound arc *to* the current node.
    Incoming = 1,
}

impl Direction {
    /// Return the opposite `Direction`.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Outgoing => Incoming,
            Incoming => Outgoing,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Marker type for a directed graph.
#[derive(Copy, Clone, Debug)]
pub enum Directed {}

/// Marker type for an undirected graph.
#[derive(Copy, Clone, Debug)]
pub enum Undirected {}

/// A graph's arc type determines whether it has directed arcs or not.
pub trait EdgeType {
    fn is_directed() -> bool;
}

impl EdgeType for Directed {
    #[inline]
    fn is_directed() -> bool {
        true
    }
}

impl EdgeType for Undirected {
    #[inline]
    fn is_directed() -> bool {
        false
    }
}

/// Convert an element like `(i, j)` or `(i, j, w)` into a triple of source,
/// target and arc payload.
///
/// For `Graph::extend_with_arcs`.
pub trait IntoWeightedArc<Ix, A> {
    fn into_weighted_arc(self) -> (Ix, Ix, A);
}

impl<Ix, A> IntoWeightedArc<Ix, A> for (Ix, Ix)
where
    A: Default,
{
    fn into_weighted_arc(self) -> (Ix, Ix, A) {
        let (s, t) = self;
        (s, t, A::default())
    }
}

impl<Ix, A> IntoWeightedArc<Ix, A> for (Ix, Ix, A) {
    fn into_weighted_arc(self) -> (Ix, Ix, A) {
        self
    }
}

impl<'a, Ix, A> IntoWeightedArc<Ix, A> for &'a (Ix, Ix, A)
where
    Ix: Copy,
    A: Clone,
{
    fn into_weighted_arc(self) -> (Ix, Ix, A) {
        self.clone()
    }
}

impl<'a, Ix, A> IntoWeightedArc<Ix, A> for &'a (Ix, Ix)
where
    Ix: Copy,
    A: Default,
{
    fn into_weighted_arc(self) -> (Ix, Ix, A) {
        let (s, t) = *self;
        (s, t, A::default())
    }
}
