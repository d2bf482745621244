//! `Graph<N, A, Ty, Ix>`, the adjacency-list graph container.

use core::cmp::max;
use core::fmt;
use core::hash::Hash;
use core::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::attr::{Attr, GraphBit};
use crate::error::GraphError;
use crate::{Directed, Direction, EdgeType, Incoming, IntoWeightedArc, Outgoing, Undirected};

#[cfg(feature = "serde-1")]
mod serialization;

/// The default integer type for graph indices.
/// `u32` is the default to reduce the size of the graph's data and improve
/// performance in the common case.
pub type DefaultIx = u32;

/// Trait for the unsigned integer type used for node and arc indices.
///
/// Implementations must faithfully preserve and convert index values.
pub trait IndexType: Copy + Default + Hash + Ord + fmt::Debug + 'static {
    fn new(x: usize) -> Self;
    fn index(&self) -> usize;
    fn max() -> Self;
}

macro_rules! impl_index_type {
    ($($t:ident),*) => {
        $(
            impl IndexType for $t {
                #[inline(always)]
                fn new(x: usize) -> Self {
                    x as $t
                }
                #[inline(always)]
                fn index(&self) -> usize {
                    *self as usize
                }
                #[inline(always)]
                fn max() -> Self {
                    $t::MAX
                }
            }
        )*
    };
}

impl_index_type!(u8, u16, u32, usize);

/// Node identifier.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct NodeId<Ix = DefaultIx>(Ix);

impl<Ix: IndexType> NodeId<Ix> {
    #[inline]
    pub fn new(x: usize) -> Self {
        NodeId(IndexType::new(x))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0.index()
    }

    /// An invalid `NodeId`, used to denote absence of a node.
    #[inline]
    pub fn end() -> Self {
        NodeId(IndexType::max())
    }
}

impl<Ix: fmt::Debug> fmt::Debug for NodeId<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({:?})", self.0)
    }
}

/// Arc identifier.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct ArcId<Ix = DefaultIx>(Ix);

impl<Ix: IndexType> ArcId<Ix> {
    #[inline]
    pub fn new(x: usize) -> Self {
        ArcId(IndexType::new(x))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0.index()
    }

    /// An invalid `ArcId` used to denote absence of an arc, for example to
    /// end an adjacency list.
    #[inline]
    pub fn end() -> Self {
        ArcId(IndexType::max())
    }
}

impl<Ix: fmt::Debug> fmt::Debug for ArcId<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArcId({:?})", self.0)
    }
}

const DIRECTIONS: [Direction; 2] = [Outgoing, Incoming];

/// The graph's node type.
#[derive(Debug, Clone)]
pub struct Node<N, Ix = DefaultIx> {
    /// Associated node payload.
    pub info: N,
    /// Embedded attribute block.
    pub(crate) attrs: Attr<Ix>,
    /// First arc in the outgoing and incoming arc lists.
    next: [ArcId<Ix>; 2],
}

/// The graph's arc type.
#[derive(Debug, Clone)]
pub struct Arc<A, Ix = DefaultIx> {
    /// Associated arc payload.
    pub info: A,
    /// Embedded attribute block.
    pub(crate) attrs: Attr<Ix>,
    /// Next arc in the outgoing and incoming arc lists.
    next: [ArcId<Ix>; 2],
    /// Source and target node ids.
    node: [NodeId<Ix>; 2],
}

impl<A, Ix: IndexType> Arc<A, Ix> {
    /// Return the source node id.
    pub fn source(&self) -> NodeId<Ix> {
        self.node[0]
    }

    /// Return the target node id.
    pub fn target(&self) -> NodeId<Ix> {
        self.node[1]
    }
}

/// Identity token distinguishing graph instances.
///
/// Non-owning views such as [`Path`](crate::path::Path) record the token of
/// the graph they were built against and reject operations with any other
/// graph. Tokens are unique per constructed graph; a clone gets a fresh one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GraphToken(u64);

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

impl GraphToken {
    fn fresh() -> Self {
        GraphToken(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

/// `Graph<N, A, Ty, Ix>` is a graph datastructure using an adjacency list
/// representation.
///
/// `Graph` is parameterized over:
///
/// - Associated data `N` for nodes and `A` for arcs, called *payloads*.
/// - Arc type `Ty` that determines whether the graph arcs are directed or
///   undirected. Undirected is the default; [`Digraph`] is the directed
///   alias.
/// - Index type `Ix`, which determines the maximum size of the graph.
///
/// Every node and arc additionally embeds an [`Attr`](crate::attr::Attr)
/// block that the algorithms in this crate use as scratch state. Algorithms
/// take `&mut Graph` because they write those attributes; a graph, its
/// indices and its flow overlay form one logical resource on which no two
/// algorithms may run at once.
///
/// ### Graph ids
///
/// `NodeId` and `ArcId` are index types acting as references to nodes and
/// arcs, but they are only stable across certain operations:
///
/// * **Removing nodes or arcs may shift other ids.** Removing a node will
///   force the last node to shift its id to take its place; likewise for
///   arcs.
/// * Adding nodes or arcs keeps ids stable, and ids are always a compact
///   interval `0..len`, which the algorithms exploit for dense side arrays.
pub struct Graph<N, A, Ty = Undirected, Ix = DefaultIx> {
    token: GraphToken,
    nodes: Vec<Node<N, Ix>>,
    arcs: Vec<Arc<A, Ix>>,
    ty: PhantomData<Ty>,
}

/// A directed graph.
pub type Digraph<N, A, Ix = DefaultIx> = Graph<N, A, Directed, Ix>;

/// The cloned graph keeps the node and arc ids of `self` but receives a
/// fresh identity token; attribute blocks are cloned verbatim.
impl<N, A, Ty, Ix: IndexType> Clone for Graph<N, A, Ty, Ix>
where
    N: Clone,
    A: Clone,
{
    fn clone(&self) -> Self {
        Graph {
            token: GraphToken::fresh(),
            nodes: self.nodes.clone(),
            arcs: self.arcs.clone(),
            ty: self.ty,
        }
    }
}

impl<N, A, Ty, Ix> fmt::Debug for Graph<N, A, Ty, Ix>
where
    N: fmt::Debug,
    A: fmt::Debug,
    Ty: EdgeType,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ty = if self.is_directed() {
            "Directed"
        } else {
            "Undirected"
        };
        f.debug_struct("Graph")
            .field("ty", &ty)
            .field("node_count", &self.node_count())
            .field("arc_count", &self.arc_count())
            .finish()
    }
}

enum Pair<T> {
    Both(T, T),
    One(T),
    None,
}

/// Get mutable references at index `a` and `b`.
fn index_twice<T>(slc: &mut [T], a: usize, b: usize) -> Pair<&mut T> {
    if max(a, b) >= slc.len() {
        Pair::None
    } else if a == b {
        Pair::One(&mut slc[a])
    } else {
        let (lo, hi) = (a.min(b), a.max(b));
        let (first, second) = slc.split_at_mut(hi);
        let (x, y) = (&mut first[lo], &mut second[0]);
        if a < b {
            Pair::Both(x, y)
        } else {
            Pair::Both(y, x)
        }
    }
}

impl<N, A, Ty: EdgeType> Graph<N, A, Ty> {
    /// Create a new `Graph`.
    pub fn new() -> Self {
        Graph::with_capacity(0, 0)
    }
}

impl<N, A> Default for Graph<N, A, Undirected> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, A> Default for Graph<N, A, Directed> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, A, Ty, Ix> Graph<N, A, Ty, Ix>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    /// Create a new `Graph` with estimated capacity.
    pub fn with_capacity(nodes: usize, arcs: usize) -> Self {
        Graph {
            token: GraphToken::fresh(),
            nodes: Vec::with_capacity(nodes),
            arcs: Vec::with_capacity(arcs),
            ty: PhantomData,
        }
    }

    /// The identity token of this graph instance.
    pub fn token(&self) -> GraphToken {
        self.token
    }

    /// Whether the graph has directed arcs or not.
    #[inline]
    pub fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    /// Return the number of nodes in the graph.
    ///
    /// Computes in **O(1)** time.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of arcs in the graph.
    ///
    /// Computes in **O(1)** time.
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Whether `n` currently names a node of the graph.
    #[inline]
    pub fn contains_node(&self, n: NodeId<Ix>) -> bool {
        n.index() < self.nodes.len()
    }

    /// Whether `a` currently names an arc of the graph.
    #[inline]
    pub fn contains_arc(&self, a: ArcId<Ix>) -> bool {
        a.index() < self.arcs.len()
    }

    /// Add a node with payload `info` to the graph. Its attribute block
    /// starts out default-reset.
    ///
    /// Computes in **O(1)** amortized time.
    ///
    /// **Panics** if the graph is at the maximum number of nodes for its
    /// index type (N/A if `Ix` is `usize`).
    pub fn add_node(&mut self, info: N) -> NodeId<Ix> {
        let node = Node {
            info,
            attrs: Attr::default(),
            next: [ArcId::end(), ArcId::end()],
        };
        let node_idx = NodeId::new(self.nodes.len());
        assert!(<Ix as IndexType>::max().index() == !0 || NodeId::end() != node_idx);
        self.nodes.push(node);
        node_idx
    }

    /// Add an arc from `a` to `b` with payload `info`. For an undirected
    /// graph the source/target distinction is stored but the semantics are
    /// symmetric.
    ///
    /// Parallel arcs and self-loops are allowed.
    ///
    /// Computes in **O(1)** amortized time.
    pub fn add_arc(
        &mut self,
        a: NodeId<Ix>,
        b: NodeId<Ix>,
        info: A,
    ) -> Result<ArcId<Ix>, GraphError> {
        if !self.contains_node(a) {
            return Err(GraphError::InvalidNode(a.index()));
        }
        if !self.contains_node(b) {
            return Err(GraphError::InvalidNode(b.index()));
        }
        let arc_idx = ArcId::new(self.arcs.len());
        assert!(<Ix as IndexType>::max().index() == !0 || ArcId::end() != arc_idx);
        let mut arc = Arc {
            info,
            attrs: Attr::default(),
            node: [a, b],
            next: [ArcId::end(); 2],
        };
        match index_twice(&mut self.nodes, a.index(), b.index()) {
            Pair::None => unreachable!("endpoints checked above"),
            Pair::One(an) => {
                arc.next = an.next;
                an.next[0] = arc_idx;
                an.next[1] = arc_idx;
            }
            Pair::Both(an, bn) => {
                arc.next = [an.next[0], bn.next[1]];
                an.next[0] = arc_idx;
                bn.next[1] = arc_idx;
            }
        }
        self.arcs.push(arc);
        Ok(arc_idx)
    }

    /// Add arcs from an iterable of `(source, target)` or
    /// `(source, target, payload)` elements.
    pub fn extend_with_arcs<I>(&mut self, iterable: I) -> Result<(), GraphError>
    where
        I: IntoIterator,
        I::Item: IntoWeightedArc<NodeId<Ix>, A>,
    {
        for elt in iterable {
            let (source, target, info) = elt.into_weighted_arc();
            self.add_arc(source, target, info)?;
        }
        Ok(())
    }

    /// Access the payload for node `n`, if it exists.
    ///
    /// Also available with indexing syntax: `&graph[n]`.
    pub fn node_info(&self, n: NodeId<Ix>) -> Option<&N> {
        self.nodes.get(n.index()).map(|node| &node.info)
    }

    /// Access the payload for node `n` mutably, if it exists.
    pub fn node_info_mut(&mut self, n: NodeId<Ix>) -> Option<&mut N> {
        self.nodes.get_mut(n.index()).map(|node| &mut node.info)
    }

    /// Access the payload for arc `a`, if it exists.
    ///
    /// Also available with indexing syntax: `&graph[a]`.
    pub fn arc_info(&self, a: ArcId<Ix>) -> Option<&A> {
        self.arcs.get(a.index()).map(|arc| &arc.info)
    }

    /// Access the payload for arc `a` mutably, if it exists.
    pub fn arc_info_mut(&mut self, a: ArcId<Ix>) -> Option<&mut A> {
        self.arcs.get_mut(a.index()).map(|arc| &mut arc.info)
    }

    /// Access the source and target nodes of `a`, if it exists.
    pub fn arc_endpoints(&self, a: ArcId<Ix>) -> Option<(NodeId<Ix>, NodeId<Ix>)> {
        self.arcs
            .get(a.index())
            .map(|arc| (arc.source(), arc.target()))
    }

    /// Return the endpoint of `a` that is not `n`.
    ///
    /// For a self-loop both endpoints are `n` and `n` itself is returned.
    pub fn other_endpoint(&self, a: ArcId<Ix>, n: NodeId<Ix>) -> Result<NodeId<Ix>, GraphError> {
        let arc = self
            .arcs
            .get(a.index())
            .ok_or(GraphError::InvalidArc(a.index()))?;
        if arc.source() == n {
            Ok(arc.target())
        } else if arc.target() == n {
            Ok(arc.source())
        } else {
            Err(GraphError::NotIncident {
                node: n.index(),
                arc: a.index(),
            })
        }
    }

    /// The attribute block of node `n`.
    ///
    /// **Panics** if `n` is not in the graph.
    #[inline]
    pub fn node_attr(&self, n: NodeId<Ix>) -> &Attr<Ix> {
        &self.nodes[n.index()].attrs
    }

    /// The attribute block of node `n`, mutably.
    ///
    /// **Panics** if `n` is not in the graph.
    #[inline]
    pub fn node_attr_mut(&mut self, n: NodeId<Ix>) -> &mut Attr<Ix> {
        &mut self.nodes[n.index()].attrs
    }

    /// The attribute block of arc `a`.
    ///
    /// **Panics** if `a` is not in the graph.
    #[inline]
    pub fn arc_attr(&self, a: ArcId<Ix>) -> &Attr<Ix> {
        &self.arcs[a.index()].attrs
    }

    /// The attribute block of arc `a`, mutably.
    ///
    /// **Panics** if `a` is not in the graph.
    #[inline]
    pub fn arc_attr_mut(&mut self, a: ArcId<Ix>) -> &mut Attr<Ix> {
        &mut self.arcs[a.index()].attrs
    }

    /// Reset the attribute blocks of all nodes to their defaults.
    ///
    /// Computes in **O(|V|)** time.
    pub fn reset_node_attrs(&mut self) {
        for node in &mut self.nodes {
            node.attrs.reset();
        }
    }

    /// Reset the attribute blocks of all arcs to their defaults.
    ///
    /// Computes in **O(|E|)** time.
    pub fn reset_arc_attrs(&mut self) {
        for arc in &mut self.arcs {
            arc.attrs.reset();
        }
    }

    /// Reset the attribute blocks of all nodes and arcs.
    pub fn reset_attrs(&mut self) {
        self.reset_node_attrs();
        self.reset_arc_attrs();
    }

    /// Clear one control bit on every node and every arc.
    ///
    /// This is how algorithms guarantee a clean mark on entry.
    pub fn reset_bit(&mut self, bit: GraphBit) {
        self.reset_node_bit(bit);
        self.reset_arc_bit(bit);
    }

    /// Clear one control bit on every node.
    pub fn reset_node_bit(&mut self, bit: GraphBit) {
        for node in &mut self.nodes {
            node.attrs.bits.reset(bit);
        }
    }

    /// Clear one control bit on every arc.
    pub fn reset_arc_bit(&mut self, bit: GraphBit) {
        for arc in &mut self.arcs {
            arc.attrs.bits.reset(bit);
        }
    }

    /// Remove `n` from the graph if it exists, together with every arc
    /// incident on it, and return its payload.
    ///
    /// Apart from `n`, this invalidates the last node id in the graph (that
    /// node adopts the removed node's id). Arc ids are invalidated as they
    /// would be following the removal of each incident arc.
    ///
    /// Computes in **O(deg(n))** arc-list work.
    pub fn remove_node(&mut self, n: NodeId<Ix>) -> Option<N> {
        self.nodes.get(n.index())?;
        for d in &DIRECTIONS {
            let k = d.index();
            // Remove all arcs from and to this node.
            loop {
                let next = self.nodes[n.index()].next[k];
                if next == ArcId::end() {
                    break;
                }
                let ret = self.remove_arc(next);
                debug_assert!(ret.is_some());
                let _ = ret;
            }
        }

        // swap_remove the node -- only the swapped-in node changes id, so
        // only its arc endpoints need rewriting.
        let node = self.nodes.swap_remove(n.index());

        let swap_arcs = match self.nodes.get(n.index()) {
            None => return Some(node.info),
            Some(moved) => moved.next,
        };

        let old_index = NodeId::new(self.nodes.len());
        let new_index = n;

        for &d in &DIRECTIONS {
            let k = d.index();
            let mut arcs = arcs_walker_mut(&mut self.arcs, swap_arcs[k], d);
            while let Some(curarc) = arcs.next_arc() {
                debug_assert!(curarc.node[k] == old_index);
                curarc.node[k] = new_index;
            }
        }
        Some(node.info)
    }

    /// For arc `a` with endpoints `arc_node`, replace links to it with links
    /// to `arc_next`.
    fn change_arc_links(
        &mut self,
        arc_node: [NodeId<Ix>; 2],
        a: ArcId<Ix>,
        arc_next: [ArcId<Ix>; 2],
    ) {
        for &d in &DIRECTIONS {
            let k = d.index();
            let node = match self.nodes.get_mut(arc_node[k].index()) {
                Some(r) => r,
                None => {
                    debug_assert!(false, "arc endpoint {:?} not found", arc_node[k]);
                    return;
                }
            };
            let fst = node.next[k];
            if fst == a {
                node.next[k] = arc_next[k];
            } else {
                let mut arcs = arcs_walker_mut(&mut self.arcs, fst, d);
                while let Some(curarc) = arcs.next_arc() {
                    if curarc.next[k] == a {
                        curarc.next[k] = arc_next[k];
                        break; // the arc can only be present once in the list.
                    }
                }
            }
        }
    }

    /// Remove an arc and return its payload, or `None` if it didn't exist.
    ///
    /// Apart from `a`, this invalidates the last arc id in the graph (that
    /// arc adopts the removed arc's id).
    ///
    /// Computes in **O(e')** time, where **e'** is the size of four
    /// particular arc lists, for the endpoints of `a` and the endpoints of
    /// another affected arc.
    pub fn remove_arc(&mut self, a: ArcId<Ix>) -> Option<A> {
        // Every arc is part of two lists: outgoing and incoming. Remove it
        // from both by replacing it with a link to the next in the list.
        let (arc_node, arc_next) = match self.arcs.get(a.index()) {
            None => return None,
            Some(x) => (x.node, x.next),
        };
        self.change_arc_links(arc_node, a, arc_next);

        // swap_remove the arc -- only the swapped-in arc needs its links
        // rewritten to its new id.
        let arc = self.arcs.swap_remove(a.index());
        let swap = match self.arcs.get(a.index()) {
            None => return Some(arc.info),
            Some(moved) => moved.node,
        };
        let swapped_a = ArcId::new(self.arcs.len());
        self.change_arc_links(swap, swapped_a, [a, a]);
        Some(arc.info)
    }

    /// Iterator over all node ids, in id order.
    pub fn node_ids(&self) -> NodeIds<Ix> {
        NodeIds {
            range: 0..self.nodes.len(),
            ty: PhantomData,
        }
    }

    /// Iterator over all arc ids, in id order.
    pub fn arc_ids(&self) -> ArcIds<Ix> {
        ArcIds {
            range: 0..self.arcs.len(),
            ty: PhantomData,
        }
    }

    /// Iterator over all node payloads, in id order.
    pub fn node_infos(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter().map(|node| &node.info)
    }

    /// Iterator over references to all arcs, in id order.
    pub fn arcs(&self) -> impl Iterator<Item = ArcRef<'_, A, Ix>> {
        self.arcs.iter().enumerate().map(|(i, arc)| ArcRef {
            id: ArcId::new(i),
            source: arc.source(),
            target: arc.target(),
            info: &arc.info,
        })
    }

    /// Node ids whose payload satisfies `pred`, in id order.
    ///
    /// The default "no filter" is simply [`Graph::node_ids`].
    pub fn nodes_where<'g, P>(&'g self, pred: P) -> impl Iterator<Item = NodeId<Ix>> + 'g
    where
        P: Fn(&N) -> bool + 'g,
    {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| pred(&node.info))
            .map(|(i, _)| NodeId::new(i))
    }

    /// Arc ids whose payload satisfies `pred`, in id order.
    pub fn arcs_where<'g, P>(&'g self, pred: P) -> impl Iterator<Item = ArcId<Ix>> + 'g
    where
        P: Fn(&A) -> bool + 'g,
    {
        self.arcs
            .iter()
            .enumerate()
            .filter(move |(_, arc)| pred(&arc.info))
            .map(|(i, _)| ArcId::new(i))
    }

    /// Return a walker over the arcs adjacent to `n` for traversal purposes:
    /// the outgoing arcs of a directed graph, all incident arcs of an
    /// undirected one.
    ///
    /// The walker does not borrow from the graph, so the graph's attribute
    /// blocks can be mutated while stepping through it.
    pub fn walker(&self, n: NodeId<Ix>) -> ArcWalker<Ix> {
        if self.is_directed() {
            self.walker_directed(n, Outgoing)
        } else {
            self.walker_incident(n)
        }
    }

    /// Return a walker over the arcs of `n` in the given direction.
    ///
    /// For an undirected graph this is the same as [`Graph::walker_incident`].
    pub fn walker_directed(&self, n: NodeId<Ix>, dir: Direction) -> ArcWalker<Ix> {
        let mut walker = self.walker_incident(n);
        if self.is_directed() {
            let k = dir.index();
            walker.next[1 - k] = ArcId::end();
            walker.skip_start = NodeId::end();
        }
        walker
    }

    /// Return a walker over every arc incident on `n`, in either direction.
    pub fn walker_incident(&self, n: NodeId<Ix>) -> ArcWalker<Ix> {
        ArcWalker {
            skip_start: n,
            next: match self.nodes.get(n.index()) {
                None => [ArcId::end(), ArcId::end()],
                Some(node) => node.next,
            },
        }
    }

    /// Iterator over `(arc, neighbor)` pairs adjacent to `n`; see
    /// [`Graph::walker`] for the direction convention.
    pub fn adjacent_arcs(&self, n: NodeId<Ix>) -> AdjacentArcs<'_, N, A, Ty, Ix> {
        AdjacentArcs {
            graph: self,
            walker: self.walker(n),
        }
    }

    /// Iterator over `(arc, neighbor)` pairs for every arc incident on `n`.
    pub fn incident_arcs(&self, n: NodeId<Ix>) -> AdjacentArcs<'_, N, A, Ty, Ix> {
        AdjacentArcs {
            graph: self,
            walker: self.walker_incident(n),
        }
    }

    /// Iterator over `(arc, neighbor)` pairs of `n` in direction `dir`.
    pub fn directed_arcs(&self, n: NodeId<Ix>, dir: Direction) -> AdjacentArcs<'_, N, A, Ty, Ix> {
        AdjacentArcs {
            graph: self,
            walker: self.walker_directed(n, dir),
        }
    }

    /// Lookup an arc from `a` to `b`; for an undirected graph both
    /// orientations match.
    ///
    /// Computes in **O(e')** time, where **e'** is the number of arcs
    /// connected to `a`.
    pub fn find_arc(&self, a: NodeId<Ix>, b: NodeId<Ix>) -> Option<ArcId<Ix>> {
        let mut walker = self.walker_incident(a);
        if self.is_directed() {
            walker.next[1] = ArcId::end();
        }
        while let Some((arc, other)) = walker.next(self) {
            if other == b {
                return Some(arc);
            }
        }
        None
    }

    /// Number of arcs incident on `n`; a self-loop contributes two.
    ///
    /// Computes in **O(deg(n))** time.
    pub fn degree(&self, n: NodeId<Ix>) -> usize {
        self.count_list(n, Outgoing) + self.count_list(n, Incoming)
    }

    /// Number of arcs leaving `n` (equal to [`Graph::degree`] contribution
    /// of the outgoing list for an undirected graph).
    pub fn out_degree(&self, n: NodeId<Ix>) -> usize {
        self.count_list(n, Outgoing)
    }

    /// Number of arcs entering `n`.
    pub fn in_degree(&self, n: NodeId<Ix>) -> usize {
        self.count_list(n, Incoming)
    }

    fn count_list(&self, n: NodeId<Ix>, dir: Direction) -> usize {
        let k = dir.index();
        let mut count = 0;
        let mut cur = match self.nodes.get(n.index()) {
            None => return 0,
            Some(node) => node.next[k],
        };
        while let Some(arc) = self.arcs.get(cur.index()) {
            count += 1;
            cur = arc.next[k];
        }
        count
    }

    /// Structural copy of the graph, recording the mapping in the attribute
    /// cookies of `self`: after the call every node's cookie holds the id of
    /// its copy in the returned graph, and likewise for arcs.
    ///
    /// The mapping is transient like any cookie use; copy it to a side
    /// table if it must survive the next algorithm invocation. The copy's
    /// attribute blocks are default-reset.
    pub fn clone_with_mapping(&mut self) -> Self
    where
        N: Clone,
        A: Clone,
    {
        let mut copy = Graph::with_capacity(self.node_count(), self.arc_count());
        for (i, node) in self.nodes.iter_mut().enumerate() {
            let mapped: NodeId<Ix> = copy.add_node(node.info.clone());
            debug_assert_eq!(mapped.index(), i);
            node.attrs.cookie = crate::attr::Cookie::Node(mapped);
        }
        for i in 0..self.arcs.len() {
            let (src, tgt, info) = {
                let arc = &self.arcs[i];
                (arc.source(), arc.target(), arc.info.clone())
            };
            let mapped = copy
                .add_arc(src, tgt, info)
                .expect("clone preserves endpoints");
            debug_assert_eq!(mapped.index(), i);
            self.arcs[i].attrs.cookie = crate::attr::Cookie::Arc(mapped);
        }
        copy
    }
}

/// Iterator over node ids.
#[derive(Clone, Debug)]
pub struct NodeIds<Ix = DefaultIx> {
    range: core::ops::Range<usize>,
    ty: PhantomData<Ix>,
}

impl<Ix: IndexType> Iterator for NodeIds<Ix> {
    type Item = NodeId<Ix>;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(NodeId::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

/// Iterator over arc ids.
#[derive(Clone, Debug)]
pub struct ArcIds<Ix = DefaultIx> {
    range: core::ops::Range<usize>,
    ty: PhantomData<Ix>,
}

impl<Ix: IndexType> Iterator for ArcIds<Ix> {
    type Item = ArcId<Ix>;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(ArcId::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

/// Reference to an arc: its id, endpoints and payload.
#[derive(Copy, Clone, Debug)]
pub struct ArcRef<'a, A, Ix = DefaultIx> {
    id: ArcId<Ix>,
    source: NodeId<Ix>,
    target: NodeId<Ix>,
    info: &'a A,
}

impl<'a, A, Ix: IndexType> ArcRef<'a, A, Ix> {
    pub fn id(&self) -> ArcId<Ix> {
        self.id
    }

    pub fn source(&self) -> NodeId<Ix> {
        self.source
    }

    pub fn target(&self) -> NodeId<Ix> {
        self.target
    }

    pub fn info(&self) -> &'a A {
        self.info
    }
}

/// A walker object stepping through the arc lists of a node.
///
/// The walker does not borrow from the graph, so it lets you step through
/// arcs while also mutating payloads or attribute blocks. Created with
/// [`Graph::walker`] and friends.
#[derive(Clone, Debug)]
pub struct ArcWalker<Ix = DefaultIx> {
    /// starting node, skipped in the incoming list to avoid double-counting
    /// self-loops
    skip_start: NodeId<Ix>,
    next: [ArcId<Ix>; 2],
}

impl<Ix: IndexType> ArcWalker<Ix> {
    /// Step to the next arc and the neighbor it leads to, for graph `g`.
    ///
    /// The neighbor is always the endpoint other than the walk's starting
    /// node.
    pub fn next<N, A, Ty: EdgeType>(
        &mut self,
        g: &Graph<N, A, Ty, Ix>,
    ) -> Option<(ArcId<Ix>, NodeId<Ix>)> {
        // First the outgoing arcs.
        if let Some(arc) = g.arcs.get(self.next[0].index()) {
            let a = self.next[0];
            self.next[0] = arc.next[0];
            return Some((a, arc.node[1]));
        }
        // Then incoming arcs. For an "incident" walk (both lists), skip
        // self-loops in the incoming list so they appear only once.
        while let Some(arc) = g.arcs.get(self.next[1].index()) {
            let a = self.next[1];
            self.next[1] = arc.next[1];
            if arc.node[0] != self.skip_start {
                return Some((a, arc.node[0]));
            }
        }
        None
    }
}

/// Borrowed iterator form of [`ArcWalker`], yielding `(arc, neighbor)`.
pub struct AdjacentArcs<'a, N, A, Ty, Ix = DefaultIx> {
    graph: &'a Graph<N, A, Ty, Ix>,
    walker: ArcWalker<Ix>,
}

impl<'a, N, A, Ty, Ix> Iterator for AdjacentArcs<'a, N, A, Ty, Ix>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    type Item = (ArcId<Ix>, NodeId<Ix>);

    fn next(&mut self) -> Option<Self::Item> {
        self.walker.next(self.graph)
    }
}

struct ArcsWalkerMut<'a, A, Ix: IndexType = DefaultIx> {
    arcs: &'a mut [Arc<A, Ix>],
    next: ArcId<Ix>,
    dir: Direction,
}

fn arcs_walker_mut<A, Ix>(
    arcs: &mut [Arc<A, Ix>],
    next: ArcId<Ix>,
    dir: Direction,
) -> ArcsWalkerMut<'_, A, Ix>
where
    Ix: IndexType,
{
    ArcsWalkerMut { arcs, next, dir }
}

impl<A, Ix> ArcsWalkerMut<'_, A, Ix>
where
    Ix: IndexType,
{
    fn next_arc(&mut self) -> Option<&mut Arc<A, Ix>> {
        let k = self.dir.index();
        let cur = self.next.index();
        match self.arcs.get_mut(cur) {
            None => None,
            Some(arc) => {
                self.next = arc.next[k];
                Some(arc)
            }
        }
    }
}

impl<N, A, Ty, Ix> core::ops::Index<NodeId<Ix>> for Graph<N, A, Ty, Ix>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    type Output = N;

    fn index(&self, index: NodeId<Ix>) -> &N {
        &self.nodes[index.index()].info
    }
}

impl<N, A, Ty, Ix> core::ops::IndexMut<NodeId<Ix>> for Graph<N, A, Ty, Ix>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    fn index_mut(&mut self, index: NodeId<Ix>) -> &mut N {
        &mut self.nodes[index.index()].info
    }
}

impl<N, A, Ty, Ix> core::ops::Index<ArcId<Ix>> for Graph<N, A, Ty, Ix>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    type Output = A;

    fn index(&self, index: ArcId<Ix>) -> &A {
        &self.arcs[index.index()].info
    }
}

impl<N, A, Ty, Ix> core::ops::IndexMut<ArcId<Ix>> for Graph<N, A, Ty, Ix>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    fn index_mut(&mut self, index: ArcId<Ix>) -> &mut A {
        &mut self.arcs[index.index()].info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::Cookie;

    #[test]
    fn add_and_count() {
        let mut g = Graph::<&str, i32>::new();
        let a = g.add_node("a");
        let b = g.add_node("b");
        let c = g.add_node("c");
        g.add_arc(a, b, 1).unwrap();
        g.add_arc(b, c, 2).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.arc_count(), 2);
        assert_eq!(g[a], "a");
        assert_eq!(g.degree(b), 2);
    }

    #[test]
    fn add_arc_rejects_foreign_node() {
        let mut g = Graph::<(), ()>::new();
        let a = g.add_node(());
        let bad = NodeId::new(7);
        assert_eq!(g.add_arc(a, bad, ()), Err(GraphError::InvalidNode(7)));
        assert_eq!(g.arc_count(), 0);
    }

    #[test]
    fn other_endpoint_and_not_incident() {
        let mut g = Graph::<(), ()>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        let ab = g.add_arc(a, b, ()).unwrap();
        assert_eq!(g.other_endpoint(ab, a).unwrap(), b);
        assert_eq!(g.other_endpoint(ab, b).unwrap(), a);
        assert_eq!(
            g.other_endpoint(ab, c),
            Err(GraphError::NotIncident { node: 2, arc: 0 })
        );
    }

    #[test]
    fn remove_node_removes_incident_arcs() {
        let mut g = Graph::<&str, i32>::new();
        let a = g.add_node("a");
        let b = g.add_node("b");
        let c = g.add_node("c");
        g.add_arc(a, b, 1).unwrap();
        g.add_arc(b, c, 2).unwrap();
        g.add_arc(a, c, 3).unwrap();
        assert_eq!(g.remove_node(b), Some("b"));
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.arc_count(), 1);
        // the surviving arc joins the two remaining nodes
        let arc = g.arcs().next().unwrap();
        assert_eq!(*arc.info(), 3);
    }

    #[test]
    fn remove_arc_swaps_last_id() {
        let mut g = Digraph::<(), i32>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        let ab = g.add_arc(a, b, 10).unwrap();
        let _bc = g.add_arc(b, c, 20).unwrap();
        let ca = g.add_arc(c, a, 30).unwrap();
        assert_eq!(g.remove_arc(ab), Some(10));
        // the last arc (ca) now occupies id 0
        assert_eq!(g[ArcId::new(0)], 30);
        assert_eq!(g.arc_count(), 2);
        assert!(!g.contains_arc(ca));
    }

    #[test]
    fn directed_adjacency_honours_direction() {
        let mut g = Digraph::<(), ()>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        g.add_arc(a, b, ()).unwrap();
        g.add_arc(c, a, ()).unwrap();
        let out: Vec<_> = g.adjacent_arcs(a).map(|(_, n)| n).collect();
        assert_eq!(out, vec![b]);
        let inc: Vec<_> = g.directed_arcs(a, Incoming).map(|(_, n)| n).collect();
        assert_eq!(inc, vec![c]);
        assert_eq!(g.out_degree(a), 1);
        assert_eq!(g.in_degree(a), 1);
    }

    #[test]
    fn undirected_adjacency_sees_both_sides() {
        let mut g = Graph::<(), ()>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        g.add_arc(a, b, ()).unwrap();
        g.add_arc(c, a, ()).unwrap();
        let mut adj: Vec<_> = g.adjacent_arcs(a).map(|(_, n)| n).collect();
        adj.sort();
        assert_eq!(adj, vec![b, c]);
    }

    #[test]
    fn self_loop_counts_twice_in_degree() {
        let mut g = Graph::<(), ()>::new();
        let a = g.add_node(());
        g.add_arc(a, a, ()).unwrap();
        assert_eq!(g.degree(a), 2);
        // but the walker yields it once
        assert_eq!(g.adjacent_arcs(a).count(), 1);
    }

    #[test]
    fn find_arc_probes_both_orientations_when_undirected() {
        let mut und = Graph::<(), ()>::new();
        let a = und.add_node(());
        let b = und.add_node(());
        let ab = und.add_arc(a, b, ()).unwrap();
        assert_eq!(und.find_arc(b, a), Some(ab));

        let mut dir = Digraph::<(), ()>::new();
        let a = dir.add_node(());
        let b = dir.add_node(());
        dir.add_arc(a, b, ()).unwrap();
        assert_eq!(dir.find_arc(b, a), None);
    }

    #[test]
    fn clone_with_mapping_sets_cookies() {
        let mut g = Graph::<i32, i32>::new();
        let a = g.add_node(1);
        let b = g.add_node(2);
        let ab = g.add_arc(a, b, 7).unwrap();
        let copy = g.clone_with_mapping();
        assert_eq!(copy.node_count(), 2);
        assert_eq!(copy.arc_count(), 1);
        let a2 = g.node_attr(a).cookie.node().unwrap();
        assert_eq!(copy[a2], 1);
        let ab2 = g.arc_attr(ab).cookie.arc().unwrap();
        assert_eq!(copy[ab2], 7);
        assert!(copy.node_attr(a2).cookie.is_nil());
        assert_ne!(copy.token(), g.token());
    }

    #[test]
    fn reset_bit_touches_nodes_and_arcs() {
        let mut g = Graph::<(), ()>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let ab = g.add_arc(a, b, ()).unwrap();
        g.node_attr_mut(a).bits.set(GraphBit::DepthFirst, true);
        g.arc_attr_mut(ab).bits.set(GraphBit::DepthFirst, true);
        g.node_attr_mut(a).cookie = Cookie::Slot(3);
        g.reset_bit(GraphBit::DepthFirst);
        assert!(!g.node_attr(a).bits.get(GraphBit::DepthFirst));
        assert!(!g.arc_attr(ab).bits.get(GraphBit::DepthFirst));
        // reset_bit leaves the rest of the block alone
        assert_eq!(g.node_attr(a).cookie.slot(), Some(3));
    }
}
