//! Keyed indices over a graph's nodes and arcs.
//!
//! The container itself only offers O(V) and O(E) scans for "the node
//! whose payload is …" questions. An index attached to the graph answers
//! them in expected O(1), provided the indexed mutations flow *through the
//! index*: the pairs of operations `insert_in_graph`/`remove_from_graph`
//! keep the graph and the index in lock step. Mutating the graph behind
//! the index's back invalidates it.
//!
//! Indices are non-owning views bound to one graph instance; every
//! operation revalidates the binding.

use core::hash::Hash;

use indexmap::IndexMap;

use crate::error::GraphError;
use crate::graph::{ArcId, DefaultIx, Graph, GraphToken, IndexType, NodeId};
use crate::EdgeType;

/// An index of a graph's nodes keyed by a payload-derived key.
///
/// Invariant: for every node inserted through the index,
/// `index.search(&key) == Some(node)` as long as all indexed mutations go
/// through the index.
pub struct NodeIndex<K, Ix = DefaultIx>
where
    K: Hash + Eq,
{
    token: GraphToken,
    map: IndexMap<K, NodeId<Ix>>,
}

impl<K, Ix> NodeIndex<K, Ix>
where
    K: Hash + Eq,
    Ix: IndexType,
{
    /// Build an index over the nodes already in `g`, extracting each key
    /// with `key_of`.
    ///
    /// A duplicate key keeps the first node encountered.
    pub fn build<N, A, Ty, F>(g: &Graph<N, A, Ty, Ix>, mut key_of: F) -> Self
    where
        Ty: EdgeType,
        F: FnMut(&N) -> K,
    {
        let mut map = IndexMap::with_capacity(g.node_count());
        for n in g.node_ids() {
            map.entry(key_of(&g[n])).or_insert(n);
        }
        NodeIndex {
            token: g.token(),
            map,
        }
    }

    /// Create the node in the graph *and* the index atomically.
    ///
    /// On a duplicate key nothing is inserted anywhere and
    /// [`GraphError::DuplicateKey`] is returned.
    pub fn insert_in_graph<N, A, Ty>(
        &mut self,
        g: &mut Graph<N, A, Ty, Ix>,
        key: K,
        info: N,
    ) -> Result<NodeId<Ix>, GraphError>
    where
        Ty: EdgeType,
    {
        self.check_graph(g)?;
        if self.map.contains_key(&key) {
            return Err(GraphError::DuplicateKey);
        }
        let n = g.add_node(info);
        self.map.insert(key, n);
        Ok(n)
    }

    /// Return the node under `key`, inserting a fresh one built from
    /// `info` when the key is absent.
    pub fn search_or_insert_in_graph<N, A, Ty>(
        &mut self,
        g: &mut Graph<N, A, Ty, Ix>,
        key: K,
        info: N,
    ) -> Result<NodeId<Ix>, GraphError>
    where
        Ty: EdgeType,
    {
        self.check_graph(g)?;
        if let Some(n) = self.map.get(&key) {
            return Ok(*n);
        }
        let n = g.add_node(info);
        self.map.insert(key, n);
        Ok(n)
    }

    /// Look `key` up in the index.
    pub fn search(&self, key: &K) -> Option<NodeId<Ix>> {
        self.map.get(key).copied()
    }

    /// Drop `key` from the index only; the graph keeps the node.
    pub fn remove(&mut self, key: &K) -> Option<NodeId<Ix>> {
        self.map.swap_remove(key)
    }

    /// Remove the node under `key` from the graph and the index
    /// atomically, returning its payload.
    ///
    /// The container moves the last node into the vacated id, so the index
    /// rewrites that node's entry; the cost is one scan of the index.
    /// Incident arcs are removed by the graph, which invalidates any
    /// [`ArcIndex`] over it.
    pub fn remove_from_graph<N, A, Ty>(
        &mut self,
        g: &mut Graph<N, A, Ty, Ix>,
        key: &K,
    ) -> Result<N, GraphError>
    where
        Ty: EdgeType,
    {
        self.check_graph(g)?;
        let n = self.map.swap_remove(key).ok_or(GraphError::KeyNotFound)?;
        let info = g
            .remove_node(n)
            .ok_or(GraphError::IndexInconsistent(n.index()))?;
        let moved = NodeId::new(g.node_count());
        if n != moved {
            for slot in self.map.values_mut() {
                if *slot == moved {
                    *slot = n;
                    break;
                }
            }
        }
        Ok(info)
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn check_graph<N, A, Ty: EdgeType>(
        &self,
        g: &Graph<N, A, Ty, Ix>,
    ) -> Result<(), GraphError> {
        if g.token() == self.token {
            Ok(())
        } else {
            Err(GraphError::IndexGraphMismatch)
        }
    }
}

/// An index of a graph's arcs keyed by their endpoint pair.
///
/// Parallel arcs share one bucket in insertion order. For an undirected
/// graph, searches probe both orientations of the pair.
pub struct ArcIndex<Ix = DefaultIx> {
    token: GraphToken,
    map: IndexMap<(NodeId<Ix>, NodeId<Ix>), Vec<ArcId<Ix>>>,
}

impl<Ix: IndexType> ArcIndex<Ix> {
    /// Build an index over the arcs already in `g`.
    pub fn build<N, A, Ty>(g: &Graph<N, A, Ty, Ix>) -> Self
    where
        Ty: EdgeType,
    {
        let mut index = ArcIndex {
            token: g.token(),
            map: IndexMap::with_capacity(g.arc_count()),
        };
        for arc in g.arcs() {
            index
                .map
                .entry((arc.source(), arc.target()))
                .or_default()
                .push(arc.id());
        }
        index
    }

    /// Create the arc in the graph *and* the index atomically.
    pub fn insert_in_graph<N, A, Ty>(
        &mut self,
        g: &mut Graph<N, A, Ty, Ix>,
        src: NodeId<Ix>,
        tgt: NodeId<Ix>,
        info: A,
    ) -> Result<ArcId<Ix>, GraphError>
    where
        Ty: EdgeType,
    {
        self.check_graph(g)?;
        let arc = g.add_arc(src, tgt, info)?;
        self.map.entry((src, tgt)).or_default().push(arc);
        Ok(arc)
    }

    /// Find an arc joining `src` and `tgt`; parallel arcs yield the first
    /// inserted. Probes `(tgt, src)` as well when the graph is undirected.
    pub fn search<N, A, Ty>(
        &self,
        g: &Graph<N, A, Ty, Ix>,
        src: NodeId<Ix>,
        tgt: NodeId<Ix>,
    ) -> Option<ArcId<Ix>>
    where
        Ty: EdgeType,
    {
        self.bucket(g, src, tgt)
            .and_then(|bucket| bucket.first().copied())
    }

    /// Find an arc joining `src` and `tgt` whose payload satisfies `pred`;
    /// this is the lookup that distinguishes parallel arcs.
    pub fn search_with<N, A, Ty, P>(
        &self,
        g: &Graph<N, A, Ty, Ix>,
        src: NodeId<Ix>,
        tgt: NodeId<Ix>,
        mut pred: P,
    ) -> Option<ArcId<Ix>>
    where
        Ty: EdgeType,
        P: FnMut(&A) -> bool,
    {
        self.bucket(g, src, tgt)?
            .iter()
            .copied()
            .find(|a| pred(&g[*a]))
    }

    /// Remove `arc` from the graph and the index atomically, returning its
    /// payload.
    pub fn remove_from_graph<N, A, Ty>(
        &mut self,
        g: &mut Graph<N, A, Ty, Ix>,
        arc: ArcId<Ix>,
    ) -> Result<A, GraphError>
    where
        Ty: EdgeType,
    {
        self.check_graph(g)?;
        let (src, tgt) = g
            .arc_endpoints(arc)
            .ok_or(GraphError::InvalidArc(arc.index()))?;
        let bucket = self
            .map
            .get_mut(&(src, tgt))
            .ok_or(GraphError::IndexInconsistent(arc.index()))?;
        let pos = bucket
            .iter()
            .position(|a| *a == arc)
            .ok_or(GraphError::IndexInconsistent(arc.index()))?;
        bucket.remove(pos);
        if bucket.is_empty() {
            self.map.swap_remove(&(src, tgt));
        }
        let info = g
            .remove_arc(arc)
            .ok_or(GraphError::IndexInconsistent(arc.index()))?;
        // the last arc moved into the vacated id
        let moved = ArcId::new(g.arc_count());
        if arc != moved {
            for bucket in self.map.values_mut() {
                if let Some(slot) = bucket.iter_mut().find(|a| **a == moved) {
                    *slot = arc;
                    break;
                }
            }
        }
        Ok(info)
    }

    /// Number of indexed arcs.
    pub fn len(&self) -> usize {
        self.map.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn bucket<N, A, Ty>(
        &self,
        g: &Graph<N, A, Ty, Ix>,
        src: NodeId<Ix>,
        tgt: NodeId<Ix>,
    ) -> Option<&Vec<ArcId<Ix>>>
    where
        Ty: EdgeType,
    {
        match self.map.get(&(src, tgt)) {
            Some(bucket) => Some(bucket),
            None if !g.is_directed() => self.map.get(&(tgt, src)),
            None => None,
        }
    }

    fn check_graph<N, A, Ty: EdgeType>(
        &self,
        g: &Graph<N, A, Ty, Ix>,
    ) -> Result<(), GraphError> {
        if g.token() == self.token {
            Ok(())
        } else {
            Err(GraphError::IndexGraphMismatch)
        }
    }
}
