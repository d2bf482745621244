//! Graph algorithms.
//!
//! The basic traversal skeletons live in the [`visit`](crate::visit)
//! module; everything built on top of them is here. Algorithms take
//! `&mut Graph` because they use the embedded attribute blocks as scratch
//! state; each function documents the bits it owns, whether it resets them
//! on entry and what it leaves behind.

pub mod cut;
pub mod euler;
pub mod find_path;
pub mod floyd_warshall;
pub mod kosaraju;
pub mod shortest_path;
pub mod spanning_tree;

use core::fmt::Debug;
use core::ops::Add;

use crate::graph::{Graph, IndexType, NodeId};
use crate::unionfind::UnionFind;
use crate::EdgeType;

pub use self::cut::cut_nodes;
pub use self::euler::{euler_circuit, euler_trail};
pub use self::find_path::{find_path_bfs, find_path_dfs};
pub use self::floyd_warshall::{floyd_warshall, ApspMatrices};
pub use self::kosaraju::{kosaraju_scc, scc_cross_arcs, scc_subgraphs};
pub use self::shortest_path::{astar, dijkstra, Distances};
pub use self::spanning_tree::{kruskal_paint, kruskal_tree, prim_paint, prim_tree};

/// Associated data that can be used for measures (such as length).
pub trait Measure: Debug + PartialOrd + Add<Self, Output = Self> + Default + Clone {}

impl<M> Measure for M where M: Debug + PartialOrd + Add<M, Output = M> + Default + Clone {}

/// Return the number of connected components of the graph.
///
/// For a directed graph, this is the *weakly* connected components.
///
/// Uses no attribute state; the component structure is computed with a
/// union-find over the compact node ids.
///
/// Computes in amortized **O(|V| + |E|)** time.
pub fn connected_components<N, A, Ty, Ix>(g: &Graph<N, A, Ty, Ix>) -> usize
where
    Ty: EdgeType,
    Ix: IndexType,
{
    let mut node_sets = UnionFind::new(g.node_count());
    for arc in g.arcs() {
        node_sets.union(arc.source().index(), arc.target().index());
    }
    let mut labels = node_sets.into_labeling();
    labels.sort_unstable();
    labels.dedup();
    labels.len()
}

/// Partition the nodes into (weakly) connected components.
///
/// Each node's `counter` is set to its 0-based component color, and the
/// components come out ordered by their smallest node id.
pub fn weak_components<N, A, Ty, Ix>(g: &mut Graph<N, A, Ty, Ix>) -> Vec<Vec<NodeId<Ix>>>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    let mut node_sets = UnionFind::new(g.node_count());
    for arc in g.arcs() {
        node_sets.union(arc.source().index(), arc.target().index());
    }
    let labels = node_sets.into_labeling();

    let mut color_of_label = vec![usize::MAX; g.node_count()];
    let mut components: Vec<Vec<NodeId<Ix>>> = Vec::new();
    for (i, &label) in labels.iter().enumerate() {
        let color = if color_of_label[label] == usize::MAX {
            color_of_label[label] = components.len();
            components.push(Vec::new());
            components.len() - 1
        } else {
            color_of_label[label]
        };
        let n = NodeId::new(i);
        components[color].push(n);
        g.node_attr_mut(n).counter = color as i64;
    }
    components
}

/// Return `true` if the graph, viewed as undirected, contains a cycle.
///
/// Uses no attribute state.
///
/// Computes in amortized **O(|E|)** time.
pub fn is_cyclic_undirected<N, A, Ty, Ix>(g: &Graph<N, A, Ty, Ix>) -> bool
where
    Ty: EdgeType,
    Ix: IndexType,
{
    let mut arc_sets = UnionFind::new(g.node_count());
    for arc in g.arcs() {
        // union the two endpoints of the arc
        //  -- if they were already the same, then we have a cycle
        if !arc_sets.union(arc.source().index(), arc.target().index()) {
            return true;
        }
    }
    false
}

/// Return `true` if the graph, viewed as undirected, is a tree: connected
/// and acyclic.
pub fn is_tree<N, A, Ty, Ix>(g: &Graph<N, A, Ty, Ix>) -> bool
where
    Ty: EdgeType,
    Ix: IndexType,
{
    g.node_count() > 0
        && g.arc_count() == g.node_count() - 1
        && connected_components(g) == 1
}
