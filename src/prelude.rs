//! Commonly used items.
//!
//! ```
//! use listgraph::prelude::*;
//! ```

pub use crate::algo::{
    astar, connected_components, cut_nodes, dijkstra, euler_circuit, euler_trail, find_path_bfs,
    find_path_dfs, floyd_warshall, kosaraju_scc, prim_paint, prim_tree, weak_components,
};
pub use crate::attr::{Attr, ControlBits, Cookie, GraphBit, State};
pub use crate::euclidean::{EuclideanGraph, Located, Point};
pub use crate::flow::{edmonds_karp, min_cut, FlowGraph, FlowMeasure};
pub use crate::graph::{ArcId, Digraph, Graph, NodeId};
pub use crate::index::{ArcIndex, NodeIndex};
pub use crate::path::Path;
pub use crate::visit::{breadth_first_search, depth_first_search, Control, VisitEvent};
pub use crate::{Directed, Direction, EdgeType, GraphError, Incoming, Outgoing, Undirected};
