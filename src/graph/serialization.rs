//! Serde support for [`Graph`], behind the `serde-1` feature.
//!
//! The serialization format, in pseudocode:
//!
//! ```text
//! Graph {
//!     edge_property: "directed" | "undirected",
//!     nodes: [N],
//!     arcs: [(u64 src_ordinal, u64 tgt_ordinal, A)],
//! }
//! ```
//!
//! Ordinals refer to positions in `nodes`, so the encoding is independent
//! of the graph's index type. Attribute blocks are scratch state and are
//! not serialized; a deserialized graph comes up with default-reset
//! attributes. Deserializing into a graph type of the wrong direction is
//! an error.

use core::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::graph::{Graph, IndexType, NodeId};
use crate::EdgeType;

#[derive(serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeProperty {
    Undirected,
    Directed,
}

impl fmt::Display for EdgeProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeProperty::Undirected => f.write_str("undirected"),
            EdgeProperty::Directed => f.write_str("directed"),
        }
    }
}

impl EdgeProperty {
    fn from_type<Ty: EdgeType>() -> Self {
        if Ty::is_directed() {
            EdgeProperty::Directed
        } else {
            EdgeProperty::Undirected
        }
    }
}

#[derive(serde_derive::Serialize)]
struct SerGraph<'a, N, A> {
    edge_property: EdgeProperty,
    nodes: Vec<&'a N>,
    arcs: Vec<(u64, u64, &'a A)>,
}

#[derive(serde_derive::Deserialize)]
#[serde(bound = "N: Deserialize<'de>, A: Deserialize<'de>")]
struct DeGraph<N, A> {
    edge_property: EdgeProperty,
    nodes: Vec<N>,
    arcs: Vec<(u64, u64, A)>,
}

impl<N, A, Ty, Ix> Serialize for Graph<N, A, Ty, Ix>
where
    N: Serialize,
    A: Serialize,
    Ty: EdgeType,
    Ix: IndexType,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SerGraph {
            edge_property: EdgeProperty::from_type::<Ty>(),
            nodes: self.node_infos().collect(),
            arcs: self
                .arcs()
                .map(|arc| {
                    (
                        arc.source().index() as u64,
                        arc.target().index() as u64,
                        arc.info(),
                    )
                })
                .collect(),
        }
        .serialize(serializer)
    }
}

impl<'de, N, A, Ty, Ix> Deserialize<'de> for Graph<N, A, Ty, Ix>
where
    N: Deserialize<'de>,
    A: Deserialize<'de>,
    Ty: EdgeType,
    Ix: IndexType,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = DeGraph::<N, A>::deserialize(deserializer)?;

        let expected = EdgeProperty::from_type::<Ty>();
        if raw.edge_property != expected {
            return Err(D::Error::custom(format!(
                "expected {expected} graph, but received {} graph",
                raw.edge_property
            )));
        }

        let node_count = raw.nodes.len();
        let mut g = Graph::with_capacity(node_count, raw.arcs.len());
        for info in raw.nodes {
            g.add_node(info);
        }
        for (src, tgt, info) in raw.arcs {
            for ordinal in [src, tgt] {
                if ordinal as usize >= node_count {
                    return Err(D::Error::custom(format!(
                        "invalid value: node ordinal `{ordinal}` does not exist in graph with \
                         length `{node_count}`"
                    )));
                }
            }
            g.add_arc(
                NodeId::new(src as usize),
                NodeId::new(tgt as usize),
                info,
            )
            .map_err(|e| D::Error::custom(e.to_string()))?;
        }
        Ok(g)
    }
}
