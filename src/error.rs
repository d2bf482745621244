use thiserror::Error;

/// The error taxonomy shared by the whole crate.
///
/// Algorithms fail fast: when an error is surfaced no partial result is
/// returned, and any result graph or tree under construction has been
/// discarded. The input graph is left unchanged except for documented
/// attribute post-states.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    #[error("node #{0} is not in the graph")]
    InvalidNode(usize),

    #[error("arc #{0} is not in the graph")]
    InvalidArc(usize),

    #[error("node #{node} is not an endpoint of arc #{arc}")]
    NotIncident { node: usize, arc: usize },

    #[error("operation requires an undirected graph")]
    NotAnUndirectedGraph,

    #[error("operation requires a directed graph")]
    NotADirectedGraph,

    #[error("graph is not a tree")]
    NotATree,

    #[error("graph is disconnected")]
    Disconnected,

    #[error("path is bound to a different graph")]
    PathNotInGraph,

    #[error("arc #{arc} does not extend the path at node #{tail}")]
    PathDiscontinuity { arc: usize, tail: usize },

    #[error("structural mutation is forbidden while the residual overlay is built")]
    ResidualLocked,

    #[error("the {0} overlay is already built")]
    OverlayBuilt(&'static str),

    #[error("supply at node #{0} exceeds its outgoing capacity")]
    OverSupply(usize),

    #[error("demand at node #{0} exceeds its incoming capacity")]
    OverDemand(usize),

    #[error("flow is not feasible: {0}")]
    Infeasible(&'static str),

    #[error("index out of sync: node or arc #{0} is not in the index")]
    IndexInconsistent(usize),

    #[error("index is bound to a different graph")]
    IndexGraphMismatch,

    #[error("key is already present in the index")]
    DuplicateKey,

    #[error("key is not present in the index")]
    KeyNotFound,

    #[error("graph contains a negative cycle")]
    NegativeCycle,

    #[error("graph has no eulerian circuit")]
    NoEulerianCircuit,

    #[error("graph has no eulerian trail")]
    NoEulerianTrail,
}
