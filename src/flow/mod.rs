//! Capacitated flow networks.
//!
//! A [`FlowGraph`] is a directed graph whose arcs carry a capacity and a
//! flow and whose nodes aggregate the capacities and flows of their
//! incident arcs, with an optional signed *supply* for supply/demand
//! problems. Max-flow computations run on a *residual overlay*: paired
//! reverse arcs materialized inside the graph itself and cross-linked
//! through the attribute cookies, so that augmenting-path searches are
//! ordinary traversals of the one container.
//!
//! The overlay is a two-state machine, `NoResidual ⇄ ResidualBuilt`.
//! While it is built, structural mutation of the network is refused with
//! [`GraphError::ResidualLocked`]; tearing it down with
//! [`FlowGraph::free_residual`] restores the original arcs and their
//! flows.

pub mod max_flow;

use core::fmt::Debug;
use core::ops::{Add, Sub};

use crate::attr::Cookie;
use crate::error::GraphError;
use crate::graph::{ArcId, DefaultIx, Digraph, IndexType, NodeId};

pub use self::max_flow::{edmonds_karp, ford_fulkerson_dfs, min_cut};

/// The numeric type of capacities, flows and supplies: ordered, with a
/// zero and a maximum, closed under addition and subtraction.
pub trait FlowMeasure:
    Copy + Debug + Default + PartialOrd + Add<Output = Self> + Sub<Output = Self>
{
    fn zero() -> Self {
        Self::default()
    }
    fn max() -> Self;
}

macro_rules! impl_flow_measure {
    ($($t:ident),*) => {
        $(
            impl FlowMeasure for $t {
                fn max() -> Self {
                    $t::MAX
                }
            }
        )*
    };
}

impl_flow_measure!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

/// Whether an arc belongs to the caller's network or to the residual
/// overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ArcKind {
    Forward,
    Residual,
}

/// Whether a node belongs to the caller's network or is one of the
/// super-nodes of the supply/demand reduction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum NodeKind {
    Regular,
    SuperSource,
    SuperSink,
}

/// Node payload of a flow network: the user's info plus the signed supply
/// and the incident capacity/flow aggregates.
#[derive(Clone, Debug)]
pub struct FlowNode<N, F> {
    pub info: N,
    supply: F,
    in_cap: F,
    out_cap: F,
    in_flow: F,
    out_flow: F,
    kind: NodeKind,
}

impl<N, F: FlowMeasure> FlowNode<N, F> {
    fn new(info: N, kind: NodeKind) -> Self {
        FlowNode {
            info,
            supply: F::zero(),
            in_cap: F::zero(),
            out_cap: F::zero(),
            in_flow: F::zero(),
            out_flow: F::zero(),
            kind,
        }
    }

    /// Positive for a producer, negative for a consumer, zero for a
    /// transshipment node.
    pub fn supply(&self) -> F {
        self.supply
    }

    /// Total capacity of the incoming arcs.
    pub fn in_cap(&self) -> F {
        self.in_cap
    }

    /// Total capacity of the outgoing arcs.
    pub fn out_cap(&self) -> F {
        self.out_cap
    }

    /// Total flow over the incoming arcs.
    pub fn in_flow(&self) -> F {
        self.in_flow
    }

    /// Total flow over the outgoing arcs.
    pub fn out_flow(&self) -> F {
        self.out_flow
    }
}

/// Arc payload of a flow network: the user's info plus capacity and flow.
#[derive(Clone, Debug)]
pub struct FlowArc<A, F> {
    pub info: A,
    cap: F,
    flow: F,
    kind: ArcKind,
}

impl<A, F: FlowMeasure> FlowArc<A, F> {
    /// The arc's capacity.
    pub fn cap(&self) -> F {
        self.cap
    }

    /// The arc's current flow.
    pub fn flow(&self) -> F {
        self.flow
    }
}

/// A capacitated network: a digraph of [`FlowNode`]s and [`FlowArc`]s plus
/// the lifecycle state of the residual overlay and of the supply/demand
/// reduction.
pub struct FlowGraph<N, A, F = i64, Ix = DefaultIx> {
    g: Digraph<FlowNode<N, F>, FlowArc<A, F>, Ix>,
    residual_built: bool,
    super_source: Option<NodeId<Ix>>,
    super_sink: Option<NodeId<Ix>>,
}

impl<N, A, F, Ix> Default for FlowGraph<N, A, F, Ix>
where
    F: FlowMeasure,
    Ix: IndexType,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, A, F, Ix> FlowGraph<N, A, F, Ix>
where
    F: FlowMeasure,
    Ix: IndexType,
{
    pub fn new() -> Self {
        FlowGraph {
            g: Digraph::with_capacity(0, 0),
            residual_built: false,
            super_source: None,
            super_sink: None,
        }
    }

    /// Read-only view of the underlying digraph.
    pub fn inner(&self) -> &Digraph<FlowNode<N, F>, FlowArc<A, F>, Ix> {
        &self.g
    }

    pub fn node_count(&self) -> usize {
        self.g.node_count()
    }

    /// Number of arcs, residual overlay included when built.
    pub fn arc_count(&self) -> usize {
        self.g.arc_count()
    }

    /// Insert a transshipment node (supply zero).
    pub fn add_node(&mut self, info: N) -> NodeId<Ix> {
        self.g.add_node(FlowNode::new(info, NodeKind::Regular))
    }

    /// Insert a node with the given supply. The capacity checks of
    /// [`FlowGraph::set_supply`] cannot fail yet (no incident arcs), so any
    /// supply is accepted here and verified when the aux net is built.
    pub fn add_node_with_supply(&mut self, info: N, supply: F) -> NodeId<Ix> {
        let n = self.g.add_node(FlowNode::new(info, NodeKind::Regular));
        self.g[n].supply = supply;
        n
    }

    /// Set the supply of `n`, verifying it against the node's incident
    /// capacity.
    ///
    /// # Errors
    /// - [`GraphError::OverSupply`] if a positive supply exceeds the
    ///   node's outgoing capacity.
    /// - [`GraphError::OverDemand`] if a negative supply exceeds the
    ///   node's incoming capacity.
    pub fn set_supply(&mut self, n: NodeId<Ix>, supply: F) -> Result<(), GraphError> {
        if !self.g.contains_node(n) {
            return Err(GraphError::InvalidNode(n.index()));
        }
        let node = &self.g[n];
        if supply > F::zero() && node.out_cap < supply {
            return Err(GraphError::OverSupply(n.index()));
        }
        if supply < F::zero() && node.in_cap < F::zero() - supply {
            return Err(GraphError::OverDemand(n.index()));
        }
        self.g[n].supply = supply;
        Ok(())
    }

    /// Insert an arc with the given capacity and zero flow, updating the
    /// endpoint aggregates.
    ///
    /// # Errors
    /// [`GraphError::ResidualLocked`] while the residual overlay is built;
    /// [`GraphError::InvalidNode`] for foreign endpoints.
    pub fn add_arc(
        &mut self,
        src: NodeId<Ix>,
        tgt: NodeId<Ix>,
        info: A,
        cap: F,
    ) -> Result<ArcId<Ix>, GraphError> {
        if self.residual_built {
            return Err(GraphError::ResidualLocked);
        }
        let arc = self.g.add_arc(
            src,
            tgt,
            FlowArc {
                info,
                cap,
                flow: F::zero(),
                kind: ArcKind::Forward,
            },
        )?;
        self.g[src].out_cap = self.g[src].out_cap + cap;
        self.g[tgt].in_cap = self.g[tgt].in_cap + cap;
        Ok(arc)
    }

    /// Remove an arc, updating the endpoint aggregates.
    pub fn remove_arc(&mut self, a: ArcId<Ix>) -> Result<A, GraphError> {
        if self.residual_built {
            return Err(GraphError::ResidualLocked);
        }
        self.remove_arc_unchecked(a)
    }

    fn remove_arc_unchecked(&mut self, a: ArcId<Ix>) -> Result<A, GraphError> {
        let (src, tgt) = self
            .g
            .arc_endpoints(a)
            .ok_or(GraphError::InvalidArc(a.index()))?;
        let (cap, flow) = {
            let arc = &self.g[a];
            (arc.cap, arc.flow)
        };
        self.g[src].out_cap = self.g[src].out_cap - cap;
        self.g[src].out_flow = self.g[src].out_flow - flow;
        self.g[tgt].in_cap = self.g[tgt].in_cap - cap;
        self.g[tgt].in_flow = self.g[tgt].in_flow - flow;
        let info = self
            .g
            .remove_arc(a)
            .ok_or(GraphError::InvalidArc(a.index()))?;
        Ok(info.info)
    }

    /// Remove a node together with its incident arcs, keeping the
    /// aggregates of the surviving endpoints correct.
    pub fn remove_node(&mut self, n: NodeId<Ix>) -> Result<N, GraphError> {
        if self.residual_built {
            return Err(GraphError::ResidualLocked);
        }
        self.remove_node_unchecked(n)
    }

    fn remove_node_unchecked(&mut self, n: NodeId<Ix>) -> Result<N, GraphError> {
        if !self.g.contains_node(n) {
            return Err(GraphError::InvalidNode(n.index()));
        }
        loop {
            let next = {
                let mut walker = self.g.walker_incident(n);
                walker.next(&self.g).map(|(a, _)| a)
            };
            match next {
                Some(a) => {
                    self.remove_arc_unchecked(a)?;
                }
                None => break,
            }
        }
        let node = self
            .g
            .remove_node(n)
            .ok_or(GraphError::InvalidNode(n.index()))?;
        // the last node may have been swapped into `n`
        if let Some(s) = self.super_source {
            if s.index() == self.g.node_count() {
                self.super_source = Some(n);
            }
        }
        if let Some(s) = self.super_sink {
            if s.index() == self.g.node_count() {
                self.super_sink = Some(n);
            }
        }
        Ok(node.info)
    }

    /// Capacity of arc `a`.
    pub fn capacity(&self, a: ArcId<Ix>) -> Option<F> {
        self.g.arc_info(a).map(FlowArc::cap)
    }

    /// Current flow of arc `a`.
    pub fn flow(&self, a: ArcId<Ix>) -> Option<F> {
        self.g.arc_info(a).map(FlowArc::flow)
    }

    /// Change the capacity of `a`, keeping the aggregates in step.
    pub fn set_capacity(&mut self, a: ArcId<Ix>, cap: F) -> Result<(), GraphError> {
        if self.residual_built {
            return Err(GraphError::ResidualLocked);
        }
        let (src, tgt) = self
            .g
            .arc_endpoints(a)
            .ok_or(GraphError::InvalidArc(a.index()))?;
        let old = self.g[a].cap;
        self.g[a].cap = cap;
        self.g[src].out_cap = self.g[src].out_cap - old + cap;
        self.g[tgt].in_cap = self.g[tgt].in_cap - old + cap;
        Ok(())
    }

    /// Set every arc's flow back to zero.
    pub fn reset_flow(&mut self) {
        for a in self.g.arc_ids().collect::<Vec<_>>() {
            self.g[a].flow = F::zero();
        }
        for n in self.g.node_ids().collect::<Vec<_>>() {
            self.g[n].in_flow = F::zero();
            self.g[n].out_flow = F::zero();
        }
    }

    /// Whether `a` belongs to the residual overlay rather than to the
    /// caller's network.
    pub fn is_residual_arc(&self, a: ArcId<Ix>) -> bool {
        self.g
            .arc_info(a)
            .map_or(false, |arc| arc.kind == ArcKind::Residual)
    }

    /// Whether the residual overlay is currently built.
    pub fn residual_built(&self) -> bool {
        self.residual_built
    }

    /// Net flow leaving `s`: the value of the flow when `s` is the source.
    pub fn flow_value(&self, s: NodeId<Ix>) -> F {
        let node = &self.g[s];
        node.out_flow - node.in_flow
    }

    /// Build the residual overlay: for every arc, a reverse twin of
    /// capacity zero, cross-linked with its partner through the arc
    /// cookies. Transitions `NoResidual → ResidualBuilt`.
    ///
    /// # Errors
    /// [`GraphError::OverlayBuilt`] if the overlay already exists.
    pub fn compute_residual(&mut self) -> Result<(), GraphError>
    where
        A: Clone,
    {
        if self.residual_built {
            return Err(GraphError::OverlayBuilt("residual"));
        }
        let forward: Vec<ArcId<Ix>> = self.g.arc_ids().collect();
        for a in forward {
            let (src, tgt) = self.g.arc_endpoints(a).expect("arc id from iteration");
            let twin_payload = FlowArc {
                info: self.g[a].info.clone(),
                cap: F::zero(),
                flow: F::zero(),
                kind: ArcKind::Residual,
            };
            let twin = self
                .g
                .add_arc(tgt, src, twin_payload)
                .expect("endpoints are present");
            self.g.arc_attr_mut(a).cookie = Cookie::Arc(twin);
            self.g.arc_attr_mut(twin).cookie = Cookie::Arc(a);
        }
        self.residual_built = true;
        Ok(())
    }

    /// Tear the residual overlay down, preserving the original arcs and
    /// their flows. Transitions `ResidualBuilt → NoResidual`; calling it
    /// without an overlay is a no-op.
    pub fn free_residual(&mut self) {
        if !self.residual_built {
            return;
        }
        for i in (0..self.g.arc_count()).rev() {
            let a = ArcId::new(i);
            if self.g[a].kind == ArcKind::Residual {
                self.g.remove_arc(a);
            }
        }
        for a in self.g.arc_ids().collect::<Vec<_>>() {
            self.g.arc_attr_mut(a).cookie = Cookie::Nil;
        }
        self.residual_built = false;
    }

    /// Residual capacity of `a` in the direction of the arc: remaining
    /// capacity for a forward arc, cancellable flow for a residual twin.
    pub(crate) fn residual_capacity(&self, a: ArcId<Ix>) -> F {
        let arc = &self.g[a];
        match arc.kind {
            ArcKind::Forward => arc.cap - arc.flow,
            ArcKind::Residual => {
                let partner = self
                    .g
                    .arc_attr(a)
                    .cookie
                    .arc()
                    .expect("residual arcs are cookie-linked");
                self.g[partner].flow
            }
        }
    }

    /// Push `delta` units along `a`: onto the forward arc itself, or
    /// cancelled off a residual twin's partner.
    pub(crate) fn push_flow(&mut self, a: ArcId<Ix>, delta: F) {
        let (target_arc, add) = match self.g[a].kind {
            ArcKind::Forward => (a, true),
            ArcKind::Residual => (
                self.g
                    .arc_attr(a)
                    .cookie
                    .arc()
                    .expect("residual arcs are cookie-linked"),
                false,
            ),
        };
        let (src, tgt) = self
            .g
            .arc_endpoints(target_arc)
            .expect("arc is in the graph");
        if add {
            self.g[target_arc].flow = self.g[target_arc].flow + delta;
            self.g[src].out_flow = self.g[src].out_flow + delta;
            self.g[tgt].in_flow = self.g[tgt].in_flow + delta;
        } else {
            self.g[target_arc].flow = self.g[target_arc].flow - delta;
            self.g[src].out_flow = self.g[src].out_flow - delta;
            self.g[tgt].in_flow = self.g[tgt].in_flow - delta;
        }
    }

    // --- supply/demand reduction -----------------------------------------

    /// Whether the super source/sink of the supply/demand reduction exist.
    pub fn exists_aux_net(&self) -> bool {
        self.super_source.is_some() || self.super_sink.is_some()
    }

    /// The super source created by [`FlowGraph::compute_aux_net`], if any.
    pub fn super_source(&self) -> Option<NodeId<Ix>> {
        self.super_source
    }

    /// The super sink created by [`FlowGraph::compute_aux_net`], if any.
    pub fn super_sink(&self) -> Option<NodeId<Ix>> {
        self.super_sink
    }

    /// Build the capacitated network equivalent to this supply/demand
    /// network: a super source feeding every producer and a super sink
    /// draining every consumer, with arc capacities equal to the supplies.
    ///
    /// The reduction is built *inside* the network, so any flow
    /// computation over it is immediately reflected in the original arcs.
    ///
    /// # Errors
    /// - [`GraphError::OverlayBuilt`] if the aux net or the residual
    ///   overlay already exists.
    /// - [`GraphError::Infeasible`] unless the supplies sum to zero.
    /// - [`GraphError::OverSupply`] / [`GraphError::OverDemand`] when a
    ///   node's supply exceeds its incident capacity.
    pub fn compute_aux_net(&mut self) -> Result<(), GraphError>
    where
        N: Default,
        A: Default,
    {
        if self.exists_aux_net() {
            return Err(GraphError::OverlayBuilt("auxiliary"));
        }
        if self.residual_built {
            return Err(GraphError::OverlayBuilt("residual"));
        }

        let regulars: Vec<NodeId<Ix>> = self.g.node_ids().collect();
        let mut balance = F::zero();
        for &n in &regulars {
            let node = &self.g[n];
            if node.supply > F::zero() {
                if node.out_cap < node.supply {
                    return Err(GraphError::OverSupply(n.index()));
                }
                balance = balance + node.supply;
            } else if node.supply < F::zero() {
                if node.in_cap < F::zero() - node.supply {
                    return Err(GraphError::OverDemand(n.index()));
                }
                balance = balance + node.supply;
            }
        }
        if balance != F::zero() {
            return Err(GraphError::Infeasible(
                "total supply does not balance total demand",
            ));
        }

        let source = self.g.add_node(FlowNode::new(N::default(), NodeKind::SuperSource));
        let sink = self.g.add_node(FlowNode::new(N::default(), NodeKind::SuperSink));
        self.super_source = Some(source);
        self.super_sink = Some(sink);
        for n in regulars {
            let supply = self.g[n].supply;
            if supply > F::zero() {
                self.add_arc(source, n, A::default(), supply)?;
            } else if supply < F::zero() {
                self.add_arc(n, sink, A::default(), F::zero() - supply)?;
            }
        }
        if self.g.out_degree(source) == 0 {
            self.remove_node_unchecked(source)?;
            self.super_source = None;
        }
        if let Some(sink) = self.super_sink {
            if self.g.in_degree(sink) == 0 {
                self.remove_node_unchecked(sink)?;
                self.super_sink = None;
            }
        }
        Ok(())
    }

    /// Tear the supply/demand reduction down: frees the residual overlay
    /// if present and removes the super nodes and their arcs. No-op when
    /// no aux net exists.
    pub fn free_aux_net(&mut self) -> Result<(), GraphError> {
        if !self.exists_aux_net() {
            return Ok(());
        }
        self.free_residual();
        if let Some(source) = self.super_source.take() {
            self.remove_node_unchecked(source)?;
        }
        if let Some(sink) = self.super_sink.take() {
            self.remove_node_unchecked(sink)?;
        }
        Ok(())
    }

    /// Decide feasibility: build the aux net if needed, maximize the flow
    /// from the super source to the super sink, and compare the value with
    /// the total positive supply. The flow assignment and both overlays
    /// are left in place for inspection.
    pub fn solve_feasibility(&mut self) -> Result<bool, GraphError>
    where
        N: Default,
        A: Default + Clone,
    {
        if !self.exists_aux_net() {
            self.compute_aux_net()?;
        }
        let (source, sink) = match (self.super_source, self.super_sink) {
            (Some(s), Some(t)) => (s, t),
            // no producers and no consumers: the zero flow is feasible
            (None, None) => return Ok(true),
            // demand with no supply or vice versa
            _ => return Ok(false),
        };
        let mut demand = F::zero();
        for n in self.g.node_ids().collect::<Vec<_>>() {
            let supply = self.g[n].supply;
            if supply > F::zero() {
                demand = demand + supply;
            }
        }
        max_flow::edmonds_karp(self, source, sink)?;
        // read the value off the super source so repeated calls agree
        let value = self.flow_value(source);
        Ok(value == demand)
    }

    /// Scan the current flow assignment and report the nodes whose supply
    /// is not satisfied: producers whose out-flow falls short, and
    /// consumers whose in-flow falls short.
    pub fn non_feasible_nodes(&self) -> (Vec<NodeId<Ix>>, Vec<NodeId<Ix>>) {
        let mut supply_short = Vec::new();
        let mut demand_short = Vec::new();
        for n in self.g.node_ids() {
            let node = &self.g[n];
            if node.kind != NodeKind::Regular {
                continue;
            }
            if node.supply > F::zero() && node.out_flow < node.supply {
                supply_short.push(n);
            } else if node.supply < F::zero() && node.in_flow < F::zero() - node.supply {
                demand_short.push(n);
            }
        }
        (supply_short, demand_short)
    }

    /// True when the current assignment is a feasible supply/demand flow:
    /// capacities respected (an invariant of the push operations) and no
    /// node left short.
    pub fn is_feasible(&self) -> bool {
        let (supply_short, demand_short) = self.non_feasible_nodes();
        supply_short.is_empty() && demand_short.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_follow_arc_mutations() {
        let mut net = FlowGraph::<(), (), i64>::new();
        let a = net.add_node(());
        let b = net.add_node(());
        let ab = net.add_arc(a, b, (), 10).unwrap();
        let _ab2 = net.add_arc(a, b, (), 5).unwrap();
        assert_eq!(net.inner()[a].out_cap(), 15);
        assert_eq!(net.inner()[b].in_cap(), 15);
        net.set_capacity(ab, 7).unwrap();
        assert_eq!(net.inner()[a].out_cap(), 12);
        net.remove_arc(ab).unwrap();
        assert_eq!(net.inner()[a].out_cap(), 5);
        assert_eq!(net.inner()[b].in_cap(), 5);
    }

    #[test]
    fn residual_overlay_state_machine() {
        let mut net = FlowGraph::<(), (), i64>::new();
        let a = net.add_node(());
        let b = net.add_node(());
        net.add_arc(a, b, (), 4).unwrap();
        assert!(!net.residual_built());
        net.compute_residual().unwrap();
        assert!(net.residual_built());
        assert_eq!(net.arc_count(), 2);
        assert!(matches!(
            net.compute_residual(),
            Err(GraphError::OverlayBuilt("residual"))
        ));
        assert!(matches!(
            net.add_arc(a, b, (), 1),
            Err(GraphError::ResidualLocked)
        ));
        net.free_residual();
        assert!(!net.residual_built());
        assert_eq!(net.arc_count(), 1);
        // idempotent
        net.free_residual();
        assert_eq!(net.arc_count(), 1);
    }

    #[test]
    fn supply_is_checked_against_capacity() {
        let mut net = FlowGraph::<(), (), i64>::new();
        let a = net.add_node(());
        let b = net.add_node(());
        net.add_arc(a, b, (), 3).unwrap();
        net.set_supply(a, 3).unwrap();
        assert!(matches!(
            net.set_supply(a, 4),
            Err(GraphError::OverSupply(_))
        ));
        net.set_supply(b, -3).unwrap();
        assert!(matches!(
            net.set_supply(b, -9),
            Err(GraphError::OverDemand(_))
        ));
    }

    #[test]
    fn unbalanced_supplies_are_rejected() {
        let mut net = FlowGraph::<(), (), i64>::new();
        let a = net.add_node(());
        let b = net.add_node(());
        net.add_arc(a, b, (), 10).unwrap();
        net.set_supply(a, 4).unwrap();
        net.set_supply(b, -3).unwrap();
        assert!(matches!(
            net.compute_aux_net(),
            Err(GraphError::Infeasible(_))
        ));
    }

    #[test]
    fn aux_net_wires_producers_and_consumers() {
        let mut net = FlowGraph::<(), (), i64>::new();
        let a = net.add_node(());
        let b = net.add_node(());
        let c = net.add_node(());
        net.add_arc(a, b, (), 5).unwrap();
        net.add_arc(b, c, (), 5).unwrap();
        net.set_supply(a, 4).unwrap();
        net.set_supply(c, -4).unwrap();
        net.compute_aux_net().unwrap();
        assert!(net.exists_aux_net());
        let source = net.super_source().unwrap();
        let sink = net.super_sink().unwrap();
        assert_eq!(net.inner().out_degree(source), 1);
        assert_eq!(net.inner().in_degree(sink), 1);
        net.free_aux_net().unwrap();
        assert!(!net.exists_aux_net());
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.arc_count(), 2);
    }
}
