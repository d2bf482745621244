//! Depth-first and breadth-first traversal skeletons.
//!
//! Both skeletons drive a caller-supplied visitor and mutate the attribute
//! blocks of the graph they walk: the [`DepthFirst`](GraphBit::DepthFirst)
//! (resp. [`BreadthFirst`](GraphBit::BreadthFirst)) bit is reset on every
//! node and arc on entry and left set on every visited entity on normal
//! exit. Callers that rerun a traversal must reset again, and a traversal
//! aborted through [`Control::Break`] leaves the partially written
//! attribute state dirty by contract.

use crate::attr::{Cookie, GraphBit};
use crate::graph::{ArcId, Graph, IndexType, NodeId};
use crate::EdgeType;
use std::collections::VecDeque;

/// Control flow returned by traversal visitors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Control {
    /// Continue the traversal.
    #[default]
    Continue,
    /// Do not descend past the current node or arc, but keep traversing
    /// the rest of the graph.
    Prune,
    /// Abort the traversal immediately.
    Break,
}

/// An event produced by [`depth_first_search`] or [`breadth_first_search`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VisitEvent<Ix = crate::graph::DefaultIx> {
    /// A node was reached for the first time, together with the tree arc it
    /// was reached through (`None` for the start node). Emitted exactly once
    /// per reachable node, in preorder for DFS and in frontier order for
    /// BFS.
    Discover(NodeId<Ix>, Option<ArcId<Ix>>),
    /// An arc was chosen into the traversal tree, leading to the given
    /// not-yet-visited node. Emitted exactly once per tree arc, immediately
    /// before the corresponding `Discover`. Back, cross and forward arcs
    /// produce no event.
    TreeArc(ArcId<Ix>, NodeId<Ix>),
}

/// Depth-first traversal from `start`, driving `visitor` with
/// [`VisitEvent`]s.
///
/// Uses the `DepthFirst` bit on nodes and arcs; both are cleared across the
/// whole graph on entry. Each discovered node's `counter` receives its
/// preorder index. Returns `false` if the visitor broke out early, `true`
/// if the reachable subgraph was exhausted.
///
/// Visitor semantics:
/// - `Prune` on `Discover` skips the subtree rooted at that node;
/// - `Prune` on `TreeArc` refuses the arc (the target may still be reached
///   another way);
/// - `Break` unwinds immediately, leaving attribute state dirty.
pub fn depth_first_search<N, A, Ty, Ix, F>(
    g: &mut Graph<N, A, Ty, Ix>,
    start: NodeId<Ix>,
    mut visitor: F,
) -> bool
where
    Ty: EdgeType,
    Ix: IndexType,
    F: FnMut(VisitEvent<Ix>) -> Control,
{
    g.reset_bit(GraphBit::DepthFirst);

    let mut preorder = 0i64;
    let mut stack = Vec::new();

    discover(g, GraphBit::DepthFirst, start, None, &mut preorder);
    match visitor(VisitEvent::Discover(start, None)) {
        Control::Break => return false,
        Control::Prune => return true,
        Control::Continue => {}
    }
    stack.push(g.walker(start));

    while !stack.is_empty() {
        let top = stack.len() - 1;
        match stack[top].next(g) {
            None => {
                stack.pop();
            }
            Some((arc, target)) => {
                if g.arc_attr(arc).bits.get(GraphBit::DepthFirst) {
                    continue;
                }
                g.arc_attr_mut(arc).bits.set(GraphBit::DepthFirst, true);
                if g.node_attr(target).bits.get(GraphBit::DepthFirst) {
                    continue; // back, cross or forward arc
                }
                match visitor(VisitEvent::TreeArc(arc, target)) {
                    Control::Break => return false,
                    Control::Prune => continue,
                    Control::Continue => {}
                }
                discover(g, GraphBit::DepthFirst, target, Some(arc), &mut preorder);
                match visitor(VisitEvent::Discover(target, Some(arc))) {
                    Control::Break => return false,
                    Control::Prune => continue,
                    Control::Continue => {}
                }
                stack.push(g.walker(target));
            }
        }
    }
    true
}

/// Breadth-first traversal from `start`, driving `visitor` with
/// [`VisitEvent`]s.
///
/// Uses the `BreadthFirst` bit on nodes and arcs, cleared across the whole
/// graph on entry. The frontier is FIFO and siblings are visited in
/// incident-arc order. Each visited node's `cookie` receives the arc it was
/// discovered through (the parent arc), enabling O(|path|) reverse
/// reconstruction of fewest-arc paths; the start node's cookie is left nil.
///
/// Returns `false` if the visitor broke out early.
pub fn breadth_first_search<N, A, Ty, Ix, F>(
    g: &mut Graph<N, A, Ty, Ix>,
    start: NodeId<Ix>,
    mut visitor: F,
) -> bool
where
    Ty: EdgeType,
    Ix: IndexType,
    F: FnMut(VisitEvent<Ix>) -> Control,
{
    g.reset_bit(GraphBit::BreadthFirst);

    let mut order = 0i64;
    let mut queue = VecDeque::new();

    discover(g, GraphBit::BreadthFirst, start, None, &mut order);
    match visitor(VisitEvent::Discover(start, None)) {
        Control::Break => return false,
        Control::Prune => return true,
        Control::Continue => {}
    }
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        let mut walker = g.walker(node);
        while let Some((arc, target)) = walker.next(g) {
            if g.arc_attr(arc).bits.get(GraphBit::BreadthFirst) {
                continue;
            }
            g.arc_attr_mut(arc).bits.set(GraphBit::BreadthFirst, true);
            if g.node_attr(target).bits.get(GraphBit::BreadthFirst) {
                continue;
            }
            match visitor(VisitEvent::TreeArc(arc, target)) {
                Control::Break => return false,
                Control::Prune => continue,
                Control::Continue => {}
            }
            discover(g, GraphBit::BreadthFirst, target, Some(arc), &mut order);
            match visitor(VisitEvent::Discover(target, Some(arc))) {
                Control::Break => return false,
                Control::Prune => continue,
                Control::Continue => {}
            }
            queue.push_back(target);
        }
    }
    true
}

/// Mark `node` visited for `bit`, stamp its counter with the running order
/// and its cookie with the parent arc.
fn discover<N, A, Ty, Ix>(
    g: &mut Graph<N, A, Ty, Ix>,
    bit: GraphBit,
    node: NodeId<Ix>,
    parent_arc: Option<ArcId<Ix>>,
    order: &mut i64,
) where
    Ty: EdgeType,
    Ix: IndexType,
{
    let attr = g.node_attr_mut(node);
    attr.bits.set(bit, true);
    attr.counter = *order;
    attr.cookie = match parent_arc {
        Some(a) => Cookie::Arc(a),
        None => Cookie::Nil,
    };
    *order += 1;
}
