//! Path finding by plain depth-first and breadth-first search.

use crate::attr::{Cookie, GraphBit};
use crate::error::GraphError;
use crate::graph::{Graph, IndexType, NodeId};
use crate::path::Path;
use crate::visit::{breadth_first_search, Control, VisitEvent};
use crate::EdgeType;

/// Find *some* path from `s` to `t` by depth-first search.
///
/// Returns `Ok(None)` when `t` is unreachable from `s`. When `s == t` the
/// one-node path is returned trivially.
///
/// Attribute use: the `FindPath` bit on nodes and arcs and the node
/// cookies (parent arcs), all reset on entry; on success the bit is left
/// set on the entities the search visited.
///
/// # Complexity
/// **O(|V| + |E|)**.
pub fn find_path_dfs<N, A, Ty, Ix>(
    g: &mut Graph<N, A, Ty, Ix>,
    s: NodeId<Ix>,
    t: NodeId<Ix>,
) -> Result<Option<Path<Ix>>, GraphError>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    check_endpoints(g, s, t)?;
    g.reset_bit(GraphBit::FindPath);

    let mut path = Path::new(g);
    if s == t {
        path.init(g, s)?;
        return Ok(Some(path));
    }

    for n in g.node_ids().collect::<Vec<_>>() {
        g.node_attr_mut(n).cookie = Cookie::Nil;
    }
    g.node_attr_mut(s).bits.set(GraphBit::FindPath, true);

    let mut stack = vec![s];
    let mut found = false;
    'search: while let Some(n) = stack.pop() {
        let mut walker = g.walker(n);
        while let Some((arc, other)) = walker.next(g) {
            if g.arc_attr(arc).bits.get(GraphBit::FindPath) {
                continue;
            }
            g.arc_attr_mut(arc).bits.set(GraphBit::FindPath, true);
            if g.node_attr(other).bits.get(GraphBit::FindPath) {
                continue;
            }
            let attr = g.node_attr_mut(other);
            attr.bits.set(GraphBit::FindPath, true);
            attr.cookie = Cookie::Arc(arc);
            if other == t {
                found = true;
                break 'search;
            }
            stack.push(other);
        }
    }

    if !found {
        return Ok(None);
    }
    reconstruct(g, s, t).map(Some)
}

/// Find a path from `s` to `t` with the fewest arcs, or report
/// unreachability with `Ok(None)`.
///
/// Runs the breadth-first skeleton, which leaves the parent arc of every
/// visited node in its cookie; the path is then rebuilt by walking those
/// back-pointers from `t`. No intermediate length is possible.
///
/// Attribute use: that of
/// [`breadth_first_search`](crate::visit::breadth_first_search).
pub fn find_path_bfs<N, A, Ty, Ix>(
    g: &mut Graph<N, A, Ty, Ix>,
    s: NodeId<Ix>,
    t: NodeId<Ix>,
) -> Result<Option<Path<Ix>>, GraphError>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    check_endpoints(g, s, t)?;

    let mut path = Path::new(g);
    if s == t {
        path.init(g, s)?;
        return Ok(Some(path));
    }

    let mut found = false;
    breadth_first_search(g, s, |event| {
        if let VisitEvent::Discover(n, _) = event {
            if n == t {
                found = true;
                return Control::Break;
            }
        }
        Control::Continue
    });

    if !found {
        return Ok(None);
    }
    reconstruct(g, s, t).map(Some)
}

fn check_endpoints<N, A, Ty, Ix>(
    g: &Graph<N, A, Ty, Ix>,
    s: NodeId<Ix>,
    t: NodeId<Ix>,
) -> Result<(), GraphError>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    if !g.contains_node(s) {
        return Err(GraphError::InvalidNode(s.index()));
    }
    if !g.contains_node(t) {
        return Err(GraphError::InvalidNode(t.index()));
    }
    Ok(())
}

/// Walk the parent-arc cookies from `t` back to `s` and build the forward
/// path.
pub(crate) fn reconstruct<N, A, Ty, Ix>(
    g: &Graph<N, A, Ty, Ix>,
    s: NodeId<Ix>,
    t: NodeId<Ix>,
) -> Result<Path<Ix>, GraphError>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    let mut arcs = Vec::new();
    let mut cur = t;
    while cur != s {
        let arc = g
            .node_attr(cur)
            .cookie
            .arc()
            .ok_or(GraphError::InvalidNode(cur.index()))?;
        arcs.push(arc);
        cur = g.other_endpoint(arc, cur)?;
    }
    arcs.reverse();

    let mut path = Path::new(g);
    path.init(g, s)?;
    for arc in arcs {
        path.append_arc(g, arc)?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Graph;

    /// 3x3 grid with 4-connectivity; nodes indexed row-major.
    fn grid3() -> (Graph<(u8, u8), ()>, Vec<NodeId>) {
        let mut g = Graph::new();
        let mut ids = Vec::new();
        for r in 0..3u8 {
            for c in 0..3u8 {
                ids.push(g.add_node((r, c)));
            }
        }
        for r in 0..3usize {
            for c in 0..3usize {
                if c + 1 < 3 {
                    g.add_arc(ids[r * 3 + c], ids[r * 3 + c + 1], ()).unwrap();
                }
                if r + 1 < 3 {
                    g.add_arc(ids[r * 3 + c], ids[(r + 1) * 3 + c], ()).unwrap();
                }
            }
        }
        (g, ids)
    }

    #[test]
    fn bfs_path_across_grid_has_four_arcs() {
        let (mut g, ids) = grid3();
        let path = find_path_bfs(&mut g, ids[0], ids[8]).unwrap().unwrap();
        assert_eq!(path.arc_count(), 4);
        assert_eq!(path.first(), Some(ids[0]));
        assert_eq!(path.last(), Some(ids[8]));
    }

    #[test]
    fn dfs_path_reaches_target() {
        let (mut g, ids) = grid3();
        let path = find_path_dfs(&mut g, ids[0], ids[8]).unwrap().unwrap();
        assert!(path.arc_count() >= 4);
        assert_eq!(path.first(), Some(ids[0]));
        assert_eq!(path.last(), Some(ids[8]));
        // consecutive nodes are joined by the stored arcs
        for (i, arc) in path.arcs().iter().enumerate() {
            let (a, b) = g.arc_endpoints(*arc).unwrap();
            let (x, y) = (path.nodes()[i], path.nodes()[i + 1]);
            assert!((a, b) == (x, y) || (a, b) == (y, x));
        }
    }

    #[test]
    fn trivial_and_unreachable_cases() {
        let mut g = Graph::<(), ()>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let path = find_path_bfs(&mut g, a, a).unwrap().unwrap();
        assert_eq!(path.arc_count(), 0);
        assert_eq!(path.first(), Some(a));
        assert!(find_path_bfs(&mut g, a, b).unwrap().is_none());
        assert!(find_path_dfs(&mut g, a, b).unwrap().is_none());
    }
}
