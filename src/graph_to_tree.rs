//! Conversion of a tree-shaped graph into an n-ary tree value.
//!
//! A graph whose undirected view is acyclic and connected is a tree in
//! disguise; given a designated root, [`graph_to_tree`] materializes it as
//! a [`TreeNode`] hierarchy. The interest of the conversion is applying
//! tree techniques (drawing, recursive transforms) to trees that arise
//! from graph computations, spanning trees in particular.
//!
//! `TreeNode` carries only a node-derived key: a tree value has no slot
//! for arc payloads, so the conversion delegates the node translation to
//! a caller closure and drops the arcs' data.

use crate::attr::GraphBit;
use crate::error::GraphError;
use crate::graph::{Graph, IndexType, NodeId};
use crate::EdgeType;

/// A node of an n-ary tree: a key and an ordered list of subtrees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode<K> {
    key: K,
    children: Vec<TreeNode<K>>,
}

impl<K> TreeNode<K> {
    /// A leaf holding `key`.
    pub fn new(key: K) -> Self {
        TreeNode {
            key,
            children: Vec::new(),
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn children(&self) -> &[TreeNode<K>] {
        &self.children
    }

    /// Append `child` as the last subtree.
    pub fn push_child(&mut self, child: TreeNode<K>) {
        self.children.push(child);
    }

    /// Number of direct children.
    pub fn arity(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, itself included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }
}

/// Convert a tree-shaped graph into a [`TreeNode`] hierarchy rooted at
/// `root`.
///
/// `convert` translates each graph node's payload into the tree key.
/// Children come out in incident-arc order, with arc direction taken from
/// the traversal that discovers them; the `ConvertTree` bit keeps the walk
/// from re-crossing an arc in the undirected case.
///
/// # Errors
/// - [`GraphError::InvalidNode`] if `root` is not in the graph.
/// - [`GraphError::NotATree`] unless the graph, viewed as undirected, is
///   acyclic and connected. The check is an extra **O(|V| + |E|)** pass.
pub fn graph_to_tree<N, A, Ty, Ix, K, C>(
    g: &mut Graph<N, A, Ty, Ix>,
    root: NodeId<Ix>,
    mut convert: C,
) -> Result<TreeNode<K>, GraphError>
where
    Ty: EdgeType,
    Ix: IndexType,
    C: FnMut(&N) -> K,
{
    if !g.contains_node(root) {
        return Err(GraphError::InvalidNode(root.index()));
    }
    if !crate::algo::is_tree(g) {
        return Err(GraphError::NotATree);
    }
    g.reset_arc_bit(GraphBit::ConvertTree);

    let mut tree = TreeNode::new(convert(&g[root]));
    build_subtrees(g, root, &mut tree, &mut convert);
    Ok(tree)
}

fn build_subtrees<N, A, Ty, Ix, K, C>(
    g: &mut Graph<N, A, Ty, Ix>,
    gnode: NodeId<Ix>,
    tnode: &mut TreeNode<K>,
    convert: &mut C,
) where
    Ty: EdgeType,
    Ix: IndexType,
    C: FnMut(&N) -> K,
{
    let mut walker = g.walker_incident(gnode);
    while let Some((arc, child)) = walker.next(g) {
        if g.arc_attr(arc).bits.get(GraphBit::ConvertTree) {
            continue; // the arc back to the parent
        }
        g.arc_attr_mut(arc).bits.set(GraphBit::ConvertTree, true);
        let mut subtree = TreeNode::new(convert(&g[child]));
        build_subtrees(g, child, &mut subtree, convert);
        tnode.push_child(subtree);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Graph;

    #[test]
    fn converts_a_rooted_tree() {
        //      r
        //     / \
        //    a   b
        //   / \
        //  c   d
        let mut g = Graph::<&str, ()>::new();
        let r = g.add_node("r");
        let a = g.add_node("a");
        let b = g.add_node("b");
        let c = g.add_node("c");
        let d = g.add_node("d");
        g.extend_with_arcs([(r, a), (r, b), (a, c), (a, d)]).unwrap();

        let tree = graph_to_tree(&mut g, r, |s| s.to_string()).unwrap();
        assert_eq!(tree.key(), "r");
        assert_eq!(tree.size(), 5);
        assert_eq!(tree.arity(), 2);
        let a_sub = tree
            .children()
            .iter()
            .find(|t| t.key() == "a")
            .expect("a is a child of r");
        assert_eq!(a_sub.arity(), 2);
        assert!(a_sub.children().iter().all(TreeNode::is_leaf));
    }

    #[test]
    fn any_node_can_be_the_root() {
        let mut g = Graph::<u8, ()>::new();
        let n0 = g.add_node(0);
        let n1 = g.add_node(1);
        let n2 = g.add_node(2);
        g.extend_with_arcs([(n0, n1), (n1, n2)]).unwrap();
        let tree = graph_to_tree(&mut g, n1, |v| *v).unwrap();
        assert_eq!(*tree.key(), 1);
        assert_eq!(tree.arity(), 2);
    }

    #[test]
    fn rejects_cycles_and_disconnection() {
        let mut g = Graph::<u8, ()>::new();
        let a = g.add_node(0);
        let b = g.add_node(1);
        let c = g.add_node(2);
        g.extend_with_arcs([(a, b), (b, c), (c, a)]).unwrap();
        assert!(matches!(
            graph_to_tree(&mut g, a, |v| *v),
            Err(GraphError::NotATree)
        ));

        let mut h = Graph::<u8, ()>::new();
        let a = h.add_node(0);
        let b = h.add_node(1);
        let _lone = h.add_node(2);
        h.add_arc(a, b, ()).unwrap();
        assert!(matches!(
            graph_to_tree(&mut h, a, |v| *v),
            Err(GraphError::NotATree)
        ));
    }
}
