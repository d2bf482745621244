use listgraph::algo::{is_cyclic_undirected, kruskal_tree, prim_paint, prim_tree};
use listgraph::attr::GraphBit;
use listgraph::graph_to_tree::graph_to_tree;
use listgraph::prelude::*;

/// The 4-cycle with a diagonal: V = {1,2,3,4}, weighted arcs
/// (1,2,1), (2,3,2), (3,4,3), (4,1,4), (1,3,5).
fn s1() -> (Graph<u32, u32>, Vec<NodeId>) {
    let mut g = Graph::new();
    let ids: Vec<_> = (1..=4).map(|i| g.add_node(i)).collect();
    g.extend_with_arcs([
        (ids[0], ids[1], 1),
        (ids[1], ids[2], 2),
        (ids[2], ids[3], 3),
        (ids[3], ids[0], 4),
        (ids[0], ids[2], 5),
    ])
    .unwrap();
    (g, ids)
}

#[test]
fn prim_on_the_4_cycle_with_diagonal() {
    let (mut g, _) = s1();
    let total = prim_paint(&mut g, |w| *w).unwrap();
    assert_eq!(total, 6);
    let tree_arcs: Vec<(u32, u32)> = g
        .arcs()
        .filter(|a| g.arc_attr(a.id()).bits.get(GraphBit::SpanningTree))
        .map(|a| (g[a.source()], g[a.target()]))
        .collect();
    assert_eq!(tree_arcs, vec![(1, 2), (2, 3), (3, 4)]);
}

#[test]
fn built_tree_has_v_minus_one_arcs_and_no_cycle() {
    let (mut g, _) = s1();
    let tree = prim_tree(&mut g, |w| *w).unwrap();
    assert_eq!(tree.node_count(), g.node_count());
    assert_eq!(tree.arc_count(), g.node_count() - 1);
    assert!(!is_cyclic_undirected(&tree));
    let total: u32 = tree.arcs().map(|a| *a.info()).sum();
    assert_eq!(total, 6);
}

#[test]
fn kruskal_builds_the_same_tree_weight() {
    let (mut g, _) = s1();
    let tree = kruskal_tree(&mut g, |w| *w).unwrap();
    let total: u32 = tree.arcs().map(|a| *a.info()).sum();
    assert_eq!(total, 6);
    assert_eq!(tree.arc_count(), 3);
}

/// An MST is a tree in graph clothing; converting it with the designated
/// root exposes the hierarchy.
#[test]
fn spanning_tree_feeds_graph_to_tree() {
    let (mut g, _) = s1();
    let mut tree = prim_tree(&mut g, |w| *w).unwrap();
    let root = tree.node_ids().next().unwrap();
    let hierarchy = graph_to_tree(&mut tree, root, |v| *v).unwrap();
    assert_eq!(hierarchy.size(), 4);
}

#[test]
fn exhaustive_check_on_a_random_graph() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut g = Graph::<u32, u64>::new();
    let n = 24;
    let ids: Vec<_> = (0..n).map(|i| g.add_node(i)).collect();
    // random connected graph: a random spanning chain plus noise
    for w in 1..n as usize {
        let parent = rng.gen_range(0..w);
        g.add_arc(ids[parent], ids[w], rng.gen_range(1..1000))
            .unwrap();
    }
    for _ in 0..40 {
        let a = rng.gen_range(0..n as usize);
        let b = rng.gen_range(0..n as usize);
        g.add_arc(ids[a], ids[b], rng.gen_range(1..1000)).unwrap();
    }

    let prim_total = prim_paint(&mut g, |w| *w).unwrap();
    let kruskal_total = listgraph::algo::kruskal_paint(&mut g, |w| *w).unwrap();
    assert_eq!(prim_total, kruskal_total);

    let tree = prim_tree(&mut g, |w| *w).unwrap();
    assert_eq!(tree.arc_count(), tree.node_count() - 1);
    assert!(!is_cyclic_undirected(&tree));
}
