use listgraph::algo::{astar, dijkstra, find_path_bfs, find_path_dfs, floyd_warshall};
use listgraph::prelude::*;

/// S3: 3x3 grid with 4-connectivity, row-major node order.
fn grid3() -> (Graph<(u8, u8), u32>, Vec<NodeId>) {
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
                g.add_arc(ids[r * 3 + c], ids[r * 3 + c + 1], 1).unwrap();
            }
            if r + 1 < 3 {
                g.add_arc(ids[r * 3 + c], ids[(r + 1) * 3 + c], 1).unwrap();
            }
        }
    }
    (g, ids)
}

#[test]
fn bfs_shortest_hop_path_across_the_grid() {
    let (mut g, ids) = grid3();
    let path = find_path_bfs(&mut g, ids[0], ids[8]).unwrap().unwrap();
    assert_eq!(path.arc_count(), 4);
    assert_eq!(path.first(), Some(ids[0]));
    assert_eq!(path.last(), Some(ids[8]));
}

#[test]
fn dfs_path_is_valid_even_if_longer() {
    let (mut g, ids) = grid3();
    let path = find_path_dfs(&mut g, ids[0], ids[8]).unwrap().unwrap();
    assert!(path.arc_count() >= 4);
    // a path in an undirected graph never repeats a node
    let mut nodes = path.nodes().to_vec();
    nodes.sort();
    nodes.dedup();
    assert_eq!(nodes.len(), path.arc_count() + 1);
}

#[test]
fn dijkstra_astar_and_floyd_warshall_agree() {
    let (mut g, ids) = grid3();
    let from = ids[0];

    let dist = dijkstra(&mut g, from, None, |w| *w).unwrap();
    let apsp = floyd_warshall(&g, |w| *w).unwrap();
    for &n in &ids {
        assert_eq!(dist.distance(n), apsp.distance(from, n));
    }

    let (cost, path) = astar(&mut g, from, ids[8], |w| *w, |_| 0).unwrap().unwrap();
    assert_eq!(Some(cost), dist.distance(ids[8]));
    assert_eq!(path.arc_count() as u32, cost);
}

#[test]
fn matrix_recovery_walks_the_grid() {
    let (g, ids) = grid3();
    let apsp = floyd_warshall(&g, |w| *w).unwrap();
    let path = apsp.recover_path(ids[0], ids[8]).unwrap().unwrap();
    assert_eq!(path.len(), 5);
    assert_eq!(path[0], ids[0]);
    assert_eq!(path[4], ids[8]);
    // consecutive recovered nodes are grid neighbors
    for pair in path.windows(2) {
        assert!(g.find_arc(pair[0], pair[1]).is_some());
    }
}

#[test]
fn weighted_detour_beats_the_direct_arc() {
    // direct a->c costs 10, the detour through b costs 3
    let mut g = Digraph::<(), u32>::new();
    let a = g.add_node(());
    let b = g.add_node(());
    let c = g.add_node(());
    g.extend_with_arcs([(a, c, 10), (a, b, 1), (b, c, 2)]).unwrap();
    let dist = dijkstra(&mut g, a, Some(c), |w| *w).unwrap();
    assert_eq!(dist.distance(c), Some(3));
    let path = dist.path_to(&g, c).unwrap().unwrap();
    assert_eq!(path.nodes(), &[a, b, c]);
    assert_eq!(path.total_weight(&g, |w| *w), 3);
}
