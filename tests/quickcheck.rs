use quickcheck::quickcheck;

use listgraph::algo::connected_components;
use listgraph::io::{load_default, save_default};
use listgraph::prelude::*;

fn graph_from_edge_list(nodes: u8, edges: &[(u8, u8, u16)]) -> Digraph<u8, u16> {
    let n = nodes.clamp(1, 32);
    let mut g = Digraph::new();
    let ids: Vec<_> = (0..n).map(|i| g.add_node(i)).collect();
    for &(a, b, w) in edges {
        let (a, b) = (a as usize % ids.len(), b as usize % ids.len());
        g.add_arc(ids[a], ids[b], w).unwrap();
    }
    g
}

quickcheck! {
    fn binary_round_trip_preserves_structure(nodes: u8, edges: Vec<(u8, u8, u16)>) -> bool {
        let g = graph_from_edge_list(nodes, &edges);
        let mut buf = Vec::new();
        save_default(&g, &mut buf).unwrap();
        let mut loaded = Digraph::<u8, u16>::new();
        load_default(&mut loaded, &mut buf.as_slice()).unwrap();

        loaded.node_count() == g.node_count()
            && loaded.arc_count() == g.arc_count()
            && g.node_infos().eq(loaded.node_infos())
            && g.arcs().zip(loaded.arcs()).all(|(x, y)| {
                x.info() == y.info()
                    && x.source() == y.source()
                    && x.target() == y.target()
            })
    }

    fn component_count_is_bounded_by_node_count(nodes: u8, edges: Vec<(u8, u8, u16)>) -> bool {
        let g = graph_from_edge_list(nodes, &edges);
        let comps = connected_components(&g);
        comps >= 1 && comps <= g.node_count()
    }

    fn bfs_never_beats_dijkstra_on_unit_weights(nodes: u8, edges: Vec<(u8, u8, u16)>) -> bool {
        let mut g = graph_from_edge_list(nodes, &edges);
        let ids: Vec<_> = g.node_ids().collect();
        let s = ids[0];
        let dist = listgraph::algo::dijkstra(&mut g, s, None, |_| 1u32).unwrap();
        ids.iter().all(|&t| {
            let hops = listgraph::algo::find_path_bfs(&mut g, s, t)
                .unwrap()
                .map(|p| p.arc_count() as u32);
            hops == dist.distance(t)
        })
    }
}
