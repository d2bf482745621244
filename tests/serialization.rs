#![cfg(feature = "serde-1")]

use itertools::assert_equal;
use listgraph::prelude::*;

fn sample() -> Digraph<String, u32> {
    let mut g = Digraph::new();
    let a = g.add_node("a".to_string());
    let b = g.add_node("b".to_string());
    let c = g.add_node("c".to_string());
    let d = g.add_node("d".to_string());
    g.extend_with_arcs([(a, b, 1), (b, c, 2), (c, d, 3), (d, a, 4), (a, c, 5)])
        .unwrap();
    g
}

fn assert_isomorphic<Ty: EdgeType>(
    x: &Graph<String, u32, Ty>,
    y: &Graph<String, u32, Ty>,
) {
    assert_eq!(x.node_count(), y.node_count());
    assert_eq!(x.arc_count(), y.arc_count());
    assert_equal(x.node_infos(), y.node_infos());
    for (a, b) in x.arcs().zip(y.arcs()) {
        assert_eq!(a.source(), b.source());
        assert_eq!(a.target(), b.target());
        assert_eq!(a.info(), b.info());
    }
}

#[test]
fn json_round_trip() {
    let g = sample();
    let json = serde_json::to_string(&g).unwrap();
    let back: Digraph<String, u32> = serde_json::from_str(&json).unwrap();
    assert_isomorphic(&g, &back);
}

#[test]
fn bincode_round_trip() {
    let g = sample();
    let bytes = bincode::serialize(&g).unwrap();
    let back: Digraph<String, u32> = bincode::deserialize(&bytes).unwrap();
    assert_isomorphic(&g, &back);
}

#[test]
fn undirected_stream_will_not_load_as_directed() {
    let mut g = Graph::<String, u32>::new();
    let a = g.add_node("a".to_string());
    let b = g.add_node("b".to_string());
    g.add_arc(a, b, 1).unwrap();
    let json = serde_json::to_string(&g).unwrap();
    let back: Result<Digraph<String, u32>, _> = serde_json::from_str(&json);
    assert!(back.is_err());
}

#[test]
fn arc_with_out_of_range_ordinal_is_rejected() {
    let json = r#"{"edge_property":"directed","nodes":["a","b"],"arcs":[[0,5,1]]}"#;
    let back: Result<Digraph<String, u32>, _> = serde_json::from_str(json);
    assert!(back.is_err());
}
