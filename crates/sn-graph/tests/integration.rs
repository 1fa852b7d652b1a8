//! Integration tests for sn-graph.

use sn_graph::{Link, NetworkBuilder, NetworkClass, Node, NodeKind, check_topology};

fn branched() -> sn_graph::Network {
    // A ─┐
    //    ├─> C ──> D
    // B ─┘
    let mut builder = NetworkBuilder::new();
    builder.add_node(Node::new("A", NodeKind::Junction).with_invert(105.0));
    builder.add_node(Node::new("B", NodeKind::Inlet));
    builder.add_node(Node::new("C", NodeKind::Junction).with_rim(104.0));
    builder.add_node(Node::new("D", NodeKind::Junction));
    builder.add_link(Link::new("P1", "A", "C", 30.0));
    builder.add_link(Link::new("P2", "B", "C", 12.0));
    builder.add_link(Link::new("P3", "C", "D", 45.0));
    builder.build().unwrap()
}

#[test]
fn build_branched_network() {
    let net = branched();
    assert_eq!(net.nodes().len(), 4);
    assert_eq!(net.links().len(), 3);
    assert!(check_topology(&net).is_empty());

    let c = net.node_idx("C").unwrap();
    let up: Vec<&str> = net
        .links_up(c)
        .iter()
        .map(|&l| net.link(l).unwrap().id())
        .collect();
    assert_eq!(up, vec!["P1", "P2"]);
    let down: Vec<&str> = net
        .links_down(c)
        .iter()
        .map(|&l| net.link(l).unwrap().id())
        .collect();
    assert_eq!(down, vec!["P3"]);
}

#[test]
fn lookups_by_id() {
    let net = branched();
    assert!(net.node_by_id("B").unwrap().is_inlet());
    assert_eq!(net.node_by_id("A").unwrap().invert_elevation, Some(105.0));
    assert_eq!(net.link_by_id("P3").unwrap().length, 45.0);
    assert!(net.node_by_id("nope").is_none());

    let p2 = net.link_idx("P2").unwrap();
    assert_eq!(net.from_node_idx(p2), net.node_idx("B"));
    assert_eq!(net.to_node_idx(p2), net.node_idx("C"));
}

#[test]
fn mutation_keeps_ids_stable() {
    let mut net = branched();
    let c = net.node_idx("C").unwrap();
    net.node_mut(c).unwrap().invert_elevation = Some(101.2);
    net.node_mut(c).unwrap().append_tag("sk_interpolated");

    net.retain_nodes(|n| n.id() != "A");
    let c = net.node_idx("C").unwrap();
    let node = net.node(c).unwrap();
    assert_eq!(node.id(), "C");
    assert_eq!(node.invert_elevation, Some(101.2));
    assert_eq!(node.tag.as_deref(), Some("sk_interpolated"));

    // P1 now dangles on its upstream end.
    assert_eq!(check_topology(&net).len(), 1);
}

#[test]
fn large_chain() {
    let mut builder = NetworkBuilder::new();
    for i in 0..100 {
        builder.add_node(Node::new(format!("N{i}"), NodeKind::Junction));
    }
    for i in 0..99 {
        builder.add_link(
            Link::new(format!("P{i}"), format!("N{i}"), format!("N{}", i + 1), 10.0)
                .with_class(NetworkClass::Primary),
        );
    }
    let net = builder.build().unwrap();

    assert_eq!(net.nodes().len(), 100);
    assert_eq!(net.links().len(), 99);
    for i in 1..99 {
        let n = net.node_idx(&format!("N{i}")).unwrap();
        assert_eq!(net.links_up(n).len(), 1);
        assert_eq!(net.links_down(n).len(), 1);
    }
    let last = net.node_idx("N99").unwrap();
    assert!(net.links_down(last).is_empty());
}

#[test]
fn empty_network() {
    let net = NetworkBuilder::new().build().unwrap();
    assert!(net.nodes().is_empty());
    assert!(net.links().is_empty());
    assert!(check_topology(&net).is_empty());
}
