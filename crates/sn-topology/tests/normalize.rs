//! End-to-end normalization scenarios.

use proptest::prelude::*;
use sn_core::{DiagnosticCode, m};
use sn_graph::{Link, Network, NetworkBuilder, Node, NodeKind, OutfallType, check_topology};
use sn_topology::{NormalizeOptions, normalize};

fn options(prune: bool) -> NormalizeOptions {
    NormalizeOptions {
        prune_disconnected: prune,
        snap_tolerance: m(0.1),
    }
}

#[test]
fn outfall_detection() {
    let mut builder = NetworkBuilder::new();
    for id in ["A", "B", "C"] {
        builder.add_node(Node::new(id, NodeKind::Junction));
    }
    builder.add_link(Link::new("AB", "A", "B", 20.0));
    builder.add_link(Link::new("BC", "B", "C", 20.0));
    let mut net = builder.build().unwrap();

    let report = normalize(&mut net, &options(true)).unwrap();

    assert_eq!(report.outfalls, vec!["C".to_string()]);
    let c = net.node_by_id("C").unwrap();
    assert_eq!(c.kind, NodeKind::Outfall);
    assert_eq!(c.outfall_type, Some(OutfallType::Free));
    assert_eq!(net.node_by_id("A").unwrap().kind, NodeKind::Junction);
    assert_eq!(net.node_by_id("B").unwrap().kind, NodeKind::Junction);
}

#[test]
fn unreachable_inlet_is_pruned() {
    let mut builder = NetworkBuilder::new();
    builder.add_node(Node::new("A", NodeKind::Junction));
    builder.add_node(Node::new("B", NodeKind::Junction));
    builder.add_node(Node::new("I", NodeKind::Inlet).on_link("AB"));
    builder.add_link(Link::new("AB", "A", "B", 20.0));
    builder.add_link(Link::new("IB", "I", "B", 3.0));
    let mut net = builder.build().unwrap();

    let report = normalize(&mut net, &options(true)).unwrap();

    assert!(net.node_by_id("I").is_none());
    assert_eq!(report.inlets_pruned, vec!["I".to_string()]);
    assert_eq!(report.nodes_deleted(), 1);
    assert_eq!(report.links_pruned, vec!["IB".to_string()]);
    assert!(check_topology(&net).is_empty());
}

#[test]
fn self_loop_is_repaired_then_pruned() {
    let mut builder = NetworkBuilder::new();
    builder.add_node(Node::new("A", NodeKind::Junction));
    builder.add_node(Node::new("B", NodeKind::Junction));
    builder.add_link(Link::new("AB", "A", "B", 20.0));
    builder.add_link(Link::new("BB", "B", "B", 2.0));
    let mut net = builder.build().unwrap();

    let report = normalize(&mut net, &options(true)).unwrap();

    assert_eq!(report.self_loops_repaired, vec!["BB".to_string()]);
    assert_eq!(report.links_pruned, vec!["BB".to_string()]);
    assert_eq!(report.diagnostics.count(DiagnosticCode::SelfLoopRepaired), 1);
    assert!(check_topology(&net).is_empty());
}

#[test]
fn inline_inlets_split_twice() {
    // A(0,0) ── P ── B(100,0) with inlets I1 at x=30 and I2 at x=70.
    let mut builder = NetworkBuilder::new();
    builder.add_node(Node::new("A", NodeKind::Junction).at(0.0, 0.0).with_invert(101.0));
    builder.add_node(Node::new("B", NodeKind::Junction).at(100.0, 0.0).with_invert(100.0));
    builder.add_node(Node::new("I1", NodeKind::Inlet).at(30.0, 0.0).on_link("P"));
    builder.add_node(Node::new("I2", NodeKind::Inlet).at(70.0, 0.02).on_link("P"));
    builder.add_node(Node::new("S1", NodeKind::Junction).at(30.0, 10.0));
    builder.add_node(Node::new("S2", NodeKind::Junction).at(70.0, -10.0));
    builder.add_link(Link::new("P", "A", "B", 100.0));
    builder.add_link(Link::new("L1", "S1", "I1", 10.0));
    builder.add_link(Link::new("L2", "S2", "I2", 10.0));
    let mut net = builder.build().unwrap();

    let report = normalize(&mut net, &options(true)).unwrap();

    assert_eq!(report.links_split, vec!["P".to_string(), "P_l".to_string()]);
    assert!(check_topology(&net).is_empty());

    let chain: Vec<(&str, Option<&str>, &str)> = ["P_u", "P_l_u", "P_l_l"]
        .iter()
        .map(|id| {
            let l = net.link_by_id(id).unwrap();
            (l.id(), l.from_node(), l.to_node())
        })
        .collect();
    assert_eq!(
        chain,
        vec![
            ("P_u", Some("A"), "I1"),
            ("P_l_u", Some("I1"), "I2"),
            ("P_l_l", Some("I2"), "B"),
        ]
    );
    let total: f64 = ["P_u", "P_l_u", "P_l_l"]
        .iter()
        .map(|id| net.link_by_id(id).unwrap().length)
        .sum();
    assert!((total - 100.0).abs() < 1e-9);

    // Only B discharges.
    assert_eq!(report.outfalls, vec!["B".to_string()]);
    assert_eq!(net.node_by_id("I1").unwrap().kind, NodeKind::Inlet);
}

#[test]
fn inlet_on_pipe_without_geometry_survives() {
    let mut builder = NetworkBuilder::new();
    builder.add_node(Node::new("A", NodeKind::Junction));
    builder.add_node(Node::new("B", NodeKind::Junction));
    builder.add_node(Node::new("I", NodeKind::Inlet).at(20.0, 0.0).on_link("P"));
    builder.add_node(Node::new("S", NodeKind::Junction).at(20.0, 8.0));
    builder.add_link(Link::new("P", "A", "B", 50.0));
    builder.add_link(Link::new("LAT", "S", "I", 8.0));
    let mut net = builder.build().unwrap();

    let report = normalize(&mut net, &options(true)).unwrap();

    assert!(report.inlets_off_network.is_empty());
    assert!(report.links_split.is_empty());
    assert_eq!(report.diagnostics.count(DiagnosticCode::InletMissingGeometry), 1);
    assert_eq!(report.diagnostics.count(DiagnosticCode::InletOffNetwork), 0);
    for id in ["I", "S", "A", "B"] {
        assert!(net.node_by_id(id).is_some(), "{id} was deleted");
    }
    assert!(net.link_by_id("P").is_some());
    assert!(net.link_by_id("LAT").is_some());
}

#[test]
fn normalizing_twice_changes_nothing_more() {
    let mut builder = NetworkBuilder::new();
    builder.add_node(Node::new("A", NodeKind::Junction).at(0.0, 0.0));
    builder.add_node(Node::new("B", NodeKind::Junction).at(50.0, 0.0));
    builder.add_node(Node::new("I", NodeKind::Inlet).at(20.0, 0.0).on_link("P"));
    builder.add_node(Node::new("S", NodeKind::Junction).at(20.0, 8.0));
    builder.add_link(Link::new("P", "A", "B", 50.0));
    builder.add_link(Link::new("L", "S", "I", 8.0));
    let mut net = builder.build().unwrap();

    normalize(&mut net, &options(true)).unwrap();
    let links_after_first: Vec<String> = net.links().iter().map(|l| l.id().to_string()).collect();
    let second = normalize(&mut net, &options(true)).unwrap();

    assert!(second.links_split.is_empty());
    assert_eq!(second.nodes_deleted(), 0);
    let links_after_second: Vec<String> = net.links().iter().map(|l| l.id().to_string()).collect();
    assert_eq!(links_after_first, links_after_second);
}

fn straight_host(length: f64, p: f64) -> Network {
    let mut builder = NetworkBuilder::new();
    builder.add_node(Node::new("A", NodeKind::Junction).at(0.0, 0.0));
    builder.add_node(Node::new("B", NodeKind::Junction).at(length, 0.0));
    builder.add_node(Node::new("I", NodeKind::Inlet).at(p * length, 0.0).on_link("H"));
    builder.add_node(Node::new("S", NodeKind::Junction).at(p * length, 5.0));
    builder.add_link(Link::new("H", "A", "B", length));
    builder.add_link(Link::new("LAT", "S", "I", 5.0));
    builder.build().unwrap()
}

proptest! {
    #[test]
    fn split_lengths_follow_inlet_position(length in 10.0_f64..500.0, p in 0.05_f64..0.95) {
        let mut net = straight_host(length, p);
        normalize(&mut net, &options(true)).unwrap();

        prop_assert!(net.link_by_id("H").is_none());
        let upper = net.link_by_id("H_u").unwrap();
        let lower = net.link_by_id("H_l").unwrap();
        prop_assert_eq!(upper.from_node(), Some("A"));
        prop_assert_eq!(upper.to_node(), "I");
        prop_assert_eq!(lower.from_node(), Some("I"));
        prop_assert_eq!(lower.to_node(), "B");
        prop_assert!((upper.length - p * length).abs() < 1e-6);
        prop_assert!((lower.length - (1.0 - p) * length).abs() < 1e-6);
        let host_pieces = net.links().iter().filter(|l| l.id().starts_with('H')).count();
        prop_assert_eq!(host_pieces, 2);
    }

    #[test]
    fn pruned_network_is_node_link_node(
        node_count in 1_usize..8,
        raw_links in prop::collection::vec((0_usize..10, 0_usize..10, 1.0_f64..50.0), 0..16),
        inlet_mask in prop::collection::vec(any::<bool>(), 8),
    ) {
        let mut builder = NetworkBuilder::new();
        for i in 0..node_count {
            let kind = if inlet_mask[i] { NodeKind::Inlet } else { NodeKind::Junction };
            builder.add_node(Node::new(format!("N{i}"), kind).on_link("L0"));
        }
        // Endpoints beyond node_count reference missing nodes.
        for (k, (from, to, len)) in raw_links.iter().enumerate() {
            builder.add_link(Link::new(format!("L{k}"), format!("N{from}"), format!("N{to}"), *len));
        }
        let mut net = builder.build().unwrap();

        normalize(&mut net, &options(true)).unwrap();

        prop_assert!(check_topology(&net).is_empty());
        for link in net.links() {
            prop_assert_ne!(link.from_node(), Some(link.to_node()));
        }
    }
}
