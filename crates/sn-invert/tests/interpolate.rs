use proptest::prelude::*;
use sn_core::{DiagnosticCode, Diagnostics};
use sn_graph::{Link, Network, Node, NodeKind};
use sn_invert::{
    Direction, InterpolationSettings, compute_depths, compute_slopes, interpolate_missing, trace,
};

/// N0 -> N1 -> ... -> Nn, with inverts only at the ends.
fn chain(lengths: &[f64], top: f64, bottom: f64) -> Network {
    let mut net = Network::new();
    let n = lengths.len();
    for i in 0..=n {
        let mut node = Node::new(format!("N{i}"), NodeKind::Junction);
        if i == 0 {
            node = node.with_invert(top);
        } else if i == n {
            node = node.with_invert(bottom);
        }
        net.add_node(node).unwrap();
    }
    for (i, len) in lengths.iter().enumerate() {
        net.add_link(Link::new(format!("L{i}"), format!("N{i}"), format!("N{}", i + 1), *len))
            .unwrap();
    }
    net
}

fn inverts(net: &Network) -> Vec<f64> {
    net.nodes().iter().map(|n| n.invert_elevation.unwrap()).collect()
}

#[test]
fn chain_interpolates_linearly() {
    let mut net = chain(&[25.0; 4], 100.0, 90.0);

    let report = interpolate_missing(&mut net, &InterpolationSettings::default()).unwrap();

    assert_eq!(report.interpolated, vec!["N1", "N2", "N3"]);
    let expected = [100.0, 97.5, 95.0, 92.5, 90.0];
    for (got, want) in inverts(&net).iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "{got} != {want}");
    }
}

#[test]
fn second_run_changes_nothing() {
    let mut net = chain(&[10.0, 30.0, 20.0], 50.0, 48.0);
    interpolate_missing(&mut net, &InterpolationSettings::default()).unwrap();
    let first = net.clone();

    let report = interpolate_missing(&mut net, &InterpolationSettings::default()).unwrap();

    assert!(report.interpolated.is_empty());
    assert!(report.unresolved.is_empty());
    assert_eq!(net.nodes(), first.nodes());
}

#[test]
fn shallow_estimate_is_clamped_to_min_depth() {
    let mut net = Network::new();
    net.add_node(Node::new("U", NodeKind::Junction).with_invert(10.0)).unwrap();
    net.add_node(Node::new("X", NodeKind::Junction).with_rim(10.0)).unwrap();
    net.add_node(Node::new("D", NodeKind::Junction).with_invert(9.9)).unwrap();
    net.add_link(Link::new("UX", "U", "X", 10.0)).unwrap();
    net.add_link(Link::new("XD", "X", "D", 10.0)).unwrap();

    let report = interpolate_missing(&mut net, &InterpolationSettings::default()).unwrap();

    let sk = net.node_by_id("X").unwrap().invert_elevation.unwrap();
    assert!((sk - 9.7).abs() < 1e-9);
    assert_eq!(report.min_depth_clamped(), 1);
    assert_eq!(report.diagnostics.subjects(DiagnosticCode::MinDepthClamped), vec!["X"]);
}

#[test]
fn tag_is_appended_to_existing_notes() {
    let mut net = chain(&[10.0, 10.0], 5.0, 4.0);
    net.node_mut(net.node_idx("N1").unwrap()).unwrap().tag = Some("surveyed 2019".into());
    let settings = InterpolationSettings {
        tag: "estimated".into(),
        ..Default::default()
    };

    interpolate_missing(&mut net, &settings).unwrap();

    assert_eq!(
        net.node_by_id("N1").unwrap().tag.as_deref(),
        Some("surveyed 2019;estimated")
    );
    assert_eq!(net.node_by_id("N0").unwrap().tag, None);
}

#[test]
fn cyclic_network_still_terminates() {
    // A -> B -> C -> A, plus C -> OUT(90).
    let mut net = Network::new();
    for id in ["A", "B", "C"] {
        net.add_node(Node::new(id, NodeKind::Junction)).unwrap();
    }
    net.add_node(Node::new("OUT", NodeKind::Outfall).with_invert(90.0)).unwrap();
    net.add_link(Link::new("AB", "A", "B", 10.0)).unwrap();
    net.add_link(Link::new("BC", "B", "C", 10.0)).unwrap();
    net.add_link(Link::new("CA", "C", "A", 10.0)).unwrap();
    net.add_link(Link::new("CO", "C", "OUT", 10.0)).unwrap();

    let report = interpolate_missing(&mut net, &InterpolationSettings::default()).unwrap();

    assert!(report.diagnostics.count(DiagnosticCode::CycleDetected) > 0);
    assert!(report.unresolved.is_empty());
    assert!(net.nodes().iter().all(|n| n.invert_elevation.is_some()));
}

#[test]
fn twin_pipe_cycle_stays_small() {
    // A => B => A over doubled pipes, then B -> N1 -> ... -> N40 -> OUT(90).
    let mut net = Network::new();
    for id in ["A", "B"] {
        net.add_node(Node::new(id, NodeKind::Junction)).unwrap();
    }
    for i in 1..=40 {
        net.add_node(Node::new(format!("N{i}"), NodeKind::Junction)).unwrap();
    }
    net.add_node(Node::new("OUT", NodeKind::Outfall).with_invert(90.0)).unwrap();
    let twins = [("AB1", "A", "B"), ("AB2", "A", "B"), ("BA1", "B", "A"), ("BA2", "B", "A")];
    for (id, from, to) in twins {
        net.add_link(Link::new(id, from, to, 5.0)).unwrap();
    }
    net.add_link(Link::new("BN1", "B", "N1", 10.0)).unwrap();
    for i in 1..40 {
        let link = Link::new(format!("N{i}N{}", i + 1), format!("N{i}"), format!("N{}", i + 1), 10.0);
        net.add_link(link).unwrap();
    }
    net.add_link(Link::new("N40OUT", "N40", "OUT", 10.0)).unwrap();

    let a = net.node_idx("A").unwrap();
    let mut diags = Diagnostics::new();
    let down = trace(&net, a, Direction::Downstream, &mut diags);
    // Two ways into B, each of which either returns to A twice or carries on.
    assert_eq!(down.len(), 6);
    assert_eq!(down.iter().filter(|b| b.found_elevation == Some(90.0)).count(), 2);
    assert_eq!(diags.count(DiagnosticCode::CycleDetected), 4);

    let report = interpolate_missing(&mut net, &InterpolationSettings::default()).unwrap();

    assert!(report.diagnostics.count(DiagnosticCode::CycleDetected) > 0);
    assert_eq!(report.diagnostics.count(DiagnosticCode::BranchLimitReached), 0);
    assert!(report.unresolved.is_empty());
    assert!(net.nodes().iter().all(|n| n.invert_elevation.is_some()));
}

#[test]
fn slopes_and_depths_follow_interpolation() {
    let mut net = chain(&[50.0, 50.0], 101.0, 100.0);
    net.node_mut(net.node_idx("N1").unwrap()).unwrap().rim_elevation = Some(102.5);

    interpolate_missing(&mut net, &InterpolationSettings::default()).unwrap();
    let slopes = compute_slopes(&mut net);
    let depths = compute_depths(&mut net);

    assert_eq!(slopes.computed, 2);
    assert!(slopes.negative.is_empty());
    for link in net.links() {
        assert!((link.slope.unwrap() - 0.01).abs() < 1e-9);
    }
    assert_eq!(depths, 1);
    assert!((net.node_by_id("N1").unwrap().max_depth.unwrap() - 2.0).abs() < 1e-9);
}

proptest! {
    #[test]
    fn chain_inverts_never_rise(
        lengths in prop::collection::vec(1.0f64..100.0, 2..8),
        top in 50.0f64..150.0,
        drop in 0.1f64..20.0,
    ) {
        let bottom = top - drop;
        let mut net = chain(&lengths, top, bottom);

        let report = interpolate_missing(&mut net, &InterpolationSettings::default()).unwrap();
        prop_assert_eq!(report.interpolated.len(), lengths.len() - 1);
        prop_assert_eq!(report.monotonicity_adjusted(), 0);

        let sk = inverts(&net);
        for pair in sk.windows(2) {
            prop_assert!(pair[1] <= pair[0] + 1e-9);
        }
        for value in &sk {
            prop_assert!(*value <= top + 1e-9 && *value >= bottom - 1e-9);
        }
    }
}
