//! Self-loop repair and removal of elements that are not part of the network.

use std::collections::HashSet;

use sn_core::{DiagnosticCode, Diagnostics};
use sn_graph::{Network, NodeKind};

/// Clear the upstream end of every link that starts and ends at the same node.
///
/// Returns the ids of the repaired links.
pub fn repair_self_loops(network: &mut Network, diags: &mut Diagnostics) -> Vec<String> {
    let loops: Vec<_> = network
        .link_indices()
        .filter(|&l| network.link(l).is_some_and(|link| link.is_self_loop()))
        .collect();

    let mut repaired = Vec::with_capacity(loops.len());
    for idx in loops {
        let Some(link) = network.link(idx) else {
            continue;
        };
        let id = link.id().to_string();
        diags.warn(
            DiagnosticCode::SelfLoopRepaired,
            &id,
            format!(
                "link '{}' has the same upstream and downstream node '{}'; upstream node cleared",
                id,
                link.to_node()
            ),
        );
        network.clear_from_node(idx);
        repaired.push(id);
    }
    repaired
}

/// Drop links with an unknown or missing endpoint.
pub fn prune_dangling_links(network: &mut Network, diags: &mut Diagnostics) -> Vec<String> {
    let known: HashSet<String> = network.nodes().iter().map(|n| n.id().to_string()).collect();
    let removed = network.retain_links(|link| {
        link.from_node().is_some_and(|f| known.contains(f)) && known.contains(link.to_node())
    });
    for id in &removed {
        diags.warn(
            DiagnosticCode::LinkPruned,
            id,
            format!("link '{}' has no valid upstream or downstream node; deleted", id),
        );
    }
    removed
}

/// Drop nodes that are not an endpoint of any link.
pub fn prune_isolated_nodes(network: &mut Network, diags: &mut Diagnostics) -> Vec<String> {
    let mut endpoints: HashSet<String> = HashSet::new();
    for link in network.links() {
        endpoints.extend(link.from_node().map(str::to_string));
        endpoints.insert(link.to_node().to_string());
    }
    let removed = network.retain_nodes(|node| endpoints.contains(node.id()));
    for id in &removed {
        diags.warn(
            DiagnosticCode::NodePruned,
            id,
            format!("node '{}' is not connected to any link; deleted", id),
        );
    }
    removed
}

/// Drop inlet nodes nothing flows into.
pub fn prune_unreachable_inlets(network: &mut Network, diags: &mut Diagnostics) -> Vec<String> {
    let reached: HashSet<String> = network
        .links()
        .iter()
        .map(|l| l.to_node().to_string())
        .collect();
    let removed =
        network.retain_nodes(|node| node.kind != NodeKind::Inlet || reached.contains(node.id()));
    for id in &removed {
        diags.warn(
            DiagnosticCode::InletPruned,
            id,
            format!("inlet '{}' has no inflowing link; deleted", id),
        );
    }
    removed
}
