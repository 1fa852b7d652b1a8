//! Outfall classification.

use sn_core::{DiagnosticCode, Diagnostics};
use sn_graph::{Network, NodeKind, OutfallType};

/// Mark every node without an outflowing link as a free-discharge outfall.
///
/// Returns the ids of the classified nodes in arena order.
pub fn classify_outfalls(network: &mut Network, diags: &mut Diagnostics) -> Vec<String> {
    let terminal: Vec<_> = network
        .node_indices()
        .filter(|&n| network.links_down(n).is_empty())
        .collect();

    let mut outfalls = Vec::with_capacity(terminal.len());
    for idx in terminal {
        let Some(node) = network.node_mut(idx) else {
            continue;
        };
        node.kind = NodeKind::Outfall;
        node.outfall_type = Some(OutfallType::Free);
        let id = node.id().to_string();
        diags.info(
            DiagnosticCode::OutfallClassified,
            &id,
            format!("node '{}' has no outflowing link; classified as outfall", id),
        );
        outfalls.push(id);
    }
    outfalls
}
