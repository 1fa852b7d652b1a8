//! Pipe slopes from finished inverts.

use sn_core::{DiagnosticCode, Diagnostics};
use sn_graph::Network;

#[derive(Debug, Default)]
pub struct SlopeReport {
    /// Links that received a slope.
    pub computed: usize,
    /// Links whose slope is negative (they drain uphill).
    pub negative: Vec<String>,
    /// Links missing an endpoint invert.
    pub skipped: Vec<String>,
    pub diagnostics: Diagnostics,
}

/// Set `slope = (from invert - to invert) / length` on every link whose endpoints
/// both have an invert. Other links get no slope.
pub fn compute_slopes(network: &mut Network) -> SlopeReport {
    let mut report = SlopeReport::default();

    for idx in network.link_indices() {
        let invert_at = |node| network.node(node).and_then(|n| n.invert_elevation);
        let from = network.from_node_idx(idx).and_then(invert_at);
        let to = network.to_node_idx(idx).and_then(invert_at);
        let Some(link) = network.link_mut(idx) else {
            continue;
        };

        let (Some(from), Some(to)) = (from, to) else {
            link.slope = None;
            report.diagnostics.warn(
                DiagnosticCode::SlopeSkipped,
                link.id(),
                format!("link '{}' has an endpoint without invert; no slope", link.id()),
            );
            report.skipped.push(link.id().to_string());
            continue;
        };

        let slope = (from - to) / link.length;
        link.slope = Some(slope);
        report.computed += 1;
        if slope < 0.0 {
            report.diagnostics.warn(
                DiagnosticCode::NegativeSlope,
                link.id(),
                format!("link '{}' has negative slope {:.4}", link.id(), slope),
            );
            report.negative.push(link.id().to_string());
        }
    }

    tracing::info!(
        computed = report.computed,
        negative = report.negative.len(),
        skipped = report.skipped.len(),
        "slopes computed"
    );
    report
}
