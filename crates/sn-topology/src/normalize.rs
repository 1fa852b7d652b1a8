//! Normalization pipeline.

use sn_core::{Diagnostics, Length, SnError, SnResult, in_m, m};
use sn_graph::Network;

use crate::outfall::classify_outfalls;
use crate::prune;
use crate::split::{SplitOutcome, relevant_inlets, split_at_inlet};

/// Normalization options.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOptions {
    /// Delete links with unknown endpoints, unconnected nodes and inlets without inflow.
    pub prune_disconnected: bool,
    /// Maximum distance between an inlet and the pipe it sits on.
    pub snap_tolerance: Length,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            prune_disconnected: true,
            snap_tolerance: m(0.1),
        }
    }
}

impl NormalizeOptions {
    pub fn validate(&self) -> SnResult<()> {
        let tol = in_m(self.snap_tolerance);
        if !tol.is_finite() {
            return Err(SnError::NonFinite {
                what: "snap tolerance",
                value: tol,
            });
        }
        if tol < 0.0 {
            return Err(SnError::InvalidArg {
                what: "snap tolerance must not be negative",
            });
        }
        Ok(())
    }
}

/// Everything `normalize` changed, by element id.
#[derive(Debug, Clone, Default)]
pub struct NormalizeReport {
    pub self_loops_repaired: Vec<String>,
    pub links_pruned: Vec<String>,
    pub nodes_pruned: Vec<String>,
    pub inlets_pruned: Vec<String>,
    /// Host pipes replaced by an upper and a lower segment.
    pub links_split: Vec<String>,
    /// Inlets deleted because they lie on no pipe.
    pub inlets_off_network: Vec<String>,
    pub ambiguous_inlets: Vec<String>,
    pub outfalls: Vec<String>,
    pub diagnostics: Diagnostics,
}

impl NormalizeReport {
    pub fn nodes_deleted(&self) -> usize {
        self.nodes_pruned.len() + self.inlets_pruned.len() + self.inlets_off_network.len()
    }
}

/// Repair `network` in place into a node-link-node graph.
///
/// Only invalid options are an error; the network is not touched in that case.
/// With `prune_disconnected`, the result satisfies `sn_graph::check_topology`.
pub fn normalize(network: &mut Network, options: &NormalizeOptions) -> SnResult<NormalizeReport> {
    options.validate()?;
    let tolerance = in_m(options.snap_tolerance);

    let mut report = NormalizeReport::default();
    let mut diags = Diagnostics::new();

    report.self_loops_repaired = prune::repair_self_loops(network, &mut diags);

    if options.prune_disconnected {
        report.links_pruned = prune::prune_dangling_links(network, &mut diags);
        report.nodes_pruned = prune::prune_isolated_nodes(network, &mut diags);
        report.inlets_pruned = prune::prune_unreachable_inlets(network, &mut diags);
        // Removing inlets can leave their outflowing links dangling.
        report.links_pruned.extend(prune::prune_dangling_links(network, &mut diags));
    }

    for (inlet, host_ref) in relevant_inlets(network) {
        match split_at_inlet(network, &inlet, host_ref.as_deref(), tolerance, &mut diags)? {
            SplitOutcome::Split { host, .. } => report.links_split.push(host),
            SplitOutcome::OffNetwork => report.inlets_off_network.push(inlet),
            SplitOutcome::Ambiguous { .. } => report.ambiguous_inlets.push(inlet),
            SplitOutcome::NotNeeded | SplitOutcome::MissingGeometry => {}
        }
    }

    if options.prune_disconnected && !report.inlets_off_network.is_empty() {
        // Laterals into a deleted inlet, then whatever they alone connected.
        report.links_pruned.extend(prune::prune_dangling_links(network, &mut diags));
        report.nodes_pruned.extend(prune::prune_isolated_nodes(network, &mut diags));
    }

    report.outfalls = classify_outfalls(network, &mut diags);

    tracing::info!(
        self_loops = report.self_loops_repaired.len(),
        links_pruned = report.links_pruned.len(),
        nodes_deleted = report.nodes_deleted(),
        links_split = report.links_split.len(),
        ambiguous = report.ambiguous_inlets.len(),
        outfalls = report.outfalls.len(),
        "network normalized"
    );

    report.diagnostics = diags;
    Ok(report)
}
