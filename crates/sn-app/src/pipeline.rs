//! The normalize, interpolate and slope pipeline.

use sn_graph::{Network, NetworkClass};
use sn_invert::{InterpolationReport, SlopeReport, compute_depths, compute_slopes, interpolate_missing};
use sn_topology::{NormalizeOptions, NormalizeReport, normalize};

use crate::compile::PipelineSettings;
use crate::error::AppResult;

/// Results of one pass over a network.
#[derive(Debug, Default)]
pub struct PassReport {
    pub normalize: NormalizeReport,
    pub interpolation: InterpolationReport,
    pub slopes: SlopeReport,
}

#[derive(Debug, Default)]
pub struct PipelineReport {
    /// Interpolation on the primary network, if it ran.
    pub primary: Option<PassReport>,
    pub full: PassReport,
    /// Nodes that ended up with a manhole depth.
    pub nodes_with_depth: usize,
}

/// Run the whole pipeline on `network`.
///
/// With `primary_first`, inverts are first interpolated on the primary network
/// alone so that trunk sewers are not skewed by the laterals hanging off them.
pub fn run_pipeline(network: &mut Network, settings: &PipelineSettings) -> AppResult<PipelineReport> {
    let mut report = PipelineReport::default();

    if settings.primary_first {
        report.primary = primary_pass(network, settings)?;
    }

    let normalize_report = normalize(network, &settings.normalize)?;
    let interpolation = interpolate_missing(network, &settings.interpolation)?;
    let slopes = compute_slopes(network);
    report.full = PassReport {
        normalize: normalize_report,
        interpolation,
        slopes,
    };
    report.nodes_with_depth = compute_depths(network);

    tracing::info!(
        primary_pass = report.primary.is_some(),
        nodes = network.nodes().len(),
        links = network.links().len(),
        depths = report.nodes_with_depth,
        "pipeline finished"
    );
    Ok(report)
}

/// Normalize without pruning, then interpolate on the primary subnetwork and copy
/// the results back. Skipped when there is no primary network or it is the whole network.
fn primary_pass(network: &mut Network, settings: &PipelineSettings) -> AppResult<Option<PassReport>> {
    let is_primary = |class: NetworkClass| class == NetworkClass::Primary;
    let primary_nodes = network.nodes().iter().filter(|n| is_primary(n.class)).count();
    let primary_links = network.links().iter().filter(|l| is_primary(l.class)).count();
    if primary_nodes == 0 || (primary_nodes == network.nodes().len() && primary_links == network.links().len()) {
        tracing::debug!(primary_nodes, primary_links, "primary pass skipped");
        return Ok(None);
    }

    let options = NormalizeOptions {
        prune_disconnected: false,
        ..settings.normalize.clone()
    };
    let normalize_report = normalize(network, &options)?;

    let mut primary = network.subnetwork(|n| is_primary(n.class), |l| is_primary(l.class));
    let interpolation = interpolate_missing(&mut primary, &settings.interpolation)?;
    let slopes = compute_slopes(&mut primary);

    for id in &interpolation.interpolated {
        let Some(resolved) = primary.node_by_id(id) else {
            continue;
        };
        let Some(idx) = network.node_idx(id) else {
            continue;
        };
        if let Some(node) = network.node_mut(idx) {
            node.invert_elevation = resolved.invert_elevation;
            node.tag = resolved.tag.clone();
        }
    }

    tracing::info!(
        nodes = primary.nodes().len(),
        interpolated = interpolation.interpolated.len(),
        "primary network interpolated"
    );
    Ok(Some(PassReport {
        normalize: normalize_report,
        interpolation,
        slopes,
    }))
}
