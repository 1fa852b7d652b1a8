//! Invert interpolation.
//!
//! Each node without an invert is estimated from the nearest known inverts up- and
//! downstream, weighted by pipe length. Results are committed one node at a time,
//! so later nodes see the inverts estimated before them. Inlets go last: they hang
//! off the network and are best estimated once the manholes around them are known.

use sn_core::{DiagnosticCode, Diagnostics, NodeIdx, Real};
use sn_graph::Network;

use crate::error::InvertResult;
use crate::settings::{InterpolationSettings, Params};
use crate::surrogate::Surrogate;
use crate::trace::{Branch, Direction, advance_all, rearm_for_second_elevation, trace};

#[derive(Debug, Default)]
pub struct InterpolationReport {
    /// Nodes that received an invert, in processing order.
    pub interpolated: Vec<String>,
    /// Nodes left without an invert.
    pub unresolved: Vec<String>,
    pub diagnostics: Diagnostics,
}

impl InterpolationReport {
    /// Estimates that fell back to `rim - mean_depth`.
    pub fn rim_fallbacks(&self) -> usize {
        self.diagnostics.count(DiagnosticCode::RimDepthFallback)
    }

    pub fn min_depth_clamped(&self) -> usize {
        self.diagnostics.count(DiagnosticCode::MinDepthClamped)
    }

    pub fn monotonicity_adjusted(&self) -> usize {
        self.diagnostics.count(DiagnosticCode::MonotonicityAdjusted)
    }
}

/// Fill every missing invert in `network`.
///
/// Settings are checked before anything is touched. Nodes that already have an
/// invert are never modified, so a second run is a no-op.
pub fn interpolate_missing(
    network: &mut Network,
    settings: &InterpolationSettings,
) -> InvertResult<InterpolationReport> {
    let params = settings.params()?;
    let mut report = InterpolationReport::default();

    for idx in processing_order(network) {
        let Some(sk) = estimate(network, idx, &params, &mut report.diagnostics) else {
            if let Some(node) = network.node(idx) {
                report.unresolved.push(node.id().to_string());
            }
            continue;
        };
        let Some(node) = network.node_mut(idx) else {
            continue;
        };
        node.invert_elevation = Some(sk);
        node.append_tag(&settings.tag);
        report.diagnostics.info(
            DiagnosticCode::ElevationInterpolated,
            node.id(),
            format!("invert of '{}' set to {:.3}", node.id(), sk),
        );
        report.interpolated.push(node.id().to_string());
    }

    tracing::info!(
        interpolated = report.interpolated.len(),
        unresolved = report.unresolved.len(),
        rim_fallbacks = report.rim_fallbacks(),
        clamped = report.min_depth_clamped(),
        "inverts interpolated"
    );
    Ok(report)
}

/// Nodes without an invert: non-inlets first, then inlets, each in arena order.
fn processing_order(network: &Network) -> Vec<NodeIdx> {
    let mut order: Vec<(bool, NodeIdx)> = network
        .nodes()
        .iter()
        .zip(network.node_indices())
        .filter(|(node, _)| node.invert_elevation.is_none())
        .map(|(node, idx)| (node.is_inlet(), idx))
        .collect();
    order.sort_by_key(|(is_inlet, _)| *is_inlet);
    order.into_iter().map(|(_, idx)| idx).collect()
}

fn estimate(
    network: &Network,
    idx: NodeIdx,
    params: &Params,
    diags: &mut Diagnostics,
) -> Option<Real> {
    let node = network.node(idx)?;
    let id = node.id();
    let rim = node.rim_elevation;

    let mut up = trace(network, idx, Direction::Upstream, diags);
    let mut down = trace(network, idx, Direction::Downstream, diags);

    let sk = match (Surrogate::from_branches(&up), Surrogate::from_branches(&down)) {
        (Some(u), Some(d)) => between(id, &u, &d, diags),
        (Some(u), None) => one_sided(network, id, rim, &u, &mut up, Direction::Upstream, params, diags),
        (None, Some(d)) => {
            one_sided(network, id, rim, &d, &mut down, Direction::Downstream, params, diags)
        }
        (None, None) => match rim {
            Some(rim) => {
                diags.warn(
                    DiagnosticCode::RimDepthFallback,
                    id,
                    format!(
                        "no invert found up- or downstream of '{}'; assuming depth {:.2}",
                        id, params.mean_depth
                    ),
                );
                rim - params.mean_depth
            }
            None => {
                diags.warn(
                    DiagnosticCode::ElevationUnresolved,
                    id,
                    format!("no invert found around '{}' and no rim elevation; left empty", id),
                );
                return None;
            }
        },
    };

    Some(clamp_min_depth(id, rim, sk, params.min_depth, diags))
}

/// Length-weighted between the two sides, kept inside their range when the range allows.
fn between(id: &str, up: &Surrogate, down: &Surrogate, diags: &mut Diagnostics) -> Real {
    let sk = down.elevation + (up.elevation - down.elevation) * down.length / (up.length + down.length);

    // When the ranges overlap the network may be pressurized; keep the estimate.
    if (sk > up.min || sk < down.max) && up.min > down.max {
        let mid = (up.min + down.max) / 2.0;
        diags.warn(
            DiagnosticCode::MonotonicityAdjusted,
            id,
            format!(
                "estimate {:.3} for '{}' outside [{:.3}, {:.3}]; using midpoint {:.3}",
                sk, id, down.max, up.min, mid
            ),
        );
        return mid;
    }
    sk
}

/// Extrapolate from one side using the slope found beyond the nearest invert.
#[allow(clippy::too_many_arguments)]
fn one_sided(
    network: &Network,
    id: &str,
    rim: Option<Real>,
    side: &Surrogate,
    branches: &mut Vec<Branch>,
    direction: Direction,
    params: &Params,
    diags: &mut Diagnostics,
) -> Real {
    rearm_for_second_elevation(branches);
    advance_all(network, branches, direction, diags);

    let slopes: Vec<Real> = branches
        .iter()
        .filter_map(|b| {
            let first = b.first_elevation?;
            let second = b.found_elevation?;
            (b.accumulated_length > 0.0).then(|| (first - second) / b.accumulated_length)
        })
        .collect();

    let slope = if slopes.is_empty() {
        match direction {
            Direction::Upstream => -params.mean_slope,
            Direction::Downstream => params.mean_slope,
        }
    } else {
        slopes.iter().sum::<Real>() / slopes.len() as Real
    };

    let sk = side.elevation + slope * side.length;

    let Some(rim) = rim else {
        return sk;
    };
    let by_depth = rim - params.mean_depth;
    let implausible = match direction {
        Direction::Upstream => sk >= side.min && by_depth < side.min,
        Direction::Downstream => sk < side.max && by_depth > side.max,
    };
    if implausible {
        diags.warn(
            DiagnosticCode::RimDepthFallback,
            id,
            format!(
                "extrapolated invert {:.3} for '{}' is implausible; using rim minus mean depth {:.3}",
                sk, id, by_depth
            ),
        );
        return by_depth;
    }
    sk
}

fn clamp_min_depth(id: &str, rim: Option<Real>, sk: Real, min_depth: Real, diags: &mut Diagnostics) -> Real {
    match rim {
        Some(rim) if rim - sk < min_depth => {
            let clamped = rim - min_depth;
            diags.warn(
                DiagnosticCode::MinDepthClamped,
                id,
                format!(
                    "invert {:.3} of '{}' is within {:.2} of the rim; lowered to {:.3}",
                    sk, id, min_depth, clamped
                ),
            );
            clamped
        }
        _ => sk,
    }
}
