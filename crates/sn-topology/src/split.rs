//! Splitting pipes at inline inlets.
//!
//! An inlet that something flows into but nothing flows out of still sits on
//! top of a pipe. Splitting that pipe at the inlet position turns the inlet
//! into a real junction: `host_u` ends at the inlet, `host_l` starts there.

use sn_core::geometry::{self, Projection};
use sn_core::{DiagnosticCode, Diagnostics, LinkIdx, Point, SnResult};
use sn_graph::{Link, Network, NodeKind};

/// What happened to one inlet.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitOutcome {
    /// The host pipe was replaced by two segments.
    Split { host: String, upper: String, lower: String },
    /// Exactly one segment touches the inlet; nothing to split.
    NotNeeded,
    /// No pipe passes the inlet; the inlet was deleted.
    OffNetwork,
    /// More than two segments (or two unrelated ones) touch the inlet; left as is.
    Ambiguous { touching: usize },
    /// The inlet or a candidate pipe has no position; left as is.
    MissingGeometry,
}

/// Inlets with inflow but no outflow, with their host pipe reference, in arena order.
pub fn relevant_inlets(network: &Network) -> Vec<(String, Option<String>)> {
    network
        .node_indices()
        .filter_map(|idx| {
            let node = network.node(idx)?;
            let relevant = node.kind == NodeKind::Inlet
                && network.links_down(idx).is_empty()
                && !network.links_up(idx).is_empty();
            relevant.then(|| (node.id().to_string(), node.inline_link_ref.clone()))
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
enum Touch {
    /// The inlet lies on an end of the segment.
    End,
    /// The inlet lies inside the segment.
    Interior(Projection),
}

impl Touch {
    fn pieces(self) -> usize {
        match self {
            Touch::End => 1,
            Touch::Interior(_) => 2,
        }
    }
}

/// Split the pipe referenced by `host_ref` at the inlet `inlet_id`.
///
/// Candidates are all links whose id starts with `host_ref`, since the host may
/// already have been split and suffixed by an earlier inlet.
pub fn split_at_inlet(
    network: &mut Network,
    inlet_id: &str,
    host_ref: Option<&str>,
    tolerance: f64,
    diags: &mut Diagnostics,
) -> SnResult<SplitOutcome> {
    let Some(position) = network.node_by_id(inlet_id).and_then(|n| n.position) else {
        diags.warn(
            DiagnosticCode::InletMissingGeometry,
            inlet_id,
            format!("inlet '{}' has no position; pipe not split", inlet_id),
        );
        return Ok(SplitOutcome::MissingGeometry);
    };

    let (touches, untestable) = touching_segments(network, host_ref, position, tolerance);
    if !untestable.is_empty() {
        diags.warn(
            DiagnosticCode::InletMissingGeometry,
            inlet_id,
            format!(
                "inlet '{}' cannot be placed on {}: no pipe geometry; pipe not split",
                inlet_id,
                untestable.iter().map(|id| format!("'{id}'")).collect::<Vec<_>>().join(", "),
            ),
        );
        return Ok(SplitOutcome::MissingGeometry);
    }
    let pieces: usize = touches.iter().map(|(_, t)| t.pieces()).sum();

    match (pieces, touches.as_slice()) {
        (0, _) => {
            diags.warn(
                DiagnosticCode::InletOffNetwork,
                inlet_id,
                format!(
                    "inlet '{}' does not lie on pipe '{}'; deleted",
                    inlet_id,
                    host_ref.unwrap_or("<none>")
                ),
            );
            network.remove_node(inlet_id);
            Ok(SplitOutcome::OffNetwork)
        }
        (1, _) => {
            diags.info(
                DiagnosticCode::InletNotSplit,
                inlet_id,
                format!("inlet '{}' touches a single segment; no split needed", inlet_id),
            );
            Ok(SplitOutcome::NotNeeded)
        }
        (2, [(host, Touch::Interior(at))]) => split_link(network, inlet_id, *host, at, diags),
        (n, _) => {
            diags.warn(
                DiagnosticCode::AmbiguousSplit,
                inlet_id,
                format!(
                    "splitting at inlet '{}' would touch {} segments; inlet left unprocessed",
                    inlet_id, n
                ),
            );
            Ok(SplitOutcome::Ambiguous { touching: n })
        }
    }
}

/// Segments the inlet touches, and the ids of candidates whose geometry is unknown.
fn touching_segments(
    network: &Network,
    host_ref: Option<&str>,
    position: Point,
    tolerance: f64,
) -> (Vec<(LinkIdx, Touch)>, Vec<String>) {
    let mut touches = Vec::new();
    let mut untestable = Vec::new();
    let Some(host_ref) = host_ref else {
        return (touches, untestable);
    };

    for l in network.link_indices() {
        let Some(link) = network.link(l).filter(|link| link.id().starts_with(host_ref)) else {
            continue;
        };
        let Some(geom) = network.link_geometry(l) else {
            untestable.push(link.id().to_string());
            continue;
        };
        let Some(proj) = geometry::project(&geom, position) else {
            untestable.push(link.id().to_string());
            continue;
        };
        if proj.distance > tolerance {
            continue;
        }
        let total = geometry::polyline_length(&geom);
        let touch = if proj.chainage <= tolerance || total - proj.chainage <= tolerance {
            Touch::End
        } else {
            Touch::Interior(proj)
        };
        touches.push((l, touch));
    }

    (touches, untestable)
}

fn split_link(
    network: &mut Network,
    inlet_id: &str,
    host_idx: LinkIdx,
    at: &Projection,
    diags: &mut Diagnostics,
) -> SnResult<SplitOutcome> {
    let Some(host) = network.link(host_idx).cloned() else {
        return Ok(SplitOutcome::Ambiguous { touching: 0 });
    };
    let Some(geom) = network.link_geometry(host_idx).map(|g| g.into_owned()) else {
        return Ok(SplitOutcome::MissingGeometry);
    };

    let (head, tail) = geometry::split(&geom, at);

    // The piece touching the host's downstream node is the lower one. Without a
    // position for that node, trust the digitizing direction.
    let downstream = network.node_by_id(host.to_node()).and_then(|n| n.position);
    let reversed = downstream.is_some_and(|p| {
        let head_start = head.first().map_or(f64::INFINITY, |&q| q.distance(p));
        let tail_end = tail.last().map_or(f64::INFINITY, |&q| q.distance(p));
        head_start < tail_end
    });
    let (upper_pts, lower_pts): (Vec<Point>, Vec<Point>) = if reversed {
        (tail.into_iter().rev().collect(), head.into_iter().rev().collect())
    } else {
        (head, tail)
    };

    let upper_id = format!("{}_u", host.id());
    let lower_id = format!("{}_l", host.id());
    if network.link_idx(&upper_id).is_some() || network.link_idx(&lower_id).is_some() {
        diags.warn(
            DiagnosticCode::AmbiguousSplit,
            inlet_id,
            format!(
                "splitting '{}' at inlet '{}' would reuse an existing segment id; inlet left unprocessed",
                host.id(),
                inlet_id
            ),
        );
        return Ok(SplitOutcome::Ambiguous { touching: 2 });
    }

    let upper = segment(&host, &upper_id, host.from_node().map(str::to_string), inlet_id, upper_pts);
    let lower = segment(&host, &lower_id, Some(inlet_id.to_string()), host.to_node(), lower_pts);

    tracing::debug!(
        host = host.id(),
        inlet = inlet_id,
        upper_len = upper.length,
        lower_len = lower.length,
        "splitting pipe at inlet"
    );

    network.remove_link(host.id());
    network.add_link(upper)?;
    network.add_link(lower)?;

    diags.info(
        DiagnosticCode::InletSplit,
        inlet_id,
        format!(
            "pipe '{}' split at inlet '{}' into '{}' and '{}'",
            host.id(),
            inlet_id,
            upper_id,
            lower_id
        ),
    );

    Ok(SplitOutcome::Split {
        host: host.id().to_string(),
        upper: upper_id,
        lower: lower_id,
    })
}

fn segment(host: &Link, id: &str, from: Option<String>, to: &str, vertices: Vec<Point>) -> Link {
    let length = geometry::polyline_length(&vertices);
    let mut link = Link::from_parts(id, from, to, length).with_vertices(vertices);
    link.class = host.class;
    link
}
