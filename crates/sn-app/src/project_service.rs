//! Project loading, saving, validation, and introspection.

use std::path::Path;

use sn_graph::{NetworkClass, NodeKind, check_topology};
use sn_project::Project;

use crate::compile::{build_network, node_kind};
use crate::error::AppResult;

/// Summary of a project's network for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSummary {
    pub name: String,
    pub node_count: usize,
    pub link_count: usize,
    pub inlet_count: usize,
    pub outfall_count: usize,
    pub primary_nodes: usize,
    pub primary_links: usize,
    pub missing_inverts: usize,
    /// Self-loops, unknown upstream ends and dangling endpoints.
    pub topology_violations: usize,
}

/// Load a project; the format follows the file extension.
pub fn load_project(path: &Path) -> AppResult<Project> {
    Ok(sn_project::load(path)?)
}

/// Save a project; the format follows the file extension.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    Ok(sn_project::save(path, project)?)
}

/// Validate the file contents and that they form a network.
pub fn validate_project(project: &Project) -> AppResult<()> {
    sn_project::validate_project(project)?;
    crate::compile::PipelineSettings::from_def(&project.settings)?;
    build_network(project)?;
    Ok(())
}

pub fn summarize(project: &Project) -> AppResult<NetworkSummary> {
    let network = build_network(project)?;
    let count_kind = |kind: NodeKind| {
        project
            .nodes
            .iter()
            .filter(|n| node_kind(&n.node_type, &project.settings.inlet_kind) == kind)
            .count()
    };

    Ok(NetworkSummary {
        name: project.name.clone(),
        node_count: network.nodes().len(),
        link_count: network.links().len(),
        inlet_count: count_kind(NodeKind::Inlet),
        outfall_count: count_kind(NodeKind::Outfall),
        primary_nodes: network
            .nodes()
            .iter()
            .filter(|n| n.class == NetworkClass::Primary)
            .count(),
        primary_links: network
            .links()
            .iter()
            .filter(|l| l.class == NetworkClass::Primary)
            .count(),
        missing_inverts: network
            .nodes()
            .iter()
            .filter(|n| n.invert_elevation.is_none())
            .count(),
        topology_violations: check_topology(&network).len(),
    })
}
