//! Incremental network builder.

use sn_core::{LinkIdx, NodeIdx, Point};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Link, Network, Node};
use crate::indexing::IdIndex;

/// Builder for constructing a network from input tables.
///
/// Use `add_node` and `add_link` to collect records, then call `build()` to
/// validate them and obtain a `Network`. Validation covers what cannot be
/// repaired later (duplicate ids, non-finite numbers, non-positive lengths);
/// dangling endpoint references pass through and are handled by normalization.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: Vec<Node>,
    links: Vec<Link>,
}

impl NetworkBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return the index it will have in the built network.
    pub fn add_node(&mut self, node: Node) -> NodeIdx {
        let idx = NodeIdx::from_index(self.nodes.len());
        self.nodes.push(node);
        idx
    }

    /// Add a link and return the index it will have in the built network.
    pub fn add_link(&mut self, link: Link) -> LinkIdx {
        let idx = LinkIdx::from_index(self.links.len());
        self.links.push(link);
        idx
    }

    /// Validate and build the network.
    pub fn build(self) -> GraphResult<Network> {
        for node in &self.nodes {
            validate_node(node)?;
        }
        for link in &self.links {
            validate_link(link)?;
        }

        let node_index = IdIndex::from_ids(self.nodes.iter().map(|n| n.id()))
            .map_err(|id| GraphError::DuplicateNodeId { id })?;
        let link_index = IdIndex::from_ids(self.links.iter().map(|l| l.id()))
            .map_err(|id| GraphError::DuplicateLinkId { id })?;

        Ok(Network {
            nodes: self.nodes,
            links: self.links,
            node_index,
            link_index,
            adjacency: Default::default(),
        })
    }
}

fn validate_node(node: &Node) -> GraphResult<()> {
    let checks = [
        (node.invert_elevation, "invert elevation"),
        (node.rim_elevation, "rim elevation"),
    ];
    for (value, what) in checks {
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(GraphError::NonFiniteElevation {
                node: node.id().to_string(),
                what,
            });
        }
    }
    if node.position.is_some_and(|p| !finite_point(p)) {
        return Err(GraphError::NonFiniteCoordinate {
            owner: node.id().to_string(),
        });
    }
    Ok(())
}

fn validate_link(link: &Link) -> GraphResult<()> {
    if !(link.length.is_finite() && link.length > 0.0) {
        return Err(GraphError::InvalidLength {
            link: link.id().to_string(),
            value: link.length,
        });
    }
    if !link.vertices.iter().all(|&p| finite_point(p)) {
        return Err(GraphError::NonFiniteCoordinate {
            owner: link.id().to_string(),
        });
    }
    Ok(())
}

fn finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
