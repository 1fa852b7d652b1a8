//! Topology checks.
//!
//! A normalized network is node-link-node: every link has two distinct,
//! existing endpoints. These checks report every violation instead of
//! stopping at the first.

use std::fmt;

use crate::graph::Network;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyViolation {
    /// `from_node == to_node`.
    SelfLoop { link: String },
    /// The upstream end was cleared to the unknown sentinel.
    UnknownFrom { link: String },
    /// An endpoint id does not resolve to a node.
    DanglingEndpoint { link: String, node: String },
}

impl fmt::Display for TopologyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyViolation::SelfLoop { link } => {
                write!(f, "Link '{}' starts and ends at the same node", link)
            }
            TopologyViolation::UnknownFrom { link } => {
                write!(f, "Link '{}' has no known upstream node", link)
            }
            TopologyViolation::DanglingEndpoint { link, node } => {
                write!(f, "Link '{}' refers to missing node '{}'", link, node)
            }
        }
    }
}

/// Collect all node-link-node violations, in link arena order.
pub fn check_topology(network: &Network) -> Vec<TopologyViolation> {
    let mut violations = Vec::new();

    for link in network.links() {
        let id = link.id().to_string();
        if link.is_self_loop() {
            violations.push(TopologyViolation::SelfLoop { link: id.clone() });
        }
        match link.from_node() {
            None => violations.push(TopologyViolation::UnknownFrom { link: id.clone() }),
            Some(from) if network.node_idx(from).is_none() => {
                violations.push(TopologyViolation::DanglingEndpoint {
                    link: id.clone(),
                    node: from.to_string(),
                });
            }
            Some(_) => {}
        }
        if network.node_idx(link.to_node()).is_none() {
            violations.push(TopologyViolation::DanglingEndpoint {
                link: id,
                node: link.to_node().to_string(),
            });
        }
    }

    violations
}
