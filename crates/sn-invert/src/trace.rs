//! Branch tracing.
//!
//! Starting from one node, every path up- or downstream is followed until it
//! reaches a node with a known invert, the end of the network, or a broken
//! reference. Forks multiply the branch; merges are visited once per path.
//! All branches advance in lock-step, one link per round, until none is active.
//! A branch that would re-enter a node already on its own path stops there, and
//! the number of branches per trace is capped so parallel pipes cannot blow it up.

use sn_core::{DiagnosticCode, Diagnostics, LinkIdx, NodeIdx, Real};
use sn_graph::Network;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Against the flow: `links_up`, towards `from_node`.
    Upstream,
    /// With the flow: `links_down`, towards `to_node`.
    Downstream,
}

/// One traversal path.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub current_node: NodeIdx,
    /// Pipe length walked since the start (or since the first found invert, once re-armed).
    pub accumulated_length: Real,
    pub found_elevation: Option<Real>,
    pub active: bool,
    /// Invert found by the first trace, kept while looking for a second one.
    pub first_elevation: Option<Real>,
    /// Distance from the start to `first_elevation`.
    pub length_to_first: Real,
    /// Nodes on this path, start included.
    pub visited: Vec<NodeIdx>,
}

impl Branch {
    pub fn start(node: NodeIdx) -> Self {
        Self {
            current_node: node,
            accumulated_length: 0.0,
            found_elevation: None,
            active: true,
            first_elevation: None,
            length_to_first: 0.0,
            visited: vec![node],
        }
    }
}

/// Trace all branches from `start` in `direction`. Every returned branch is inactive.
pub fn trace(
    network: &Network,
    start: NodeIdx,
    direction: Direction,
    diags: &mut Diagnostics,
) -> Vec<Branch> {
    let mut branches = vec![Branch::start(start)];
    advance_all(network, &mut branches, direction, diags);
    branches
}

/// Advance the active branches until none is left active.
pub fn advance_all(
    network: &Network,
    branches: &mut Vec<Branch>,
    direction: Direction,
    diags: &mut Diagnostics,
) {
    let limit = branch_limit(network);
    let mut capped = false;
    while branches.iter().any(|b| b.active) {
        // Branches forked during this round take their first step next round.
        let round = branches.len();
        for i in 0..round {
            if branches[i].active {
                capped |= step(network, branches, i, direction, limit, diags);
            }
        }
    }
    if capped {
        let id = branches
            .first()
            .and_then(|b| b.visited.first())
            .and_then(|&n| network.node(n))
            .map_or("<unknown>", |n| n.id());
        diags.warn(
            DiagnosticCode::BranchLimitReached,
            id,
            format!(
                "tracing from '{}' reached {} branches; further forks were not followed",
                id, limit
            ),
        );
    }
}

/// Upper bound on branches per trace.
pub fn branch_limit(network: &Network) -> usize {
    network.links().len().max(1) * 8
}

/// Returns true when a fork was dropped because the branch limit was reached.
fn step(
    network: &Network,
    branches: &mut Vec<Branch>,
    i: usize,
    direction: Direction,
    limit: usize,
    diags: &mut Diagnostics,
) -> bool {
    let node = branches[i].current_node;
    let links = match direction {
        Direction::Upstream => network.links_up(node),
        Direction::Downstream => network.links_down(node),
    };

    if links.is_empty() {
        branches[i].active = false;
        return false;
    }

    let origin = branches[i].clone();
    for (k, &link) in links.iter().enumerate() {
        if k > 0 && branches.len() >= limit {
            return true;
        }
        let mut next = origin.clone();
        walk(network, &mut next, link, direction, diags);
        if k == 0 {
            branches[i] = next;
        } else {
            branches.push(next);
        }
    }
    false
}

fn walk(
    network: &Network,
    branch: &mut Branch,
    link_idx: LinkIdx,
    direction: Direction,
    diags: &mut Diagnostics,
) {
    let Some(link) = network.link(link_idx) else {
        branch.active = false;
        return;
    };
    let neighbour = match direction {
        Direction::Upstream => link.from_node(),
        Direction::Downstream => Some(link.to_node()),
    };

    match neighbour.and_then(|id| network.node_idx(id)) {
        Some(next) if branch.visited.contains(&next) => {
            let id = network.node(next).map_or("<unknown>", |n| n.id());
            diags.warn(
                DiagnosticCode::CycleDetected,
                id,
                format!(
                    "link '{}' leads back to node '{}' on the same path; the flow graph has a cycle, branch stopped",
                    link.id(),
                    id
                ),
            );
            branch.active = false;
        }
        Some(next) => {
            branch.accumulated_length += link.length;
            branch.visited.push(next);
            branch.current_node = next;
            if let Some(sk) = network.node(next).and_then(|n| n.invert_elevation) {
                branch.found_elevation = Some(sk);
                branch.active = false;
            }
        }
        None => {
            branch.accumulated_length += link.length;
            diags.warn(
                DiagnosticCode::MissingReference,
                link.id(),
                format!(
                    "node '{}' referenced by link '{}' does not exist; tracing of this branch stopped",
                    neighbour.unwrap_or("<unknown>"),
                    link.id()
                ),
            );
            branch.active = false;
        }
    }
}

/// Turn every branch that found an invert into one that looks for the next invert
/// beyond it. Branches without a found invert stay terminated.
pub fn rearm_for_second_elevation(branches: &mut [Branch]) {
    for branch in branches.iter_mut() {
        if let Some(sk) = branch.found_elevation.take() {
            branch.first_elevation = Some(sk);
            branch.length_to_first = branch.accumulated_length;
            branch.accumulated_length = 0.0;
            branch.active = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sn_graph::{Link, Node, NodeKind};

    fn found(branches: &[Branch]) -> Vec<(Option<f64>, f64)> {
        branches
            .iter()
            .map(|b| (b.found_elevation, b.accumulated_length))
            .collect()
    }

    #[test]
    fn stops_at_first_known_invert() {
        let mut net = Network::new();
        net.add_node(Node::new("A", NodeKind::Junction).with_invert(110.0)).unwrap();
        net.add_node(Node::new("B", NodeKind::Junction).with_invert(105.0)).unwrap();
        net.add_node(Node::new("X", NodeKind::Junction)).unwrap();
        net.add_link(Link::new("AB", "A", "B", 50.0)).unwrap();
        net.add_link(Link::new("BX", "B", "X", 20.0)).unwrap();
        let x = net.node_idx("X").unwrap();
        let mut diags = Diagnostics::new();

        let up = trace(&net, x, Direction::Upstream, &mut diags);
        assert_eq!(found(&up), vec![(Some(105.0), 20.0)]);
        assert!(up.iter().all(|b| !b.active));

        let down = trace(&net, x, Direction::Downstream, &mut diags);
        assert_eq!(found(&down), vec![(None, 0.0)]);
        assert!(diags.is_empty());
    }

    #[test]
    fn forks_keep_slot_then_append() {
        // U1 -> X, U2 -> M -> X, U3 -> M
        let mut net = Network::new();
        net.add_node(Node::new("X", NodeKind::Junction)).unwrap();
        net.add_node(Node::new("U1", NodeKind::Junction).with_invert(3.0)).unwrap();
        net.add_node(Node::new("M", NodeKind::Junction)).unwrap();
        net.add_node(Node::new("U2", NodeKind::Junction).with_invert(5.0)).unwrap();
        net.add_node(Node::new("U3", NodeKind::Junction)).unwrap();
        net.add_link(Link::new("L1", "U1", "X", 10.0)).unwrap();
        net.add_link(Link::new("L2", "M", "X", 10.0)).unwrap();
        net.add_link(Link::new("L3", "U2", "M", 7.0)).unwrap();
        net.add_link(Link::new("L4", "U3", "M", 4.0)).unwrap();
        let x = net.node_idx("X").unwrap();
        let mut diags = Diagnostics::new();

        let up = trace(&net, x, Direction::Upstream, &mut diags);
        assert_eq!(
            found(&up),
            vec![(Some(3.0), 10.0), (Some(5.0), 17.0), (None, 14.0)]
        );
    }

    #[test]
    fn missing_neighbour_aborts_branch() {
        let mut net = Network::new();
        net.add_node(Node::new("X", NodeKind::Junction)).unwrap();
        net.add_link(Link::new("L", "GHOST", "X", 10.0)).unwrap();
        net.add_link(Link::from_parts("U", None, "X", 3.0)).unwrap();
        let x = net.node_idx("X").unwrap();
        let mut diags = Diagnostics::new();

        let up = trace(&net, x, Direction::Upstream, &mut diags);
        assert_eq!(up.len(), 2);
        assert!(up.iter().all(|b| !b.active && b.found_elevation.is_none()));
        assert_eq!(diags.subjects(DiagnosticCode::MissingReference), vec!["L", "U"]);
    }

    #[test]
    fn cycle_terminates_with_diagnostic() {
        let mut net = Network::new();
        net.add_node(Node::new("A", NodeKind::Junction)).unwrap();
        net.add_node(Node::new("B", NodeKind::Junction)).unwrap();
        net.add_link(Link::new("AB", "A", "B", 1.0)).unwrap();
        net.add_link(Link::new("BA", "B", "A", 1.0)).unwrap();
        let a = net.node_idx("A").unwrap();
        let mut diags = Diagnostics::new();

        let down = trace(&net, a, Direction::Downstream, &mut diags);
        assert_eq!(down.len(), 1);
        assert!(!down[0].active);
        assert_eq!(down[0].found_elevation, None);
        assert_eq!(down[0].current_node, net.node_idx("B").unwrap());
        assert_eq!(down[0].accumulated_length, 1.0);
        assert_eq!(diags.subjects(DiagnosticCode::CycleDetected), vec!["A"]);
    }

    #[test]
    fn twin_pipe_cycle_stops_each_path() {
        let mut net = Network::new();
        net.add_node(Node::new("A", NodeKind::Junction)).unwrap();
        net.add_node(Node::new("B", NodeKind::Junction)).unwrap();
        let twins = [("AB1", "A", "B"), ("AB2", "A", "B"), ("BA1", "B", "A"), ("BA2", "B", "A")];
        for (id, from, to) in twins {
            net.add_link(Link::new(id, from, to, 1.0)).unwrap();
        }
        let a = net.node_idx("A").unwrap();
        let mut diags = Diagnostics::new();

        let down = trace(&net, a, Direction::Downstream, &mut diags);
        assert_eq!(down.len(), 4);
        assert!(down.iter().all(|b| !b.active && b.found_elevation.is_none()));
        assert_eq!(diags.count(DiagnosticCode::CycleDetected), 4);
        assert_eq!(diags.count(DiagnosticCode::BranchLimitReached), 0);
    }

    #[test]
    fn parallel_pipes_are_capped() {
        // Ten twin-pipe pairs in series: 2^10 distinct paths.
        let mut net = Network::new();
        for i in 0..=10 {
            net.add_node(Node::new(format!("N{i}"), NodeKind::Junction)).unwrap();
        }
        for i in 0..10 {
            for twin in ["a", "b"] {
                let link = Link::new(format!("P{i}{twin}"), format!("N{i}"), format!("N{}", i + 1), 1.0);
                net.add_link(link).unwrap();
            }
        }
        let start = net.node_idx("N0").unwrap();
        let mut diags = Diagnostics::new();

        let down = trace(&net, start, Direction::Downstream, &mut diags);
        assert_eq!(down.len(), branch_limit(&net));
        assert!(down.iter().all(|b| !b.active));
        assert_eq!(diags.subjects(DiagnosticCode::BranchLimitReached), vec!["N0"]);
        assert_eq!(diags.count(DiagnosticCode::CycleDetected), 0);
    }

    #[test]
    fn rearm_continues_past_first_invert() {
        let mut net = Network::new();
        net.add_node(Node::new("X", NodeKind::Junction)).unwrap();
        net.add_node(Node::new("B", NodeKind::Junction).with_invert(100.0)).unwrap();
        net.add_node(Node::new("A", NodeKind::Junction).with_invert(101.0)).unwrap();
        net.add_link(Link::new("AB", "A", "B", 40.0)).unwrap();
        net.add_link(Link::new("BX", "B", "X", 25.0)).unwrap();
        let x = net.node_idx("X").unwrap();
        let mut diags = Diagnostics::new();

        let mut up = trace(&net, x, Direction::Upstream, &mut diags);
        rearm_for_second_elevation(&mut up);
        advance_all(&net, &mut up, Direction::Upstream, &mut diags);

        assert_eq!(up.len(), 1);
        let b = &up[0];
        assert_eq!(b.first_elevation, Some(100.0));
        assert_eq!(b.length_to_first, 25.0);
        assert_eq!(b.found_elevation, Some(101.0));
        assert_eq!(b.accumulated_length, 40.0);
    }
}
