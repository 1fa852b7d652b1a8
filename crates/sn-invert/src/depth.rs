//! Manhole depth.

use sn_graph::Network;

/// Set `max_depth = rim - invert` on every node with both elevations, clear it elsewhere.
/// Returns the number of nodes with a depth.
pub fn compute_depths(network: &mut Network) -> usize {
    let mut count = 0;
    for idx in network.node_indices() {
        let Some(node) = network.node_mut(idx) else {
            continue;
        };
        node.max_depth = match (node.rim_elevation, node.invert_elevation) {
            (Some(rim), Some(invert)) => {
                count += 1;
                Some(rim - invert)
            }
            _ => None,
        };
    }
    count
}
