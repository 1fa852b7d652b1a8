//! Derived up/down adjacency.

use std::collections::HashMap;

use sn_core::{LinkIdx, NodeIdx};

use crate::graph::Link;
use crate::indexing::IdIndex;

/// Compact adjacency: for each node, the links flowing into it (`up`) and out of it (`down`).
///
/// Node i's inbound links are `up_links[up_offsets[i]..up_offsets[i + 1]]`, likewise for
/// outbound. Within one node, links keep arena order so forks are deterministic.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    up_offsets: Vec<usize>,
    up_links: Vec<LinkIdx>,
    down_offsets: Vec<usize>,
    down_links: Vec<LinkIdx>,
}

impl Adjacency {
    /// Build adjacency for `node_count` nodes. Endpoints that do not resolve are left out.
    pub fn build(node_count: usize, links: &[Link], node_index: &IdIndex) -> Self {
        let mut up: HashMap<NodeIdx, Vec<LinkIdx>> = HashMap::new();
        let mut down: HashMap<NodeIdx, Vec<LinkIdx>> = HashMap::new();

        for (i, link) in links.iter().enumerate() {
            let link_idx = LinkIdx::from_index(i);
            if let Some(to) = node_index.get(link.to_node()) {
                up.entry(to).or_default().push(link_idx);
            }
            if let Some(from) = link.from_node().and_then(|id| node_index.get(id)) {
                down.entry(from).or_default().push(link_idx);
            }
        }

        let (up_offsets, up_links) = Self::flatten(node_count, &up);
        let (down_offsets, down_links) = Self::flatten(node_count, &down);

        Self {
            up_offsets,
            up_links,
            down_offsets,
            down_links,
        }
    }

    fn flatten(node_count: usize, grouped: &HashMap<NodeIdx, Vec<LinkIdx>>) -> (Vec<usize>, Vec<LinkIdx>) {
        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut flat = Vec::new();
        offsets.push(0);

        for i in 0..node_count {
            if let Some(list) = grouped.get(&NodeIdx::from_index(i)) {
                flat.extend_from_slice(list);
            }
            offsets.push(flat.len());
        }

        (offsets, flat)
    }

    pub fn up(&self, node: NodeIdx) -> &[LinkIdx] {
        Self::slice(&self.up_offsets, &self.up_links, node)
    }

    pub fn down(&self, node: NodeIdx) -> &[LinkIdx] {
        Self::slice(&self.down_offsets, &self.down_links, node)
    }

    fn slice<'a>(offsets: &[usize], flat: &'a [LinkIdx], node: NodeIdx) -> &'a [LinkIdx] {
        let idx = node.index();
        if idx + 1 >= offsets.len() {
            return &[];
        }
        &flat[offsets[idx]..offsets[idx + 1]]
    }
}
