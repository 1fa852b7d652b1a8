//! Core network data structures.

use std::borrow::Cow;
use std::cell::OnceCell;

use sn_core::{LinkIdx, NodeIdx, Point, Real};

use crate::adjacency::Adjacency;
use crate::error::{GraphError, GraphResult};
use crate::indexing::IdIndex;

/// Role of a manhole in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Ordinary manhole/shaft.
    Junction,
    /// Surface inflow point, possibly lying mid-pipe until normalized.
    Inlet,
    /// Terminal node the network discharges through.
    Outfall,
}

/// Boundary condition of an outfall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutfallType {
    /// Free discharge.
    Free,
}

/// Primary (trunk) or secondary (private/lateral) network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetworkClass {
    Primary,
    #[default]
    Secondary,
}

/// A manhole or shaft.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    pub kind: NodeKind,
    /// Bottom elevation (sk).
    pub invert_elevation: Option<Real>,
    /// Cover elevation (dk).
    pub rim_elevation: Option<Real>,
    pub position: Option<Point>,
    /// Link an inlet sits on, before splitting.
    pub inline_link_ref: Option<String>,
    pub class: NetworkClass,
    pub outfall_type: Option<OutfallType>,
    /// Rim minus invert, once both are known.
    pub max_depth: Option<Real>,
    /// Provenance notes, `;`-separated.
    pub tag: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            invert_elevation: None,
            rim_elevation: None,
            position: None,
            inline_link_ref: None,
            class: NetworkClass::default(),
            outfall_type: None,
            max_depth: None,
            tag: None,
        }
    }

    pub fn with_invert(mut self, invert: Real) -> Self {
        self.invert_elevation = Some(invert);
        self
    }

    pub fn with_rim(mut self, rim: Real) -> Self {
        self.rim_elevation = Some(rim);
        self
    }

    pub fn at(mut self, x: Real, y: Real) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }

    pub fn on_link(mut self, link_id: impl Into<String>) -> Self {
        self.inline_link_ref = Some(link_id.into());
        self
    }

    pub fn with_class(mut self, class: NetworkClass) -> Self {
        self.class = class;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_inlet(&self) -> bool {
        self.kind == NodeKind::Inlet
    }

    pub fn append_tag(&mut self, note: &str) {
        self.tag = Some(match self.tag.take() {
            Some(existing) if !existing.is_empty() => format!("{existing};{note}"),
            _ => note.to_string(),
        });
    }
}

/// A pipe segment. Flow runs from `from_node` to `to_node`.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    id: String,
    from_node: Option<String>,
    to_node: String,
    pub length: Real,
    /// Polyline from the upstream to the downstream end. Empty means a straight
    /// segment between the endpoint positions.
    pub vertices: Vec<Point>,
    pub class: NetworkClass,
    pub slope: Option<Real>,
}

impl Link {
    pub fn new(
        id: impl Into<String>,
        from_node: impl Into<String>,
        to_node: impl Into<String>,
        length: Real,
    ) -> Self {
        Self::from_parts(id, Some(from_node.into()), to_node, length)
    }

    /// `from_node = None` is the "unknown upstream end" sentinel.
    pub fn from_parts(
        id: impl Into<String>,
        from_node: Option<String>,
        to_node: impl Into<String>,
        length: Real,
    ) -> Self {
        Self {
            id: id.into(),
            from_node,
            to_node: to_node.into(),
            length,
            vertices: Vec::new(),
            class: NetworkClass::default(),
            slope: None,
        }
    }

    pub fn with_vertices(mut self, vertices: Vec<Point>) -> Self {
        self.vertices = vertices;
        self
    }

    pub fn with_class(mut self, class: NetworkClass) -> Self {
        self.class = class;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn from_node(&self) -> Option<&str> {
        self.from_node.as_deref()
    }

    pub fn to_node(&self) -> &str {
        &self.to_node
    }

    pub fn is_self_loop(&self) -> bool {
        self.from_node.as_deref() == Some(self.to_node.as_str())
    }
}

/// The sewer network: arena storage for nodes and links.
///
/// The network stores:
/// - All nodes and links in vectors (positions are their `NodeIdx`/`LinkIdx`).
/// - String id indexes, rebuilt eagerly on every structural change.
/// - Up/down adjacency, derived lazily and dropped on every structural change.
///
/// Links refer to their endpoints by string id, so removing nodes never rewrites
/// links; a link whose endpoint is gone simply stops resolving.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub(crate) nodes: Vec<Node>,
    pub(crate) links: Vec<Link>,
    pub(crate) node_index: IdIndex,
    pub(crate) link_index: IdIndex,
    pub(crate) adjacency: OnceCell<Adjacency>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return all nodes in arena order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return all links in arena order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIdx> + use<> {
        (0..self.nodes.len()).map(NodeIdx::from_index)
    }

    pub fn link_indices(&self) -> impl Iterator<Item = LinkIdx> + use<> {
        (0..self.links.len()).map(LinkIdx::from_index)
    }

    pub fn node(&self, idx: NodeIdx) -> Option<&Node> {
        self.nodes.get(idx.index())
    }

    /// Mutable access to the non-structural fields of a node.
    pub fn node_mut(&mut self, idx: NodeIdx) -> Option<&mut Node> {
        self.nodes.get_mut(idx.index())
    }

    pub fn link(&self, idx: LinkIdx) -> Option<&Link> {
        self.links.get(idx.index())
    }

    /// Mutable access to the non-structural fields of a link.
    pub fn link_mut(&mut self, idx: LinkIdx) -> Option<&mut Link> {
        self.links.get_mut(idx.index())
    }

    pub fn node_idx(&self, id: &str) -> Option<NodeIdx> {
        self.node_index.get(id)
    }

    pub fn link_idx(&self, id: &str) -> Option<LinkIdx> {
        self.link_index.get(id)
    }

    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.node_idx(id).and_then(|idx| self.node(idx))
    }

    pub fn link_by_id(&self, id: &str) -> Option<&Link> {
        self.link_idx(id).and_then(|idx| self.link(idx))
    }

    /// Resolve the upstream node of a link, if it is known and present.
    pub fn from_node_idx(&self, link: LinkIdx) -> Option<NodeIdx> {
        let id = self.link(link)?.from_node()?;
        self.node_idx(id)
    }

    /// Resolve the downstream node of a link, if present.
    pub fn to_node_idx(&self, link: LinkIdx) -> Option<NodeIdx> {
        self.node_idx(self.link(link)?.to_node())
    }

    fn adjacency(&self) -> &Adjacency {
        self.adjacency
            .get_or_init(|| Adjacency::build(self.nodes.len(), &self.links, &self.node_index))
    }

    /// Links flowing into `node` (its `to_node` is `node`).
    pub fn links_up(&self, node: NodeIdx) -> &[LinkIdx] {
        self.adjacency().up(node)
    }

    /// Links flowing out of `node` (its `from_node` is `node`).
    pub fn links_down(&self, node: NodeIdx) -> &[LinkIdx] {
        self.adjacency().down(node)
    }

    fn invalidate(&mut self) {
        self.adjacency = OnceCell::new();
    }

    pub fn add_node(&mut self, node: Node) -> GraphResult<NodeIdx> {
        let idx = NodeIdx::from_index(self.nodes.len());
        if !self.node_index.insert(node.id(), idx) {
            return Err(GraphError::DuplicateNodeId {
                id: node.id().to_string(),
            });
        }
        self.nodes.push(node);
        self.invalidate();
        Ok(idx)
    }

    pub fn add_link(&mut self, link: Link) -> GraphResult<LinkIdx> {
        let idx = LinkIdx::from_index(self.links.len());
        if !self.link_index.insert(link.id(), idx) {
            return Err(GraphError::DuplicateLinkId {
                id: link.id().to_string(),
            });
        }
        self.links.push(link);
        self.invalidate();
        Ok(idx)
    }

    /// Mark the upstream end of a link as unknown.
    pub fn clear_from_node(&mut self, idx: LinkIdx) {
        if let Some(link) = self.links.get_mut(idx.index()) {
            link.from_node = None;
            self.invalidate();
        }
    }

    /// Point the upstream end of a link at another node id.
    pub fn set_from_node(&mut self, idx: LinkIdx, from: impl Into<String>) {
        if let Some(link) = self.links.get_mut(idx.index()) {
            link.from_node = Some(from.into());
            self.invalidate();
        }
    }

    /// Point the downstream end of a link at another node id.
    pub fn set_to_node(&mut self, idx: LinkIdx, to: impl Into<String>) {
        if let Some(link) = self.links.get_mut(idx.index()) {
            link.to_node = to.into();
            self.invalidate();
        }
    }

    /// Keep only nodes matching `keep`. Returns the ids of removed nodes in arena order.
    ///
    /// All `NodeIdx` values obtained earlier are invalid afterwards.
    pub fn retain_nodes(&mut self, mut keep: impl FnMut(&Node) -> bool) -> Vec<String> {
        let mut removed = Vec::new();
        self.nodes.retain(|n| {
            let k = keep(n);
            if !k {
                removed.push(n.id.clone());
            }
            k
        });
        if !removed.is_empty() {
            self.reindex_nodes();
        }
        removed
    }

    /// Keep only links matching `keep`. Returns the ids of removed links in arena order.
    ///
    /// All `LinkIdx` values obtained earlier are invalid afterwards.
    pub fn retain_links(&mut self, mut keep: impl FnMut(&Link) -> bool) -> Vec<String> {
        let mut removed = Vec::new();
        self.links.retain(|l| {
            let k = keep(l);
            if !k {
                removed.push(l.id.clone());
            }
            k
        });
        if !removed.is_empty() {
            self.reindex_links();
        }
        removed
    }

    pub fn remove_node(&mut self, id: &str) -> bool {
        !self.retain_nodes(|n| n.id() != id).is_empty()
    }

    pub fn remove_link(&mut self, id: &str) -> bool {
        !self.retain_links(|l| l.id() != id).is_empty()
    }

    fn reindex_nodes(&mut self) {
        // Ids were unique before removal, so they still are.
        self.node_index = IdIndex::from_ids(self.nodes.iter().map(|n| n.id())).unwrap_or_default();
        self.invalidate();
    }

    fn reindex_links(&mut self) {
        self.link_index = IdIndex::from_ids(self.links.iter().map(|l| l.id())).unwrap_or_default();
        self.invalidate();
    }

    /// Planar geometry of a link: its own vertices, or else the straight segment
    /// between its endpoint positions. `None` if neither is available.
    pub fn link_geometry(&self, idx: LinkIdx) -> Option<Cow<'_, [Point]>> {
        let link = self.link(idx)?;
        if link.vertices.len() >= 2 {
            return Some(Cow::Borrowed(&link.vertices));
        }
        let from = self.from_node_idx(idx).and_then(|n| self.node(n)?.position)?;
        let to = self.to_node_idx(idx).and_then(|n| self.node(n)?.position)?;
        Some(Cow::Owned(vec![from, to]))
    }

    /// Copy of the network restricted to the selected nodes and links.
    ///
    /// Links are kept even if an endpoint is filtered out; such endpoints stop resolving.
    pub fn subnetwork(
        &self,
        mut keep_node: impl FnMut(&Node) -> bool,
        mut keep_link: impl FnMut(&Link) -> bool,
    ) -> Network {
        let mut sub = self.clone();
        sub.retain_nodes(|n| keep_node(n));
        sub.retain_links(|l| keep_link(l));
        sub
    }
}
