//! Conversion between the project file and the in-memory network.

use std::collections::HashMap;

use sn_core::{Point, m, unitless};
use sn_graph::{Link, Network, NetworkBuilder, NetworkClass, Node, NodeKind, OutfallType};
use sn_invert::InterpolationSettings;
use sn_project::{ClassDef, FREE, LinkDef, NodeDef, OUTFALL, Project, SettingsDef};
use sn_topology::NormalizeOptions;

use crate::error::AppResult;

/// Typed processing settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub normalize: NormalizeOptions,
    pub interpolation: InterpolationSettings,
    pub primary_first: bool,
}

impl PipelineSettings {
    /// Typed settings, checked before any processing.
    pub fn from_def(def: &SettingsDef) -> AppResult<Self> {
        let settings = Self {
            normalize: NormalizeOptions {
                prune_disconnected: def.prune_disconnected,
                snap_tolerance: m(def.snap_tolerance_m),
            },
            interpolation: InterpolationSettings {
                mean_slope: unitless(def.mean_slope),
                mean_depth: m(def.mean_depth_m),
                min_depth: m(def.min_depth_m),
                tag: def.interpolation_tag.clone(),
            },
            primary_first: def.primary_first,
        };
        settings.normalize.validate()?;
        settings.interpolation.validate()?;
        Ok(settings)
    }
}

/// Model kind for a node type label. Labels compare case-insensitively.
pub fn node_kind(node_type: &str, inlet_kind: &str) -> NodeKind {
    let label = node_type.trim();
    if label.eq_ignore_ascii_case(inlet_kind.trim()) {
        NodeKind::Inlet
    } else if label.eq_ignore_ascii_case(OUTFALL) {
        NodeKind::Outfall
    } else {
        NodeKind::Junction
    }
}

fn class(def: ClassDef) -> NetworkClass {
    match def {
        ClassDef::Primary => NetworkClass::Primary,
        ClassDef::Secondary => NetworkClass::Secondary,
    }
}

fn class_def(class: NetworkClass) -> ClassDef {
    match class {
        NetworkClass::Primary => ClassDef::Primary,
        NetworkClass::Secondary => ClassDef::Secondary,
    }
}

/// Build the network from the project tables.
pub fn build_network(project: &Project) -> AppResult<Network> {
    let inlet_kind = &project.settings.inlet_kind;
    let mut builder = NetworkBuilder::new();

    for def in &project.nodes {
        let mut node = Node::new(&def.id, node_kind(&def.node_type, inlet_kind)).with_class(class(def.class));
        if let (Some(x), Some(y)) = (def.x, def.y) {
            node = node.at(x, y);
        }
        node.invert_elevation = def.invert_elevation;
        node.rim_elevation = def.rim_elevation;
        node.inline_link_ref = def.inline_link_ref.clone();
        node.outfall_type = def
            .outfall_type
            .as_deref()
            .filter(|t| t.eq_ignore_ascii_case(FREE))
            .map(|_| OutfallType::Free);
        node.max_depth = def.max_depth;
        node.tag = def.tag.clone();
        builder.add_node(node);
    }

    for def in &project.links {
        let mut link = Link::from_parts(&def.id, def.from_node.clone(), &def.to_node, def.length)
            .with_vertices(def.vertices.iter().map(|&[x, y]| Point::new(x, y)).collect())
            .with_class(class(def.class));
        link.slope = def.slope;
        builder.add_link(link);
    }

    Ok(builder.build()?)
}

/// Replace the project's tables with the network's state.
///
/// Nodes keep their original type label unless they became outfalls. Links are
/// rewritten from scratch, since splitting replaces them.
pub fn write_back(project: &mut Project, network: &Network) {
    let mut originals: HashMap<String, NodeDef> =
        project.nodes.drain(..).map(|n| (n.id.clone(), n)).collect();

    project.nodes = network
        .nodes()
        .iter()
        .map(|node| {
            let mut def = originals
                .remove(node.id())
                .unwrap_or_else(|| NodeDef::new(node.id()));
            if node.kind == NodeKind::Outfall {
                def.node_type = OUTFALL.to_string();
            }
            def.outfall_type = match node.outfall_type {
                Some(OutfallType::Free) => Some(FREE.to_string()),
                None => None,
            };
            def.invert_elevation = node.invert_elevation;
            def.rim_elevation = node.rim_elevation;
            def.x = node.position.map(|p| p.x);
            def.y = node.position.map(|p| p.y);
            def.inline_link_ref = node.inline_link_ref.clone();
            def.class = class_def(node.class);
            def.max_depth = node.max_depth;
            def.tag = node.tag.clone();
            def
        })
        .collect();

    project.links = network
        .links()
        .iter()
        .map(|link| LinkDef {
            id: link.id().to_string(),
            from_node: link.from_node().map(str::to_string),
            to_node: link.to_node().to_string(),
            length: link.length,
            vertices: link.vertices.iter().map(|p| [p.x, p.y]).collect(),
            class: class_def(link.class),
            slope: link.slope,
        })
        .collect();
}
