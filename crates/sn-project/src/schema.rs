//! Project schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub settings: SettingsDef,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub links: Vec<LinkDef>,
}

/// Processing parameters. Every field has a default, so the block may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SettingsDef {
    pub mean_slope: f64,
    pub mean_depth_m: f64,
    pub min_depth_m: f64,
    pub snap_tolerance_m: f64,
    /// Node type label that marks inlets.
    pub inlet_kind: String,
    pub prune_disconnected: bool,
    /// Interpolate on the primary network before the full network.
    pub primary_first: bool,
    pub interpolation_tag: String,
}

impl Default for SettingsDef {
    fn default() -> Self {
        Self {
            mean_slope: 0.01,
            mean_depth_m: 1.0,
            min_depth_m: 0.3,
            snap_tolerance_m: 0.1,
            inlet_kind: "INLET".to_string(),
            prune_disconnected: true,
            primary_first: true,
            interpolation_tag: "sk_interpolated".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClassDef {
    Primary,
    #[default]
    Secondary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub id: String,
    /// Free label; `settings.inlet_kind` marks inlets, "OUTFALL" marks outfalls.
    #[serde(default = "default_node_type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rim_elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert_elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_link_ref: Option<String>,
    #[serde(default)]
    pub class: ClassDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outfall_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

pub const JUNCTION: &str = "JUNCTION";
pub const OUTFALL: &str = "OUTFALL";
pub const FREE: &str = "FREE";

fn default_node_type() -> String {
    JUNCTION.to_string()
}

impl NodeDef {
    /// A junction with nothing but an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: default_node_type(),
            rim_elevation: None,
            invert_elevation: None,
            x: None,
            y: None,
            inline_link_ref: None,
            class: ClassDef::default(),
            outfall_type: None,
            max_depth: None,
            tag: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkDef {
    pub id: String,
    /// Missing when the upstream end is unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_node: Option<String>,
    pub to_node: String,
    pub length: f64,
    /// Polyline `[x, y]` pairs from upstream to downstream.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vertices: Vec<[f64; 2]>,
    #[serde(default)]
    pub class: ClassDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slope: Option<f64>,
}

impl LinkDef {
    pub fn new(
        id: impl Into<String>,
        from_node: impl Into<String>,
        to_node: impl Into<String>,
        length: f64,
    ) -> Self {
        Self {
            id: id.into(),
            from_node: Some(from_node.into()),
            to_node: to_node.into(),
            length,
            vertices: Vec::new(),
            class: ClassDef::default(),
            slope: None,
        }
    }
}
