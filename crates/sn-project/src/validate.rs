//! Project validation logic.
//!
//! Only what would make the file unusable is rejected here. Broken references
//! between nodes and links are left for normalization to repair or prune.

use crate::schema::{LinkDef, NodeDef, Project, SettingsDef};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    validate_settings(&project.settings)?;

    let mut node_ids = HashSet::new();
    for node in &project.nodes {
        if !node_ids.insert(&node.id) {
            return Err(ValidationError::DuplicateId {
                id: node.id.clone(),
                context: "nodes".to_string(),
            });
        }
        validate_node(node)?;
    }

    let mut link_ids = HashSet::new();
    for link in &project.links {
        if !link_ids.insert(&link.id) {
            return Err(ValidationError::DuplicateId {
                id: link.id.clone(),
                context: "links".to_string(),
            });
        }
        validate_link(link)?;
    }

    Ok(())
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_settings(settings: &SettingsDef) -> Result<(), ValidationError> {
    if !settings.mean_slope.is_finite() || settings.mean_slope < 0.0 {
        return Err(invalid(
            "settings.mean_slope",
            settings.mean_slope,
            "must be finite and non-negative",
        ));
    }
    for (field, value) in [
        ("settings.mean_depth_m", settings.mean_depth_m),
        ("settings.min_depth_m", settings.min_depth_m),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid(field, value, "must be positive"));
        }
    }
    if !settings.snap_tolerance_m.is_finite() || settings.snap_tolerance_m < 0.0 {
        return Err(invalid(
            "settings.snap_tolerance_m",
            settings.snap_tolerance_m,
            "must be finite and non-negative",
        ));
    }
    if settings.inlet_kind.trim().is_empty() {
        return Err(invalid("settings.inlet_kind", "", "must not be empty"));
    }
    Ok(())
}

fn validate_node(node: &NodeDef) -> Result<(), ValidationError> {
    if node.id.is_empty() {
        return Err(invalid("node.id", "", "must not be empty"));
    }
    for (name, value) in [
        ("rim_elevation", node.rim_elevation),
        ("invert_elevation", node.invert_elevation),
        ("x", node.x),
        ("y", node.y),
    ] {
        if let Some(v) = value.filter(|v| !v.is_finite()) {
            return Err(invalid(format!("{}.{}", node.id, name), v, "must be finite"));
        }
    }
    if node.x.is_some() != node.y.is_some() {
        return Err(invalid(
            format!("{}.x/y", node.id),
            format!("{:?}/{:?}", node.x, node.y),
            "coordinates must be given together",
        ));
    }
    Ok(())
}

fn validate_link(link: &LinkDef) -> Result<(), ValidationError> {
    if link.id.is_empty() {
        return Err(invalid("link.id", "", "must not be empty"));
    }
    if !link.length.is_finite() || link.length <= 0.0 {
        return Err(invalid(format!("{}.length", link.id), link.length, "must be positive"));
    }
    if link.vertices.iter().flatten().any(|c| !c.is_finite()) {
        return Err(invalid(
            format!("{}.vertices", link.id),
            format!("{:?}", link.vertices),
            "must be finite",
        ));
    }
    Ok(())
}
