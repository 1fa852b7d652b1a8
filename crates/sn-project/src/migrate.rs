//! Schema migration framework.

use crate::ProjectError;
use crate::schema::Project;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut project: Project) -> Result<Project, ProjectError> {
    while project.version < LATEST_VERSION {
        project = migrate_one_version(project)?;
    }
    Ok(project)
}

fn migrate_one_version(project: Project) -> Result<Project, ProjectError> {
    match project.version {
        0 => migrate_v0_to_v1(project),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 files stored node types in free case ("inlet", "Outfall").
fn migrate_v0_to_v1(mut project: Project) -> Result<Project, ProjectError> {
    for node in &mut project.nodes {
        node.node_type = node.node_type.trim().to_ascii_uppercase();
    }
    project.version = 1;
    Ok(project)
}
