//! Run reports.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sn_core::Diagnostic;
use sn_project::{Project, SettingsDef};

use crate::error::{AppError, AppResult};
use crate::pipeline::{PassReport, PipelineReport};

/// Counts of one pipeline pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PassSummary {
    pub name: String,
    pub self_loops_repaired: usize,
    pub links_pruned: usize,
    pub nodes_deleted: usize,
    pub links_split: usize,
    pub inlets_off_network: usize,
    pub ambiguous_inlets: usize,
    pub outfalls: usize,
    pub elevations_interpolated: usize,
    pub elevations_unresolved: Vec<String>,
    pub rim_fallbacks: usize,
    pub min_depth_clamped: usize,
    pub monotonicity_adjusted: usize,
    pub slopes_computed: usize,
    pub negative_slopes: Vec<String>,
    pub slopes_skipped: usize,
}

impl PassSummary {
    fn new(name: &str, pass: &PassReport) -> Self {
        let n = &pass.normalize;
        let i = &pass.interpolation;
        let s = &pass.slopes;
        Self {
            name: name.to_string(),
            self_loops_repaired: n.self_loops_repaired.len(),
            links_pruned: n.links_pruned.len(),
            nodes_deleted: n.nodes_deleted(),
            links_split: n.links_split.len(),
            inlets_off_network: n.inlets_off_network.len(),
            ambiguous_inlets: n.ambiguous_inlets.len(),
            outfalls: n.outfalls.len(),
            elevations_interpolated: i.interpolated.len(),
            elevations_unresolved: i.unresolved.clone(),
            rim_fallbacks: i.rim_fallbacks(),
            min_depth_clamped: i.min_depth_clamped(),
            monotonicity_adjusted: i.monotonicity_adjusted(),
            slopes_computed: s.computed,
            negative_slopes: s.negative.clone(),
            slopes_skipped: s.skipped.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Content hash of the input project.
    pub run_id: String,
    pub created_at: String,
    pub project: String,
    pub settings: SettingsDef,
    pub passes: Vec<PassSummary>,
    pub nodes_with_depth: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// SHA-256 over the serialized input project (tables and settings).
pub fn compute_run_id(project: &Project) -> String {
    let mut hasher = Sha256::new();
    let project_json = serde_json::to_string(project).unwrap_or_default();
    hasher.update(project_json.as_bytes());
    hasher.update(env!("CARGO_PKG_VERSION").as_bytes());
    format!("{:x}", hasher.finalize())
}

impl RunReport {
    pub fn new(input: &Project, settings: SettingsDef, pipeline: &PipelineReport) -> Self {
        let mut passes = Vec::new();
        let mut diagnostics = Vec::new();
        let named = pipeline
            .primary
            .iter()
            .map(|p| ("primary", p))
            .chain(std::iter::once(("full", &pipeline.full)));
        for (name, pass) in named {
            passes.push(PassSummary::new(name, pass));
            for diags in [
                &pass.normalize.diagnostics,
                &pass.interpolation.diagnostics,
                &pass.slopes.diagnostics,
            ] {
                diagnostics.extend_from_slice(diags.events());
            }
        }

        Self {
            run_id: compute_run_id(input),
            created_at: chrono::Utc::now().to_rfc3339(),
            project: input.name.clone(),
            settings,
            passes,
            nodes_with_depth: pipeline.nodes_with_depth,
            diagnostics,
        }
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == sn_core::Level::Warning)
            .count()
    }

    /// Write the report as pretty JSON.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Project(format!("Failed to serialize report: {}", e)))?;
        std::fs::write(path, content).map_err(|e| AppError::ReportWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }
}
