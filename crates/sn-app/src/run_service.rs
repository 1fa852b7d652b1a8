//! End-to-end runs: load, process, write.

use std::path::Path;

use sn_project::{LATEST_VERSION, Project};

use crate::compile::{PipelineSettings, build_network, write_back};
use crate::error::AppResult;
use crate::pipeline::run_pipeline;
use crate::project_service::{load_project, save_project};
use crate::report::RunReport;

/// Overrides of the project's own settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub no_prune: bool,
    pub single_pass: bool,
}

#[derive(Debug)]
pub struct RunResponse {
    pub project: Project,
    pub report: RunReport,
}

/// Process `project` in memory.
pub fn process_project(input: &Project, options: RunOptions) -> AppResult<RunResponse> {
    let mut settings_def = input.settings.clone();
    if options.no_prune {
        settings_def.prune_disconnected = false;
    }
    if options.single_pass {
        settings_def.primary_first = false;
    }
    let settings = PipelineSettings::from_def(&settings_def)?;

    let mut network = build_network(input)?;
    let pipeline = run_pipeline(&mut network, &settings)?;

    let mut project = input.clone();
    project.version = LATEST_VERSION;
    project.settings = settings_def.clone();
    write_back(&mut project, &network);

    let report = RunReport::new(input, settings_def, &pipeline);
    Ok(RunResponse { project, report })
}

/// Load `input`, process it and write the result to `output` (and the report, if asked).
pub fn run_project(
    input: &Path,
    output: &Path,
    report_path: Option<&Path>,
    options: RunOptions,
) -> AppResult<RunResponse> {
    let project = load_project(input)?;
    let response = process_project(&project, options)?;
    save_project(output, &response.project)?;
    if let Some(path) = report_path {
        response.report.save(path)?;
    }
    tracing::info!(
        run_id = %response.report.run_id,
        output = %output.display(),
        "run written"
    );
    Ok(response)
}
