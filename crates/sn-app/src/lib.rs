//! Shared application service layer for sewernet.
//!
//! Frontends go through this crate for project loading, network compilation,
//! the normalize/interpolate pipeline and run reports.

pub mod compile;
pub mod error;
pub mod pipeline;
pub mod project_service;
pub mod report;
pub mod run_service;

pub use compile::{PipelineSettings, build_network, node_kind, write_back};
pub use error::{AppError, AppResult};
pub use pipeline::{PassReport, PipelineReport, run_pipeline};
pub use project_service::{NetworkSummary, load_project, save_project, summarize, validate_project};
pub use report::{PassSummary, RunReport, compute_run_id};
pub use run_service::{RunOptions, RunResponse, process_project, run_project};
