use clap::{Parser, Subcommand};
use sn_app::{AppResult, RunOptions, project_service, run_service};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sewernet")]
#[command(about = "Sewernet CLI - sewer network normalization and invert interpolation", long_about = None)]
struct Cli {
    /// Log every diagnostic (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project file (.yaml, .yml or .json)
        project_path: PathBuf,
    },
    /// Show node and link counts of a project
    Summary {
        /// Path to the project file (.yaml, .yml or .json)
        project_path: PathBuf,
    },
    /// Normalize the network and interpolate missing inverts
    Run {
        /// Path to the project file (.yaml, .yml or .json)
        project_path: PathBuf,
        /// Where to write the processed project; the extension picks the format
        #[arg(short, long)]
        output: PathBuf,
        /// Also write a JSON run report
        #[arg(short, long)]
        report: Option<PathBuf>,
        /// Keep links and nodes that are not connected
        #[arg(long)]
        no_prune: bool,
        /// Interpolate on the full network only, without the primary pass
        #[arg(long)]
        single_pass: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Summary { project_path } => cmd_summary(&project_path),
        Commands::Run {
            project_path,
            output,
            report,
            no_prune,
            single_pass,
        } => cmd_run(
            &project_path,
            &output,
            report.as_deref(),
            RunOptions {
                no_prune,
                single_pass,
            },
        ),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_summary(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let summary = project_service::summarize(&project)?;

    println!("Project: {}", summary.name);
    println!(
        "  Nodes: {} ({} inlets, {} outfalls, {} primary)",
        summary.node_count, summary.inlet_count, summary.outfall_count, summary.primary_nodes
    );
    println!(
        "  Links: {} ({} primary)",
        summary.link_count, summary.primary_links
    );
    println!("  Missing inverts: {}", summary.missing_inverts);
    if summary.topology_violations > 0 {
        println!(
            "  Topology violations: {} (repaired by `run`)",
            summary.topology_violations
        );
    }
    Ok(())
}

fn cmd_run(
    project_path: &Path,
    output: &Path,
    report_path: Option<&Path>,
    options: RunOptions,
) -> AppResult<()> {
    println!("Processing project: {}", project_path.display());

    let response = run_service::run_project(project_path, output, report_path, options)?;
    let report = &response.report;

    for pass in &report.passes {
        println!("Pass: {}", pass.name);
        println!(
            "  Normalized: {} links pruned, {} nodes deleted, {} links split, {} outfalls",
            pass.links_pruned, pass.nodes_deleted, pass.links_split, pass.outfalls
        );
        if pass.ambiguous_inlets > 0 {
            println!("  Ambiguous inlets skipped: {}", pass.ambiguous_inlets);
        }
        println!(
            "  Inverts: {} interpolated, {} unresolved, {} clamped to minimum depth",
            pass.elevations_interpolated,
            pass.elevations_unresolved.len(),
            pass.min_depth_clamped
        );
        println!(
            "  Slopes: {} computed, {} negative, {} skipped",
            pass.slopes_computed,
            pass.negative_slopes.len(),
            pass.slopes_skipped
        );
    }

    println!("✓ Run {} written to {}", short_id(&report.run_id), output.display());
    if let Some(path) = report_path {
        println!("  Report: {}", path.display());
    }
    if report.warning_count() > 0 {
        println!("  {} warnings (see report or --verbose)", report.warning_count());
    }
    Ok(())
}

fn short_id(run_id: &str) -> &str {
    run_id.get(..12).unwrap_or(run_id)
}
