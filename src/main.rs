mod cli;

use bd_sbom::adapters::outbound::console::{StderrProgressReporter, ThreadWaiter};
use bd_sbom::adapters::outbound::filesystem::ZipFlattener;
use bd_sbom::adapters::outbound::network::BlackDuckSession;
use bd_sbom::application::dto::{JobMode, ReportJob, WorkflowOutcome};
use bd_sbom::application::use_cases::{ProjectResolver, ReportWorkflow};
use bd_sbom::config::{self, AppConfig, ConfigFile};
use bd_sbom::logging;
use bd_sbom::shared::error::ExitCode;
use bd_sbom::shared::Result;
use cli::Args;
use std::process;

fn main() {
    let args = Args::parse_args();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::FatalError.as_i32());
    }
}

fn run(args: Args) -> Result<()> {
    let config = AppConfig::build(load_config_file(&args)?, args.overrides())?;
    tracing::debug!("Configuration: {:?}", config);

    let session = BlackDuckSession::connect(&config.service, &args.api_token)?;
    let resolver = ProjectResolver::new(&session);

    if args.create_project {
        resolver.create_project(&args.project_name, args.description.as_deref())?;
        return Ok(());
    }

    let project = resolver.find_project(&args.project_name)?;
    let version = resolver.resolve_version(&project, args.version.as_deref())?;

    if !args.wants_report() {
        tracing::info!("Nothing to do: pass --create_report or --download_report");
        return Ok(());
    }

    let mode = if args.create_report {
        JobMode::CreateAndDownload
    } else {
        JobMode::DownloadLatest
    };

    let workflow = ReportWorkflow::new(
        &session,
        ZipFlattener::new(),
        StderrProgressReporter::new(),
        ThreadWaiter,
        config.workflow,
    );

    match workflow.execute(&ReportJob::new(project, version, mode)) {
        WorkflowOutcome::Completed {
            report_id,
            extracted_files,
        } => {
            for file in &extracted_files {
                tracing::debug!("Extracted {}", file.display());
            }
            tracing::info!("Report {} processed", report_id);
        }
        WorkflowOutcome::Skipped { stage, reason } => {
            tracing::warn!("No SBOM was produced (stopped at {}): {}", stage, reason);
        }
    }

    Ok(())
}

/// Reads `--config` when given, otherwise looks for the default file in the
/// working directory
fn load_config_file(args: &Args) -> Result<Option<ConfigFile>> {
    match &args.config {
        Some(path) => config::load_config_from_path(path).map(Some),
        None => {
            let cwd = std::env::current_dir()?;
            config::discover_config(&cwd)
        }
    }
}
