//! bd-sbom - SBOM report retrieval for Black Duck project versions
//!
//! This library resolves a project and version on a Black Duck server,
//! requests an SBOM report for it, waits for the report to be generated,
//! downloads the resulting ZIP archive and flattens it into a directory.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_reporting`): Resources, report lifecycle and polling policy
//! - **Application Layer** (`application`): Project resolution and the report workflow
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): HTTP session, ZIP flattener and console output
//! - **Shared** (`shared`): Error types and file-safety helpers
//!
//! # Example
//!
//! ```no_run
//! use bd_sbom::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let config = AppConfig::build(
//!     None,
//!     ConfigOverrides {
//!         base_url: Some("https://blackduck.example.com".to_string()),
//!         ..Default::default()
//!     },
//! )?;
//! let session = BlackDuckSession::connect(&config.service, "api-token")?;
//!
//! let resolver = ProjectResolver::new(&session);
//! let project = resolver.find_project("my-project")?;
//! let version = resolver.resolve_version(&project, None)?;
//!
//! let workflow = ReportWorkflow::new(
//!     &session,
//!     ZipFlattener::new(),
//!     StderrProgressReporter::new(),
//!     ThreadWaiter,
//!     config.workflow,
//! );
//! let outcome = workflow.execute(&ReportJob::new(project, version, JobMode::CreateAndDownload));
//! println!("{:?}", outcome.extracted_files());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod logging;
pub mod ports;
pub mod sbom_reporting;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{StderrProgressReporter, ThreadWaiter};
    pub use crate::adapters::outbound::filesystem::ZipFlattener;
    pub use crate::adapters::outbound::network::BlackDuckSession;
    pub use crate::application::dto::{JobMode, ReportJob, WorkflowOutcome};
    pub use crate::application::use_cases::{ProjectResolver, ReportWorkflow};
    pub use crate::config::{AppConfig, ConfigOverrides, ServiceConfig, WorkflowConfig};
    pub use crate::ports::outbound::{
        ApiResponse, ArchiveExtractor, ProgressReporter, ServiceSession, Waiter,
    };
    pub use crate::sbom_reporting::domain::{
        DiscoveryStrategy, Project, Report, ReportFormat, ReportRequest, ReportStage,
        ReportStatus, SbomType, Version,
    };
    pub use crate::sbom_reporting::policies::PollPolicy;
    pub use crate::shared::error::{
        ArchiveError, ExitCode, ReportError, ResolveError, ServiceError,
    };
    pub use crate::shared::Result;
}
