use crate::sbom_reporting::domain::ReportStage;
use std::path::PathBuf;

/// WorkflowOutcome - Result DTO of one report workflow run
///
/// A skipped run is not an error for the process: the deliverable is simply
/// absent and the reason has already been logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    Completed {
        report_id: String,
        extracted_files: Vec<PathBuf>,
    },
    Skipped {
        /// Last stage the run reached before it stopped
        stage: ReportStage,
        reason: String,
    },
}

impl WorkflowOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, WorkflowOutcome::Completed { .. })
    }

    pub fn extracted_files(&self) -> &[PathBuf] {
        match self {
            WorkflowOutcome::Completed {
                extracted_files, ..
            } => extracted_files,
            WorkflowOutcome::Skipped { .. } => &[],
        }
    }
}
