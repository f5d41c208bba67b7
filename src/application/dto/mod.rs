/// Data Transfer Objects for application layer
///
/// DTOs carry requests into and results out of the use cases, keeping the
/// CLI front-end independent of the workflow internals.
mod report_job;
mod workflow_outcome;

pub use report_job::{JobMode, ReportJob};
pub use workflow_outcome::WorkflowOutcome;
