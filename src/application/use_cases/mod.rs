/// Use cases module containing application business logic orchestration
mod report_workflow;
mod resolve_project;

pub use report_workflow::ReportWorkflow;
pub use resolve_project::ProjectResolver;
