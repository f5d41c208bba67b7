pub mod project;
pub mod report;
pub mod report_request;
pub mod resource;

pub use project::{Project, ProjectResource, Version, VersionResource};
pub use report::{Report, ReportResource, ReportStage, ReportStatus};
pub use report_request::{DiscoveryStrategy, ReportFormat, ReportRequest, SbomType};
pub use resource::{resource_id, media_type, ResourceMeta, ResourcePage};
