use crate::sbom_reporting::domain::{Project, Version};

/// What the report workflow should do for a version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobMode {
    /// Request a new report, wait for it, then download and extract it
    CreateAndDownload,
    /// Download and extract the most recent existing report
    DownloadLatest,
}

/// ReportJob - Request DTO for the report workflow use case
#[derive(Debug, Clone)]
pub struct ReportJob {
    pub project: Project,
    pub version: Version,
    pub mode: JobMode,
}

impl ReportJob {
    pub fn new(project: Project, version: Version, mode: JobMode) -> Self {
        Self {
            project,
            version,
            mode,
        }
    }

    /// Base path of the version's resources
    pub fn version_path(&self) -> String {
        format!(
            "/api/projects/{}/versions/{}",
            self.project.id, self.version.id
        )
    }

    pub fn sbom_reports_path(&self) -> String {
        format!("{}/sbom-reports", self.version_path())
    }

    pub fn reports_path(&self) -> String {
        format!("{}/reports", self.version_path())
    }

    pub fn report_path(&self, report_id: &str) -> String {
        format!("{}/reports/{}", self.version_path(), report_id)
    }

    pub fn download_path(&self, report_id: &str) -> String {
        format!("{}/download", self.report_path(report_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_paths() {
        let job = ReportJob::new(
            Project {
                id: "p-1".to_string(),
                name: "Demo".to_string(),
                description: None,
            },
            Version {
                id: "v-2".to_string(),
                version_name: "2.0".to_string(),
            },
            JobMode::CreateAndDownload,
        );

        assert_eq!(
            job.sbom_reports_path(),
            "/api/projects/p-1/versions/v-2/sbom-reports"
        );
        assert_eq!(job.reports_path(), "/api/projects/p-1/versions/v-2/reports");
        assert_eq!(
            job.download_path("r-3"),
            "/api/projects/p-1/versions/v-2/reports/r-3/download"
        );
    }
}
