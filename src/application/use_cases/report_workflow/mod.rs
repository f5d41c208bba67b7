use crate::application::dto::{JobMode, ReportJob, WorkflowOutcome};
use crate::application::pagination::collect_all;
use crate::config::WorkflowConfig;
use crate::ports::outbound::{ArchiveExtractor, ProgressReporter, ServiceSession, Waiter};
use crate::sbom_reporting::domain::{
    media_type, resource_id, DiscoveryStrategy, Report, ReportResource, ReportStage,
};
use crate::sbom_reporting::policies::local_archive_name;
use crate::sbom_reporting::services::latest_report;
use crate::shared::error::{ReportError, ServiceError};
use crate::shared::security;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;


/// ReportWorkflow - Core use case: request, wait for, download and extract an SBOM report
///
/// Runs the report lifecycle
/// `NotRequested → Requested → Generating → Ready → Downloaded → Extracted → Cleaned`
/// exactly once. Every remote call is attempted once at this level (the
/// session may retry idempotent GETs). Failures never escape as errors:
/// they are logged and returned as `WorkflowOutcome::Skipped`.
///
/// # Type Parameters
/// * `S` - ServiceSession implementation
/// * `A` - ArchiveExtractor implementation
/// * `P` - ProgressReporter implementation
/// * `W` - Waiter implementation
pub struct ReportWorkflow<'a, S: ?Sized, A, P, W> {
    session: &'a S,
    extractor: A,
    progress_reporter: P,
    waiter: W,
    config: WorkflowConfig,
}

impl<'a, S, A, P, W> ReportWorkflow<'a, S, A, P, W>
where
    S: ServiceSession + ?Sized,
    A: ArchiveExtractor,
    P: ProgressReporter,
    W: Waiter,
{
    /// Creates a new ReportWorkflow with injected dependencies
    pub fn new(
        session: &'a S,
        extractor: A,
        progress_reporter: P,
        waiter: W,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            session,
            extractor,
            progress_reporter,
            waiter,
            config,
        }
    }

    /// Executes the workflow for one project version
    pub fn execute(&self, job: &ReportJob) -> WorkflowOutcome {
        let mut stage = ReportStage::NotRequested;

        match self.run(job, &mut stage) {
            Ok((report_id, extracted_files)) => {
                self.progress_reporter.report_completion(&format!(
                    "✅ Extracted {} file(s) into {}",
                    extracted_files.len(),
                    self.config.output_dir.display()
                ));
                WorkflowOutcome::Completed {
                    report_id,
                    extracted_files,
                }
            }
            Err(error) => {
                tracing::error!("SBOM report workflow stopped ({}): {}", stage, error);
                self.progress_reporter.report_error(&format!("❌ {}", error));
                WorkflowOutcome::Skipped {
                    stage,
                    reason: error.to_string(),
                }
            }
        }
    }

    fn run(
        &self,
        job: &ReportJob,
        stage: &mut ReportStage,
    ) -> Result<(String, Vec<PathBuf>), ReportError> {
        let (report, strategy) = match job.mode {
            JobMode::CreateAndDownload => {
                let strategy = self.config.discovery;
                let baseline = match strategy {
                    DiscoveryStrategy::Latest => self.baseline_report_id(job),
                    DiscoveryStrategy::Location => None,
                };

                let report_id = self.request_report(job)?;
                advance(stage, ReportStage::Requested);

                advance(stage, ReportStage::Generating);
                let report =
                    self.wait_until_ready(job, report_id.as_deref(), baseline.as_deref())?;
                (report, strategy)
            }
            JobMode::DownloadLatest => {
                let report = self.select_latest(self.list_reports(job)?)?;
                if report.is_failed() {
                    return Err(ReportError::GenerationFailed {
                        report_id: report.id,
                    });
                }
                if !report.is_ready() {
                    return Err(ReportError::NotReady {
                        report_id: report.id,
                    });
                }
                (report, DiscoveryStrategy::Latest)
            }
        };
        advance(stage, ReportStage::Ready);

        let archive = self.download(job, &report, strategy)?;
        advance(stage, ReportStage::Downloaded);

        let extracted_files = self.extract(&archive)?;
        advance(stage, ReportStage::Extracted);

        self.cleanup(&archive);
        advance(stage, ReportStage::Cleaned);

        Ok((report.id, extracted_files))
    }

    /// Submits the report creation request
    ///
    /// # Returns
    /// The report id from the `Location` header for the `location` strategy,
    /// `None` for the `latest` strategy
    fn request_report(&self, job: &ReportJob) -> Result<Option<String>, ReportError> {
        let path = job.sbom_reports_path();
        let payload = self.config.report_request.payload();

        let response = self
            .session
            .post_json(&path, media_type::JSON, &payload)
            .inspect_err(|e| {
                tracing::error!(
                    "Error occurred while sending the request to create SBOM report: {}",
                    e
                )
            })?;

        if !response.is_success() {
            let body = response.text();
            tracing::error!(
                "HTTP error occurred while creating SBOM report: HTTP {}",
                response.status
            );
            tracing::error!("Error response content: {}", body);
            return Err(ReportError::RequestRejected {
                status: response.status,
                body,
            });
        }

        let report_id = match self.config.discovery {
            DiscoveryStrategy::Location => {
                let report_id = response
                    .header("location")
                    .and_then(resource_id)
                    .map(str::to_string)
                    .ok_or(ReportError::MissingLocation)?;
                tracing::info!("Report_id : {}", report_id);
                Some(report_id)
            }
            DiscoveryStrategy::Latest => {
                tracing::info!(
                    "SBOM report requested for {} {}",
                    job.project.name,
                    job.version.version_name
                );
                None
            }
        };

        self.progress_reporter
            .report("⏳ Please wait, SBOM report generating...");
        Ok(report_id)
    }

    /// Polls with bounded exponential backoff until the report is ready
    fn wait_until_ready(
        &self,
        job: &ReportJob,
        report_id: Option<&str>,
        baseline: Option<&str>,
    ) -> Result<Report, ReportError> {
        let total_secs = self.config.poll.timeout().as_secs() as usize;
        let mut waited = Duration::ZERO;

        for delay in self.config.poll.schedule() {
            self.waiter.wait(delay);
            waited += delay;
            self.progress_reporter.report_progress(
                waited.as_secs() as usize,
                total_secs,
                Some("waiting for report generation"),
            );

            match self.check_readiness(job, report_id, baseline)? {
                Some(report) if report.is_failed() => {
                    return Err(ReportError::GenerationFailed {
                        report_id: report.id,
                    });
                }
                Some(report) if report.is_ready() => {
                    tracing::info!("Report {} is ready after {}s", report.id, waited.as_secs());
                    return Ok(report);
                }
                Some(report) => {
                    tracing::debug!("Report {} still generating: {:?}", report.id, report.status)
                }
                None => tracing::debug!("Report not available yet"),
            }
        }

        tracing::warn!("Gave up waiting for the report after {}s", waited.as_secs());
        Err(ReportError::TimedOut {
            waited_secs: waited.as_secs(),
        })
    }

    /// Current state of the requested report, `None` while it cannot be found
    fn check_readiness(
        &self,
        job: &ReportJob,
        report_id: Option<&str>,
        baseline: Option<&str>,
    ) -> Result<Option<Report>, ReportError> {
        if let Some(report_id) = report_id {
            return self.fetch_report(job, report_id);
        }

        match self.select_latest(self.list_reports(job)?) {
            Ok(report) if Some(report.id.as_str()) == baseline => Ok(None),
            Ok(report) => Ok(Some(report)),
            Err(ReportError::NoReports | ReportError::MissingTimestamps) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Id of the newest report before a new one is requested, so the
    /// `latest` strategy does not mistake an old report for the new one.
    fn baseline_report_id(&self, job: &ReportJob) -> Option<String> {
        let reports = match self.list_reports(job) {
            Ok(reports) => reports,
            Err(e) => {
                tracing::debug!("Could not list existing reports: {}", e);
                return None;
            }
        };
        latest_report(&reports).map(|report| report.id.clone())
    }

    fn fetch_report(
        &self,
        job: &ReportJob,
        report_id: &str,
    ) -> Result<Option<Report>, ReportError> {
        let path = job.report_path(report_id);
        let response = self.session.get(&path, media_type::REPORT)?;

        if response.status == 404 {
            return Ok(None);
        }

        let resource: ReportResource = response.error_for_status(&path)?.json(&path)?;
        tracing::debug!("Report metadata: {:?}", resource);
        Ok(resource.into_report(Some(report_id)))
    }

    fn list_reports(&self, job: &ReportJob) -> Result<Vec<Report>, ReportError> {
        let path = job.reports_path();
        let resources: Vec<ReportResource> =
            match collect_all(self.session, &path, media_type::REPORT) {
                Ok(resources) => resources,
                Err(ServiceError::UnexpectedStatus { status: 404, .. }) => Vec::new(),
                Err(e) => return Err(e.into()),
            };

        let reports: Vec<Report> = resources
            .into_iter()
            .filter_map(|resource| resource.into_report(None))
            .collect();
        tracing::debug!("Retrieved {} report(s)", reports.len());
        Ok(reports)
    }

    fn select_latest(&self, reports: Vec<Report>) -> Result<Report, ReportError> {
        if reports.is_empty() {
            return Err(ReportError::NoReports);
        }
        latest_report(&reports)
            .cloned()
            .ok_or(ReportError::MissingTimestamps)
    }

    /// Downloads the report archive into the output directory
    fn download(
        &self,
        job: &ReportJob,
        report: &Report,
        strategy: DiscoveryStrategy,
    ) -> Result<PathBuf, ReportError> {
        let file_name = report
            .file_name
            .as_deref()
            .and_then(|name| local_archive_name(name, strategy))
            .ok_or_else(|| ReportError::MissingFileName {
                report_id: report.id.clone(),
            })?;

        self.progress_reporter.report("⬇️  Starting download...");
        let response = self
            .session
            .get(&job.download_path(&report.id), media_type::ZIP)?;

        if !response.is_success() {
            let body = response.text();
            tracing::error!(
                "HTTP error occurred while downloading report: HTTP {}",
                response.status
            );
            return Err(ReportError::DownloadFailed {
                status: response.status,
                body,
            });
        }
        if response.body.is_empty() {
            return Err(ReportError::EmptyDownload);
        }

        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir).map_err(|e| ReportError::Io {
            path: output_dir.clone(),
            details: e.to_string(),
        })?;

        let archive_path = output_dir.join(&file_name);
        security::validate_not_symlink(&archive_path, "write").map_err(|e| ReportError::Io {
            path: archive_path.clone(),
            details: e.to_string(),
        })?;
        fs::write(&archive_path, &response.body).map_err(|e| ReportError::Io {
            path: archive_path.clone(),
            details: e.to_string(),
        })?;

        tracing::info!(
            "SBOM report created successfully. Report filename: {}",
            file_name
        );
        self.progress_reporter.report(&format!(
            "Report downloaded successfully as '{}'.",
            archive_path.display()
        ));
        Ok(archive_path)
    }

    fn extract(&self, archive_path: &Path) -> Result<Vec<PathBuf>, ReportError> {
        self.extractor
            .flatten(archive_path, &self.config.output_dir)
            .map_err(|e| {
                tracing::warn!("Keeping {} for inspection", archive_path.display());
                ReportError::from(e)
            })
    }

    /// Removes the downloaded archive; failures only warn
    fn cleanup(&self, archive_path: &Path) {
        match fs::remove_file(archive_path) {
            Ok(()) => tracing::info!("Removed {}", archive_path.display()),
            Err(e) => tracing::warn!("Failed to remove {}: {}", archive_path.display(), e),
        }
    }
}

fn advance(stage: &mut ReportStage, next: ReportStage) {
    tracing::debug!("Report stage: {} -> {}", stage, next);
    *stage = next;
}
