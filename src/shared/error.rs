use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Soft failures of the report pipeline still exit with `Success`; callers
/// check for the extracted SBOM files instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success, including runs where the report pipeline was skipped
    Success = 0,
    /// Fatal failure: connection, authentication, project or version resolution
    FatalError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::FatalError => write!(f, "Fatal Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Errors raised while talking to the composition-analysis server.
///
/// Non-2xx responses are not errors at the session level; they only become
/// `UnexpectedStatus` where a caller decides the status is unacceptable.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Failed to connect to {url}\nDetails: {details}\n\n💡 Hint: Check the server URL and your network connection")]
    Connection { url: String, details: String },

    #[error("Authentication rejected by {url} (HTTP {status}): {body}\n\n💡 Hint: Verify that the API token is valid and has not expired")]
    Authentication {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Request to {path} failed: {details}")]
    Transport { path: String, details: String },

    #[error("Unexpected response from {path} (HTTP {status}): {body}")]
    UnexpectedStatus {
        path: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode response from {path}: {details}")]
    Decode { path: String, details: String },
}

/// Fatal failures while resolving the project and version a run works on.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Project '{name}' could not be created (HTTP {status}): {body}")]
    ProjectCreationRejected {
        name: String,
        status: u16,
        body: String,
    },

    #[error("Project '{name}' not found.\n\n💡 Hint: Project names are matched exactly; use --create_project to create it")]
    ProjectNotFound { name: String },

    #[error("No versions found for project '{project}'")]
    NoVersions { project: String },

    #[error("Version '{version}' not found in project '{project}'")]
    VersionNotFound { project: String, version: String },

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Failures of the report pipeline. These never abort the process.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report creation rejected (HTTP {status}): {body}")]
    RequestRejected { status: u16, body: String },

    #[error("Report creation response did not carry a usable Location header")]
    MissingLocation,

    #[error("Report {report_id} failed to generate on the server")]
    GenerationFailed { report_id: String },

    #[error("Report {report_id} is not ready yet")]
    NotReady { report_id: String },

    #[error("Timed out after {waited_secs}s waiting for the report to be generated")]
    TimedOut { waited_secs: u64 },

    #[error("No reports found for this version")]
    NoReports,

    #[error("None of the reports for this version carries a creation timestamp")]
    MissingTimestamps,

    #[error("Report {report_id} has no usable file name")]
    MissingFileName { report_id: String },

    #[error("Download failed (HTTP {status}): {body}")]
    DownloadFailed { status: u16, body: String },

    #[error("Download failed: no content in the response")]
    EmptyDownload,

    #[error("Failed to write {path}: {details}")]
    Io { path: PathBuf, details: String },

    #[error(transparent)]
    Extraction(#[from] ArchiveError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Failures while flattening a report archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("{path} is not a valid ZIP archive: {details}")]
    InvalidArchive { path: PathBuf, details: String },

    #[error("Security: {path} is too large ({size} bytes). Maximum allowed size is {max} bytes.")]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Security violation: {path}\nReason: {reason}")]
    Security { path: PathBuf, reason: String },

    #[error("Error during extraction of {path}: {details}")]
    Io { path: PathBuf, details: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::FatalError.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(format!("{}", ExitCode::FatalError), "Fatal Error (1)");
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
    }

    #[test]
    fn test_project_not_found_display() {
        let error = ResolveError::ProjectNotFound {
            name: "Demo".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Project 'Demo' not found"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_request_rejected_includes_body() {
        let error = ReportError::RequestRejected {
            status: 403,
            body: "{\"errorMessage\":\"forbidden\"}".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("403"));
        assert!(display.contains("forbidden"));
    }

    #[test]
    fn test_service_error_is_transparent_in_resolve_error() {
        let error: ResolveError = ServiceError::Transport {
            path: "/api/projects".to_string(),
            details: "connection reset".to_string(),
        }
        .into();
        assert_eq!(
            format!("{}", error),
            "Request to /api/projects failed: connection reset"
        );
    }

    #[test]
    fn test_archive_error_wraps_into_report_error() {
        let error: ReportError = ArchiveError::InvalidArchive {
            path: PathBuf::from("report.zip"),
            details: "invalid Zip archive".to_string(),
        }
        .into();
        assert!(format!("{}", error).contains("report.zip is not a valid ZIP archive"));
    }
}
