use super::resource::ResourceMeta;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// Generation status reported by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    InProgress,
    Completed,
    Failed,
    Other(String),
}

impl From<&str> for ReportStatus {
    fn from(value: &str) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "IN_PROGRESS" => ReportStatus::InProgress,
            "COMPLETED" => ReportStatus::Completed,
            "FAILED" => ReportStatus::Failed,
            _ => ReportStatus::Other(value.to_string()),
        }
    }
}

/// Report metadata as returned by the report endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResource {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "_meta", default)]
    pub meta: Option<ResourceMeta>,
}

impl ReportResource {
    /// Converts into a `Report`
    ///
    /// The id comes from the resource link; `known_id` is used when the
    /// server omits `_meta` (e.g. when the report was fetched by id).
    pub fn into_report(self, known_id: Option<&str>) -> Option<Report> {
        let id = self
            .meta
            .as_ref()
            .and_then(|meta| meta.id())
            .or(known_id)?
            .to_string();

        Some(Report {
            id,
            file_name: self.file_name,
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
            status: self.status.as_deref().map(ReportStatus::from),
        })
    }
}

/// A server-side report tied to one project version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub id: String,
    pub file_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub status: Option<ReportStatus>,
}

impl Report {
    /// A report is ready once it completed, or when the server reports no
    /// status at all but already names the produced file.
    pub fn is_ready(&self) -> bool {
        match &self.status {
            Some(ReportStatus::Completed) => true,
            None => self.file_name.is_some(),
            _ => false,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, Some(ReportStatus::Failed))
    }
}

/// Parses the server's ISO-8601 timestamps; values without an offset are UTC
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Lifecycle of one report run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReportStage {
    NotRequested,
    Requested,
    Generating,
    Ready,
    Downloaded,
    Extracted,
    Cleaned,
}

impl fmt::Display for ReportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportStage::NotRequested => "not requested",
            ReportStage::Requested => "requested",
            ReportStage::Generating => "generating",
            ReportStage::Ready => "ready",
            ReportStage::Downloaded => "downloaded",
            ReportStage::Extracted => "extracted",
            ReportStage::Cleaned => "cleaned",
        };
        write!(f, "{}", name)
    }
}
