use crate::sbom_reporting::domain::Report;

/// Picks the most recently created report
///
/// Reports without a creation timestamp never win. When two reports share
/// the newest timestamp the one listed last is returned.
pub fn latest_report(reports: &[Report]) -> Option<&Report> {
    reports
        .iter()
        .filter(|report| report.created_at.is_some())
        .max_by_key(|report| report.created_at)
}
