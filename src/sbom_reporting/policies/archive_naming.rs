use crate::sbom_reporting::domain::DiscoveryStrategy;
use crate::shared::security::base_name;

/// Prefix for archives found by recency, so local copies can be told apart
const LATEST_REPORT_PREFIX: &str = "sbom_";

/// Local file name for a downloaded report archive
///
/// The server-reported name is reduced to its base name first. Reports found
/// through the `Location` header keep that name; reports picked by recency
/// are prefixed with `sbom_`.
pub fn local_archive_name(server_file_name: &str, strategy: DiscoveryStrategy) -> Option<String> {
    let name = base_name(server_file_name.trim())?;
    match strategy {
        DiscoveryStrategy::Location => Some(name.to_string()),
        DiscoveryStrategy::Latest => Some(format!("{}{}", LATEST_REPORT_PREFIX, name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_strategy_keeps_server_name() {
        assert_eq!(
            local_archive_name("Demo-2.0_sbom.zip", DiscoveryStrategy::Location).as_deref(),
            Some("Demo-2.0_sbom.zip")
        );
    }

    #[test]
    fn test_latest_strategy_prefixes_name() {
        assert_eq!(
            local_archive_name("Demo-2.0_sbom.zip", DiscoveryStrategy::Latest).as_deref(),
            Some("sbom_Demo-2.0_sbom.zip")
        );
    }

    #[test]
    fn test_server_paths_are_reduced_to_base_name() {
        assert_eq!(
            local_archive_name("../../etc/report.zip", DiscoveryStrategy::Location).as_deref(),
            Some("report.zip")
        );
        assert_eq!(local_archive_name("reports/", DiscoveryStrategy::Latest), None);
        assert_eq!(local_archive_name("  ", DiscoveryStrategy::Location), None);
    }
}
