use serde::Deserialize;

/// Media types understood by the server's REST API
pub mod media_type {
    pub const JSON: &str = "application/json";
    pub const PROJECT: &str = "application/vnd.blackducksoftware.project-detail-4+json";
    pub const USER: &str = "application/vnd.blackducksoftware.user-4+json";
    pub const REPORT: &str = "application/vnd.blackducksoftware.report-4+json";
    pub const ZIP: &str = "application/zip";
}

/// `_meta` block every server resource carries
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceMeta {
    pub href: String,
}

impl ResourceMeta {
    pub fn id(&self) -> Option<&str> {
        resource_id(&self.href)
    }
}

/// One page of a collection endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePage<T> {
    #[serde(default)]
    pub total_count: Option<usize>,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Extracts the opaque id from a resource link
///
/// The id is the last path segment of the URL, ignoring any query string
/// and trailing slash.
pub fn resource_id(href: &str) -> Option<&str> {
    let path = href.split(['?', '#']).next()?;
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && !segment.contains(':'))
}
