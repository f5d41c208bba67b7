use std::fmt;
use std::str::FromStr;

/// Output format of the generated SBOM document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Yaml,
    Rdf,
    TagValue,
}

impl ReportFormat {
    /// Wire value expected by the report creation endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Json => "JSON",
            ReportFormat::Yaml => "YAML",
            ReportFormat::Rdf => "RDF",
            ReportFormat::TagValue => "TAGVALUE",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "yaml" | "yml" => Ok(ReportFormat::Yaml),
            "rdf" => Ok(ReportFormat::Rdf),
            "tagvalue" | "tag-value" | "tag_value" => Ok(ReportFormat::TagValue),
            _ => Err(format!(
                "Invalid report format: {}. Please specify 'json', 'yaml', 'rdf' or 'tagvalue'",
                s
            )),
        }
    }
}

/// SBOM schema and version tag requested from the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SbomType {
    Spdx22,
    Spdx23,
    CycloneDx13,
    CycloneDx14,
}

impl SbomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SbomType::Spdx22 => "SPDX_22",
            SbomType::Spdx23 => "SPDX_23",
            SbomType::CycloneDx13 => "CYCLONEDX_13",
            SbomType::CycloneDx14 => "CYCLONEDX_14",
        }
    }
}

impl FromStr for SbomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "SPDX_22" => Ok(SbomType::Spdx22),
            "SPDX_23" => Ok(SbomType::Spdx23),
            "CYCLONEDX_13" => Ok(SbomType::CycloneDx13),
            "CYCLONEDX_14" => Ok(SbomType::CycloneDx14),
            _ => Err(format!(
                "Invalid SBOM type: {}. Please specify one of SPDX_22, SPDX_23, CYCLONEDX_13, CYCLONEDX_14",
                s
            )),
        }
    }
}

/// Payload of a report creation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRequest {
    pub report_format: ReportFormat,
    pub sbom_type: SbomType,
}

impl ReportRequest {
    pub fn new(report_format: ReportFormat, sbom_type: SbomType) -> Self {
        Self {
            report_format,
            sbom_type,
        }
    }

    /// JSON body of the creation request
    pub fn payload(&self) -> serde_json::Value {
        serde_json::json!({
            "reportFormat": self.report_format.as_str(),
            "sbomType": self.sbom_type.as_str(),
        })
    }
}

impl Default for ReportRequest {
    fn default() -> Self {
        Self::new(ReportFormat::Json, SbomType::Spdx23)
    }
}

/// How the produced report is found once generation was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoveryStrategy {
    /// Follow the id returned in the `Location` header of the creation response
    #[default]
    Location,
    /// List the version's reports and take the most recently created one
    Latest,
}

impl FromStr for DiscoveryStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "location" | "id" => Ok(DiscoveryStrategy::Location),
            "latest" => Ok(DiscoveryStrategy::Latest),
            _ => Err(format!(
                "Invalid discovery strategy: {}. Please specify 'location' or 'latest'",
                s
            )),
        }
    }
}

impl fmt::Display for DiscoveryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryStrategy::Location => write!(f, "location"),
            DiscoveryStrategy::Latest => write!(f, "latest"),
        }
    }
}
