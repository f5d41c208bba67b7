use clap::Parser;
use std::path::PathBuf;

use bd_sbom::config::ConfigOverrides;
use bd_sbom::sbom_reporting::domain::{DiscoveryStrategy, ReportFormat, SbomType};

/// Request, download and unpack SBOM reports from a Black Duck server
///
/// `--version` names the project version, so the binary has no version flag.
#[derive(Parser, Debug)]
#[command(name = "bd-sbom")]
#[command(
    about = "Request, download and unpack SBOM reports from a Black Duck server",
    long_about = None
)]
pub struct Args {
    /// API token used to obtain a bearer token
    #[arg(long = "api_token", value_name = "TOKEN")]
    pub api_token: String,

    /// Exact name of the project
    #[arg(long = "project_name", value_name = "NAME")]
    pub project_name: String,

    /// Create the project and exit
    #[arg(long = "create_project")]
    pub create_project: bool,

    /// Description for a newly created project
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Project version name (defaults to the first version the server lists)
    #[arg(long, value_name = "VERSION_NAME")]
    pub version: Option<String>,

    /// Request a new SBOM report and wait for it
    #[arg(long = "create_report")]
    pub create_report: bool,

    /// Download and extract the report
    #[arg(long = "download_report")]
    pub download_report: bool,

    /// Server URL (overrides the config file)
    #[arg(long = "base_url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Path to a config file (defaults to ./bd-sbom.config.yml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory the report is extracted into
    #[arg(long = "output_dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// How the generated report is found: location or latest
    #[arg(long, value_name = "STRATEGY")]
    pub discovery: Option<DiscoveryStrategy>,

    /// SBOM type: SPDX_22, SPDX_23, CYCLONEDX_13 or CYCLONEDX_14
    #[arg(long = "sbom_type", value_name = "TYPE")]
    pub sbom_type: Option<SbomType>,

    /// Report format: json, yaml, rdf or tagvalue
    #[arg(long = "report_format", value_name = "FORMAT")]
    pub report_format: Option<ReportFormat>,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Values that take precedence over the config file
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            output_dir: self.output_dir.clone(),
            discovery: self.discovery,
            report_format: self.report_format,
            sbom_type: self.sbom_type,
        }
    }

    /// Whether any part of the report pipeline was asked for
    pub fn wants_report(&self) -> bool {
        self.create_report || self.download_report
    }
}
