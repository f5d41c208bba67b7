//! Configuration for bd-sbom.
//!
//! Settings come from an optional YAML file (`bd-sbom.config.yml`, or the path
//! given with `--config`) overlaid by command-line flags. The merged result is
//! an explicit `AppConfig` handed to the session and the report workflow.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::sbom_reporting::domain::{DiscoveryStrategy, ReportFormat, ReportRequest, SbomType};
use crate::sbom_reporting::policies::PollPolicy;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "bd-sbom.config.yml";

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub discovery: Option<String>,
    pub report_format: Option<String>,
    pub sbom_type: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub poll: Option<PollSection>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// `poll:` section controlling the wait for report generation.
#[derive(Debug, Deserialize, Default)]
pub struct PollSection {
    pub initial_delay_secs: Option<u64>,
    pub max_delay_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub discovery: Option<DiscoveryStrategy>,
    pub report_format: Option<ReportFormat>,
    pub sbom_type: Option<SbomType>,
}

/// Connection settings for the server session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Settings of one report workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub discovery: DiscoveryStrategy,
    pub report_request: ReportRequest,
    pub output_dir: PathBuf,
    pub poll: PollPolicy,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            discovery: DiscoveryStrategy::default(),
            report_request: ReportRequest::default(),
            output_dir: PathBuf::from("."),
            poll: PollPolicy::default(),
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub workflow: WorkflowConfig,
}

impl AppConfig {
    /// Merges the optional config file with command-line overrides.
    ///
    /// # Errors
    /// Returns an error if no base URL is configured, a value cannot be
    /// parsed, or a duration is zero.
    pub fn build(file: Option<ConfigFile>, overrides: ConfigOverrides) -> Result<Self> {
        let file = file.unwrap_or_default();

        let base_url = overrides.base_url.or(file.base_url).with_context(|| {
            format!(
                "No server URL configured.\n\n💡 Hint: Pass --base_url or set 'base_url' in {}",
                CONFIG_FILENAME
            )
        })?;
        validate_base_url(&base_url)?;

        let mut service = ServiceConfig::new(base_url);
        if let Some(secs) = file.timeout_secs {
            service.timeout = positive_secs(secs, "timeout_secs")?;
        }
        if let Some(retries) = file.max_retries {
            service.max_retries = retries;
        }

        let discovery = match overrides.discovery {
            Some(discovery) => discovery,
            None => parse_optional(file.discovery.as_deref(), "discovery")?.unwrap_or_default(),
        };
        let defaults = ReportRequest::default();
        let report_format = match overrides.report_format {
            Some(format) => format,
            None => parse_optional(file.report_format.as_deref(), "report_format")?
                .unwrap_or(defaults.report_format),
        };
        let sbom_type = match overrides.sbom_type {
            Some(sbom_type) => sbom_type,
            None => parse_optional(file.sbom_type.as_deref(), "sbom_type")?
                .unwrap_or(defaults.sbom_type),
        };

        let output_dir = overrides
            .output_dir
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        let poll = build_poll_policy(file.poll.unwrap_or_default())?;

        Ok(Self {
            service,
            workflow: WorkflowConfig {
                discovery,
                report_request: ReportRequest::new(report_format, sbom_type),
                output_dir,
                poll,
            },
        })
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_base_url(base_url: &str) -> Result<()> {
    let lower = base_url.to_ascii_lowercase();
    if !(lower.starts_with("https://") || lower.starts_with("http://")) {
        bail!(
            "Invalid server URL: {}\n\n💡 Hint: The URL must start with https:// or http://",
            base_url
        );
    }
    Ok(())
}

fn positive_secs(secs: u64, field: &str) -> Result<Duration> {
    if secs == 0 {
        bail!("Invalid config: {} must be greater than zero.", field);
    }
    Ok(Duration::from_secs(secs))
}

fn parse_optional<T>(value: Option<&str>, field: &str) -> Result<Option<T>>
where
    T: FromStr<Err = String>,
{
    value
        .map(|raw| T::from_str(raw).map_err(|e| anyhow::anyhow!("Invalid config: {}: {}", field, e)))
        .transpose()
}

fn build_poll_policy(section: PollSection) -> Result<PollPolicy> {
    let initial_delay = match section.initial_delay_secs {
        Some(secs) => positive_secs(secs, "poll.initial_delay_secs")?,
        None => PollPolicy::DEFAULT_INITIAL_DELAY,
    };
    let max_delay = match section.max_delay_secs {
        Some(secs) => positive_secs(secs, "poll.max_delay_secs")?,
        None => PollPolicy::DEFAULT_MAX_DELAY,
    };
    let timeout = match section.timeout_secs {
        Some(secs) => positive_secs(secs, "poll.timeout_secs")?,
        None => PollPolicy::DEFAULT_TIMEOUT,
    };
    Ok(PollPolicy::new(initial_delay, max_delay, timeout))
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!("Unknown config field '{}' will be ignored", key);
    }
}
