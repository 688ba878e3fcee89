//! Validated configuration after merging CLI, environment and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::num::NonZeroU64;
use std::path::Path;

use crate::compare::ReportFormat;
use crate::fetch::GcsObject;
use crate::sampling::SamplingConfig;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

const REDACTED: &str = "***";

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// Environment variables are already folded into the CLI values by clap.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Baseline database location (bucket required)
    pub baseline: GcsObject,

    /// Project billed for the GCS download
    pub gcp_project_id: Option<String>,

    /// OAuth access token for GCS
    pub gcs_access_token: Option<String>,

    /// `MaxMind` license key (required)
    pub maxmind_license_key: String,

    /// `MaxMind` account id
    pub maxmind_account_id: Option<String>,

    /// `MaxMind` edition to download
    pub maxmind_edition_id: String,

    /// Sample size and mode
    pub sampling: SamplingConfig,

    /// Whether the random seed was generated rather than configured
    pub seed_generated: bool,

    /// Log progress every this many addresses; `None` disables progress logging
    pub progress: Option<NonZeroU64>,

    /// Report format
    pub format: ReportFormat,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = self
            .progress
            .map_or_else(|| "disabled".to_string(), |n| format!("every {n}"));
        let token = if self.gcs_access_token.is_some() {
            REDACTED
        } else {
            "none"
        };

        write!(
            f,
            "Config {{ baseline: {}, project: {}, access_token: {}, edition: {}, \
             license_key: {}, account_id: {}, sampling: {}, progress: {}, format: {} }}",
            self.baseline,
            self.gcp_project_id.as_deref().unwrap_or("none"),
            token,
            self.maxmind_edition_id,
            REDACTED,
            self.maxmind_account_id.as_deref().unwrap_or("none"),
            self.sampling,
            progress,
            format_name(self.format),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI (and environment) values take precedence over TOML values, which
    /// take precedence over built-in defaults. Empty strings count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing (`gcs_bucket`, `maxmind_license_key`)
    /// - A numeric value is not a number, or step/progress is negative
    /// - The report format is unknown
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let baseline = toml.map(|t| &t.baseline);
        let candidate = toml.map(|t| &t.candidate);

        let bucket = pick(
            cli.gcs_bucket.as_deref(),
            baseline.and_then(|b| b.bucket.as_deref()),
        )
        .ok_or_else(|| {
            ConfigError::missing(
                field::GCS_BUCKET,
                "Use --gcs-bucket, set GCS_BUCKET or set baseline.bucket in config file",
            )
        })?;
        let object = pick(
            cli.gcs_object.as_deref(),
            baseline.and_then(|b| b.object.as_deref()),
        )
        .unwrap_or_else(|| defaults::GCS_OBJECT.to_string());

        let maxmind_license_key = pick(
            cli.maxmind_license_key.as_deref(),
            candidate.and_then(|c| c.license_key.as_deref()),
        )
        .ok_or_else(|| {
            ConfigError::missing(
                field::MAXMIND_LICENSE_KEY,
                "Use --maxmind-license-key, set MAXMIND_LICENSE_KEY or set \
                 candidate.license_key in config file",
            )
        })?;
        let maxmind_edition_id = pick(
            cli.maxmind_edition_id.as_deref(),
            candidate.and_then(|c| c.edition_id.as_deref()),
        )
        .unwrap_or_else(|| defaults::MAXMIND_EDITION_ID.to_string());

        let (sampling, seed_generated) = Self::resolve_sampling(cli, toml)?;

        Ok(Self {
            baseline: GcsObject::new(bucket, object),
            gcp_project_id: pick(
                cli.gcp_project_id.as_deref(),
                baseline.and_then(|b| b.project_id.as_deref()),
            ),
            gcs_access_token: pick(
                cli.gcs_access_token.as_deref(),
                baseline.and_then(|b| b.access_token.as_deref()),
            ),
            maxmind_license_key,
            maxmind_account_id: pick(
                cli.maxmind_account_id.as_deref(),
                candidate.and_then(|c| c.account_id.as_deref()),
            ),
            maxmind_edition_id,
            sampling,
            seed_generated,
            progress: NonZeroU64::new(Self::resolve_progress(cli, toml)?),
            format: Self::resolve_format(cli, toml)?,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_sampling(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<(SamplingConfig, bool), ConfigError> {
        let section = toml.map(|t| &t.sampling);

        let sample_size = resolve_signed(
            field::SAMPLE_SIZE,
            cli.sample_size.as_deref(),
            section.and_then(|s| s.sample_size),
        )?
        .unwrap_or(0);
        // Zero and negative sizes fall back to the default inside SamplingConfig.
        let sample_size = u64::try_from(sample_size).unwrap_or(0);

        let step = resolve_signed(field::STEP, cli.step.as_deref(), section.and_then(|s| s.step))?
            .map_or(Ok(defaults::STEP), |v| non_negative(field::STEP, v))?;

        let configured_seed = match non_empty(cli.seed.as_deref()) {
            Some(raw) => Some(parse_number::<u64>(field::SEED, raw)?),
            None => section.and_then(|s| s.seed),
        };

        let seed_generated = step == 0 && configured_seed.is_none();
        let seed = configured_seed.unwrap_or_else(rand::random);

        Ok((SamplingConfig::new(sample_size, step, seed), seed_generated))
    }

    fn resolve_progress(cli: &Cli, toml: Option<&TomlConfig>) -> Result<u64, ConfigError> {
        resolve_signed(
            field::PROGRESS,
            cli.progress.as_deref(),
            toml.and_then(|t| t.sampling.progress),
        )?
        .map_or(Ok(defaults::PROGRESS), |v| non_negative(field::PROGRESS, v))
    }

    fn resolve_format(cli: &Cli, toml: Option<&TomlConfig>) -> Result<ReportFormat, ConfigError> {
        if let Some(format) = cli.format {
            return Ok(format.into());
        }

        match toml.and_then(|t| t.output.format.as_deref()) {
            Some(value) => parse_format(value),
            None => Ok(ReportFormat::default()),
        }
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn pick(cli: Option<&str>, toml: Option<&str>) -> Option<String> {
    non_empty(cli).or_else(|| non_empty(toml)).map(str::to_string)
}

fn resolve_signed(
    name: &'static str,
    cli: Option<&str>,
    toml: Option<i64>,
) -> Result<Option<i64>, ConfigError> {
    match non_empty(cli) {
        Some(raw) => parse_number::<i64>(name, raw).map(Some),
        None => Ok(toml),
    }
}

/// Parses an integer, accepting `_` digit separators (`500_000`).
fn parse_number<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.replace('_', "")
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber {
            field: name,
            value: raw.to_string(),
        })
}

fn non_negative(name: &'static str, value: i64) -> Result<u64, ConfigError> {
    u64::try_from(value).map_err(|_| ConfigError::Negative { field: name, value })
}

fn parse_format(value: &str) -> Result<ReportFormat, ConfigError> {
    match value.to_lowercase().as_str() {
        "text" | "txt" => Ok(ReportFormat::Text),
        "json" => Ok(ReportFormat::Json),
        _ => Err(ConfigError::InvalidFormat {
            value: value.to_string(),
        }),
    }
}

const fn format_name(format: ReportFormat) -> &'static str {
    match format {
        ReportFormat::Text => "text",
        ReportFormat::Json => "json",
    }
}
