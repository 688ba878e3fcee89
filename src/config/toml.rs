//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Baseline database location
    #[serde(default)]
    pub baseline: BaselineSection,

    /// Candidate database download settings
    #[serde(default)]
    pub candidate: CandidateSection,

    /// Address sampling settings
    #[serde(default)]
    pub sampling: SamplingSection,

    /// Report output settings
    #[serde(default)]
    pub output: OutputSection,
}

/// Baseline (GCS) section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaselineSection {
    /// Bucket name
    pub bucket: Option<String>,

    /// Object name inside the bucket
    pub object: Option<String>,

    /// Project billed for the download
    pub project_id: Option<String>,

    /// OAuth access token
    pub access_token: Option<String>,
}

/// Candidate (`MaxMind`) section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CandidateSection {
    /// License key
    pub license_key: Option<String>,

    /// Account id
    pub account_id: Option<String>,

    /// Edition to download
    pub edition_id: Option<String>,
}

/// Sampling section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplingSection {
    /// Number of addresses (values <= 0 use the default)
    pub sample_size: Option<i64>,

    /// Fixed stride, 0 for random sampling
    pub step: Option<i64>,

    /// Progress logging interval, 0 to disable
    pub progress: Option<i64>,

    /// Random sampling seed
    pub seed: Option<u64>,
}

/// Output section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Report format: "text" or "json"
    pub format: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# mmdb-compare Configuration File
# Every value can also be given on the command line or through the
# environment variable named in its comment. Command line and environment
# take precedence over this file.

[baseline]
# GCS bucket holding the baseline database (required, GCS_BUCKET)
# bucket = "my-geoip-bucket"

# Object name inside the bucket (GCS_OBJECT)
object = "geolite2/GeoLite2-Country.mmdb"

# Project billed for the download (GCP_PROJECT_ID)
# project_id = "my-project"

# OAuth access token; leave unset for public objects (GCS_ACCESS_TOKEN)
# access_token = "ya29...."

[candidate]
# MaxMind license key (required, MAXMIND_LICENSE_KEY)
# license_key = "your-license-key"

# MaxMind account id, enables HTTP Basic auth (MAXMIND_ACCOUNT_ID)
# account_id = "123456"

# Edition to download (MAXMIND_EDITION_ID)
edition_id = "GeoLite2-Country"

[sampling]
# Number of addresses to compare; values <= 0 use the default (SAMPLE_SIZE)
sample_size = 500_000

# Fixed stride across the IPv4 space; 0 samples randomly (STEP)
step = 0

# Log progress every N addresses; 0 disables (PROGRESS)
progress = 0

# Seed for random sampling; a random seed is generated and logged when unset (RANDOM_SEED)
# seed = 42

[output]
# Report format: "text" or "json"
format = "text"
"#
    .to_string()
}
