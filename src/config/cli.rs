//! CLI argument parsing using clap.
//!
//! Every run option can also come from an environment variable; a `.env`
//! file is loaded into the environment before parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::compare::ReportFormat;

/// mmdb-compare: GeoIP country database comparison
///
/// Downloads a baseline database from Google Cloud Storage and a fresh
/// candidate from `MaxMind`, looks up a sample of IPv4 addresses in both and
/// reports how many resolve to a different country.
#[derive(Debug, Parser)]
#[command(name = "mmdb-compare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// GCS bucket holding the baseline database (required)
    #[arg(long = "gcs-bucket", env = "GCS_BUCKET")]
    pub gcs_bucket: Option<String>,

    /// Object name of the baseline database inside the bucket
    #[arg(long = "gcs-object", env = "GCS_OBJECT")]
    pub gcs_object: Option<String>,

    /// Google Cloud project billed for the download
    #[arg(long = "gcp-project-id", env = "GCP_PROJECT_ID")]
    pub gcp_project_id: Option<String>,

    /// OAuth access token for GCS (e.g. from `gcloud auth print-access-token`)
    #[arg(long = "gcs-access-token", env = "GCS_ACCESS_TOKEN", hide_env_values = true)]
    pub gcs_access_token: Option<String>,

    /// `MaxMind` license key (required)
    #[arg(
        long = "maxmind-license-key",
        env = "MAXMIND_LICENSE_KEY",
        hide_env_values = true
    )]
    pub maxmind_license_key: Option<String>,

    /// `MaxMind` account id, sent as HTTP Basic user when set
    #[arg(long = "maxmind-account-id", env = "MAXMIND_ACCOUNT_ID")]
    pub maxmind_account_id: Option<String>,

    /// `MaxMind` edition to download
    #[arg(long = "maxmind-edition-id", env = "MAXMIND_EDITION_ID")]
    pub maxmind_edition_id: Option<String>,

    /// Number of addresses to compare (values <= 0 use the default)
    #[arg(
        long = "sample-size",
        env = "SAMPLE_SIZE",
        value_name = "N",
        allow_hyphen_values = true
    )]
    pub sample_size: Option<String>,

    /// Enumerate addresses with this stride instead of sampling randomly (0 = random)
    #[arg(long, env = "STEP", value_name = "N", allow_hyphen_values = true)]
    pub step: Option<String>,

    /// Log progress every N addresses (0 = disabled)
    #[arg(long, env = "PROGRESS", value_name = "N", allow_hyphen_values = true)]
    pub progress: Option<String>,

    /// Seed for random sampling (generated when absent)
    #[arg(long, env = "RANDOM_SEED", value_name = "N")]
    pub seed: Option<String>,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for mmdb-compare
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "mmdb-compare.toml")]
        output: PathBuf,
    },
}

/// Report format argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Human-readable summary
    Text,
    /// JSON object
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
