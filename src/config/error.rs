//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI, environment or config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// A numeric setting could not be parsed.
    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber {
        /// Name of the field
        field: &'static str,
        /// The rejected input
        value: String,
    },

    /// A numeric setting that must not be negative was negative.
    #[error("Invalid value for {field}: {value} (must not be negative)")]
    Negative {
        /// Name of the field
        field: &'static str,
        /// The rejected value
        value: i64,
    },

    /// Unknown report format.
    #[error("Invalid report format '{value}': expected text or json")]
    InvalidFormat {
        /// The invalid value provided
        value: String,
    },
}

/// Well-known field names for configuration errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The GCS bucket holding the baseline.
    pub const GCS_BUCKET: &str = "gcs_bucket";
    /// The `MaxMind` license key.
    pub const MAXMIND_LICENSE_KEY: &str = "maxmind_license_key";
    /// Number of sampled addresses.
    pub const SAMPLE_SIZE: &str = "sample_size";
    /// Fixed sampling stride.
    pub const STEP: &str = "step";
    /// Progress logging interval.
    pub const PROGRESS: &str = "progress";
    /// Random sampling seed.
    pub const SEED: &str = "seed";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
