//! Configuration layer for mmdb-compare.
//!
//! This module provides:
//! - CLI argument parsing with environment fallbacks ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **Environment variables** - `GCS_BUCKET`, `MAXMIND_LICENSE_KEY`, `SAMPLE_SIZE`, ...
//!    (clap folds these into the CLI values; a `.env` file is loaded first)
//! 3. **TOML config file** - Values from the configuration file
//! 4. **Built-in defaults** - Hardcoded default values
//!
//! Empty strings are treated as unset at every level, so `GCS_BUCKET=` in a
//! `.env` file does not satisfy the required bucket.
//!
//! # Numeric Values
//!
//! `sample_size`, `step` and `progress` accept `_` digit separators. A sample
//! size of zero or less selects the default; a negative step or progress
//! interval is rejected.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command, FormatArg};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
