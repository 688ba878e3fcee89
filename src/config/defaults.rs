//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

pub use crate::fetch::maxmind::DEFAULT_EDITION_ID as MAXMIND_EDITION_ID;
pub use crate::sampling::DEFAULT_SAMPLE_SIZE as SAMPLE_SIZE;

/// Default object name of the baseline database in the GCS bucket.
pub const GCS_OBJECT: &str = "geolite2/GeoLite2-Country.mmdb";

/// Default stride; zero selects random sampling.
pub const STEP: u64 = 0;

/// Default progress interval; zero disables progress logging.
pub const PROGRESS: u64 = 0;
