//! Error types for database access.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for opening or querying a geolocation database.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The database file could not be opened or its metadata is invalid.
    #[error("Failed to open database '{}': {source}", path.display())]
    Open {
        /// Path to the database file
        path: PathBuf,
        /// Underlying reader error
        #[source]
        source: maxminddb::MaxMindDBError,
    },

    /// A single address query failed.
    #[error("Lookup of {address} failed: {source}")]
    Query {
        /// The queried address
        address: Ipv4Addr,
        /// Underlying reader error
        #[source]
        source: maxminddb::MaxMindDBError,
    },
}
