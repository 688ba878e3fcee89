//! `MaxMind` DB backed lookups.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use maxminddb::{MaxMindDBError, Reader, geoip2};

use super::{GeoLookup, LookupError, LookupResult};

/// Country lookups served from an `.mmdb` file loaded into memory.
pub struct MmdbLookup {
    reader: Reader<Vec<u8>>,
    path: PathBuf,
}

impl MmdbLookup {
    /// Opens the database at `path`, reading it fully into memory.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Open`] if the file is missing or is not a
    /// valid `MaxMind` DB.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LookupError> {
        let path = path.as_ref();
        let reader = Reader::open_readfile(path).map_err(|source| LookupError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            reader,
            path: path.to_path_buf(),
        })
    }

    /// Path the database was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Database type from the file metadata (e.g. `GeoLite2-Country`).
    #[must_use]
    pub fn database_type(&self) -> &str {
        &self.reader.metadata.database_type
    }

    /// Build timestamp from the file metadata, in seconds since the epoch.
    #[must_use]
    pub const fn build_epoch(&self) -> u64 {
        self.reader.metadata.build_epoch
    }
}

impl GeoLookup for MmdbLookup {
    fn lookup(&self, addr: Ipv4Addr) -> Result<LookupResult, LookupError> {
        match self.reader.lookup::<geoip2::Country>(IpAddr::V4(addr)) {
            Ok(record) => Ok(LookupResult::found(
                record.country.and_then(|country| country.iso_code),
            )),
            Err(MaxMindDBError::AddressNotFoundError(_)) => Ok(LookupResult::NotFound),
            Err(source) => Err(LookupError::Query {
                address: addr,
                source,
            }),
        }
    }
}

impl fmt::Debug for MmdbLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MmdbLookup")
            .field("path", &self.path)
            .field("database_type", &self.database_type())
            .finish_non_exhaustive()
    }
}
