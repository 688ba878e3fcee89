//! Country lookups against a geolocation database.
//!
//! This module provides:
//! - The lookup outcome ([`LookupResult`])
//! - The lookup capability ([`GeoLookup`])
//! - The `MaxMind` DB implementation ([`MmdbLookup`])

mod error;
mod mmdb;


use std::net::Ipv4Addr;

pub use error::LookupError;
pub use mmdb::MmdbLookup;

/// Outcome of looking up one address in one database.
///
/// Keeps "no record" apart from "record without a country", which a plain
/// `Option<String>` would conflate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    /// The database has no record for the address.
    NotFound,
    /// A record exists but carries no country ISO code.
    FoundWithoutCountry,
    /// A record exists with the given two-letter ISO code.
    FoundWithCountry(String),
}

impl LookupResult {
    /// Builds a found result from an optional ISO code.
    #[must_use]
    pub fn found(iso_code: Option<&str>) -> Self {
        iso_code.map_or(Self::FoundWithoutCountry, |code| {
            Self::FoundWithCountry(code.to_string())
        })
    }

    /// Returns true for either found variant.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound)
    }

    /// ISO code, if the record has one.
    #[must_use]
    pub fn iso_code(&self) -> Option<&str> {
        match self {
            Self::FoundWithCountry(code) => Some(code),
            Self::NotFound | Self::FoundWithoutCountry => None,
        }
    }
}

/// Trait for country lookups.
///
/// # Design
///
/// Implementations wrap an opened database. Opening is the caller's concern;
/// this trait only answers per-address queries, so comparison logic can be
/// tested against in-memory fakes.
pub trait GeoLookup {
    /// Looks up the country for `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the database could not answer the query
    /// (corrupt data, decoding failure). A missing record is not an error;
    /// it is [`LookupResult::NotFound`].
    fn lookup(&self, addr: Ipv4Addr) -> Result<LookupResult, LookupError>;
}

impl<T: GeoLookup + ?Sized> GeoLookup for &T {
    fn lookup(&self, addr: Ipv4Addr) -> Result<LookupResult, LookupError> {
        (**self).lookup(addr)
    }
}
