//! mmdb-compare: GeoIP country database comparison
//!
//! A library for downloading two IP-to-country databases, sampling the IPv4
//! address space and measuring how often the databases disagree.

pub mod compare;
pub mod config;
pub mod fetch;
pub mod lookup;
pub mod sampling;
