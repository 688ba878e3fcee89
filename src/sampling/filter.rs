//! Exclusion rules for randomly drawn addresses.
//!
//! # Design
//!
//! - **Pure Matchers**: [`PrivateFilter`], [`LoopbackFilter`], [`LinkLocalFilter`]
//!   and [`FirstOctetAtLeast`] only answer "does this address match?".
//! - **Chain**: [`ExclusionChain`] rejects an address when ANY matcher matches.
//!   The default chain ([`ExclusionChain::public_unicast`]) removes every
//!   non-public range the random sampler must skip.

use std::net::Ipv4Addr;

/// Trait for classifying IPv4 addresses.
pub trait AddressFilter: Send + Sync {
    /// Returns `true` if the address belongs to the matched range.
    fn matches(&self, addr: Ipv4Addr) -> bool;
}

/// Matches RFC 1918 private ranges (`10/8`, `172.16/12`, `192.168/16`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PrivateFilter;

impl AddressFilter for PrivateFilter {
    fn matches(&self, addr: Ipv4Addr) -> bool {
        addr.is_private()
    }
}

/// Matches `127.0.0.0/8`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopbackFilter;

impl AddressFilter for LoopbackFilter {
    fn matches(&self, addr: Ipv4Addr) -> bool {
        addr.is_loopback()
    }
}

/// Matches `169.254.0.0/16`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkLocalFilter;

impl AddressFilter for LinkLocalFilter {
    fn matches(&self, addr: Ipv4Addr) -> bool {
        addr.is_link_local()
    }
}

/// Matches addresses whose first octet is `>= threshold`.
///
/// With a threshold of 224 this covers multicast (`224/4`) and the reserved
/// block above it.
#[derive(Debug, Clone, Copy)]
pub struct FirstOctetAtLeast(pub u8);

impl FirstOctetAtLeast {
    /// Multicast and reserved space.
    pub const MULTICAST_AND_RESERVED: Self = Self(224);
}

impl AddressFilter for FirstOctetAtLeast {
    fn matches(&self, addr: Ipv4Addr) -> bool {
        addr.octets()[0] >= self.0
    }
}

/// Rejects an address if any of its matchers match.
///
/// An empty chain accepts everything.
#[derive(Default)]
pub struct ExclusionChain {
    excludes: Vec<Box<dyn AddressFilter>>,
}

impl ExclusionChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The chain used by random sampling: private, loopback, link-local,
    /// multicast and reserved ranges are all excluded.
    #[must_use]
    pub fn public_unicast() -> Self {
        Self::new()
            .exclude(PrivateFilter)
            .exclude(LoopbackFilter)
            .exclude(LinkLocalFilter)
            .exclude(FirstOctetAtLeast::MULTICAST_AND_RESERVED)
    }

    /// Adds an exclusion matcher.
    #[must_use]
    pub fn exclude<F: AddressFilter + 'static>(mut self, filter: F) -> Self {
        self.excludes.push(Box::new(filter));
        self
    }

    /// Returns `true` if the address passes every exclusion.
    #[must_use]
    pub fn accepts(&self, addr: Ipv4Addr) -> bool {
        !self.excludes.iter().any(|f| f.matches(addr))
    }

    /// Number of exclusion matchers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.excludes.len()
    }

    /// Returns true if no matchers are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.excludes.is_empty()
    }
}

impl std::fmt::Debug for ExclusionChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExclusionChain")
            .field("exclude_count", &self.excludes.len())
            .finish()
    }
}
