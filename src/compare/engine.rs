//! The comparison loop.

use std::net::Ipv4Addr;
use std::num::NonZeroU64;

use crate::lookup::{GeoLookup, LookupResult};

use super::counters::{Classification, ComparisonCounters};

/// Receives progress notifications from [`ComparisonEngine::run`].
///
/// `()` is the no-op observer.
pub trait ProgressObserver {
    /// Called after `processed` addresses, out of an expected `total`.
    fn on_progress(&self, processed: u64, total: u64);
}

impl ProgressObserver for () {
    fn on_progress(&self, _processed: u64, _total: u64) {}
}

impl<T: ProgressObserver + ?Sized> ProgressObserver for &T {
    fn on_progress(&self, processed: u64, total: u64) {
        (**self).on_progress(processed, total);
    }
}

/// Observer that logs progress through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
    fn on_progress(&self, processed: u64, total: u64) {
        tracing::info!("Processed {processed}/{total} IPs...");
    }
}

/// Compares two databases address by address.
///
/// # Type Parameters
///
/// - `B`, `C`: baseline and candidate lookups
/// - `P`: progress observer (defaults to the no-op `()`)
///
/// # Example
///
/// ```
/// use std::net::Ipv4Addr;
/// use mmdb_compare::compare::ComparisonEngine;
/// use mmdb_compare::lookup::{GeoLookup, LookupError, LookupResult};
///
/// struct Everywhere(&'static str);
///
/// impl GeoLookup for Everywhere {
///     fn lookup(&self, _addr: Ipv4Addr) -> Result<LookupResult, LookupError> {
///         Ok(LookupResult::found(Some(self.0)))
///     }
/// }
///
/// let engine = ComparisonEngine::new(Everywhere("US"), Everywhere("CA"));
/// let counters = engine.run([Ipv4Addr::new(1, 1, 1, 1)]);
/// assert_eq!(counters.different_country, 1);
/// ```
#[derive(Debug)]
pub struct ComparisonEngine<B, C, P = ()> {
    baseline: B,
    candidate: C,
    progress: Option<(NonZeroU64, P)>,
}

impl<B, C> ComparisonEngine<B, C, ()> {
    /// Creates an engine with progress reporting disabled.
    #[must_use]
    pub const fn new(baseline: B, candidate: C) -> Self {
        Self {
            baseline,
            candidate,
            progress: None,
        }
    }
}

impl<B, C, P> ComparisonEngine<B, C, P> {
    /// Enables progress notifications every `interval` addresses.
    #[must_use]
    pub fn with_progress<P2>(
        self,
        interval: NonZeroU64,
        observer: P2,
    ) -> ComparisonEngine<B, C, P2> {
        ComparisonEngine {
            baseline: self.baseline,
            candidate: self.candidate,
            progress: Some((interval, observer)),
        }
    }
}

impl<B, C, P> ComparisonEngine<B, C, P>
where
    B: GeoLookup,
    C: GeoLookup,
    P: ProgressObserver,
{
    /// Looks up every address in both databases and tallies the outcome.
    ///
    /// A failed lookup counts as "not found" for that side only; the run
    /// always continues.
    pub fn run<I>(&self, addresses: I) -> ComparisonCounters
    where
        I: IntoIterator<Item = Ipv4Addr>,
    {
        let addresses = addresses.into_iter();
        let total = expected_len(&addresses);
        tracing::info!("Starting comparison of {total} IPs...");

        let mut counters = ComparisonCounters::new();
        for addr in addresses {
            let baseline = resolve(&self.baseline, addr, "baseline");
            let candidate = resolve(&self.candidate, addr, "candidate");
            counters.record(Classification::of(&baseline, &candidate));
            self.notify(counters.total_checked, total);
        }
        counters
    }

    fn notify(&self, processed: u64, total: u64) {
        if let Some((interval, observer)) = &self.progress {
            if processed % interval.get() == 0 {
                observer.on_progress(processed, total);
            }
        }
    }
}

fn resolve<L: GeoLookup>(lookup: &L, addr: Ipv4Addr, side: &str) -> LookupResult {
    lookup.lookup(addr).unwrap_or_else(|e| {
        tracing::debug!("{side} lookup failed, counting as not found: {e}");
        LookupResult::NotFound
    })
}

fn expected_len<I: Iterator>(iter: &I) -> u64 {
    let (lower, upper) = iter.size_hint();
    u64::try_from(upper.unwrap_or(lower)).unwrap_or(u64::MAX)
}
