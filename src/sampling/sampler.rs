//! Lazy address generation for both sampling modes.

use std::iter::FusedIterator;
use std::net::Ipv4Addr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::{SamplingConfig, SamplingMode};
use super::filter::ExclusionChain;

const LAST_ADDRESS: u64 = u32::MAX as u64;

/// Produces the address population described by `config`.
///
/// The returned iterator is finite and yields at most
/// [`SamplingConfig::sample_size`] addresses. Random mode always yields
/// exactly that many; stride mode stops early if the address space runs out.
///
/// # Examples
///
/// ```
/// use mmdb_compare::sampling::{SamplingConfig, generate};
///
/// let config = SamplingConfig::stride(3, 1 << 24);
/// let addrs: Vec<String> = generate(&config).map(|a| a.to_string()).collect();
/// assert_eq!(addrs, ["0.0.0.0", "1.0.0.0", "2.0.0.0"]);
/// ```
#[must_use]
pub fn generate(config: &SamplingConfig) -> Samples {
    let remaining = config.sample_size();
    let inner = match config.mode() {
        SamplingMode::Stride(stride) => Inner::Stride(StrideSamples {
            next: 0,
            stride: stride.get(),
            remaining,
        }),
        SamplingMode::Random { seed } => Inner::Random(RandomSamples {
            rng: StdRng::seed_from_u64(seed),
            exclusions: ExclusionChain::public_unicast(),
            remaining,
        }),
    };
    Samples { inner }
}

/// Iterator over sampled addresses. See [`generate`].
#[derive(Debug)]
pub struct Samples {
    inner: Inner,
}

#[derive(Debug)]
enum Inner {
    Stride(StrideSamples),
    Random(RandomSamples),
}

impl Samples {
    /// Number of addresses still to be produced.
    ///
    /// For stride mode this accounts for early exhaustion of the address space,
    /// so comparing it against the requested size up front tells the caller
    /// whether the sample will come up short.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        match &self.inner {
            Inner::Stride(s) => s.remaining(),
            Inner::Random(r) => r.remaining,
        }
    }
}

impl Iterator for Samples {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Ipv4Addr> {
        match &mut self.inner {
            Inner::Stride(s) => s.next(),
            Inner::Random(r) => r.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

impl FusedIterator for Samples {}

#[derive(Debug)]
struct StrideSamples {
    next: u64,
    stride: u64,
    remaining: u64,
}

impl StrideSamples {
    fn remaining(&self) -> u64 {
        if self.next > LAST_ADDRESS {
            return 0;
        }
        let left_in_range = (LAST_ADDRESS - self.next) / self.stride + 1;
        self.remaining.min(left_in_range)
    }

    fn next(&mut self) -> Option<Ipv4Addr> {
        if self.remaining == 0 {
            return None;
        }
        let value = u32::try_from(self.next).ok()?;
        self.next = self.next.saturating_add(self.stride);
        self.remaining -= 1;
        Some(Ipv4Addr::from(value))
    }
}

struct RandomSamples {
    rng: StdRng,
    exclusions: ExclusionChain,
    remaining: u64,
}

impl RandomSamples {
    fn next(&mut self) -> Option<Ipv4Addr> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            let candidate = self.draw();
            if self.exclusions.accepts(candidate) {
                self.remaining -= 1;
                return Some(candidate);
            }
        }
    }

    fn draw(&mut self) -> Ipv4Addr {
        let a = self.rng.gen_range(1..=254);
        let b = self.rng.gen_range(0..=255);
        let c = self.rng.gen_range(0..=255);
        let d = self.rng.gen_range(1..=254);
        Ipv4Addr::new(a, b, c, d)
    }
}

impl std::fmt::Debug for RandomSamples {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomSamples")
            .field("exclusions", &self.exclusions)
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}
