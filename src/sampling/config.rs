//! Immutable sampling parameters.

use std::fmt;
use std::num::NonZeroU64;

/// Number of addresses sampled when no positive size is configured.
pub const DEFAULT_SAMPLE_SIZE: u64 = 500_000;

/// How the address population is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// Enumerate `0, stride, 2*stride, ...` across the whole IPv4 space.
    Stride(NonZeroU64),
    /// Draw addresses from a PRNG seeded with `seed`, skipping non-public ranges.
    Random {
        /// Seed recorded for reproducing the run.
        seed: u64,
    },
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stride(stride) => write!(f, "stride({stride})"),
            Self::Random { seed } => write!(f, "random(seed={seed})"),
        }
    }
}

/// Sampling parameters for one comparison run.
///
/// The sample size is always positive: a zero size is replaced with
/// [`DEFAULT_SAMPLE_SIZE`] at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingConfig {
    sample_size: NonZeroU64,
    mode: SamplingMode,
}

impl SamplingConfig {
    /// Builds a config from raw settings.
    ///
    /// `stride == 0` selects random mode with the given seed; any other value
    /// selects fixed-stride mode and ignores the seed.
    #[must_use]
    pub fn new(sample_size: u64, stride: u64, seed: u64) -> Self {
        let mode = NonZeroU64::new(stride)
            .map_or(SamplingMode::Random { seed }, SamplingMode::Stride);
        Self {
            sample_size: sample_size_or_default(sample_size),
            mode,
        }
    }

    /// Random-mode config.
    #[must_use]
    pub fn random(sample_size: u64, seed: u64) -> Self {
        Self::new(sample_size, 0, seed)
    }

    /// Fixed-stride config. A zero stride falls back to random mode with seed 0.
    #[must_use]
    pub fn stride(sample_size: u64, stride: u64) -> Self {
        Self::new(sample_size, stride, 0)
    }

    /// Requested number of addresses.
    #[must_use]
    pub const fn sample_size(&self) -> u64 {
        self.sample_size.get()
    }

    /// Sampling mode.
    #[must_use]
    pub const fn mode(&self) -> SamplingMode {
        self.mode
    }

    /// Seed used in random mode, `None` in stride mode.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        match self.mode {
            SamplingMode::Random { seed } => Some(seed),
            SamplingMode::Stride(_) => None,
        }
    }
}

impl fmt::Display for SamplingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} addresses, {}", self.sample_size, self.mode)
    }
}

fn sample_size_or_default(sample_size: u64) -> NonZeroU64 {
    NonZeroU64::new(sample_size).unwrap_or(DEFAULT_NON_ZERO)
}

// DEFAULT_SAMPLE_SIZE is a non-zero literal.
const DEFAULT_NON_ZERO: NonZeroU64 = match NonZeroU64::new(DEFAULT_SAMPLE_SIZE) {
    Some(n) => n,
    None => NonZeroU64::MIN,
};
