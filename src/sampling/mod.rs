//! Address population for a comparison run.
//!
//! This module provides:
//! - Sampling parameters ([`SamplingConfig`], [`SamplingMode`])
//! - Lazy address generation ([`generate`], [`Samples`])
//! - Exclusion rules for random sampling ([`filter`])
//!
//! Stride mode covers the raw address space, non-routable ranges included.
//! Only random mode applies the exclusion filter.

mod config;
pub mod filter;
mod sampler;

#[cfg(test)]
mod filter_tests;

pub use config::{DEFAULT_SAMPLE_SIZE, SamplingConfig, SamplingMode};
pub use sampler::{Samples, generate};
