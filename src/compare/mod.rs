//! Comparison of two geolocation databases over a sampled address set.
//!
//! This module provides:
//! - Per-address classification and totals ([`Classification`], [`ComparisonCounters`])
//! - The comparison loop ([`ComparisonEngine`]) with optional progress reporting
//! - Report rendering ([`ReportFormatter`], [`ReportFormat`])

mod counters;
mod engine;
mod report;


pub use counters::{Classification, ComparisonCounters};
pub use engine::{ComparisonEngine, ProgressObserver, TracingProgress};
pub use report::{NOT_APPLICABLE, ReportFormat, ReportFormatter};
