//! Per-run agreement counters.

use serde::Serialize;

use crate::lookup::LookupResult;

/// How one address compared across the two databases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Neither database has a record.
    FoundInNeither,
    /// Only the baseline has a record.
    BaselineOnly,
    /// Only the candidate has a record.
    CandidateOnly,
    /// Both have a record and the ISO codes are equal (including both absent).
    SameCountry,
    /// Both have a record and the ISO codes differ.
    DifferentCountry,
}

impl Classification {
    /// Classifies a pair of lookup results.
    ///
    /// Two records without a country compare equal: the absent codes are
    /// compared with `==` like any other value.
    #[must_use]
    pub fn of(baseline: &LookupResult, candidate: &LookupResult) -> Self {
        match (baseline.is_found(), candidate.is_found()) {
            (false, false) => Self::FoundInNeither,
            (true, false) => Self::BaselineOnly,
            (false, true) => Self::CandidateOnly,
            (true, true) if baseline.iso_code() == candidate.iso_code() => Self::SameCountry,
            (true, true) => Self::DifferentCountry,
        }
    }

    const fn in_baseline(self) -> bool {
        matches!(
            self,
            Self::BaselineOnly | Self::SameCountry | Self::DifferentCountry
        )
    }

    const fn in_candidate(self) -> bool {
        matches!(
            self,
            Self::CandidateOnly | Self::SameCountry | Self::DifferentCountry
        )
    }
}

/// Running totals for a comparison.
///
/// Starts zeroed, is updated once per address by the engine, then handed
/// to the report formatter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonCounters {
    /// Addresses processed.
    pub total_checked: u64,
    /// Addresses with a record in the baseline database.
    pub found_in_baseline: u64,
    /// Addresses with a record in the candidate database.
    pub found_in_candidate: u64,
    /// Addresses with a record in both.
    pub found_in_both: u64,
    /// Found in both with equal country codes.
    pub same_country: u64,
    /// Found in both with different country codes.
    pub different_country: u64,
}

impl ComparisonCounters {
    /// Creates zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total_checked: 0,
            found_in_baseline: 0,
            found_in_candidate: 0,
            found_in_both: 0,
            same_country: 0,
            different_country: 0,
        }
    }

    /// Records one classified address.
    pub const fn record(&mut self, classification: Classification) {
        self.total_checked += 1;
        if classification.in_baseline() {
            self.found_in_baseline += 1;
        }
        if classification.in_candidate() {
            self.found_in_candidate += 1;
        }
        match classification {
            Classification::SameCountry => {
                self.found_in_both += 1;
                self.same_country += 1;
            }
            Classification::DifferentCountry => {
                self.found_in_both += 1;
                self.different_country += 1;
            }
            Classification::FoundInNeither
            | Classification::BaselineOnly
            | Classification::CandidateOnly => {}
        }
    }

    /// Addresses whose country codes were compared.
    #[must_use]
    pub const fn compared(&self) -> u64 {
        self.same_country + self.different_country
    }

    /// Share of compared addresses whose countries differ, in percent,
    /// rounded to two decimals. `None` when nothing was compared.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // counts stay far below 2^52
    pub fn difference_percentage(&self) -> Option<f64> {
        let compared = self.compared();
        if compared == 0 {
            return None;
        }
        let pct = 100.0 * self.different_country as f64 / compared as f64;
        Some((pct * 100.0).round() / 100.0)
    }
}
