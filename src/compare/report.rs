//! Rendering of the final comparison report.

use std::fmt::Write as _;

use serde::Serialize;

use super::counters::ComparisonCounters;

/// Text shown instead of a percentage when no address was found in both databases.
pub const NOT_APPLICABLE: &str = "N/A (no IPs found in both databases)";

/// Output format of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Fixed human-readable summary.
    #[default]
    Text,
    /// Pretty-printed JSON object.
    Json,
}

/// Renders [`ComparisonCounters`] for display.
///
/// The labels identify where each database came from and are printed verbatim.
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    baseline_source: String,
    candidate_source: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    baseline_source: &'a str,
    candidate_source: &'a str,
    #[serde(flatten)]
    counters: &'a ComparisonCounters,
    difference_percentage: Option<f64>,
}

impl ReportFormatter {
    /// Creates a formatter with the given source labels.
    #[must_use]
    pub fn new(baseline_source: impl Into<String>, candidate_source: impl Into<String>) -> Self {
        Self {
            baseline_source: baseline_source.into(),
            candidate_source: candidate_source.into(),
        }
    }

    /// Renders the report in the requested format.
    ///
    /// # Errors
    ///
    /// Returns an error only if JSON serialization fails.
    pub fn render_as(
        &self,
        format: ReportFormat,
        counters: &ComparisonCounters,
    ) -> Result<String, serde_json::Error> {
        match format {
            ReportFormat::Text => Ok(self.render(counters)),
            ReportFormat::Json => self.render_json(counters),
        }
    }

    /// Renders the fixed text report.
    #[must_use]
    pub fn render(&self, counters: &ComparisonCounters) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_text(&mut out, counters);
        out
    }

    /// Renders the report as a JSON object.
    ///
    /// `difference_percentage` is `null` when nothing was compared.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_json(&self, counters: &ComparisonCounters) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&JsonReport {
            baseline_source: &self.baseline_source,
            candidate_source: &self.candidate_source,
            counters,
            difference_percentage: counters.difference_percentage(),
        })
    }

    fn write_text(&self, out: &mut String, c: &ComparisonCounters) -> std::fmt::Result {
        writeln!(out, "========== MMDB COMPARISON REPORT ==========")?;
        writeln!(out, "  Baseline file (GCS): {}", self.baseline_source)?;
        writeln!(out, "  New file (MaxMind):  {}", self.candidate_source)?;
        writeln!(out, "  IPs Checked:         {}", c.total_checked)?;
        writeln!(out, "  Found (baseline):    {}", c.found_in_baseline)?;
        writeln!(out, "  Found (new):         {}", c.found_in_candidate)?;
        writeln!(out, "  Found in both:       {}", c.found_in_both)?;
        writeln!(out, "  Same country:        {}", c.same_country)?;
        writeln!(out, "  Different country:   {}", c.different_country)?;
        match c.difference_percentage() {
            Some(pct) => writeln!(out, "  % Difference:        {pct:.2}%")?,
            None => writeln!(out, "  % Difference:        {NOT_APPLICABLE}")?,
        }
        writeln!(out, "===========================================")
    }
}
