use chrono::NaiveDate;

use super::Gap;

// -----------------------------------------------------------------------------
// CoverageResult
// -----------------------------------------------------------------------------
/// How much of the trailing window `[window_start, window_end)` is covered.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, schemars::JsonSchema)]
pub struct CoverageResult {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub required_months: u32,
    pub covered_months: u32,
    pub required_days: u32,
    pub covered_days: u32,
    /// Rounded to the nearest integer.
    pub percentage_covered: u32,
    /// Chronological.
    pub gaps: Vec<Gap>,
    pub is_complete: bool,
}

impl CoverageResult {
    /// Whether any gap lasts at least a whole month.
    ///
    /// Shorter gaps still prevent [`CoverageResult::is_complete`], but are not
    /// worth an advisory warning on their own.
    #[inline]
    pub fn has_gaps(&self) -> bool {
        self.gaps.iter().any(|g| g.months > 0)
    }

    /// e.g. `87% covered`
    #[inline]
    pub fn progress_label(&self) -> String {
        format!("{}% covered", self.percentage_covered)
    }

    #[inline]
    pub fn gap_labels(&self) -> Vec<String> {
        self.gaps.iter().map(ToString::to_string).collect()
    }
}
