use chrono::NaiveDate;
use cmchrono::duration::{months_between, Span};

use crate::{interval::DatedRecord, timeline::Timeline, CoveragePolicy};

use super::{CoverageResult, Gap};

/// Evaluate `timeline` against the trailing window of length `required` ending at `reference_now`.
///
/// Uses the default [`CoveragePolicy`] apart from the window length.
pub fn evaluate_coverage(
    timeline: &Timeline,
    reference_now: NaiveDate,
    required: Span,
) -> CoverageResult {
    let policy = CoveragePolicy {
        lookback: required,
        ..Default::default()
    };
    policy.evaluate(timeline, reference_now)
}

/// Parse, merge and evaluate form records in one go.
pub fn calculate_coverage<I>(
    records: I,
    reference_now: NaiveDate,
    policy: &CoveragePolicy,
) -> CoverageResult
where
    I: IntoIterator,
    I::Item: DatedRecord,
{
    let timeline = Timeline::from_records(records, reference_now);
    policy.evaluate(&timeline, reference_now)
}

impl CoveragePolicy {
    /// Coverage of the window `[reference_now - lookback, reference_now)`.
    ///
    /// Gaps are located on exact dates. Only the durations are rounded down to
    /// whole months, and the percentage is derived from those.
    pub fn evaluate(&self, timeline: &Timeline, reference_now: NaiveDate) -> CoverageResult {
        let window_end = reference_now;
        let window_start = reference_now - self.lookback;
        let required_months = months_between(window_start, window_end) as u32;
        let required_days = (window_end - window_start).num_days() as u32;

        let mut covered_months = 0;
        let mut covered_days = 0;
        let mut gaps = Vec::new();
        let mut cursor = window_start;
        for p in timeline.iter().filter_map(|p| p.clip(window_start, window_end)) {
            covered_months += p.months();
            covered_days += p.days();
            gaps.extend(Gap::new(cursor, p.start()));
            cursor = p.end();
        }
        gaps.extend(Gap::new(cursor, window_end));

        let percentage_covered = self.percentage(covered_months, required_months);
        let is_complete = gaps.is_empty() && percentage_covered >= 100;
        log::debug!(
            "coverage of {window_start} - {window_end}: {covered_months}/{required_months} months ({percentage_covered}%), {} gap(s)",
            gaps.len()
        );
        CoverageResult {
            window_start,
            window_end,
            required_months,
            covered_months,
            required_days,
            covered_days,
            percentage_covered,
            gaps,
            is_complete,
        }
    }

    fn percentage(&self, covered: u32, required: u32) -> u32 {
        if required == 0 {
            return 100;
        }
        let pct = (covered as f64 / required as f64 * 100.0).round() as u32;
        if self.clamp_percentage {
            pct.min(100)
        } else {
            pct
        }
    }
}
