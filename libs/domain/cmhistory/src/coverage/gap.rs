use std::fmt::Display;

use chrono::NaiveDate;
use cmchrono::{duration::months_between, timepoint::format_uk};

// -----------------------------------------------------------------------------
// Gap
// -----------------------------------------------------------------------------
/// An uncovered range `[start, end)` within the coverage window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, schemars::JsonSchema)]
pub struct Gap {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Whole calendar months. Zero for a gap shorter than a month.
    pub months: u32,
    pub days: u32,
}

impl Gap {
    /// Returns [None] unless `end` comes after `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Gap> {
        if end <= start {
            return None;
        }
        Some(Gap {
            start,
            end,
            months: months_between(start, end) as u32,
            days: (end - start).num_days() as u32,
        })
    }
}

impl Display for Gap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (n, unit) = if self.months > 0 {
            (self.months, "month")
        } else {
            (self.days, "day")
        };
        write!(
            f,
            "{} to {} ({} {}{})",
            format_uk(self.start),
            format_uk(self.end),
            n,
            unit,
            if n == 1 { "" } else { "s" }
        )
    }
}
