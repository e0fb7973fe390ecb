use chrono::NaiveDate;
use cmchrono::duration::months_between;

// -----------------------------------------------------------------------------
// DatedInterval
// -----------------------------------------------------------------------------
/// A declared period of history.
///
/// `end` is [None] for an ongoing period, which extends to the reference date
/// it is evaluated against. Nothing is checked on construction: an inverted or
/// empty interval is simply dropped when it is resolved into a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, schemars::JsonSchema)]
pub struct DatedInterval {
    start: NaiveDate,
    end: Option<NaiveDate>,
}

//
// ctors
//
impl DatedInterval {
    #[inline]
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        DatedInterval { start, end }
    }

    #[inline]
    pub fn closed(start: NaiveDate, end: NaiveDate) -> Self {
        DatedInterval::new(start, Some(end))
    }

    #[inline]
    pub fn open(start: NaiveDate) -> Self {
        DatedInterval::new(start, None)
    }
}

impl From<Period> for DatedInterval {
    #[inline]
    fn from(p: Period) -> Self {
        DatedInterval::closed(p.start, p.end)
    }
}

//
// methods
//
impl DatedInterval {
    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Concrete period of this interval, with an open end fixed at `reference_now`.
    ///
    /// Returns [None] when the resolved end does not come after the start. This
    /// covers inverted input as well as an ongoing period starting after `reference_now`.
    #[inline]
    pub fn resolve(&self, reference_now: NaiveDate) -> Option<Period> {
        Period::new(self.start, self.end.unwrap_or(reference_now))
    }
}

// -----------------------------------------------------------------------------
// Period
// -----------------------------------------------------------------------------
/// A half-open date range `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, schemars::JsonSchema)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

impl Period {
    #[inline]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start < end).then_some(Period { start, end })
    }

    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    #[inline]
    pub fn days(&self) -> u32 {
        (self.end - self.start).num_days() as u32
    }

    /// Whole calendar months spanned.
    #[inline]
    pub fn months(&self) -> u32 {
        months_between(self.start, self.end) as u32
    }

    /// Intersection with `[start, end)`, or [None] if nothing is left.
    #[inline]
    pub fn clip(&self, start: NaiveDate, end: NaiveDate) -> Option<Period> {
        Period::new(self.start.max(start), self.end.min(end))
    }

    /// Whether `other` overlaps or touches this period.
    #[inline]
    pub(crate) fn joins(&self, other: &Period) -> bool {
        other.start <= self.end && self.start <= other.end
    }
}
