use chrono::NaiveDate;

use crate::duration::Span;

// -----------------------------------------------------------------------------
// Clock
// -----------------------------------------------------------------------------
/// Source of the reference date "today".
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock date in the local timezone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Clock pinned to a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    #[inline]
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// The trailing window `[today - span, today]` as a `(start, end)` pair.
pub fn lookback_window<C: Clock + ?Sized>(clock: &C, span: Span) -> (NaiveDate, NaiveDate) {
    let end = clock.today();
    (end - span, end)
}
