use chrono::{Datelike, Months, NaiveDate};

/// Number of whole calendar months from `start` to `end`.
///
/// A month is counted only once the day of month has been reached again,
/// with the day clamped to the end of shorter months. So 2024-01-15 to
/// 2024-02-14 is 0 months while 2024-01-31 to 2024-02-29 is 1 month.
/// The result is negative when `end` precedes `start`.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use cmchrono::duration::months_between;
///
/// let start = NaiveDate::from_ymd_opt(2019, 6, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// assert_eq!(months_between(start, end), 60);
/// assert_eq!(months_between(end, start), -60);
/// ```
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    if end < start {
        return -months_between(end, start);
    }
    let mut months =
        (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if months > 0 {
        let reached = start
            .checked_add_months(Months::new(months as u32))
            .map_or(false, |d| d <= end);
        if !reached {
            months -= 1;
        }
    }
    months
}
