use std::borrow::Borrow;

use chrono::NaiveDate;
use itertools::Itertools;

use crate::interval::{DatedInterval, DatedRecord, Period};

// -----------------------------------------------------------------------------
// Timeline
// -----------------------------------------------------------------------------
/// Covered time as a minimal set of periods.
///
/// Periods are sorted by start and neither overlap nor touch, so the gap
/// between two consecutive periods always has a positive length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, schemars::JsonSchema)]
#[serde(transparent)]
pub struct Timeline(Vec<Period>);

impl Timeline {
    #[inline]
    pub fn periods(&self) -> &[Period] {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Period> {
        self.0.iter()
    }

    /// Span from the first start to the last end, ignoring gaps.
    pub fn extent(&self) -> Option<Period> {
        let first = self.0.first()?;
        let last = self.0.last()?;
        Period::new(first.start(), last.end())
    }

    /// Merged periods as closed intervals, e.g. to merge them again with more input.
    pub fn to_intervals(&self) -> Vec<DatedInterval> {
        self.0.iter().copied().map(DatedInterval::from).collect()
    }

    /// Parse form records and merge the well-formed ones.
    ///
    /// Malformed records are skipped so that a half filled form still yields
    /// the coverage of what has been entered so far.
    pub fn from_records<I>(records: I, reference_now: NaiveDate) -> Timeline
    where
        I: IntoIterator,
        I::Item: DatedRecord,
    {
        let intervals = records
            .into_iter()
            .enumerate()
            .filter_map(|(i, rec)| {
                let parsed = rec.parse_entry();
                if let Some(reason) = parsed.malformed_reason() {
                    log::debug!("skip record #{i}: {reason}");
                }
                parsed.interval()
            })
            .collect::<Vec<_>>();
        merge_intervals(&intervals, reference_now)
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Period;
    type IntoIter = std::slice::Iter<'a, Period>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// -----------------------------------------------------------------------------
// merge_intervals
// -----------------------------------------------------------------------------
/// Merge intervals into a [`Timeline`].
///
/// Open intervals are closed at `reference_now`. Intervals whose resolved end
/// does not come after their start are ignored. Overlapping intervals and
/// intervals touching on the same date are merged into one period.
pub fn merge_intervals<I>(intervals: I, reference_now: NaiveDate) -> Timeline
where
    I: IntoIterator,
    I::Item: Borrow<DatedInterval>,
{
    let merged = intervals
        .into_iter()
        .filter_map(|itv| {
            let itv = itv.borrow();
            let resolved = itv.resolve(reference_now);
            if resolved.is_none() {
                log::debug!("skip empty interval: {itv:?}");
            }
            resolved
        })
        .sorted_by_key(Period::start)
        .coalesce(|cur, nxt| {
            if cur.joins(&nxt) {
                Ok(Period::new(cur.start(), cur.end().max(nxt.end())).unwrap_or(cur))
            } else {
                Err((cur, nxt))
            }
        })
        .inspect(|p| log::trace!("merged period: {} - {}", p.start(), p.end()))
        .collect();
    Timeline(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::RawEntry;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> NaiveDate {
        ymd(2024, 6, 1)
    }

    fn spans(tl: &Timeline) -> Vec<(NaiveDate, NaiveDate)> {
        tl.iter().map(|p| (p.start(), p.end())).collect()
    }

    #[test]
    fn test_empty() {
        let tested = merge_intervals(Vec::<DatedInterval>::new(), now());

        assert!(tested.is_empty());
        assert_eq!(tested.extent(), None);
    }

    #[rstest]
    #[case::overlapping(
        vec![
            DatedInterval::closed(ymd(2021, 1, 1), ymd(2022, 1, 1)),
            DatedInterval::closed(ymd(2021, 6, 1), ymd(2022, 6, 1)),
        ],
        vec![(ymd(2021, 1, 1), ymd(2022, 6, 1))],
    )]
    #[case::touching(
        vec![
            DatedInterval::closed(ymd(2021, 1, 1), ymd(2021, 6, 1)),
            DatedInterval::closed(ymd(2021, 6, 1), ymd(2022, 1, 1)),
        ],
        vec![(ymd(2021, 1, 1), ymd(2022, 1, 1))],
    )]
    #[case::contained(
        vec![
            DatedInterval::closed(ymd(2020, 1, 1), ymd(2023, 1, 1)),
            DatedInterval::closed(ymd(2021, 1, 1), ymd(2022, 1, 1)),
        ],
        vec![(ymd(2020, 1, 1), ymd(2023, 1, 1))],
    )]
    #[case::disjoint_unsorted(
        vec![
            DatedInterval::open(ymd(2020, 6, 1)),
            DatedInterval::closed(ymd(2019, 1, 1), ymd(2020, 1, 1)),
        ],
        vec![(ymd(2019, 1, 1), ymd(2020, 1, 1)), (ymd(2020, 6, 1), ymd(2024, 6, 1))],
    )]
    #[case::chain(
        vec![
            DatedInterval::closed(ymd(2022, 1, 1), ymd(2023, 1, 1)),
            DatedInterval::closed(ymd(2019, 1, 1), ymd(2020, 1, 1)),
            DatedInterval::closed(ymd(2020, 1, 1), ymd(2021, 1, 1)),
            DatedInterval::closed(ymd(2020, 6, 1), ymd(2022, 1, 1)),
        ],
        vec![(ymd(2019, 1, 1), ymd(2023, 1, 1))],
    )]
    #[case::invalid_skipped(
        vec![
            DatedInterval::closed(ymd(2021, 1, 1), ymd(2020, 1, 1)),
            DatedInterval::closed(ymd(2022, 1, 1), ymd(2022, 1, 1)),
            DatedInterval::open(ymd(2025, 1, 1)),
            DatedInterval::closed(ymd(2023, 1, 1), ymd(2023, 6, 1)),
        ],
        vec![(ymd(2023, 1, 1), ymd(2023, 6, 1))],
    )]
    fn test_merge(
        #[case] input: Vec<DatedInterval>,
        #[case] expected: Vec<(NaiveDate, NaiveDate)>,
    ) {
        let tested = merge_intervals(&input, now());

        assert_eq!(spans(&tested), expected);
    }

    #[test]
    fn test_merge_again() {
        let input = vec![
            DatedInterval::closed(ymd(2019, 1, 1), ymd(2020, 1, 1)),
            DatedInterval::closed(ymd(2019, 6, 1), ymd(2020, 3, 1)),
            DatedInterval::open(ymd(2021, 6, 1)),
        ];
        let merged = merge_intervals(&input, now());

        let tested = merge_intervals(merged.to_intervals(), now());

        assert_eq!(tested, merged);
    }

    #[test]
    fn test_extent() {
        let input = vec![
            DatedInterval::closed(ymd(2019, 1, 1), ymd(2020, 1, 1)),
            DatedInterval::open(ymd(2021, 6, 1)),
        ];

        let tested = merge_intervals(&input, now()).extent();

        assert_eq!(tested, Period::new(ymd(2019, 1, 1), ymd(2024, 6, 1)));
    }

    #[test]
    fn test_from_records() {
        let records = vec![
            RawEntry::new("2019-01-01", Some("2020-01-01")),
            RawEntry::new("2020-06-01", None),
            RawEntry::new("2021-01-01", Some("2020-01-01")),
            RawEntry::default(),
        ];

        let tested = Timeline::from_records(&records, now());

        assert_eq!(
            spans(&tested),
            vec![(ymd(2019, 1, 1), ymd(2020, 1, 1)), (ymd(2020, 6, 1), ymd(2024, 6, 1))]
        );
    }

    #[test]
    fn test_serialize() {
        let tl = merge_intervals([DatedInterval::closed(ymd(2020, 1, 1), ymd(2021, 1, 1))], now());

        let tested = serde_json::to_value(&tl).unwrap();

        assert_eq!(
            tested,
            serde_json::json!([{ "start": "2020-01-01", "end": "2021-01-01" }])
        );
    }
}
