use chrono::NaiveDate;
use cmchrono::timepoint::{parse_form_date, DateParseError};

use super::DatedInterval;

// -----------------------------------------------------------------------------
// DatedRecord
// -----------------------------------------------------------------------------
/// A form record carrying a start and an optional end date as raw field values.
///
/// The rest of the record is opaque to coverage calculation.
pub trait DatedRecord {
    fn start_field(&self) -> Option<&str>;
    fn end_field(&self) -> Option<&str>;

    #[inline]
    fn parse_entry(&self) -> ParsedEntry {
        ParsedEntry::parse(self.start_field(), self.end_field())
    }
}

impl<R: DatedRecord + ?Sized> DatedRecord for &R {
    #[inline]
    fn start_field(&self) -> Option<&str> {
        (**self).start_field()
    }

    #[inline]
    fn end_field(&self) -> Option<&str> {
        (**self).end_field()
    }
}

// -----------------------------------------------------------------------------
// RawEntry
// -----------------------------------------------------------------------------
/// Start and end exactly as entered. Either may be missing or unparseable.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
)]
#[serde(default)]
pub struct RawEntry {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RawEntry {
    pub fn new(start: &str, end: Option<&str>) -> Self {
        RawEntry {
            start: Some(start.to_owned()),
            end: end.map(str::to_owned),
        }
    }
}

impl DatedRecord for RawEntry {
    #[inline]
    fn start_field(&self) -> Option<&str> {
        self.start.as_deref()
    }

    #[inline]
    fn end_field(&self) -> Option<&str> {
        self.end.as_deref()
    }
}

// -----------------------------------------------------------------------------
// MalformedReason
// -----------------------------------------------------------------------------
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    schemars::JsonSchema,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MalformedReason {
    MissingStart,
    UnparseableStart,
    UnparseableEnd,
    EndNotAfterStart,
}

// -----------------------------------------------------------------------------
// ParsedEntry
// -----------------------------------------------------------------------------
/// Result of validating a [`RawEntry`].
///
/// Only [`ParsedEntry::Closed`] and [`ParsedEntry::Open`] take part in coverage.
/// A blank end means the period is ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsedEntry {
    Closed { start: NaiveDate, end: NaiveDate },
    Open { start: NaiveDate },
    Malformed(MalformedReason),
}

impl ParsedEntry {
    pub fn parse(start: Option<&str>, end: Option<&str>) -> ParsedEntry {
        let start = match start.map(parse_form_date) {
            None | Some(Err(DateParseError::Blank)) => {
                return ParsedEntry::Malformed(MalformedReason::MissingStart)
            }
            Some(Err(DateParseError::Invalid(_))) => {
                return ParsedEntry::Malformed(MalformedReason::UnparseableStart)
            }
            Some(Ok(d)) => d,
        };
        match end.map(parse_form_date) {
            None | Some(Err(DateParseError::Blank)) => ParsedEntry::Open { start },
            Some(Err(DateParseError::Invalid(_))) => {
                ParsedEntry::Malformed(MalformedReason::UnparseableEnd)
            }
            Some(Ok(end)) if end <= start => {
                ParsedEntry::Malformed(MalformedReason::EndNotAfterStart)
            }
            Some(Ok(end)) => ParsedEntry::Closed { start, end },
        }
    }

    #[inline]
    pub fn interval(&self) -> Option<DatedInterval> {
        match self {
            ParsedEntry::Closed { start, end } => Some(DatedInterval::closed(*start, *end)),
            ParsedEntry::Open { start } => Some(DatedInterval::open(*start)),
            ParsedEntry::Malformed(_) => None,
        }
    }

    #[inline]
    pub fn malformed_reason(&self) -> Option<MalformedReason> {
        match self {
            ParsedEntry::Malformed(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl From<&RawEntry> for ParsedEntry {
    #[inline]
    fn from(raw: &RawEntry) -> Self {
        raw.parse_entry()
    }
}
