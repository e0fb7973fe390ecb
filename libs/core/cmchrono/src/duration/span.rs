use std::{fmt::Display, ops::Sub, str::FromStr};

use chrono::{Months, NaiveDate};

// -----------------------------------------------------------------------------
// SpanParseError
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpanParseError {
    #[error("invalid span string: '{0}'. Expected format is either of P[n]M, P[n]Y")]
    InvalidFormat(String),
    #[error("invalid span string: '{0}'. Fail to parse the number part '{1}'")]
    InvalidNumber(String, String),
    #[error("invalid span string: '{0}'. Lookback span must not be negative")]
    Negative(String),
}

// -----------------------------------------------------------------------------
// Span
// -----------------------------------------------------------------------------
/// Calendar length of a lookback window.
///
/// Only month based units are supported because a history requirement such as
/// "the last 5 years" is a calendar span, not a fixed number of days.
/// The value is unsigned so a negative requirement cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Span {
    Months(u16),
    Years(u16),
}

impl Default for Span {
    #[inline]
    fn default() -> Self {
        Span::Years(5)
    }
}

impl Span {
    /// Total number of calendar months of this span.
    #[inline]
    pub fn months(&self) -> u32 {
        match self {
            Span::Months(m) => *m as u32,
            Span::Years(y) => *y as u32 * 12,
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.months() == 0
    }
}

//
//  ser/de
//
impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Span::Months(m) => write!(f, "P{m}M"),
            Span::Years(y) => write!(f, "P{y}Y"),
        }
    }
}

impl FromStr for Span {
    type Err = SpanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = match s.chars().next() {
            Some('-') => return Err(SpanParseError::Negative(s.to_owned())),
            Some('+') => &s[1..],
            _ => s,
        };
        let Some(body) = body.strip_prefix('P') else {
            return Err(SpanParseError::InvalidFormat(s.to_owned()));
        };
        let (n, unit) = match body.chars().last() {
            Some(c @ ('M' | 'Y')) => (&body[..body.len() - 1], c),
            _ => return Err(SpanParseError::InvalidFormat(s.to_owned())),
        };
        if n.starts_with('-') {
            return Err(SpanParseError::Negative(s.to_owned()));
        }
        let n = n
            .parse::<u16>()
            .map_err(|_| SpanParseError::InvalidNumber(s.to_owned(), n.to_owned()))?;
        match unit {
            'M' => Ok(Span::Months(n)),
            _ => Ok(Span::Years(n)),
        }
    }
}

impl serde::Serialize for Span {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Span {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Span::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl schemars::JsonSchema for Span {
    fn schema_name() -> String {
        "Span".to_string()
    }
    fn schema_id() -> std::borrow::Cow<'static, str> {
        "cmchrono::Span".into()
    }

    fn json_schema(_: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        let mut obj = schemars::schema::SchemaObject {
            instance_type: Some(schemars::schema::InstanceType::String.into()),
            ..Default::default()
        };
        obj.metadata().description =
            Some("Lookback span string. e.g. P60M, P5Y".to_string());
        obj.string().pattern = Some(r#"^\+?P\d+[MY]$"#.to_string());
        obj.into()
    }
}

//
// ops
//
impl Sub<Span> for NaiveDate {
    type Output = NaiveDate;

    /// Shift the date back by whole calendar months.
    ///
    /// The day of month is clamped to the end of the target month,
    /// e.g. 2024-02-29 minus one year is 2023-02-28.
    fn sub(self, rhs: Span) -> Self::Output {
        self.checked_sub_months(Months::new(rhs.months()))
            .unwrap_or(NaiveDate::MIN)
    }
}
