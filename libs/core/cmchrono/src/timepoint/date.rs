use chrono::NaiveDate;

// -----------------------------------------------------------------------------
// DateParseError
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("date is blank")]
    Blank,
    #[error("parse '{0}' to date. Only YYYY-MM-DD, naive datetime(%Y-%m-%dT%H:%M:%S) or RFC3339 string are supported")]
    Invalid(String),
}

// -----------------------------------------------------------------------------
// parse_form_date
// -----------------------------------------------------------------------------
/// Parse a date as submitted by a form field.
///
/// Date inputs submit `YYYY-MM-DD`. Stored records may carry a full timestamp
/// instead, in which case the calendar date in the timestamp's own offset is used.
/// Surrounding whitespace is ignored and a blank value is reported as
/// [`DateParseError::Blank`] so that callers can tell "not filled in" apart from
/// "filled in wrongly".
pub fn parse_form_date(s: &str) -> Result<NaiveDate, DateParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DateParseError::Blank);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(tp) = chrono::DateTime::parse_from_rfc3339(s) {
        return Ok(tp.date_naive());
    }
    if let Ok(tp) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(tp.date());
    }
    Err(DateParseError::Invalid(s.to_owned()))
}

/// Format as `DD/MM/YYYY`.
#[inline]
pub fn format_uk(d: NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}
