use chrono::NaiveDate;
use cmchrono::timepoint::{format_uk, parse_form_date, DateParseError};

use crate::{interval::DatedRecord, timeline::Timeline, CoveragePolicy, CoverageResult};

use super::ValidationReport;

// -----------------------------------------------------------------------------
// YesNo
// -----------------------------------------------------------------------------
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
    strum::Display,
)]
pub enum YesNo {
    Yes,
    No,
}

// -----------------------------------------------------------------------------
// CurrentAddress
// PreviousAddress
// AddressSection
// -----------------------------------------------------------------------------
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case", default)]
pub struct CurrentAddress {
    pub line1: String,
    pub line2: String,
    pub town: String,
    pub postcode: String,
    pub move_in: Option<String>,
}

impl DatedRecord for CurrentAddress {
    #[inline]
    fn start_field(&self) -> Option<&str> {
        self.move_in.as_deref()
    }

    #[inline]
    fn end_field(&self) -> Option<&str> {
        None
    }
}

/// A former address. A blank move out date means it is still lived in.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case", default)]
pub struct PreviousAddress {
    pub address: String,
    pub move_in: Option<String>,
    pub move_out: Option<String>,
}

impl DatedRecord for PreviousAddress {
    #[inline]
    fn start_field(&self) -> Option<&str> {
        self.move_in.as_deref()
    }

    #[inline]
    fn end_field(&self) -> Option<&str> {
        self.move_out.as_deref()
    }
}

#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case", default)]
pub struct AddressSection {
    pub current: CurrentAddress,
    pub previous_addresses: Vec<PreviousAddress>,
    pub lived_outside_uk: Option<YesNo>,
}

impl AddressSection {
    fn timeline(&self, today: NaiveDate) -> Timeline {
        let records = std::iter::once(&self.current as &dyn DatedRecord).chain(
            self.previous_addresses
                .iter()
                .map(|p| p as &dyn DatedRecord),
        );
        Timeline::from_records(records, today)
    }
}

// -----------------------------------------------------------------------------
// AddressCoverage
// -----------------------------------------------------------------------------
/// Address history coverage anchored on the current address.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, schemars::JsonSchema)]
pub struct AddressCoverage {
    /// Move in date of the current address.
    pub current_move_in: NaiveDate,
    /// Date the history has to reach back to.
    pub target_date: NaiveDate,
    /// Earliest date from which the history runs without a break up to today.
    pub coverage_date: NaiveDate,
    pub has_gaps: bool,
    pub result: CoverageResult,
}

impl AddressCoverage {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.result.is_complete
    }

    /// Warning asking for the addresses before the current one.
    pub fn banner(&self) -> Option<String> {
        if !self.has_gaps {
            return None;
        }
        Some(format!(
            "Your current address starts on {}. Please add previous addresses to cover from {} until this date.",
            format_uk(self.current_move_in),
            format_uk(self.target_date),
        ))
    }
}

/// Coverage of the address history.
///
/// Returns [None] while the current move in date is missing or unparseable,
/// which [`validate_address_section`] reports on its own.
pub fn assess_address_history(
    section: &AddressSection,
    today: NaiveDate,
    policy: &CoveragePolicy,
) -> Option<AddressCoverage> {
    let current_move_in = parse_form_date(section.current.move_in.as_deref()?).ok()?;
    let timeline = section.timeline(today);
    let result = policy.evaluate(&timeline, today);
    let coverage_date = timeline
        .periods()
        .last()
        .filter(|p| p.end() >= today)
        .map_or(today, |p| p.start());
    Some(AddressCoverage {
        current_move_in,
        target_date: result.window_start,
        coverage_date,
        has_gaps: !result.gaps.is_empty(),
        result,
    })
}

// -----------------------------------------------------------------------------
// validate_address_section
// -----------------------------------------------------------------------------
/// Missing fields and an incomplete history both block submission.
pub fn validate_address_section(
    section: &AddressSection,
    today: NaiveDate,
    policy: &CoveragePolicy,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let current = &section.current;

    report.require("home_address_line1", Some(current.line1.as_str()), "Enter address line 1");
    report.require("home_town", Some(current.town.as_str()), "Enter town or city");
    report.require("home_postcode", Some(current.postcode.as_str()), "Enter postcode");
    match current.move_in.as_deref().map(parse_form_date) {
        None | Some(Err(DateParseError::Blank)) => {
            report.error("home_move_in", "Enter move in date")
        }
        Some(Err(DateParseError::Invalid(_))) => report.error("home_move_in", "Enter a real date"),
        Some(Ok(_)) => {}
    }
    if section.lived_outside_uk.is_none() {
        report.error("lived_outside_uk", "Select yes or no");
    }

    for (i, prev) in section.previous_addresses.iter().enumerate() {
        report.require(
            format!("previous_address_{i}_address"),
            Some(prev.address.as_str()),
            "Enter full address",
        );
        report.malformed_dates(
            prev,
            format!("previous_address_{i}_move_in"),
            format!("previous_address_{i}_move_out"),
            "Enter move in date",
        );
    }

    if let Some(coverage) = assess_address_history(section, today, policy) {
        if !coverage.is_complete() {
            report.error(
                "address_history",
                &format!(
                    "Your address history must cover the last {}",
                    describe_lookback(coverage.result.required_months)
                ),
            );
        }
    }
    report
}

fn describe_lookback(months: u32) -> String {
    match months {
        12 => "year".to_string(),
        m if m % 12 == 0 => format!("{} years", m / 12),
        1 => "month".to_string(),
        m => format!("{m} months"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmchrono::duration::Span;
    use maplit::btreemap;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        ymd(2024, 6, 1)
    }

    fn previous(move_in: &str, move_out: &str) -> PreviousAddress {
        PreviousAddress {
            address: "12 Mill Lane, Leeds LS1 1AA".to_string(),
            move_in: Some(move_in.to_string()),
            move_out: Some(move_out.to_string()),
        }
    }

    fn section(move_in: Option<&str>, previous_addresses: Vec<PreviousAddress>) -> AddressSection {
        AddressSection {
            current: CurrentAddress {
                line1: "3 Orchard Close".to_string(),
                line2: String::new(),
                town: "York".to_string(),
                postcode: "YO1 7HH".to_string(),
                move_in: move_in.map(str::to_owned),
            },
            previous_addresses,
            lived_outside_uk: Some(YesNo::No),
        }
    }

    #[test]
    fn test_assess_without_move_in() {
        let tested = assess_address_history(&section(None, vec![]), today(), &CoveragePolicy::default());

        assert_eq!(tested, None);
    }

    #[test]
    fn test_assess_long_standing_address() {
        let tested = assess_address_history(
            &section(Some("2015-03-01"), vec![]),
            today(),
            &CoveragePolicy::default(),
        )
        .unwrap();

        assert!(!tested.has_gaps);
        assert!(tested.is_complete());
        assert_eq!(tested.coverage_date, ymd(2015, 3, 1));
        assert_eq!(tested.banner(), None);
    }

    #[test]
    fn test_assess_recent_move_without_history() {
        let tested = assess_address_history(
            &section(Some("2022-01-15"), vec![]),
            today(),
            &CoveragePolicy::default(),
        )
        .unwrap();

        assert!(tested.has_gaps);
        assert_eq!(tested.target_date, ymd(2019, 6, 1));
        assert_eq!(tested.coverage_date, ymd(2022, 1, 15));
        assert_eq!(
            tested.banner().unwrap(),
            "Your current address starts on 15/01/2022. Please add previous addresses to cover from 01/06/2019 until this date."
        );
    }

    #[test]
    fn test_assess_history_fills_back() {
        let tested = assess_address_history(
            &section(
                Some("2022-01-15"),
                vec![
                    previous("2020-05-01", "2022-01-15"),
                    previous("2017-08-01", "2020-05-01"),
                ],
            ),
            today(),
            &CoveragePolicy::default(),
        )
        .unwrap();

        assert!(!tested.has_gaps);
        assert!(tested.is_complete());
        assert_eq!(tested.coverage_date, ymd(2017, 8, 1));
    }

    #[test]
    fn test_assess_history_with_break() {
        let tested = assess_address_history(
            &section(
                Some("2022-01-15"),
                vec![
                    previous("2020-05-01", "2021-09-01"),
                    previous("2017-08-01", "2020-05-01"),
                ],
            ),
            today(),
            &CoveragePolicy::default(),
        )
        .unwrap();

        assert!(tested.has_gaps);
        assert_eq!(tested.coverage_date, ymd(2022, 1, 15));
        assert_eq!(
            tested.result.gap_labels(),
            vec!["01/09/2021 to 15/01/2022 (4 months)".to_string()]
        );
    }

    #[test]
    fn test_assess_blank_move_out_is_current() {
        let tested = assess_address_history(
            &section(Some("2022-01-15"), vec![previous("2018-01-01", "")]),
            today(),
            &CoveragePolicy::default(),
        )
        .unwrap();

        assert!(tested.is_complete());
    }

    #[test]
    fn test_validate_complete() {
        let tested = validate_address_section(
            &section(Some("2015-03-01"), vec![]),
            today(),
            &CoveragePolicy::default(),
        );

        assert!(tested.is_valid());
        assert!(tested.warnings.is_empty());
    }

    #[test]
    fn test_validate_incomplete_history_blocks() {
        let tested = validate_address_section(
            &section(Some("2022-01-15"), vec![previous("2020-05-01", "2022-01-15")]),
            today(),
            &CoveragePolicy::default(),
        );

        assert_eq!(
            tested.errors,
            btreemap! {
                "address_history".to_string() => "Your address history must cover the last 5 years".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_empty_section() {
        let tested = validate_address_section(
            &AddressSection::default(),
            today(),
            &CoveragePolicy::default(),
        );

        assert_eq!(
            tested.errors,
            btreemap! {
                "home_address_line1".to_string() => "Enter address line 1".to_string(),
                "home_town".to_string() => "Enter town or city".to_string(),
                "home_postcode".to_string() => "Enter postcode".to_string(),
                "home_move_in".to_string() => "Enter move in date".to_string(),
                "lived_outside_uk".to_string() => "Select yes or no".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_previous_address_fields() {
        let mut prev = previous("2021-01-01", "2020-01-01");
        prev.address = String::new();

        let tested = validate_address_section(
            &section(Some("2015-03-01"), vec![prev]),
            today(),
            &CoveragePolicy::default(),
        );

        assert_eq!(
            tested.errors,
            btreemap! {
                "previous_address_0_address".to_string() => "Enter full address".to_string(),
                "previous_address_0_move_out".to_string() => "End date must be after the start date".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_invalid_move_in() {
        let tested = validate_address_section(
            &section(Some("15/01/2022"), vec![]),
            today(),
            &CoveragePolicy::default(),
        );

        assert_eq!(
            tested.errors,
            btreemap! { "home_move_in".to_string() => "Enter a real date".to_string() }
        );
    }

    #[rstest]
    #[case(Span::Years(5), "5 years")]
    #[case(Span::Years(1), "year")]
    #[case(Span::Months(18), "18 months")]
    fn test_validate_message_follows_lookback(#[case] lookback: Span, #[case] expected: &str) {
        let policy = CoveragePolicy {
            lookback,
            ..Default::default()
        };

        let tested = validate_address_section(&section(Some("2024-05-01"), vec![]), today(), &policy);

        assert_eq!(
            tested.errors["address_history"],
            format!("Your address history must cover the last {expected}")
        );
    }
}
