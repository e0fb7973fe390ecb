use chrono::NaiveDate;

use crate::{coverage::calculate_coverage, interval::DatedRecord, CoveragePolicy, CoverageResult};

use super::{validation::is_blank, ValidationReport};

// -----------------------------------------------------------------------------
// EmploymentEntry
// EmploymentSection
// -----------------------------------------------------------------------------
/// One job or course. A blank end date means it is current.
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
pub struct EmploymentEntry {
    pub employer: String,
    pub title: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub reason_for_leaving: String,
}

impl DatedRecord for EmploymentEntry {
    #[inline]
    fn start_field(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    #[inline]
    fn end_field(&self) -> Option<&str> {
        self.end_date.as_deref()
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
pub struct EmploymentSection {
    pub entries: Vec<EmploymentEntry>,
    /// Free text explaining periods without employment or education.
    pub gaps_explanation: String,
}

// -----------------------------------------------------------------------------
// EmploymentCoverage
// -----------------------------------------------------------------------------
/// Employment and education history coverage. Advisory only.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, schemars::JsonSchema)]
pub struct EmploymentCoverage {
    #[serde(flatten)]
    pub result: CoverageResult,
    /// At least one gap of a whole month or more.
    pub has_gaps: bool,
}

impl EmploymentCoverage {
    #[inline]
    pub fn percentage_covered(&self) -> u32 {
        self.result.percentage_covered
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.result.is_complete
    }

    #[inline]
    pub fn progress_label(&self) -> String {
        self.result.progress_label()
    }
}

pub fn calculate_employment_coverage(
    entries: &[EmploymentEntry],
    today: NaiveDate,
    policy: &CoveragePolicy,
) -> EmploymentCoverage {
    let result = calculate_coverage(entries, today, policy);
    EmploymentCoverage {
        has_gaps: result.has_gaps(),
        result,
    }
}

// -----------------------------------------------------------------------------
// validate_employment_section
// -----------------------------------------------------------------------------
/// Required fields are errors. Gaps without an explanation are only a warning.
pub fn validate_employment_section(
    section: &EmploymentSection,
    today: NaiveDate,
    policy: &CoveragePolicy,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    if section.entries.is_empty() {
        report.error(
            "employment_history",
            "Add at least one employment or education entry",
        );
    }
    for (i, entry) in section.entries.iter().enumerate() {
        report.require(
            format!("employment_{i}_employer"),
            Some(entry.employer.as_str()),
            "Enter employer/education provider",
        );
        report.require(
            format!("employment_{i}_title"),
            Some(entry.title.as_str()),
            "Enter job title/course",
        );
        report.malformed_dates(
            entry,
            format!("employment_{i}_start_date"),
            format!("employment_{i}_end_date"),
            "Enter start date",
        );
    }

    let coverage = calculate_employment_coverage(&section.entries, today, policy);
    if coverage.has_gaps && is_blank(Some(section.gaps_explanation.as_str())) {
        report.warning(
            "employment_gaps",
            "Explain any gaps in your employment history",
        );
    }
    report
}
