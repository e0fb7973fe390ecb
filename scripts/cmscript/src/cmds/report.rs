use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context};
use chrono::NaiveDate;
use cmchrono::timepoint::{parse_form_date, Clock, FixedClock, SystemClock};
use cmhistory::{
    adapter::{
        address::{assess_address_history, validate_address_section, AddressCoverage, AddressSection},
        employment::{
            calculate_employment_coverage, validate_employment_section, EmploymentCoverage,
            EmploymentSection,
        },
        ValidationReport,
    },
    CoveragePolicy, CoverageResult,
};
use serde::de::DeserializeOwned;

use super::Cmd;

// -----------------------------------------------------------------------------
// Common
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Debug, clap::Args)]
pub struct Common {
    /// Form section snapshot (JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Reference date of the check. Today if omitted
    #[arg(long, value_parser = parse_form_date)]
    today: Option<NaiveDate>,

    /// Coverage policy file (YAML or JSON)
    #[arg(long)]
    policy: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

impl Common {
    fn clock(&self) -> Box<dyn Clock> {
        match self.today {
            Some(today) => Box::new(FixedClock(today)),
            None => Box::new(SystemClock),
        }
    }

    fn policy(&self) -> anyhow::Result<CoveragePolicy> {
        CoveragePolicy::load_or_default(self.policy.as_deref())
            .context("Failed to load coverage policy")
    }

    fn print<R: fmt::Display + serde::Serialize>(&self, report: &R) -> anyhow::Result<()> {
        match self.format {
            Format::Text => print!("{report}"),
            Format::Json => println!("{}", serde_json::to_string_pretty(report)?),
        }
        Ok(())
    }
}

fn read_section<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("Failed to parse {}", path.display()))
}

// -----------------------------------------------------------------------------
// EmploymentArgs
// -----------------------------------------------------------------------------
#[derive(Debug, clap::Args)]
pub struct EmploymentArgs {
    #[command(flatten)]
    common: Common,
}

#[derive(Debug, serde::Serialize)]
struct EmploymentReport {
    coverage: EmploymentCoverage,
    validation: ValidationReport,
}

impl EmploymentReport {
    fn new(section: &EmploymentSection, today: NaiveDate, policy: &CoveragePolicy) -> Self {
        EmploymentReport {
            coverage: calculate_employment_coverage(&section.entries, today, policy),
            validation: validate_employment_section(section, today, policy),
        }
    }
}

impl fmt::Display for EmploymentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Employment history: {}", self.coverage.progress_label())?;
        write_gaps(f, &self.coverage.result)?;
        write_validation(f, &self.validation)
    }
}

impl Cmd for EmploymentArgs {
    fn run(&self) -> anyhow::Result<()> {
        let section: EmploymentSection = read_section(&self.common.input)?;
        let policy = self.common.policy()?;
        let today = self.common.clock().today();

        // gaps are advisory, so the section never fails the run
        self.common
            .print(&EmploymentReport::new(&section, today, &policy))
    }
}

// -----------------------------------------------------------------------------
// AddressArgs
// -----------------------------------------------------------------------------
#[derive(Debug, clap::Args)]
pub struct AddressArgs {
    #[command(flatten)]
    common: Common,
}

#[derive(Debug, serde::Serialize)]
struct AddressReport {
    coverage: Option<AddressCoverage>,
    validation: ValidationReport,
}

impl AddressReport {
    fn new(section: &AddressSection, today: NaiveDate, policy: &CoveragePolicy) -> Self {
        AddressReport {
            coverage: assess_address_history(section, today, policy),
            validation: validate_address_section(section, today, policy),
        }
    }
}

impl fmt::Display for AddressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.coverage {
            Some(cov) => {
                writeln!(f, "Address history: {}", cov.result.progress_label())?;
                if let Some(banner) = cov.banner() {
                    writeln!(f, "{banner}")?;
                }
                write_gaps(f, &cov.result)?;
            }
            None => writeln!(f, "Address history: no current move in date")?,
        }
        write_validation(f, &self.validation)
    }
}

impl Cmd for AddressArgs {
    fn run(&self) -> anyhow::Result<()> {
        let section: AddressSection = read_section(&self.common.input)?;
        let policy = self.common.policy()?;
        let today = self.common.clock().today();

        let report = AddressReport::new(&section, today, &policy);
        self.common.print(&report)?;
        ensure!(
            report.validation.is_valid(),
            "Address section has {} blocking error(s)",
            report.validation.errors.len()
        );
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// text output
// -----------------------------------------------------------------------------
fn write_gaps(f: &mut fmt::Formatter<'_>, result: &CoverageResult) -> fmt::Result {
    if result.gaps.is_empty() {
        return Ok(());
    }
    writeln!(f, "Gaps:")?;
    for label in result.gap_labels() {
        writeln!(f, "  {label}")?;
    }
    Ok(())
}

fn write_validation(f: &mut fmt::Formatter<'_>, report: &ValidationReport) -> fmt::Result {
    write_messages(f, "Errors", &report.errors)?;
    write_messages(f, "Warnings", &report.warnings)
}

fn write_messages(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    messages: &BTreeMap<String, String>,
) -> fmt::Result {
    if messages.is_empty() {
        return Ok(());
    }
    writeln!(f, "{title}:")?;
    for (field, msg) in messages {
        writeln!(f, "  {field}: {msg}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use cmhistory::adapter::{
        address::{CurrentAddress, YesNo},
        employment::EmploymentEntry,
    };
    use rstest::rstest;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        ymd(2024, 6, 1)
    }

    fn entry(start: &str, end: Option<&str>) -> EmploymentEntry {
        EmploymentEntry {
            employer: "Acorn Pre-school".to_string(),
            title: "Room leader".to_string(),
            start_date: Some(start.to_string()),
            end_date: end.map(str::to_owned),
            reason_for_leaving: String::new(),
        }
    }

    fn address_section(move_in: &str) -> AddressSection {
        AddressSection {
            current: CurrentAddress {
                line1: "1 High Street".to_string(),
                line2: String::new(),
                town: "Leeds".to_string(),
                postcode: "LS1 1AA".to_string(),
                move_in: Some(move_in.to_string()),
            },
            previous_addresses: vec![],
            lived_outside_uk: Some(YesNo::No),
        }
    }

    fn common(input: PathBuf) -> Common {
        Common {
            input,
            today: Some(today()),
            policy: None,
            format: Format::Json,
        }
    }

    fn write_json(value: &impl serde::Serialize) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(serde_json::to_string(value).unwrap().as_bytes())
            .unwrap();
        file
    }

    #[test]
    fn test_employment_text() {
        let section = EmploymentSection {
            entries: vec![
                entry("2019-01-01", Some("2020-01-01")),
                entry("2020-06-01", None),
            ],
            gaps_explanation: String::new(),
        };

        let tested = EmploymentReport::new(&section, today(), &CoveragePolicy::default());

        assert_eq!(
            tested.to_string(),
            "Employment history: 92% covered\n\
             Gaps:\n  \
             01/01/2020 to 01/06/2020 (5 months)\n\
             Warnings:\n  \
             employment_gaps: Explain any gaps in your employment history\n"
        );
    }

    #[test]
    fn test_address_text() {
        let tested = AddressReport::new(
            &address_section("2022-06-01"),
            today(),
            &CoveragePolicy::default(),
        );

        assert_eq!(
            tested.to_string(),
            "Address history: 40% covered\n\
             Your current address starts on 01/06/2022. Please add previous addresses to cover from 01/06/2019 until this date.\n\
             Gaps:\n  \
             01/06/2019 to 01/06/2022 (36 months)\n\
             Errors:\n  \
             address_history: Your address history must cover the last 5 years\n"
        );
    }

    #[test]
    fn test_address_text_without_move_in() {
        let mut section = address_section("");
        section.current.move_in = None;

        let tested = AddressReport::new(&section, today(), &CoveragePolicy::default());

        assert!(tested
            .to_string()
            .starts_with("Address history: no current move in date\n"));
        assert!(!tested.validation.is_valid());
    }

    #[rstest]
    #[case::complete("2019-01-01", true)]
    #[case::incomplete("2022-06-01", false)]
    fn test_address_run(#[case] move_in: &str, #[case] ok: bool) {
        let file = write_json(&address_section(move_in));
        let args = AddressArgs {
            common: common(file.path().to_path_buf()),
        };

        let tested = args.run();

        assert_eq!(tested.is_ok(), ok);
    }

    #[test]
    fn test_employment_run_with_gaps_succeeds() {
        let file = write_json(&EmploymentSection {
            entries: vec![entry("2023-01-01", None)],
            gaps_explanation: String::new(),
        });
        let args = EmploymentArgs {
            common: common(file.path().to_path_buf()),
        };

        let tested = args.run();

        assert!(tested.is_ok());
    }

    #[test]
    fn test_missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let args = EmploymentArgs {
            common: common(dir.path().join("missing.json")),
        };

        let tested = args.run();

        assert!(tested.is_err());
    }
}
