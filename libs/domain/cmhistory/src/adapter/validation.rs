use std::collections::BTreeMap;

use crate::interval::{DatedRecord, MalformedReason};

// -----------------------------------------------------------------------------
// ValidationReport
// -----------------------------------------------------------------------------
/// Messages of a form section keyed by field.
///
/// Errors block submission. Warnings are advisory only.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, schemars::JsonSchema)]
pub struct ValidationReport {
    pub errors: BTreeMap<String, String>,
    pub warnings: BTreeMap<String, String>,
}

impl ValidationReport {
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[inline]
    pub(crate) fn error(&mut self, field: impl Into<String>, message: &str) {
        self.errors.insert(field.into(), message.to_owned());
    }

    #[inline]
    pub(crate) fn warning(&mut self, field: impl Into<String>, message: &str) {
        self.warnings.insert(field.into(), message.to_owned());
    }

    /// Record an error on `field` if the value is missing or blank.
    #[inline]
    pub(crate) fn require(&mut self, field: impl Into<String>, value: Option<&str>, message: &str) {
        if is_blank(value) {
            self.error(field, message);
        }
    }

    /// Record why a dated record is left out of the coverage.
    pub(crate) fn malformed_dates(
        &mut self,
        record: &impl DatedRecord,
        start_field: String,
        end_field: String,
        missing_start: &str,
    ) {
        let Some(reason) = record.parse_entry().malformed_reason() else {
            return;
        };
        match reason {
            MalformedReason::MissingStart => self.error(start_field, missing_start),
            MalformedReason::UnparseableStart => self.error(start_field, "Enter a real date"),
            MalformedReason::UnparseableEnd => self.error(end_field, "Enter a real date"),
            MalformedReason::EndNotAfterStart => {
                self.error(end_field, "End date must be after the start date")
            }
        }
    }
}

#[inline]
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
