pub mod adapter;
pub mod coverage;
pub mod interval;
pub mod timeline;

mod error;
mod policy;

pub use coverage::{calculate_coverage, evaluate_coverage, CoverageResult, Gap};
pub use error::Error;
pub use interval::{DatedInterval, DatedRecord, ParsedEntry, Period, RawEntry};
pub use policy::CoveragePolicy;
pub use timeline::{merge_intervals, Timeline};
