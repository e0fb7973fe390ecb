mod dated;
mod entry;

pub use dated::{DatedInterval, Period};
pub use entry::{DatedRecord, MalformedReason, ParsedEntry, RawEntry};
