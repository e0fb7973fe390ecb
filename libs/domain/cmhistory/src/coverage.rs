mod evaluate;
mod gap;
mod result;

pub use evaluate::{calculate_coverage, evaluate_coverage};
pub use gap::Gap;
pub use result::CoverageResult;
