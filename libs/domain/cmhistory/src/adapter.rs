pub mod address;
pub mod employment;

mod validation;

pub use validation::ValidationReport;
