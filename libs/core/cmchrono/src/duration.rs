mod months;
mod span;

pub use months::months_between;
pub use span::{Span, SpanParseError};
