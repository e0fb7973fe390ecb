mod clock;
mod date;

pub use clock::{lookback_window, Clock, FixedClock, SystemClock};
pub use date::{format_uk, parse_form_date, DateParseError};
