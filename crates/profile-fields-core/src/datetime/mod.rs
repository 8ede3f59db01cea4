//! Calendar dates and picker date formats.

mod date;
mod duration;
mod format;

pub use date::Date;
pub use duration::{ParseDurationError, parse_duration};
pub use format::DateFormat;
