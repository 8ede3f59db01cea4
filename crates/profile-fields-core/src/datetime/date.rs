use crate::{JsonValue, error::Error};
use chrono::{Datelike, NaiveDate, format::ParseError};
use serde::{Deserialize, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// A wrapper type for [`chrono::NaiveDate`].
///
/// Dates carry no time zone; a date picker only ever commits calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub struct Date(NaiveDate);

impl Date {
    /// Attempts to create a new instance.
    #[inline]
    pub fn try_new(year: i32, month: u32, day: u32) -> Result<Self, Error> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                let message = format!(
                    "fail to create a date from year: `{year}`, month: `{month}`, day: `{day}`"
                );
                Error::new(message)
            })
    }

    /// Formats the date with the specified strftime pattern.
    #[inline]
    pub fn format(&self, fmt: &str) -> String {
        format!("{}", self.0.format(fmt))
    }

    /// Returns the year number in the calendar date.
    #[inline]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month number starting from 1.
    ///
    /// The return value ranges from 1 to 12.
    #[inline]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day of month starting from 1.
    ///
    /// The return value ranges from 1 to 31. (The last day of month differs by months.)
    #[inline]
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl fmt::Display for Date {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for Date {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<NaiveDate> for Date {
    #[inline]
    fn from(d: NaiveDate) -> Self {
        Self(d)
    }
}

impl From<Date> for NaiveDate {
    #[inline]
    fn from(d: Date) -> Self {
        d.0
    }
}

impl From<Date> for JsonValue {
    #[inline]
    fn from(d: Date) -> Self {
        JsonValue::String(d.to_string())
    }
}

impl FromStr for Date {
    type Err = ParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<NaiveDate>().map(Self)
    }
}
