use super::Date;
use crate::{SharedString, error::Error};
use chrono::NaiveDate;
use std::fmt;

/// A date format string in the token syntax of date picker widgets.
///
/// | Token | Meaning                         | strftime |
/// |-------|---------------------------------|----------|
/// | `Y`   | four digit year                 | `%Y`     |
/// | `y`   | two digit year                  | `%y`     |
/// | `m`   | month with leading zero         | `%m`     |
/// | `n`   | month without leading zero      | `%-m`    |
/// | `d`   | day of month with leading zero  | `%d`     |
/// | `j`   | day of month without leading zero | `%-d`  |
/// | `M`   | short month name                | `%b`     |
/// | `F`   | full month name                 | `%B`     |
/// | `D`   | short weekday name              | `%a`     |
/// | `l`   | full weekday name               | `%A`     |
///
/// Any other character is literal, and `\` escapes the next character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    /// Picker format string.
    source: SharedString,
    /// Equivalent strftime pattern.
    pattern: String,
}

impl DateFormat {
    /// The canonical `YYYY-MM-DD` format.
    pub const CANONICAL: &'static str = "Y-m-d";

    /// Creates a new instance from a picker format string.
    pub fn new(source: impl Into<SharedString>) -> Self {
        let source = source.into();
        let pattern = translate(&source);
        Self { source, pattern }
    }

    /// Returns the canonical `YYYY-MM-DD` format.
    #[inline]
    pub fn canonical() -> Self {
        Self::new(Self::CANONICAL)
    }

    /// Returns the picker format string.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.source.as_ref()
    }

    /// Returns the equivalent strftime pattern.
    #[inline]
    pub fn strftime(&self) -> &str {
        &self.pattern
    }

    /// Parses the text as a date in this format.
    pub fn parse(&self, text: &str) -> Result<Date, Error> {
        NaiveDate::parse_from_str(text, &self.pattern)
            .map(Date::from)
            .map_err(|err| {
                let format = self.as_str();
                Error::with_source(format!("`{text}` does not match the format `{format}`"), err)
            })
    }

    /// Formats the date in this format.
    #[inline]
    pub fn format(&self, date: Date) -> String {
        date.format(&self.pattern)
    }
}

impl Default for DateFormat {
    #[inline]
    fn default() -> Self {
        Self::canonical()
    }
}

impl fmt::Display for DateFormat {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&'static str> for DateFormat {
    #[inline]
    fn from(source: &'static str) -> Self {
        Self::new(source)
    }
}

/// Translates picker tokens into a strftime pattern.
fn translate(source: &str) -> String {
    let mut pattern = String::with_capacity(source.len() * 2);
    let mut chars = source.chars();
    while let Some(ch) = chars.next() {
        let directive = match ch {
            'Y' => "%Y",
            'y' => "%y",
            'm' => "%m",
            'n' => "%-m",
            'd' => "%d",
            'j' => "%-d",
            'M' => "%b",
            'F' => "%B",
            'D' => "%a",
            'l' => "%A",
            '\\' => {
                if let Some(escaped) = chars.next() {
                    push_literal(&mut pattern, escaped);
                }
                continue;
            }
            _ => {
                push_literal(&mut pattern, ch);
                continue;
            }
        };
        pattern.push_str(directive);
    }
    pattern
}

fn push_literal(pattern: &mut String, ch: char) {
    if ch == '%' {
        pattern.push_str("%%");
    } else {
        pattern.push(ch);
    }
}
