use std::{error, fmt, time::Duration};

/// An error resulting from parsing a duration from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseDurationError {
    /// Invalid number.
    InvalidNumber(String),
    /// Invalid unit.
    InvalidUnit(String),
    /// The duration is too long to be represented.
    Overflow(String),
    /// Empty input.
    Empty,
}

impl fmt::Display for ParseDurationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidNumber(number) => write!(f, "invalid number: `{number}`"),
            Self::InvalidUnit(unit) => write!(f, "invalid unit: `{unit}`"),
            Self::Overflow(input) => write!(f, "duration overflow: `{input}`"),
            Self::Empty => write!(f, "empty duration"),
        }
    }
}

impl error::Error for ParseDurationError {}

/// Parses a duration from a string such as `30s` or `1m30s`.
///
/// Supported units, which must appear from the longest to the shortest:
/// `h`, `m`, `s` and `ms`.
pub fn parse_duration(input: &str) -> Result<Duration, ParseDurationError> {
    const UNITS: [(&str, u64); 4] = [("h", 3_600_000), ("m", 60_000), ("s", 1_000), ("ms", 1)];
    if input.is_empty() {
        return Err(ParseDurationError::Empty);
    }

    let mut remainder = input;
    let mut last_order = None;
    let mut milliseconds = 0;
    while !remainder.is_empty() {
        let digits_end = remainder
            .find(|ch: char| !ch.is_ascii_digit())
            .unwrap_or(remainder.len());
        let (number, rest) = remainder.split_at(digits_end);
        let number = number
            .parse::<u64>()
            .map_err(|_| ParseDurationError::InvalidNumber(number.to_owned()))?;
        let unit_end = rest
            .find(|ch: char| ch.is_ascii_digit())
            .unwrap_or(rest.len());
        let (unit, rest) = rest.split_at(unit_end);
        let order = UNITS
            .iter()
            .position(|&(name, _)| name == unit)
            .filter(|&order| last_order.is_none_or(|last| order > last))
            .ok_or_else(|| ParseDurationError::InvalidUnit(unit.to_owned()))?;
        milliseconds = number
            .checked_mul(UNITS[order].1)
            .and_then(|value| value.checked_add(milliseconds))
            .ok_or_else(|| ParseDurationError::Overflow(input.to_owned()))?;
        last_order = Some(order);
        remainder = rest;
    }
    Ok(Duration::from_millis(milliseconds))
}

#[cfg(test)]
mod tests {
    use super::{ParseDurationError, parse_duration};
    use std::time::Duration;

    #[test]
    fn it_parses_duration() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(
            parse_duration("2s500ms").unwrap(),
            Duration::from_millis(2500)
        );
        assert!(parse_duration("6.5h").is_err());
        assert!(parse_duration("30s1m").is_err());
        assert!(parse_duration("").is_err());
        assert_eq!(
            parse_duration("9999999999999999h"),
            Err(ParseDurationError::Overflow("9999999999999999h".to_owned()))
        );
        assert!(parse_duration("5124095576030h59m").is_err());
    }
}
