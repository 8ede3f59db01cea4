use super::Validator;
use crate::{LazyLock, datetime::Date, error::Error};
use regex::Regex;

/// A strict validator for dates in the `YYYY-MM-DD` form.
///
/// Unlike [`Date::from_str`](std::str::FromStr::from_str), it rejects
/// unpadded components and surrounding whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateValidator;

impl DateValidator {
    /// Parses the data as a [`Date`] if it is valid.
    pub fn parse(&self, data: &str) -> Result<Date, Error> {
        if !DATE_PATTERN.is_match(data) {
            return Err(Error::new(format!("`{data}` is not in the `YYYY-MM-DD` form")));
        }
        data.parse::<Date>()
            .map_err(|err| Error::with_source(format!("`{data}` is not a calendar date"), err))
    }
}

impl Validator<str> for DateValidator {
    type Error = Error;

    #[inline]
    fn validate(&self, data: &str) -> Result<(), Self::Error> {
        self.parse(data).map(|_| ())
    }
}

/// Shape of a canonical date.
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("fail to create a regex for the date")
});

#[cfg(test)]
mod tests {
    use super::DateValidator;
    use crate::validation::Validator;

    #[test]
    fn it_validates_canonical_dates() {
        assert!(DateValidator.validate("2024-03-25").is_ok());
        assert!(DateValidator.validate("2024-02-29").is_ok());
        assert!(DateValidator.validate("2023-02-29").is_err());
        assert!(DateValidator.validate("2024-3-25").is_err());
        assert!(DateValidator.validate(" 2024-03-25").is_err());
        assert!(DateValidator.validate("March 25, 2024").is_err());
        assert!(DateValidator.validate("").is_err());
    }
}
