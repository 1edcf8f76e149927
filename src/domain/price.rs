use std::fmt::Display;

use super::ValidationError;

const MAX_CENTS: u64 = 99_999_999_999_999;
const MAX_EURO: u64 = MAX_CENTS / 100;
const MAX_EURO_DIGITS: usize = 12;

/// Amount in euro, stored as a whole number of cents.
///
/// There is no public constructor taking raw cents: values come from
/// [`Price::create`], [`Price::parse`] or [`Price::add`], all of which keep
/// the amount within `0..=99_999_999_999_999` cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    value_in_cents: u64
}

impl Price {
    /// Whole euro amount, no cents.
    pub fn from_euro(euro: i64) -> Result<Self, ValidationError> {
        Self::create(euro, 0)
    }

    pub fn create(euro: i64, cents: i64) -> Result<Self, ValidationError> {
        let euro = Self::check_range("euro", euro, MAX_EURO)?;
        let cents = Self::check_range("cents", cents, 99)?;

        Ok(Self { value_in_cents: euro * 100 + cents })
    }

    /// Parses `<euro>` or `<euro>.<cc>`, with exactly 2 cent digits and no more euro digits
    /// than the largest accepted amount, so every rendered price parses back.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidFormat { field: "Price", value: value.to_string() };

        let (euro, cents) = match value.split_once('.') {
            Some((euro, cents)) => (euro, Some(cents)),
            None => (value, None)
        };

        let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

        if euro.is_empty() || euro.len() > MAX_EURO_DIGITS || !is_digits(euro) {
            return Err(invalid());
        }
        let cents = match cents {
            Some(cents) if cents.len() == 2 && is_digits(cents) => cents,
            Some(_) => return Err(invalid()),
            None => "0"
        };

        let euro = euro.parse::<i64>().map_err(|_| invalid())?;
        let cents = cents.parse::<i64>().map_err(|_| invalid())?;

        Self::create(euro, cents)
    }

    pub fn add(&self, other: &Price) -> Result<Price, ValidationError> {
        let sum = self.value_in_cents + other.value_in_cents;
        if sum > MAX_CENTS {
            return Err(ValidationError::OutOfRange {
                field: "price in cents",
                min: 0,
                max: MAX_CENTS.into(),
                found: sum.into()
            });
        }

        Ok(Self { value_in_cents: sum })
    }

    pub fn euro(&self) -> u64 {
        self.value_in_cents / 100
    }

    pub fn cents(&self) -> u64 {
        self.value_in_cents % 100
    }

    pub fn value_in_cents(&self) -> u64 {
        self.value_in_cents
    }

    fn check_range(field: &'static str, value: i64, max: u64) -> Result<u64, ValidationError> {
        match u64::try_from(value) {
            Ok(v) if v <= max => Ok(v),
            _ => Err(ValidationError::OutOfRange { field, min: 0, max: max.into(), found: value.into() })
        }
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.euro(), self.cents())
    }
}
