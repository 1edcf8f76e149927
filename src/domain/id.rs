use std::fmt::Display;

use super::ValidationError;

/// Record identity, within `0..=i64::MAX` so it always fits the wire's signed integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(i64);

impl Id {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < 0 {
            return Err(ValidationError::OutOfRange {
                field: "ID",
                min: 0,
                max: i64::MAX.into(),
                found: value.into()
            });
        }

        Ok(Self(value))
    }

    /// Parses user input. Malformed text and negative numbers both fail with a `ValidationError`.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let number = value.parse::<i64>()
            .map_err(|_| ValidationError::InvalidFormat { field: "ID", value: value.to_string() })?;

        Self::new(number)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// The id after this one, or `None` once `i64::MAX` is reached.
    pub fn next(&self) -> Option<Id> {
        self.0.checked_add(1).map(Self)
    }
}

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Self(i64::from(value))
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
