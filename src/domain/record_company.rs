use std::fmt::Display;

use super::{validate_text, ValidationError};

const MAX_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordCompany(String);

impl RecordCompany {
    pub fn new<S>(value: S) -> Result<Self, ValidationError>
    where S: Into<String>
    {
        let value = value.into();
        validate_text("Record company", &value, MAX_LENGTH, "letters, numbers, space and - , ! @ #", |c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | ' ' | ',' | '!' | '@' | '#')
        })?;

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordCompany {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
