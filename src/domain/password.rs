use std::fmt::{Debug, Formatter};

use super::ValidationError;

const MIN_LENGTH: usize = 8;
const MAX_LENGTH: usize = 128;
const SYMBOLS: [char; 4] = ['@', '!', '.', '-'];

/// Login secret. Never printed: `Debug` masks the value and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new<S>(value: S) -> Result<Self, ValidationError>
    where S: Into<String>
    {
        let value = value.into();
        let length = value.chars().count();

        if length < MIN_LENGTH {
            return Err(ValidationError::TooShort { field: "Password", min: MIN_LENGTH, found: length });
        }
        if length > MAX_LENGTH {
            return Err(ValidationError::TooLong { field: "Password", max: MAX_LENGTH, found: length });
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ValidationError::PasswordContainsSpace);
        }
        if !value.chars().any(char::is_lowercase) {
            return Err(ValidationError::PasswordMissingLowercase);
        }
        if !value.chars().any(|c| SYMBOLS.contains(&c)) {
            return Err(ValidationError::PasswordMissingSymbol);
        }

        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Password(********)")
    }
}
