use std::fmt::Display;

use super::{validate_text, ValidationError};

const MAX_LENGTH: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Genre(String);

impl Genre {
    pub fn new<S>(value: S) -> Result<Self, ValidationError>
    where S: Into<String>
    {
        let value = value.into();

        // capitalization is reported before the charset rule
        if let Some(first) = value.chars().next() {
            if !first.is_uppercase() { return Err(ValidationError::NotCapitalized); }
        }
        validate_text("Genre", &value, MAX_LENGTH, "letters and space", |c| c.is_ascii_alphabetic() || c == ' ')?;

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
