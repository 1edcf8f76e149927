use std::fmt::Display;

use super::{validate_text, ValidationError};

const MAX_LENGTH: usize = 50;

/// Band or artist credited on a CD. Unlike `Name`, apostrophes are not allowed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Artist(String);

impl Artist {
    pub fn new<S>(value: S) -> Result<Self, ValidationError>
    where S: Into<String>
    {
        let value = value.into();
        validate_text("Artist", &value, MAX_LENGTH, "letters, numbers, space and - , ! @", |c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | ' ' | ',' | '!' | '@')
        })?;

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Artist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
