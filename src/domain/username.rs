use std::fmt::Display;

use super::{validate_text, ValidationError};

const MAX_LENGTH: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Username(String);

impl Username {
    pub fn new<S>(value: S) -> Result<Self, ValidationError>
    where S: Into<String>
    {
        let value = value.into();
        validate_text("Username", &value, MAX_LENGTH, "letters, numbers and -", |c| c.is_ascii_alphanumeric() || c == '-')?;

        Ok(Self(value))
    }

    /// Only for literals known to satisfy the rules.
    pub(crate) fn new_unchecked(value: &str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
