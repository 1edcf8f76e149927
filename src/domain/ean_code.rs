use std::fmt::Display;

use crate::utils::ean;
use super::ValidationError;

/// EAN/UPC barcode, kept in its compacted (digits only) form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EanCode(String);

impl EanCode {
    pub fn new<S>(value: S) -> Result<Self, ValidationError>
    where S: AsRef<str>
    {
        let compacted = ean::validate(value.as_ref())?;
        Ok(Self(compacted))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EanCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
