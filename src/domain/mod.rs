pub mod id;
pub mod name;
pub mod artist;
pub mod record_company;
pub mod genre;
pub mod ean_code;
pub mod price;
pub mod username;
pub mod password;
pub mod cd;
pub mod session;
pub mod policy;

pub use id::Id;
pub use name::Name;
pub use artist::Artist;
pub use record_company::RecordCompany;
pub use genre::Genre;
pub use ean_code::EanCode;
pub use price::Price;
pub use username::Username;
pub use password::Password;
pub use cd::Cd;
pub use session::AuthenticatedUser;

use crate::utils::ean::EanError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty.")]
    Empty { field: &'static str },

    #[error("{field} must have at most {max} characters, found {found}.")]
    TooLong { field: &'static str, max: usize, found: usize },

    #[error("{field} must have at least {min} characters, found {found}.")]
    TooShort { field: &'static str, min: usize, found: usize },

    #[error("{field} can't contain '{found}'. Allowed: {allowed}.")]
    InvalidCharacter { field: &'static str, found: char, allowed: &'static str },

    #[error("Genre must be capitalized.")]
    NotCapitalized,

    #[error("{field} must be between {min} and {max}, found {found}.")]
    OutOfRange { field: &'static str, min: i128, max: i128, found: i128 },

    #[error("{field} has an invalid format: '{value}'.")]
    InvalidFormat { field: &'static str, value: String },

    #[error(transparent)]
    Ean(#[from] EanError),

    #[error("Password must not contain spaces.")]
    PasswordContainsSpace,

    #[error("Password must contain a lowercase letter.")]
    PasswordMissingLowercase,

    #[error("Password must contain at least one of '@', '!', '.', '-'.")]
    PasswordMissingSymbol
}

/// Shared length and charset rule for the free-text value types.
///
/// `allowed` is the human readable form of the charset, used in the error message.
pub(crate) fn validate_text<F>(field: &'static str, value: &str, max: usize, allowed: &'static str, is_allowed: F) -> Result<(), ValidationError>
where F: Fn(char) -> bool
{
    let length = value.chars().count();

    if length == 0 { return Err(ValidationError::Empty { field }); }
    if length > max { return Err(ValidationError::TooLong { field, max, found: length }); }

    match value.chars().find(|c| !is_allowed(*c)) {
        Some(found) => Err(ValidationError::InvalidCharacter { field, found, allowed }),
        None => Ok(())
    }
}
