//! Wire representations of the REST API and their conversion into domain types.

pub mod cds;
pub mod sessions;

pub use cds::{CdPayload, CdSubmission, UserRef};
pub use sessions::SessionPayload;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::domain::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("Invalid '{field}' in payload: {source}")]
    InvalidField { field: &'static str, #[source] source: ValidationError },

    #[error("Invalid timestamp in '{field}': '{value}'")]
    InvalidTimestamp { field: &'static str, value: String }
}

impl MappingError {
    pub(crate) fn field(field: &'static str) -> impl FnOnce(ValidationError) -> MappingError {
        move |source| MappingError::InvalidField { field, source }
    }
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Accepts RFC 3339 and the offset-less forms the API emits. Offset-less values are read as UTC.
pub(crate) fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, MappingError> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(stamp.with_timezone(&Utc));
    }
    if let Ok(stamp) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Ok(stamp.with_timezone(&Utc));
    }

    NAIVE_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| MappingError::InvalidTimestamp { field, value: value.to_string() })
}

pub(crate) fn format_timestamp(stamp: &DateTime<Utc>) -> String {
    stamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
