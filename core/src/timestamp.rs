//! Timestamp parsing for the `YYYY-MM-DDTHH:MM:SS+00:00` form the API emits.
//!
//! Only the UTC offset is accepted. The result is a naive value that callers
//! treat as UTC by convention.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

use crate::error::ApiError;

const UTC_SUFFIX: &str = "+00:00";
const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a remote timestamp, rejecting any offset other than `+00:00`.
pub fn parse_utc_timestamp(date: &str) -> Result<NaiveDateTime, ApiError> {
    let Some(naive) = date.strip_suffix(UTC_SUFFIX) else {
        return Err(ApiError::DeserializationError(format!(
            "timestamp {date:?} is not in UTC (+00:00)"
        )));
    };
    NaiveDateTime::parse_from_str(naive, FORMAT)
        .map_err(|e| ApiError::DeserializationError(format!("timestamp {date:?}: {e}")))
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_utc_timestamp(&raw).map_err(serde::de::Error::custom)
}
