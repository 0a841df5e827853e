//! Helpers shared by the `from_json` factories.
//!
//! The remote API is loose about numbers (counts and ratings arrive as JSON
//! numbers or as numeric strings) and signals missing resources in-band with
//! an `{"id": "not_found", "message": ...}` body.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ApiError, Resource};

const NOT_FOUND_ID: &str = "not_found";

/// Fail with `resource`'s not-found error if `value` is a not-found payload.
pub(crate) fn check_not_found(value: &Value, resource: Resource) -> Result<(), ApiError> {
    match not_found_message(value) {
        Some(message) => Err(ApiError::not_found(resource, message)),
        None => Ok(()),
    }
}

/// Server-supplied message of a not-found payload, if `value` is one.
pub(crate) fn not_found_message(value: &Value) -> Option<String> {
    if value.get("id").and_then(Value::as_str) != Some(NOT_FOUND_ID) {
        return None;
    }
    let message = value.get("message").and_then(Value::as_str).unwrap_or("not found");
    Some(message.to_string())
}

/// Apply `parse` to each element of an array, or to a lone object.
pub(crate) fn map_list<T>(
    value: &Value,
    parse: impl Fn(&Value) -> Result<T, ApiError>,
) -> Result<Vec<T>, ApiError> {
    match value {
        Value::Array(items) => items.iter().map(parse).collect(),
        other => parse(other).map(|item| vec![item]),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Integer(u64),
    Float(f64),
    Text(String),
}

impl Numeric {
    fn into_u64(self) -> Result<u64, String> {
        match self {
            Numeric::Integer(n) => Ok(n),
            Numeric::Float(f) if f >= 0.0 && f.fract() == 0.0 => Ok(f as u64),
            Numeric::Float(f) => Err(format!("expected a non-negative integer, got {f}")),
            Numeric::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| format!("expected a non-negative integer, got {s:?}")),
        }
    }

    fn into_f64(self) -> Result<f64, String> {
        match self {
            Numeric::Integer(n) => Ok(n as f64),
            Numeric::Float(f) => Ok(f),
            Numeric::Text(s) => s.trim().parse().map_err(|_| format!("expected a number, got {s:?}")),
        }
    }
}

pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = Numeric::deserialize(deserializer)?
        .into_u64()
        .map_err(serde::de::Error::custom)?;
    u32::try_from(n).map_err(serde::de::Error::custom)
}

pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Numeric::deserialize(deserializer)?
        .into_u64()
        .map_err(serde::de::Error::custom)
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Numeric::deserialize(deserializer)?
        .into_f64()
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Counts {
        #[serde(deserialize_with = "lenient_u32")]
        count: u32,
        #[serde(deserialize_with = "lenient_f64")]
        rating: f64,
    }

    #[test]
    fn numbers_accept_strings_and_json_numbers() {
        let from_strings: Counts = serde_json::from_value(json!({"count": "12", "rating": "4.5"})).unwrap();
        assert_eq!(from_strings.count, 12);
        assert_eq!(from_strings.rating, 4.5);

        let from_numbers: Counts = serde_json::from_value(json!({"count": 7, "rating": 3})).unwrap();
        assert_eq!(from_numbers.count, 7);
        assert_eq!(from_numbers.rating, 3.0);
    }

    #[test]
    fn malformed_number_is_rejected() {
        let result: Result<Counts, _> = serde_json::from_value(json!({"count": "twelve", "rating": 1}));
        assert!(result.is_err());
        let result: Result<Counts, _> = serde_json::from_value(json!({"count": -1, "rating": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn detects_not_found_payload() {
        let payload = json!({"id": "not_found", "message": "The deck you requested was not found."});
        let err = check_not_found(&payload, Resource::DeckInfo).unwrap_err();
        assert_eq!(
            err,
            ApiError::not_found(Resource::DeckInfo, "The deck you requested was not found.")
        );
    }

    #[test]
    fn ordinary_payload_passes() {
        assert!(check_not_found(&json!({"id": "abc"}), Resource::Card).is_ok());
        assert!(check_not_found(&json!([{"id": "not_found"}]), Resource::Card).is_ok());
    }

    #[test]
    fn map_list_wraps_single_object() {
        let one = map_list(&json!({"n": 1}), |v| Ok(v["n"].as_u64().unwrap())).unwrap();
        assert_eq!(one, vec![1]);
        let many = map_list(&json!([{"n": 1}, {"n": 2}]), |v| Ok(v["n"].as_u64().unwrap())).unwrap();
        assert_eq!(many, vec![1, 2]);
    }
}
