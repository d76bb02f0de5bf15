//! Helpers for reading attribute maps

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use floe_core::provider::{ProviderError, ProviderResult};
use floe_core::resource::Value;

/// Optional string attribute; any other type is an error
pub fn get_string<'a>(
    attributes: &'a HashMap<String, Value>,
    key: &str,
) -> ProviderResult<Option<&'a str>> {
    match attributes.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or_else(|| type_error(key, "a string")),
    }
}

/// Required string attribute
pub fn require_string<'a>(
    attributes: &'a HashMap<String, Value>,
    key: &str,
) -> ProviderResult<&'a str> {
    get_string(attributes, key)?
        .ok_or_else(|| ProviderError::new(format!("Missing required attribute '{key}'")))
}

pub fn get_int(attributes: &HashMap<String, Value>, key: &str) -> ProviderResult<Option<i64>> {
    match attributes.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_int()
            .map(Some)
            .ok_or_else(|| type_error(key, "an integer")),
    }
}

pub fn require_int(attributes: &HashMap<String, Value>, key: &str) -> ProviderResult<i64> {
    get_int(attributes, key)?
        .ok_or_else(|| ProviderError::new(format!("Missing required attribute '{key}'")))
}

pub fn get_bool(attributes: &HashMap<String, Value>, key: &str) -> ProviderResult<Option<bool>> {
    match attributes.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| type_error(key, "a boolean")),
    }
}

fn type_error(key: &str, expected: &str) -> ProviderError {
    ProviderError::new(format!("Attribute '{key}' must be {expected}"))
}

/// Render a timestamp the way it is stored in state
pub fn format_timestamp(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}
