//! Provider configuration

use std::collections::HashMap;
use std::time::Duration;

use floe_core::resource::Value;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while reading the provider block
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid provider attribute '{key}': expected {expected}")]
    InvalidAttribute { key: String, expected: &'static str },

    #[error("Failed to parse provider configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings of a provider block
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Fail statements running longer than this many seconds
    pub statement_timeout_secs: Option<u64>,
    /// Use `DROP ... IF EXISTS` when deleting
    pub drop_if_exists: bool,
    /// Database for image repositories that do not name one
    pub default_database: Option<String>,
    /// Schema for image repositories that do not name one
    pub default_schema: Option<String>,
}

impl ProviderConfig {
    /// Parse a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read the attributes of a provider block; unknown keys are ignored
    pub fn from_attributes(attributes: &HashMap<String, Value>) -> Result<Self, ConfigError> {
        let attrs = Attributes(attributes);
        let statement_timeout_secs = match attrs.get_int("statement_timeout_secs")? {
            Some(secs) => Some(u64::try_from(secs).map_err(|_| ConfigError::InvalidAttribute {
                key: "statement_timeout_secs".to_string(),
                expected: "a non-negative integer",
            })?),
            None => None,
        };

        Ok(Self {
            statement_timeout_secs,
            drop_if_exists: attrs.get_bool("drop_if_exists")?.unwrap_or(false),
            default_database: attrs.get_string("default_database")?,
            default_schema: attrs.get_string("default_schema")?,
        })
    }

    pub fn statement_timeout(&self) -> Option<Duration> {
        self.statement_timeout_secs.map(Duration::from_secs)
    }
}

struct Attributes<'a>(&'a HashMap<String, Value>);

impl Attributes<'_> {
    fn get_string(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(invalid(key, "a string")),
        }
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(invalid(key, "a boolean")),
        }
    }

    fn get_int(&self, key: &str) -> Result<Option<i64>, ConfigError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(Value::Int(i)) => Ok(Some(*i)),
            Some(_) => Err(invalid(key, "an integer")),
        }
    }
}

fn invalid(key: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidAttribute {
        key: key.to_string(),
        expected,
    }
}
