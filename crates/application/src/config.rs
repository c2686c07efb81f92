//! Suite configuration.
//!
//! [`Config`] is an immutable key/value map built once at startup. Keys are
//! flat, dotted strings (`connection.user_agent`); loaders flatten nested
//! sources before handing them over.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ApplicationError, ApplicationResult};

/// A scalar configuration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Text.
    String(String),
}

impl ConfigValue {
    /// Name of the value type, for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "a boolean",
            Self::Integer(_) => "an integer",
            Self::Float(_) => "a float",
            Self::String(_) => "a string",
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "'{v}'"),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Immutable configuration map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    values: BTreeMap<String, ConfigValue>,
}

impl Config {
    /// Builds a configuration from key/value pairs. Later duplicates win.
    #[must_use]
    pub fn from_values<K, I>(values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ConfigValue)>,
    {
        Self {
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Looks up a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::ConfigKeyMissing`] if `key` is absent.
    pub fn get(&self, key: &str) -> ApplicationResult<&ConfigValue> {
        self.values
            .get(key)
            .ok_or_else(|| ApplicationError::ConfigKeyMissing {
                key: key.to_string(),
            })
    }

    /// Looks up a string value.
    ///
    /// # Errors
    ///
    /// Fails if the key is absent or not a string.
    pub fn get_str(&self, key: &str) -> ApplicationResult<&str> {
        match self.get(key)? {
            ConfigValue::String(s) => Ok(s),
            other => Err(type_error(key, "a string", other)),
        }
    }

    /// Looks up a non-negative integer value.
    ///
    /// # Errors
    ///
    /// Fails if the key is absent, not an integer, or negative.
    pub fn get_u64(&self, key: &str) -> ApplicationResult<u64> {
        match self.get(key)? {
            ConfigValue::Integer(n) => {
                u64::try_from(*n).map_err(|_| ApplicationError::ConfigInvalid {
                    key: key.to_string(),
                    message: format!("{n} is negative"),
                })
            }
            other => Err(type_error(key, "an integer", other)),
        }
    }

    /// Looks up a boolean value.
    ///
    /// # Errors
    ///
    /// Fails if the key is absent or not a boolean.
    pub fn get_bool(&self, key: &str) -> ApplicationResult<bool> {
        match self.get(key)? {
            ConfigValue::Bool(b) => Ok(*b),
            other => Err(type_error(key, "a boolean", other)),
        }
    }
}

fn type_error(key: &str, expected: &'static str, actual: &ConfigValue) -> ApplicationError {
    ApplicationError::ConfigType {
        key: key.to_string(),
        expected,
        actual: format!("{} {actual}", actual.type_name()),
    }
}

/// Connection pool and client identity settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// Pooled connections idle for longer than this are closed.
    pub idle_timeout: Duration,
    /// Maximum idle connections kept per host.
    pub max_idle_per_host: usize,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Skip certificate validation.
    pub accept_invalid_certs: bool,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(5),
            max_idle_per_host: 10,
            user_agent: concat!("restcheck/", env!("CARGO_PKG_VERSION")).to_string(),
            accept_invalid_certs: false,
        }
    }
}

impl ConnectionSettings {
    /// Returns a copy with certificate validation disabled.
    #[must_use]
    pub fn relaxed_tls(&self) -> Self {
        Self {
            accept_invalid_certs: true,
            ..self.clone()
        }
    }
}

/// Every setting the suite needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteSettings {
    /// Blog API root.
    pub base_url: String,
    /// Posts collection path.
    pub post_path: String,
    /// Single post path template.
    pub post_id_formatter: String,
    /// Comments path segment.
    pub comments_path: String,
    /// Film API root.
    pub films_base_url: String,
    /// Films collection path.
    pub films_path: String,
    /// People collection path.
    pub people_path: String,
    /// Latency threshold.
    pub response_time_limit_ms: u64,
    /// How many times idempotence checks repeat a request.
    pub idempotence_repetitions: usize,
    /// Transport settings.
    pub connection: ConnectionSettings,
}

impl SuiteSettings {
    /// Resolves every key the suite needs.
    ///
    /// # Errors
    ///
    /// Fails on the first missing or mistyped key, or when
    /// `idempotence_repetitions` is below 2.
    pub fn from_config(config: &Config) -> ApplicationResult<Self> {
        let repetitions = config.get_u64("idempotence_repetitions")?;
        if repetitions < 2 {
            return Err(ApplicationError::ConfigInvalid {
                key: "idempotence_repetitions".to_string(),
                message: format!("must be at least 2, got {repetitions}"),
            });
        }

        Ok(Self {
            base_url: config.get_str("base_url")?.to_string(),
            post_path: config.get_str("post_path")?.to_string(),
            post_id_formatter: config.get_str("post_id_formatter")?.to_string(),
            comments_path: config.get_str("comments_path")?.to_string(),
            films_base_url: config.get_str("films_base_url")?.to_string(),
            films_path: config.get_str("films_path")?.to_string(),
            people_path: config.get_str("people_path")?.to_string(),
            response_time_limit_ms: config.get_u64("response_time_limit_ms")?,
            idempotence_repetitions: to_usize("idempotence_repetitions", repetitions)?,
            connection: ConnectionSettings {
                idle_timeout: Duration::from_millis(config.get_u64("connection.idle_timeout_ms")?),
                max_idle_per_host: to_usize(
                    "connection.max_idle_per_host",
                    config.get_u64("connection.max_idle_per_host")?,
                )?,
                user_agent: config.get_str("connection.user_agent")?.to_string(),
                accept_invalid_certs: false,
            },
        })
    }

    /// Path of the comments of one post, e.g. `/posts/{postId}/comments`.
    #[must_use]
    pub fn post_comments_path(&self) -> String {
        format!("{}{}", self.post_id_formatter, self.comments_path)
    }
}

fn to_usize(key: &str, value: u64) -> ApplicationResult<usize> {
    usize::try_from(value).map_err(|_| ApplicationError::ConfigInvalid {
        key: key.to_string(),
        message: format!("{value} is too large"),
    })
}
