//! YAML configuration loader.
//!
//! Nested mappings are flattened into dotted keys:
//!
//! ```yaml
//! connection:
//!   user_agent: restcheck
//! ```
//!
//! becomes `connection.user_agent`.

use std::path::Path;

use restcheck_application::{Config, ConfigValue};
use serde_yaml::Value;
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// The file could not be read.
    #[error("cannot read configuration file {path}: {source}")]
    Io {
        /// File path.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document root is not a mapping.
    #[error("configuration root must be a mapping")]
    NotAMapping,

    /// A key is not a string.
    #[error("configuration keys must be strings, found {0}")]
    InvalidKey(String),

    /// A value is a sequence or otherwise not a scalar.
    #[error("configuration key '{0}' must hold a scalar value")]
    UnsupportedValue(String),
}

/// Parses a YAML document into a [`Config`].
///
/// # Errors
///
/// Fails on YAML syntax errors, a non-mapping root, non-string keys or
/// sequence values.
pub fn load_config_str(text: &str) -> Result<Config, ConfigLoadError> {
    let root: Value = serde_yaml::from_str(text)?;
    let Value::Mapping(mapping) = root else {
        return Err(ConfigLoadError::NotAMapping);
    };

    let mut values = Vec::new();
    flatten(None, &mapping, &mut values)?;
    Ok(Config::from_values(values))
}

/// Reads and parses a YAML configuration file.
///
/// # Errors
///
/// Fails if the file cannot be read or does not parse; see [`load_config_str`].
pub fn load_config_file(path: &Path) -> Result<Config, ConfigLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_config_str(&text)
}

fn flatten(
    prefix: Option<&str>,
    mapping: &serde_yaml::Mapping,
    out: &mut Vec<(String, ConfigValue)>,
) -> Result<(), ConfigLoadError> {
    for (key, value) in mapping {
        let Some(key) = key.as_str() else {
            return Err(ConfigLoadError::InvalidKey(format!("{key:?}")));
        };
        let full_key = prefix.map_or_else(|| key.to_string(), |p| format!("{p}.{key}"));

        match value {
            Value::Mapping(nested) => flatten(Some(&full_key), nested, out)?,
            Value::String(s) => out.push((full_key, ConfigValue::String(s.clone()))),
            Value::Bool(b) => out.push((full_key, ConfigValue::Bool(*b))),
            Value::Number(n) => {
                let value = match (n.as_i64(), n.as_f64()) {
                    (Some(i), _) => ConfigValue::Integer(i),
                    (None, Some(f)) => ConfigValue::Float(f),
                    (None, None) => return Err(ConfigLoadError::UnsupportedValue(full_key)),
                };
                out.push((full_key, value));
            }
            Value::Null | Value::Sequence(_) | Value::Tagged(_) => {
                return Err(ConfigLoadError::UnsupportedValue(full_key));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_flattens_nested_mappings() {
        let config = load_config_str(
            "base_url: https://example.com\nconnection:\n  idle_timeout_ms: 5000\n  user_agent: rc\n",
        )
        .unwrap();
        assert_eq!(config.get_str("base_url").unwrap(), "https://example.com");
        assert_eq!(config.get_u64("connection.idle_timeout_ms").unwrap(), 5000);
        assert_eq!(config.get_str("connection.user_agent").unwrap(), "rc");
        assert!(config.get("connection").is_err());
    }

    #[test]
    fn test_scalar_types() {
        let config = load_config_str("flag: true\nratio: 0.5\nname: '10'\n").unwrap();
        assert!(config.get_bool("flag").unwrap());
        assert_eq!(config.get("ratio").unwrap(), &ConfigValue::Float(0.5));
        assert_eq!(config.get_str("name").unwrap(), "10");
    }

    #[test]
    fn test_rejects_non_mapping_root() {
        assert!(matches!(
            load_config_str("- a\n- b\n"),
            Err(ConfigLoadError::NotAMapping)
        ));
    }

    #[test]
    fn test_rejects_sequence_value() {
        let err = load_config_str("hosts:\n  - a\n").unwrap_err();
        assert_eq!(err.to_string(), "configuration key 'hosts' must hold a scalar value");
    }

    #[test]
    fn test_rejects_invalid_yaml() {
        assert!(matches!(
            load_config_str("key: [unclosed"),
            Err(ConfigLoadError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "post_path: /posts").unwrap();

        let config = load_config_file(file.path()).unwrap();
        assert_eq!(config.get_str("post_path").unwrap(), "/posts");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_file(&dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Io { .. }));
    }
}
