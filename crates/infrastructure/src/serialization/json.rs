//! JSON serialization helpers for deterministic output.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use restcheck_domain::{
        FailureDetail, FailureKind, ScenarioGroup, ScenarioOutcome, SuiteReport,
    };

    #[test]
    fn test_stable_serialization_has_trailing_newline() {
        let json = to_json_stable(&serde_json::json!({"key": "value"})).unwrap();
        assert!(json.ends_with('\n'));
        assert!(json.contains("  \"key\""));
    }

    #[test]
    fn test_report_serialization() {
        let report = SuiteReport::new(
            vec![
                ScenarioOutcome::pass("post_data", ScenarioGroup::Posts, 12),
                ScenarioOutcome::fail(
                    "post_delete",
                    ScenarioGroup::Posts,
                    7,
                    FailureDetail {
                        kind: FailureKind::Assertion,
                        message: "Wrong status".to_string(),
                        expected: Some("200".to_string()),
                        actual: Some("404".to_string()),
                    },
                ),
            ],
            19,
        );

        let json = to_json_stable(&report).unwrap();
        let expected = r#"{
  "outcomes": [
    {
      "name": "post_data",
      "group": "posts",
      "passed": true,
      "duration_ms": 12
    },
    {
      "name": "post_delete",
      "group": "posts",
      "passed": false,
      "duration_ms": 7,
      "failure": {
        "kind": "assertion",
        "message": "Wrong status",
        "expected": "200",
        "actual": "404"
      }
    }
  ],
  "total": 2,
  "passed": 1,
  "failed": 1,
  "duration_ms": 19
}
"#;
        assert_eq!(json, expected);
    }
}
