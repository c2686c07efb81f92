//! HTTP Request body types

use serde::{Deserialize, Serialize};

/// HTTP request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// Raw payload sent verbatim with the given content type.
    Raw {
        /// The content type (e.g., "application/json", "text/plain")
        content_type: String,
        /// The payload.
        content: String,
    },
}

impl RequestBody {
    /// Creates a JSON body from already serialized text.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self::Raw {
            content_type: "application/json".to_string(),
            content: content.into(),
        }
    }

    /// Serializes `value` and wraps it as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn json_value<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::json(serde_json::to_string(value)?))
    }

    /// Creates a plain text body.
    ///
    /// The services under test treat a `text/plain` payload as opaque and do
    /// not echo its fields back; fixtures rely on that.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Raw {
            content_type: "text/plain".to_string(),
            content: content.into(),
        }
    }

    /// Returns whether the body is empty or none.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Raw { content, .. } => content.is_empty(),
        }
    }

    /// Returns the content type if applicable.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Raw { content_type, .. } => Some(content_type),
        }
    }

    /// Returns the payload, empty for [`RequestBody::None`].
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::None => "",
            Self::Raw { content, .. } => content,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_body() {
        let body = RequestBody::json(r#"{"key": "value"}"#);
        assert_eq!(body.content_type(), Some("application/json"));
        assert!(!body.is_empty());
    }

    #[test]
    fn test_json_value_body() {
        let body = RequestBody::json_value(&serde_json::json!({"title": "t"})).unwrap();
        assert_eq!(body.content(), r#"{"title":"t"}"#);
    }

    #[test]
    fn test_empty_body() {
        let body = RequestBody::None;
        assert!(body.is_empty());
        assert_eq!(body.content_type(), None);
        assert_eq!(body.content(), "");
    }
}
