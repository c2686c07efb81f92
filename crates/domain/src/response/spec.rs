//! Response as seen by the assertions.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A received HTTP response, body fully read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// Response headers; names as received.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Response body (lossy for non UTF-8 payloads).
    pub body: String,
    /// Time from sending the request to receiving the full body.
    #[serde(with = "duration_millis")]
    pub duration: Duration,
    /// `Content-Type` header value, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ResponseSpec {
    /// Creates a response from raw parts.
    #[must_use]
    pub fn new(
        status: u16,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        let content_type = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.clone());

        Self {
            status,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
            duration,
            content_type,
        }
    }

    /// Returns the body with every whitespace character removed.
    ///
    /// Used to compare pretty-printed payloads against compact literals.
    #[must_use]
    pub fn body_without_whitespace(&self) -> String {
        self.body.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Returns the first `max_chars` characters of the body, marking truncation.
    #[must_use]
    pub fn body_preview(&self, max_chars: usize) -> String {
        if self.body.chars().count() > max_chars {
            let head: String = self.body.chars().take(max_chars).collect();
            format!("{head}...")
        } else {
            self.body.clone()
        }
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
