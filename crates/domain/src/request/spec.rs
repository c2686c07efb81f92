//! Fully resolved request.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{Header, Headers, HttpMethod, QueryParam, QueryParams, RequestBody};

/// A request ready to be handed to the transport.
///
/// `url` is absolute; query parameters are kept apart and appended by
/// [`RequestSpec::full_url`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Absolute URL without the query parameters below.
    pub url: Url,
    /// Request headers.
    #[serde(default)]
    pub headers: Headers,
    /// Query parameters.
    #[serde(default)]
    pub query: QueryParams,
    /// Request body.
    #[serde(default)]
    pub body: RequestBody,
}

impl RequestSpec {
    /// Creates a request with no headers, query or body.
    #[must_use]
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Headers::new(),
            query: QueryParams::new(),
            body: RequestBody::None,
        }
    }

    /// Adds a header (builder pattern).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(Header::new(name, value));
        self
    }

    /// Adds a query parameter (builder pattern).
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(QueryParam::new(key, value));
        self
    }

    /// Sets the body (builder pattern).
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Returns the URL with the query parameters appended (percent-encoded).
    #[must_use]
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for param in self.query.iter() {
                pairs.append_pair(&param.key, &param.value);
            }
        }
        url
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_url_appends_query() {
        let request = RequestSpec::new(
            HttpMethod::Get,
            Url::parse("https://example.com/comments").unwrap(),
        )
        .with_query("postId", "1")
        .with_query("q", "a b");

        assert_eq!(
            request.full_url().as_str(),
            "https://example.com/comments?postId=1&q=a+b"
        );
    }

    #[test]
    fn test_full_url_without_query() {
        let request = RequestSpec::new(
            HttpMethod::Delete,
            Url::parse("https://example.com/posts/1").unwrap(),
        );
        assert_eq!(request.full_url().as_str(), "https://example.com/posts/1");
    }

    #[test]
    fn test_builder() {
        let request = RequestSpec::new(HttpMethod::Post, Url::parse("https://e.com").unwrap())
            .with_header("X-Trace", "1")
            .with_body(RequestBody::text("hi"));
        assert_eq!(request.headers.get("x-trace"), Some("1"));
        assert_eq!(request.body.content(), "hi");
    }
}
