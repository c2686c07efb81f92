//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! One instance wraps one pooled `reqwest::Client`; every request issued
//! through it reuses the same connections.

use std::collections::HashMap;
use std::error::Error as _;
use std::time::Instant;

use reqwest::{Client, Method};
use restcheck_application::ConnectionSettings;
use restcheck_application::ports::{HttpClient, HttpClientError, HttpFuture};
use restcheck_domain::{HttpMethod, RequestBody, RequestSpec, ResponseSpec};
use tracing::warn;

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a client with the pool and identity settings in `settings`.
    ///
    /// Redirects are followed up to 10 times. Requests use HTTP/1.1 so
    /// connection-level headers such as `Connection` reach the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(settings: &ConnectionSettings) -> Result<Self, HttpClientError> {
        if settings.accept_invalid_certs {
            warn!("TLS certificate validation is disabled for this client");
        }

        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .http1_only()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .pool_idle_timeout(settings.idle_timeout)
            .pool_max_idle_per_host(settings.max_idle_per_host)
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Attaches the body, rejecting JSON bodies that do not parse.
    fn build_body(
        builder: reqwest::RequestBuilder,
        body: &RequestBody,
    ) -> Result<reqwest::RequestBuilder, HttpClientError> {
        match body {
            RequestBody::None => Ok(builder),
            RequestBody::Raw {
                content_type,
                content,
            } => {
                if content_type.contains("application/json") && !content.is_empty() {
                    let _: serde_json::Value = serde_json::from_str(content)
                        .map_err(|e| HttpClientError::InvalidBody(format!("Invalid JSON: {e}")))?;
                }
                Ok(builder.body(content.clone()))
            }
        }
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    fn map_error(error: &reqwest::Error) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout;
        }

        let host = || {
            error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error_chain(error);
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(error_chain(error))
    }
}

/// Joins an error with all of its sources.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: &RequestSpec) -> HttpFuture<'_> {
        let method = request.method;
        let url = request.full_url();
        let headers: Vec<_> = request.headers.iter().cloned().collect();
        let body = request.body.clone();

        Box::pin(async move {
            let start = Instant::now();

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(method), url);

            for header in &headers {
                builder = builder.header(&header.name, &header.value);
            }

            // Content-Type from the body unless a header already sets it
            if let Some(content_type) = body.content_type() {
                let has_content_type = headers
                    .iter()
                    .any(|h| h.name.eq_ignore_ascii_case("content-type"));
                if !has_content_type {
                    builder = builder.header("Content-Type", content_type);
                }
            }

            builder = Self::build_body(builder, &body)?;

            let response = builder.send().await.map_err(|e| Self::map_error(&e))?;

            let status = response.status().as_u16();

            let response_headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
                .collect();

            let body_bytes = response
                .bytes()
                .await
                .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?
                .to_vec();

            let duration = start.elapsed();

            Ok(ResponseSpec::new(
                status,
                response_headers,
                body_bytes,
                duration,
            ))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use url::Url;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Patch),
            Method::PATCH
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_client_creation() {
        assert!(ReqwestHttpClient::new(&ConnectionSettings::default()).is_ok());
        assert!(ReqwestHttpClient::new(&ConnectionSettings::default().relaxed_tls()).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_rejected_before_sending() {
        let client = ReqwestHttpClient::new(&ConnectionSettings::default()).unwrap();
        let request = RequestSpec::new(
            HttpMethod::Post,
            Url::parse("http://127.0.0.1:9/posts").unwrap(),
        )
        .with_body(RequestBody::json("{not json"));

        let err = client.execute(&request).await.unwrap_err();
        assert!(matches!(err, HttpClientError::InvalidBody(_)));
    }

    #[test]
    fn test_text_body_is_not_validated() {
        let body = RequestBody::text("{not json");
        let builder = Client::new().post("http://127.0.0.1:9/");
        assert!(ReqwestHttpClient::build_body(builder, &body).is_ok());
    }

    #[tokio::test]
    async fn test_closed_port_maps_to_connection_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = ReqwestHttpClient::new(&ConnectionSettings::default()).unwrap();
        let request = RequestSpec::new(
            HttpMethod::Get,
            Url::parse(&format!("http://127.0.0.1:{port}/posts")).unwrap(),
        );

        let err = client.execute(&request).await.unwrap_err();
        assert!(
            matches!(
                err,
                HttpClientError::ConnectionRefused { .. } | HttpClientError::ConnectionFailed(_)
            ),
            "unexpected error: {err:?}"
        );
    }
}
