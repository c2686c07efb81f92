//! HTTP client port
//!
//! Defines the transport used by [`crate::RestClient`].

use std::future::Future;
use std::pin::Pin;

use restcheck_domain::{RequestSpec, ResponseSpec};
use thiserror::Error;

/// Errors raised when a request does not produce a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The URL cannot be used for a request.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The host name did not resolve.
    #[error("DNS lookup failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// The server actively refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// Any other connect-phase failure (TLS handshake, reset, ...).
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit in effect.
        max: usize,
    },

    /// The request body could not be sent.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Anything else reported by the transport.
    #[error("{0}")]
    Other(String),
}

/// Future returned by [`HttpClient::execute`].
pub type HttpFuture<'a> = Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + 'a>>;

/// Port for executing HTTP requests.
///
/// Implementations own connection reuse: one instance is shared by every
/// request issued through a [`crate::RestClient`].
pub trait HttpClient: Send + Sync {
    /// Sends `request` and waits for the full response body.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpClientError`] if no response was received. Non-2xx
    /// statuses are not errors.
    fn execute(&self, request: &RequestSpec) -> HttpFuture<'_>;
}
