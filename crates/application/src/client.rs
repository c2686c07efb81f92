//! REST client wrapper.
//!
//! [`RestClient`] holds the base URL and default headers of one service and
//! hands out fresh [`RequestBuilder`]s. Builders own their state, so two
//! requests never share anything mutable.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use restcheck_domain::{
    Header, Headers, HttpMethod, QueryParam, QueryParams, RequestBody, RequestSpec, ResponseSpec,
    expand_path, resolve_url,
};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::HttpClient;

/// A positional path parameter, e.g. the `9` in `/posts/{postId}`.
pub type PathArg<'a> = &'a (dyn fmt::Display + Sync);

/// Client for one REST service.
#[derive(Clone)]
pub struct RestClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
    default_headers: Headers,
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Creates a client for the service rooted at `base_url`.
    #[must_use]
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        let mut default_headers = Headers::new();
        default_headers.set(Header::new("Accept", "application/json"));
        Self {
            http,
            base_url: base_url.into(),
            default_headers,
        }
    }

    /// Returns the service root.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a fresh builder seeded with the base URL and default headers.
    #[must_use]
    pub fn build_request(&self) -> RequestBuilder {
        RequestBuilder {
            http: Arc::clone(&self.http),
            base_url: self.base_url.clone(),
            headers: self.default_headers.clone(),
            query: QueryParams::new(),
            body: RequestBody::None,
        }
    }

    /// Issues a GET.
    ///
    /// # Errors
    ///
    /// Fails if the path does not expand or no response is received.
    pub async fn get(&self, path: &str, params: &[PathArg<'_>]) -> ApplicationResult<ResponseSpec> {
        self.build_request().get(path, params).await
    }

    /// Issues a POST with `body`.
    ///
    /// # Errors
    ///
    /// Fails if the path does not expand or no response is received.
    pub async fn post(
        &self,
        body: RequestBody,
        path: &str,
        params: &[PathArg<'_>],
    ) -> ApplicationResult<ResponseSpec> {
        self.build_request().body(body).post(path, params).await
    }

    /// Issues a PUT with `body`.
    ///
    /// # Errors
    ///
    /// Fails if the path does not expand or no response is received.
    pub async fn put(
        &self,
        body: RequestBody,
        path: &str,
        params: &[PathArg<'_>],
    ) -> ApplicationResult<ResponseSpec> {
        self.build_request().body(body).put(path, params).await
    }

    /// Issues a PATCH with `body`.
    ///
    /// # Errors
    ///
    /// Fails if the path does not expand or no response is received.
    pub async fn patch(
        &self,
        body: RequestBody,
        path: &str,
        params: &[PathArg<'_>],
    ) -> ApplicationResult<ResponseSpec> {
        self.build_request().body(body).patch(path, params).await
    }

    /// Issues a DELETE.
    ///
    /// # Errors
    ///
    /// Fails if the path does not expand or no response is received.
    pub async fn delete(
        &self,
        path: &str,
        params: &[PathArg<'_>],
    ) -> ApplicationResult<ResponseSpec> {
        self.build_request().delete(path, params).await
    }

    /// Decodes the response body as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Deserialization`] carrying the raw body if
    /// the payload does not have the shape of `T`.
    pub fn extract<T: DeserializeOwned>(response: &ResponseSpec) -> ApplicationResult<T> {
        serde_json::from_str(&response.body).map_err(|e| ApplicationError::Deserialization {
            target: short_type_name::<T>(),
            message: e.to_string(),
            body: response.body.clone(),
        })
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// A single request under construction.
pub struct RequestBuilder {
    http: Arc<dyn HttpClient>,
    base_url: String,
    headers: Headers,
    query: QueryParams,
    body: RequestBody,
}

impl RequestBuilder {
    /// Sets a header, replacing any default with the same name.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(Header::new(name, value));
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.add(QueryParam::new(key, value.to_string()));
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sends a GET.
    ///
    /// # Errors
    ///
    /// See [`RequestBuilder::send`].
    pub async fn get(self, path: &str, params: &[PathArg<'_>]) -> ApplicationResult<ResponseSpec> {
        self.send(HttpMethod::Get, path, params).await
    }

    /// Sends a POST.
    ///
    /// # Errors
    ///
    /// See [`RequestBuilder::send`].
    pub async fn post(self, path: &str, params: &[PathArg<'_>]) -> ApplicationResult<ResponseSpec> {
        self.send(HttpMethod::Post, path, params).await
    }

    /// Sends a PUT.
    ///
    /// # Errors
    ///
    /// See [`RequestBuilder::send`].
    pub async fn put(self, path: &str, params: &[PathArg<'_>]) -> ApplicationResult<ResponseSpec> {
        self.send(HttpMethod::Put, path, params).await
    }

    /// Sends a PATCH.
    ///
    /// # Errors
    ///
    /// See [`RequestBuilder::send`].
    pub async fn patch(self, path: &str, params: &[PathArg<'_>]) -> ApplicationResult<ResponseSpec> {
        self.send(HttpMethod::Patch, path, params).await
    }

    /// Sends a DELETE.
    ///
    /// # Errors
    ///
    /// See [`RequestBuilder::send`].
    pub async fn delete(
        self,
        path: &str,
        params: &[PathArg<'_>],
    ) -> ApplicationResult<ResponseSpec> {
        self.send(HttpMethod::Delete, path, params).await
    }

    /// Resolves `path` against the base URL without sending anything.
    ///
    /// # Errors
    ///
    /// Fails if the template does not expand or the URL does not parse.
    pub fn to_spec(
        &self,
        method: HttpMethod,
        path: &str,
        params: &[PathArg<'_>],
    ) -> ApplicationResult<RequestSpec> {
        let values: Vec<String> = params.iter().map(ToString::to_string).collect();
        let expanded = expand_path(path, &values)?;
        let url = resolve_url(&self.base_url, &expanded)?;
        Ok(RequestSpec {
            method,
            url,
            headers: self.headers.clone(),
            query: self.query.clone(),
            body: self.body.clone(),
        })
    }

    /// Builds the request and sends it with `method`.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::Domain`] if the path template does not expand
    /// - [`ApplicationError::Transport`] if no response is received
    pub async fn send(
        self,
        method: HttpMethod,
        path: &str,
        params: &[PathArg<'_>],
    ) -> ApplicationResult<ResponseSpec> {
        let request = self.to_spec(method, path, params)?;
        let url = request.full_url();
        debug!(method = %request.method, url = %url, "sending request");
        if !request.body.is_empty() {
            trace!(body = request.body.content(), "request body");
        }

        let started = Instant::now();
        let response = self.http.execute(&request).await.inspect_err(|e| {
            debug!(method = %request.method, url = %url, error = %e, "request failed");
        })?;

        debug!(
            method = %request.method,
            url = %url,
            status = response.status,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "response received"
        );
        trace!(body = %response.body, "response body");
        Ok(response)
    }
}
