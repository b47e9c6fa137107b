//! Core n8n client implementation.

use crate::error::{ClientError, Result};
use crate::mask::Masker;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as HttpClient, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::ops::Deref;
use std::time::Duration;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// Lowercase wire form of [`API_KEY_HEADER`].
const API_KEY_HEADER_NAME: HeaderName = HeaderName::from_static("x-n8n-api-key");

/// Default timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A client for interacting with the n8n public API.
///
/// Requests can only be issued inside a connection scope opened with
/// [`Client::connect`]; the returned [`Session`] releases the underlying
/// HTTP transport when it goes out of scope.
///
/// # Example
///
/// ```no_run
/// use n8n_client::Client;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut client = Client::new("http://localhost:5678")?
///     .with_api_key("my-secret-key")
///     .with_timeout(Duration::from_secs(60));
///
/// let session = client.connect()?;
/// let workflows = session.list_workflows(&Default::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    /// Base URL of the n8n instance, without trailing slash.
    base_url: String,
    /// Optional API key for authentication.
    api_key: Option<String>,
    /// Per-request timeout.
    timeout: Duration,
    /// Masking rules applied to credential data.
    masker: Masker,
    /// HTTP transport, present only inside a connection scope.
    http: Option<HttpClient>,
}

impl Client {
    /// Create a new n8n client.
    ///
    /// Trailing slashes are stripped from `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not use the http or https scheme.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(format!(
                "URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        Ok(Self {
            base_url: normalize_base_url(&base_url),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            masker: Masker::default(),
            http: None,
        })
    }

    /// Set an API key for authentication.
    ///
    /// The key is sent in the `X-N8N-API-KEY` header. Empty keys are ignored.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = (!api_key.is_empty()).then_some(api_key);
        self
    }

    /// Set a custom timeout for all requests.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the masking rules applied to credential data.
    #[must_use]
    pub fn with_masker(mut self, masker: Masker) -> Self {
        self.masker = masker;
        self
    }

    /// Base URL of the instance.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured API key, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Masking rules for credential data.
    pub fn masker(&self) -> &Masker {
        &self.masker
    }

    /// Whether a connection scope is currently open.
    pub fn is_connected(&self) -> bool {
        self.http.is_some()
    }

    /// Enter a connection scope.
    ///
    /// Builds the HTTP transport with the default headers. The transport is
    /// released when the returned [`Session`] is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn connect(&mut self) -> Result<Session<'_>> {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .default_headers(self.default_headers()?)
            .build()?;

        tracing::trace!(base_url = %self.base_url, "connection scope entered");
        self.http = Some(http);
        Ok(Session { client: self })
    }

    /// Headers attached to every request.
    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(ref key) = self.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| ClientError::InvalidHeader(API_KEY_HEADER.to_string()))?;
            headers.insert(API_KEY_HEADER_NAME, value);
        }
        Ok(headers)
    }

    /// Get the HTTP transport, failing outside a connection scope.
    fn http(&self) -> Result<&HttpClient> {
        self.http.as_ref().ok_or(ClientError::NotInitialized)
    }

    /// Build a full API URL from a path.
    pub(crate) fn url(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/api/v1/{}", self.base_url, path)
    }

    /// Execute a GET request.
    pub(crate) async fn get(&self, path: &str) -> Result<Value> {
        let request = self.http()?.get(self.url(path));
        self.send(Method::GET, path, request).await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Value> {
        let request = self.http()?.post(self.url(path)).json(body);
        self.send(Method::POST, path, request).await
    }

    /// Execute a PATCH request with a JSON body.
    pub(crate) async fn patch<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Value> {
        let request = self.http()?.patch(self.url(path)).json(body);
        self.send(Method::PATCH, path, request).await
    }

    /// Execute a DELETE request.
    pub(crate) async fn delete(&self, path: &str) -> Result<Value> {
        let request = self.http()?.delete(self.url(path));
        self.send(Method::DELETE, path, request).await
    }

    /// Send a request and parse the JSON body.
    ///
    /// Empty bodies parse as `null`. Non-success statuses become
    /// [`ClientError::HttpStatus`] carrying the raw body.
    async fn send(&self, method: Method, path: &str, request: RequestBuilder) -> Result<Value> {
        tracing::debug!(method = %method, path = %path, "sending request");

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), path = %path, "request failed");
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Check whether the instance is reachable.
    ///
    /// Queries `/healthz` outside the versioned API prefix. Any network
    /// failure or non-200 status yields `false`.
    pub async fn health_check(&self) -> bool {
        let Ok(http) = self.http() else {
            return false;
        };
        match http.get(format!("{}/healthz", self.base_url)).send().await {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(e) => {
                tracing::debug!(error = %e, "health check failed");
                false
            }
        }
    }
}

/// Strip trailing slashes from a base URL.
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Percent-encode an opaque identifier for use in a request path.
pub(crate) fn encode_id(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// An open connection scope.
///
/// Dereferences to [`Client`]; the HTTP transport is released on drop,
/// whichever way the scope is left.
#[derive(Debug)]
pub struct Session<'a> {
    client: &'a mut Client,
}

impl Deref for Session<'_> {
    type Target = Client;

    fn deref(&self) -> &Client {
        self.client
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        self.client.http = None;
        tracing::trace!(base_url = %self.client.base_url, "connection scope released");
    }
}
