//! HTTP client that normalizes request configurations and dispatches them.
//!
//! The [`Client`] type is the main entry point for sending requests.
//! Use [`ClientBuilder`] to configure and create clients.

use crate::{
    dispatch::PreparedRequest, process_config, Body, Error, RequestConfig, Response, Result,
};
use http::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// An HTTP client for sending [`RequestConfig`]s.
///
/// The client is cheap to clone and is meant to be reused across requests.
///
/// # Examples
///
/// ```no_run
/// use plainreq::{Body, Client, RequestConfig};
/// use serde_json::json;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), plainreq::Error> {
/// let client = Client::builder()
///     .timeout(Duration::from_secs(30))
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
///
/// // GET with query parameters
/// let config = RequestConfig::new("https://api.example.com/users")
///     .param("page", 2)
///     .param("tags", vec!["admin", "active"]);
/// let response = client.request(config).await?;
/// println!("Users: {}", response.raw_body);
///
/// // POST a JSON body
/// let created = client
///     .post("https://api.example.com/users", Body::json(&json!({"name": "Alice"}))?)
///     .await?;
/// println!("Created: {}", created.status);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Normalizes `config` and sends it.
    ///
    /// Normalization runs to completion before anything is sent, so a
    /// configuration that fails to serialize never reaches the network.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be normalized, the
    /// final URL or a header is invalid, or the transport fails.
    pub async fn request(&self, mut config: RequestConfig) -> Result<Response> {
        process_config(&mut config)?;
        let request = PreparedRequest::from_config(config)?;
        self.dispatch(request).await
    }

    /// Sends an already prepared request.
    pub async fn dispatch(&self, request: PreparedRequest) -> Result<Response> {
        let url = Url::parse(&request.url)?;

        let mut headers = self.inner.default_headers.clone();
        for (name, value) in request.headers.iter() {
            let name = HeaderName::try_from(name)
                .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
            let value = HeaderValue::try_from(value)
                .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
            headers.insert(name, value);
        }

        tracing::debug!(
            method = %request.method,
            url = %url,
            "Executing HTTP request"
        );

        let mut builder = self
            .inner
            .http_client
            .request(request.method.clone(), url)
            .headers(headers);

        if let Some(timeout) = self.inner.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(body) = request.body {
            builder = builder.body(body.into_bytes()?);
        }

        let start_time = Instant::now();
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(
                error = %e,
                method = %request.method,
                url = %request.url,
                "Request failed"
            );
            if e.is_timeout() {
                Error::Timeout
            } else {
                Error::Network(e)
            }
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let raw_body = response.text().await?;
        let latency = start_time.elapsed();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            "Received HTTP response"
        );

        Ok(Response::new(raw_body, status, headers, latency))
    }

    /// Sends a `GET` request to `url`.
    pub async fn get(&self, url: impl Into<String>) -> Result<Response> {
        self.request(RequestConfig::new(url)).await
    }

    /// Sends a `DELETE` request to `url`.
    pub async fn delete(&self, url: impl Into<String>) -> Result<Response> {
        self.request(RequestConfig::new(url).method("DELETE")).await
    }

    /// Sends a `HEAD` request to `url`.
    pub async fn head(&self, url: impl Into<String>) -> Result<Response> {
        self.request(RequestConfig::new(url).method("HEAD")).await
    }

    /// Sends an `OPTIONS` request to `url`.
    pub async fn options(&self, url: impl Into<String>) -> Result<Response> {
        self.request(RequestConfig::new(url).method("OPTIONS")).await
    }

    /// Sends a `POST` request to `url` with an optional body.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use plainreq::{Body, Client};
    ///
    /// # async fn example() -> Result<(), plainreq::Error> {
    /// let client = Client::builder().build()?;
    /// let response = client
    ///     .post("https://api.example.com/echo", Some(Body::from("hello")))
    ///     .await?;
    /// println!("Echoed: {}", response.raw_body);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn post(&self, url: impl Into<String>, data: Option<Body>) -> Result<Response> {
        self.send_with_data("POST", url, data).await
    }

    /// Sends a `PUT` request to `url` with an optional body.
    pub async fn put(&self, url: impl Into<String>, data: Option<Body>) -> Result<Response> {
        self.send_with_data("PUT", url, data).await
    }

    /// Sends a `PATCH` request to `url` with an optional body.
    pub async fn patch(&self, url: impl Into<String>, data: Option<Body>) -> Result<Response> {
        self.send_with_data("PATCH", url, data).await
    }

    async fn send_with_data(
        &self,
        method: &str,
        url: impl Into<String>,
        data: Option<Body>,
    ) -> Result<Response> {
        let mut config = RequestConfig::new(url).method(method);
        config.data = data;
        self.request(config).await
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use plainreq::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), plainreq::Error> {
/// let client = ClientBuilder::new()
///     .timeout(Duration::from_secs(30))
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            default_headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// Headers set on a request replace defaults of the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn build(self) -> Result<Client> {
        let http_client = reqwest::Client::builder().build().map_err(|e| {
            Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                default_headers: self.default_headers,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalizes and sends `config` with a default [`Client`].
///
/// # Examples
///
/// ```no_run
/// use plainreq::RequestConfig;
///
/// # async fn example() -> Result<(), plainreq::Error> {
/// let response = plainreq::request(
///     RequestConfig::new("https://api.example.com/search").param("q", "rust"),
/// )
/// .await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
pub async fn request(config: RequestConfig) -> Result<Response> {
    Client::builder().build()?.request(config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_default_header_is_rejected() {
        let result = ClientBuilder::new().default_header("bad header", "x");
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_sending() {
        let client = Client::builder().build().unwrap();
        let result = client.get("not a url").await;
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_invalid_request_header_fails_before_sending() {
        let client = Client::builder().build().unwrap();
        let config = RequestConfig::new("http://127.0.0.1:9/").header("X-Bad", "line\nbreak");
        let result = client.request(config).await;
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }
}
