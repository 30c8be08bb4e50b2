//! Request configuration and the normalization pipeline.

use crate::{
    body::{transform_request, Body},
    headers::{process_headers, Headers},
    params::{ParamValue, Params},
    query::build_url,
    Result,
};
use serde::Serialize;

/// A declarative description of a single request.
///
/// The configuration is consumed by one request: [`process_config`] rewrites
/// `url`, `headers` and `data` in place, then the dispatcher takes ownership.
///
/// # Examples
///
/// ```
/// use plainreq::RequestConfig;
/// use serde_json::json;
///
/// let mut config = RequestConfig::new("https://api.example.com/users")
///     .method("post")
///     .param("notify", true)
///     .json(&json!({"name": "Alice"}))?;
///
/// config.process()?;
///
/// assert_eq!(config.url, "https://api.example.com/users?notify=true");
/// assert_eq!(
///     config.headers.get("Content-Type"),
///     Some("application/json;charset=utf-8")
/// );
/// assert_eq!(config.data.unwrap().as_text(), Some(r#"{"name":"Alice"}"#));
/// # Ok::<(), plainreq::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// The request URL. After processing it carries the query string.
    pub url: String,

    /// The HTTP method, matched case-insensitively.
    pub method: String,

    /// Query parameters appended to `url`.
    pub params: Option<Params>,

    /// The request body.
    pub data: Option<Body>,

    /// Request headers.
    pub headers: Headers,
}

impl RequestConfig {
    /// Creates a `GET` configuration for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: "GET".to_string(),
            params: None,
            data: None,
            headers: Headers::new(),
        }
    }

    /// Sets the HTTP method.
    pub fn method(mut self, method: impl AsRef<str>) -> Self {
        self.method = method.as_ref().to_string();
        self
    }

    /// Replaces all query parameters.
    pub fn params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    /// Adds a query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.get_or_insert_with(Params::new).insert(key, value);
        self
    }

    /// Sets the request body.
    pub fn data(mut self, data: impl Into<Body>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Sets the request body from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.data = Body::json(value)?;
        Ok(self)
    }

    /// Sets a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Normalizes this configuration in place. See [`process_config`].
    pub fn process(&mut self) -> Result<()> {
        process_config(self)
    }
}

/// Normalizes a request configuration in place.
///
/// The query string is built from the original `params`, header inference
/// sees the original (unserialized) `data`, and only then is `data`
/// serialized. On error the configuration is left untouched.
///
/// `params` is kept, so processing the same configuration twice appends the
/// query string twice. Header and body normalization are idempotent.
///
/// # Errors
///
/// Returns [`Error::SerializationFailed`](crate::Error::SerializationFailed)
/// if a parameter or the body cannot be serialized.
pub fn process_config(config: &mut RequestConfig) -> Result<()> {
    let url = build_url(&config.url, config.params.as_ref())?;
    let data = transform_request(config.data.clone())?;
    let headers = process_headers(std::mem::take(&mut config.headers), config.data.as_ref());

    config.url = url;
    config.headers = headers;
    config.data = data;

    tracing::debug!(
        method = %config.method,
        url = %config.url,
        shape = ?config.data.as_ref().map(Body::shape),
        "Processed request config"
    );

    Ok(())
}
