//! The last step before a request reaches the transport.

use crate::{Body, Error, Headers, RequestConfig, Result};
use http::Method;

/// A processed request, ready to be handed to the transport.
///
/// Built from a [`RequestConfig`] that has already been through
/// [`process_config`](crate::process_config).
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<Body>,
}

impl PreparedRequest {
    /// Applies the transport rules to a processed configuration.
    ///
    /// The method is uppercased. Headers are kept verbatim and in order,
    /// except that any `content-type` header (in any casing) is dropped when
    /// there is no body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationError`] if the method is not a valid
    /// HTTP method token.
    ///
    /// # Examples
    ///
    /// ```
    /// use plainreq::{PreparedRequest, RequestConfig};
    ///
    /// let config = RequestConfig::new("https://api.example.com/users")
    ///     .method("delete")
    ///     .header("content-type", "application/json")
    ///     .header("X-Request-Id", "42");
    ///
    /// let request = PreparedRequest::from_config(config)?;
    /// assert_eq!(request.method, http::Method::DELETE);
    /// assert_eq!(request.headers.names().collect::<Vec<_>>(), ["X-Request-Id"]);
    /// # Ok::<(), plainreq::Error>(())
    /// ```
    pub fn from_config(config: RequestConfig) -> Result<Self> {
        let method = Method::from_bytes(config.method.to_ascii_uppercase().as_bytes())
            .map_err(|e| Error::ConfigurationError(format!("Invalid method: {}", e)))?;

        let has_body = config.data.is_some();
        let headers = config
            .headers
            .into_iter()
            .filter(|(name, _)| {
                let keep = has_body || !name.eq_ignore_ascii_case("content-type");
                if !keep {
                    tracing::debug!(header = %name, "Dropping content type for empty body");
                }
                keep
            })
            .collect();

        Ok(Self {
            method,
            url: config.url,
            headers,
            body: config.data,
        })
    }
}
