//! Error types for request normalization and dispatch.
//!
//! Every failure is fail-fast: an error raised while normalizing a
//! [`RequestConfig`](crate::RequestConfig) means nothing was sent.

/// The main error type for building and sending requests.
///
/// # Examples
///
/// ```no_run
/// use plainreq::{Client, Error, RequestConfig};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder().build()?;
///
/// match client.request(RequestConfig::new("not a url")).await {
///     Ok(response) => println!("Status: {}", response.status),
///     Err(Error::InvalidUrl(e)) => eprintln!("Bad URL: {}", e),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level error occurred (connection failed, DNS lookup failed, etc.).
    ///
    /// This wraps the underlying `reqwest::Error`.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request timed out.
    ///
    /// Only produced when the client was built with a timeout.
    #[error("Request timed out")]
    Timeout,

    /// Invalid configuration was provided.
    ///
    /// Raised for an unparseable method, or for header names and values
    /// the transport refuses to send.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A query parameter or request body could not be serialized.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// The final request URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationFailed(e.to_string())
    }
}

/// A specialized `Result` type for this crate.
///
/// This is a convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_error_maps_to_serialization_failed() {
        let serde_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = serde_error.into();
        assert!(matches!(err, Error::SerializationFailed(_)));
        assert!(err.to_string().starts_with("Failed to serialize request"));
    }

    #[test]
    fn test_url_error_maps_to_invalid_url() {
        let parse_error = url::Url::parse("no scheme").unwrap_err();
        let err: Error = parse_error.into();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
