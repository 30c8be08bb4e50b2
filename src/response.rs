//! Raw response returned by the dispatcher.
//!
//! The body is kept as text and never parsed; interpreting it is left to the
//! caller.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A response to a dispatched request.
///
/// # Examples
///
/// ```no_run
/// use plainreq::{Client, RequestConfig};
///
/// # async fn example() -> Result<(), plainreq::Error> {
/// let client = Client::builder().build()?;
/// let response = client
///     .request(RequestConfig::new("https://api.example.com/users/123"))
///     .await?;
///
/// println!("Status: {}", response.status);
/// println!("Request took {:?}", response.latency);
/// println!("Body: {}", response.raw_body);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    /// The raw response body as a string.
    pub raw_body: String,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from sending the request until the body was read.
    pub latency: Duration,
}

impl Response {
    /// Creates a new `Response`.
    pub fn new(raw_body: String, status: StatusCode, headers: HeaderMap, latency: Duration) -> Self {
        Self {
            raw_body,
            status,
            headers,
            latency,
        }
    }

    /// Returns `true` for 2xx status codes.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns a reference to a header value by name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use plainreq::Response;
    /// # use http::{HeaderMap, StatusCode, HeaderValue};
    /// # use std::time::Duration;
    /// let mut headers = HeaderMap::new();
    /// headers.insert("content-type", HeaderValue::from_static("text/plain"));
    ///
    /// let response = Response::new(
    ///     "ok".to_string(),
    ///     StatusCode::OK,
    ///     headers,
    ///     Duration::from_millis(100),
    /// );
    ///
    /// assert_eq!(response.header("Content-Type"), Some("text/plain"));
    /// assert!(response.is_success());
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}
