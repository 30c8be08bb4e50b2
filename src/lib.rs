//! # plainreq - a minimal declarative HTTP request client
//!
//! plainreq turns a declarative [`RequestConfig`] (URL, query parameters,
//! body, headers, method) into a well-formed request and sends it with
//! `reqwest`. Before anything is sent, the configuration goes through a
//! normalization pipeline:
//!
//! 1. query parameters are serialized onto the URL ([`query::build_url`]),
//! 2. the `Content-Type` header is canonicalized and, for plain record
//!    bodies, inferred as JSON ([`headers::process_headers`]),
//! 3. plain record bodies are serialized to JSON text
//!    ([`body::transform_request`]).
//!
//! ## Quick Start
//!
//! ```no_run
//! use plainreq::{Client, RequestConfig};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct CreateUser {
//!     name: String,
//!     email: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), plainreq::Error> {
//!     let client = Client::builder().build()?;
//!
//!     // GET https://api.example.com/users?ids[]=1&ids[]=2&q=a+b
//!     let config = RequestConfig::new("https://api.example.com/users")
//!         .param("ids", vec![1, 2])
//!         .param("q", "a b");
//!     let response = client.request(config).await?;
//!     println!("Users: {}", response.raw_body);
//!
//!     // POST with `Content-Type: application/json;charset=utf-8`
//!     let new_user = CreateUser {
//!         name: "Alice".to_string(),
//!         email: "alice@example.com".to_string(),
//!     };
//!     let config = RequestConfig::new("https://api.example.com/users")
//!         .method("post")
//!         .json(&new_user)?;
//!     let created = client.request(config).await?;
//!     println!("Created: {} in {:?}", created.status, created.latency);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Normalizing without sending
//!
//! The pipeline is synchronous and can be run on its own:
//!
//! ```
//! use plainreq::RequestConfig;
//! use serde_json::json;
//!
//! let mut config = RequestConfig::new("http://a.com/path#frag")
//!     .param("a", vec![1, 2])
//!     .header("content-type", "application/vnd.api+json")
//!     .json(&json!({"foo": 1}))?;
//!
//! config.process()?;
//!
//! assert_eq!(config.url, "http://a.com/path?a[]=1&a[]=2");
//! assert_eq!(config.headers.get("Content-Type"), Some("application/vnd.api+json"));
//! assert_eq!(config.data.unwrap().as_text(), Some(r#"{"foo":1}"#));
//! # Ok::<(), plainreq::Error>(())
//! ```

pub mod body;
mod client;
mod config;
pub mod dispatch;
mod error;
pub mod headers;
mod params;
pub mod query;
mod response;

pub use body::{Body, BodyShape};
pub use client::{request, Client, ClientBuilder};
pub use config::{process_config, RequestConfig};
pub use dispatch::PreparedRequest;
pub use error::{Error, Result};
pub use headers::Headers;
pub use params::{ParamValue, Params};
pub use response::Response;
