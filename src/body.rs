//! Request bodies and body serialization.

use crate::params::iso_8601;
use crate::Result;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use url::form_urlencoded;

/// A request body.
///
/// Only [`Body::Record`] is rewritten by the pipeline (into JSON text); every
/// other variant reaches the transport as given.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// A plain key/value record. Serialized to JSON before dispatch.
    Record(Map<String, Value>),
    Array(Vec<Value>),
    Date(DateTime<Utc>),
    Text(String),
    Number(Number),
    Bool(bool),
    /// Raw bytes, sent verbatim.
    Binary(Bytes),
    /// Form fields, sent as `application/x-www-form-urlencoded` text.
    Form(Vec<(String, String)>),
}

/// The shape category of a [`Body`], used for content-type inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    PlainRecord,
    Array,
    Date,
    Primitive,
    Opaque,
}

impl Body {
    /// Returns the shape category of this body.
    pub fn shape(&self) -> BodyShape {
        match self {
            Body::Record(_) => BodyShape::PlainRecord,
            Body::Array(_) => BodyShape::Array,
            Body::Date(_) => BodyShape::Date,
            Body::Text(_) | Body::Number(_) | Body::Bool(_) => BodyShape::Primitive,
            Body::Binary(_) | Body::Form(_) => BodyShape::Opaque,
        }
    }

    /// Converts a JSON value into a body. JSON `null` means no body.
    pub fn from_value(value: Value) -> Option<Body> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Body::Bool(b)),
            Value::Number(n) => Some(Body::Number(n)),
            Value::String(s) => Some(Body::Text(s)),
            Value::Array(items) => Some(Body::Array(items)),
            Value::Object(map) => Some(Body::Record(map)),
        }
    }

    /// Serializes `value` into a body.
    ///
    /// Structs and maps become [`Body::Record`], so they are sent as JSON
    /// with an inferred content type. A value serializing to `null` yields
    /// no body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationFailed`](crate::Error::SerializationFailed)
    /// if `value` cannot be serialized.
    ///
    /// # Examples
    ///
    /// ```
    /// use plainreq::{Body, BodyShape};
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct NewUser { name: String }
    ///
    /// let body = Body::json(&NewUser { name: "Alice".into() })?.unwrap();
    /// assert_eq!(body.shape(), BodyShape::PlainRecord);
    /// assert!(Body::json(&())?.is_none());
    /// # Ok::<(), plainreq::Error>(())
    /// ```
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Option<Body>> {
        Ok(Body::from_value(serde_json::to_value(value)?))
    }

    /// Creates a form body from name/value pairs.
    pub fn form<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Body
    where
        K: Into<String>,
        V: Into<String>,
    {
        Body::Form(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns the text of a [`Body::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Converts the body into the bytes sent on the wire.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationFailed`](crate::Error::SerializationFailed)
    /// if a JSON body cannot be serialized.
    pub fn into_bytes(self) -> Result<Bytes> {
        Ok(match self {
            Body::Record(map) => Bytes::from(serde_json::to_vec(&map)?),
            Body::Array(items) => Bytes::from(serde_json::to_vec(&items)?),
            Body::Date(date) => Bytes::from(iso_8601(&date)),
            Body::Text(text) => Bytes::from(text),
            Body::Number(n) => Bytes::from(n.to_string()),
            Body::Bool(b) => Bytes::from(b.to_string()),
            Body::Binary(bytes) => bytes,
            Body::Form(fields) => Bytes::from(
                form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(fields)
                    .finish(),
            ),
        })
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Binary(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Binary(Bytes::from(bytes))
    }
}

impl From<DateTime<Utc>> for Body {
    fn from(date: DateTime<Utc>) -> Self {
        Body::Date(date)
    }
}

impl From<Map<String, Value>> for Body {
    fn from(map: Map<String, Value>) -> Self {
        Body::Record(map)
    }
}

/// Serializes plain record bodies to JSON text; passes anything else through.
///
/// # Examples
///
/// ```
/// use plainreq::{body::transform_request, Body};
/// use serde_json::json;
///
/// let data = transform_request(Body::from_value(json!({"foo": 1})))?;
/// assert_eq!(data, Some(Body::Text(r#"{"foo":1}"#.to_string())));
///
/// let data = transform_request(Some(Body::from("raw")))?;
/// assert_eq!(data, Some(Body::Text("raw".to_string())));
/// # Ok::<(), plainreq::Error>(())
/// ```
pub fn transform_request(data: Option<Body>) -> Result<Option<Body>> {
    match data {
        Some(Body::Record(map)) => Ok(Some(Body::Text(serde_json::to_string(&map)?))),
        other => Ok(other),
    }
}
