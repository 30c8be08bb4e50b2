//! Query parameter values.
//!
//! [`Params`] keeps parameters in insertion order, because the order of the
//! produced query parts follows it. [`ParamValue`] is the closed set of
//! shapes a parameter may take.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Omitted from the query string entirely.
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Serialized as ISO-8601 UTC with millisecond precision.
    Date(DateTime<Utc>),
    /// Emitted as one `key[]=value` part per element.
    Array(Vec<ParamValue>),
    /// Serialized as compact JSON text.
    Object(Map<String, Value>),
}

impl ParamValue {
    /// Returns `true` for [`ParamValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Converts the value to JSON, rendering dates as ISO-8601 strings.
    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Null => Value::Null,
            ParamValue::Bool(b) => Value::Bool(*b),
            ParamValue::Number(n) => Value::Number(n.clone()),
            ParamValue::String(s) => Value::String(s.clone()),
            ParamValue::Date(date) => Value::String(iso_8601(date)),
            ParamValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            ParamValue::Object(map) => Value::Object(map.clone()),
        }
    }
}

/// Formats a timestamp as `YYYY-MM-DDTHH:mm:ss.sssZ`.
pub(crate) fn iso_8601(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        // NaN and infinities have no JSON number form
        match Number::from_f64(value) {
            Some(n) => ParamValue::Number(n),
            None => ParamValue::String(value.to_string()),
        }
    }
}

impl From<DateTime<Utc>> for ParamValue {
    fn from(value: DateTime<Utc>) -> Self {
        ParamValue::Date(value)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

impl From<Map<String, Value>> for ParamValue {
    fn from(map: Map<String, Value>) -> Self {
        ParamValue::Object(map)
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Bool(b),
            Value::Number(n) => ParamValue::Number(n),
            Value::String(s) => ParamValue::String(s),
            Value::Array(items) => {
                ParamValue::Array(items.into_iter().map(ParamValue::from).collect())
            }
            Value::Object(map) => ParamValue::Object(map),
        }
    }
}

/// An insertion-ordered map of query parameters.
///
/// # Examples
///
/// ```
/// use plainreq::Params;
///
/// let params = Params::new()
///     .with("q", "rust")
///     .with("page", 2)
///     .with("tags", vec!["a", "b"]);
///
/// assert_eq!(params.len(), 3);
/// assert_eq!(params.keys().collect::<Vec<_>>(), ["q", "page", "tags"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Creates an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds parameters from any value that serializes to a JSON object,
    /// such as a struct or a map. Field order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationFailed`](crate::Error::SerializationFailed)
    /// if the value cannot be serialized or is not an object.
    ///
    /// # Examples
    ///
    /// ```
    /// use plainreq::Params;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Search { q: String, limit: u32 }
    ///
    /// let params = Params::from_serialize(&Search { q: "rust".into(), limit: 10 })?;
    /// assert_eq!(params.keys().collect::<Vec<_>>(), ["q", "limit"]);
    /// # Ok::<(), plainreq::Error>(())
    /// ```
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> crate::Result<Self> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(crate::Error::SerializationFailed(format!(
                "query parameters must serialize to an object, got {}",
                other
            ))),
        }
    }

    /// Inserts a parameter, returning the previous value for the key.
    ///
    /// An existing key keeps its position and only its value is replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = Params::new().with("a", 1).with("b", 2);
        let previous = params.insert("a", 3);

        assert_eq!(previous, Some(ParamValue::from(1)));
        assert_eq!(params.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(params.get("a"), Some(&ParamValue::from(3)));
    }

    #[test]
    fn test_from_json_value() {
        let value = ParamValue::from(json!([1, null, {"k": "v"}]));
        assert_eq!(
            value,
            ParamValue::Array(vec![
                ParamValue::from(1),
                ParamValue::Null,
                ParamValue::Object(json!({"k": "v"}).as_object().unwrap().clone()),
            ])
        );
    }

    #[test]
    fn test_to_json_renders_dates_as_strings() {
        let date = DateTime::parse_from_rfc3339("2024-03-01T12:30:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let value = ParamValue::from(vec![ParamValue::from(date), ParamValue::from(true)]);
        assert_eq!(value.to_json(), json!(["2024-03-01T12:30:05.000Z", true]));
    }

    #[test]
    fn test_option_none_is_null() {
        assert!(ParamValue::from(None::<&str>).is_null());
        assert_eq!(ParamValue::from(Some("x")), ParamValue::from("x"));
    }

    #[test]
    fn test_non_finite_float_falls_back_to_string() {
        assert_eq!(
            ParamValue::from(f64::NAN),
            ParamValue::String("NaN".to_string())
        );
    }

    #[test]
    fn test_from_serialize_rejects_non_objects() {
        let err = Params::from_serialize(&vec![1, 2]).unwrap_err();
        assert!(matches!(err, crate::Error::SerializationFailed(_)));
    }

    #[test]
    fn test_from_serialize_keeps_nulls() {
        let params = Params::from_serialize(&json!({"a": null, "b": "x"})).unwrap();
        assert_eq!(params.len(), 2);
        assert!(params.get("a").unwrap().is_null());
    }
}
