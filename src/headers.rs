//! Request header map and header normalization.
//!
//! [`Headers`] keeps header names exactly as the caller spelled them, in
//! insertion order. Normalization folds case variants of a header name into
//! a single canonical spelling and infers a JSON content type for plain
//! record bodies.

use crate::body::{Body, BodyShape};

/// Canonical spelling of the content type header.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Content type injected for plain record bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// An insertion-ordered, case-preserving header map.
///
/// Keys are compared exactly: `content-type` and `Content-Type` are two
/// distinct entries until [`normalize_header_name`] folds them.
///
/// # Examples
///
/// ```
/// use plainreq::Headers;
///
/// let mut headers = Headers::new();
/// headers.insert("Accept", "text/plain");
/// headers.insert("Accept", "application/json");
///
/// assert_eq!(headers.len(), 1);
/// assert_eq!(headers.get("Accept"), Some("application/json"));
/// assert_eq!(headers.get_ignore_case("accept"), Some("application/json"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, returning the previous value.
    ///
    /// Writing an existing key keeps its position (last write wins).
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the value stored under exactly `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value of the last entry whose name matches `name`
    /// ignoring ASCII case.
    pub fn get_ignore_case(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Removes the entry stored under exactly `name`.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the header names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Iterates over the headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Folds every case variant of `canonical` into a single `canonical` entry.
///
/// The folded entry takes the position of the first matching name. Variants
/// are renamed in iteration order and each rename overwrites the canonical
/// entry, so the last non-canonically spelled variant wins, even over an
/// exact `canonical` entry. If only the exact spelling is present its value
/// is kept.
///
/// # Examples
///
/// ```
/// use plainreq::{headers::normalize_header_name, Headers};
///
/// let headers: Headers = [
///     ("content-type", "text/plain"),
///     ("Accept", "*/*"),
///     ("CONTENT-TYPE", "text/html"),
/// ]
/// .into_iter()
/// .collect();
///
/// let headers = normalize_header_name(headers, "Content-Type");
/// assert_eq!(headers.names().collect::<Vec<_>>(), ["Content-Type", "Accept"]);
/// assert_eq!(headers.get("Content-Type"), Some("text/html"));
/// ```
pub fn normalize_header_name(headers: Headers, canonical: &str) -> Headers {
    let mut entries = Vec::with_capacity(headers.len());
    let mut slot = None;
    let mut exact_value = None;
    let mut renamed_value = None;

    for (name, value) in headers {
        if !name.eq_ignore_ascii_case(canonical) {
            entries.push((name, value));
            continue;
        }

        if slot.is_none() {
            slot = Some(entries.len());
        }
        if name == canonical {
            exact_value = Some(value);
        } else {
            tracing::trace!(from = %name, to = %canonical, "Folding header name");
            renamed_value = Some(value);
        }
    }

    if let (Some(index), Some(value)) = (slot, renamed_value.or(exact_value)) {
        entries.insert(index, (canonical.to_string(), value));
    }

    Headers { entries }
}

/// Canonicalizes `Content-Type` and infers a JSON content type.
///
/// When `data` is a plain record body and no `Content-Type` is present after
/// canonicalization, `Content-Type: application/json;charset=utf-8` is set.
/// An explicit content type is never overwritten.
///
/// # Examples
///
/// ```
/// use plainreq::{headers::process_headers, Body, Headers};
/// use serde_json::json;
///
/// let body = Body::json(&json!({"foo": 1}))?;
///
/// let headers = process_headers(Headers::new(), body.as_ref());
/// assert_eq!(headers.get("Content-Type"), Some("application/json;charset=utf-8"));
///
/// let headers = process_headers(
///     Headers::new().with("content-type", "text/plain"),
///     body.as_ref(),
/// );
/// assert_eq!(headers.get("Content-Type"), Some("text/plain"));
/// # Ok::<(), plainreq::Error>(())
/// ```
pub fn process_headers(headers: Headers, data: Option<&Body>) -> Headers {
    let mut headers = normalize_header_name(headers, CONTENT_TYPE);

    let is_record = data.map(Body::shape) == Some(BodyShape::PlainRecord);
    if is_record && !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, JSON_CONTENT_TYPE);
    }

    tracing::debug!(
        headers = ?headers.names().collect::<Vec<_>>(),
        "Normalized request headers"
    );

    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> Option<Body> {
        Body::from_value(json!({"foo": 1}))
    }

    #[test]
    fn test_insert_is_last_write_wins() {
        let mut headers = Headers::new();
        assert_eq!(headers.insert("X-A", "1"), None);
        assert_eq!(headers.insert("X-A", "2"), Some("1".to_string()));
        assert_eq!(headers.get("X-A"), Some("2"));
        assert_eq!(headers.get("x-a"), None);
    }

    #[test]
    fn test_remove() {
        let mut headers = Headers::new().with("A", "1").with("B", "2");
        assert_eq!(headers.remove("A"), Some("1".to_string()));
        assert_eq!(headers.remove("A"), None);
        assert_eq!(headers.names().collect::<Vec<_>>(), ["B"]);
    }

    #[test]
    fn test_normalize_renames_single_variant() {
        let headers = Headers::new()
            .with("Accept", "*/*")
            .with("content-type", "text/plain");
        let headers = normalize_header_name(headers, CONTENT_TYPE);

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("Content-Type"), Some("text/plain"));
        assert!(!headers.contains_key("content-type"));
    }

    #[test]
    fn test_normalize_last_variant_wins() {
        let headers = Headers::new()
            .with("content-type", "a")
            .with("CONTENT-TYPE", "b")
            .with("Content-type", "c");
        let headers = normalize_header_name(headers, CONTENT_TYPE);

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Content-Type"), Some("c"));
    }

    #[test]
    fn test_normalize_variant_overwrites_canonical() {
        let headers = Headers::new()
            .with("content-type", "a")
            .with("Content-Type", "b");
        let headers = normalize_header_name(headers, CONTENT_TYPE);

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Content-Type"), Some("a"));
    }

    #[test]
    fn test_normalize_keeps_lone_canonical() {
        let headers = Headers::new().with("Content-Type", "text/plain");
        let headers = normalize_header_name(headers, CONTENT_TYPE);
        assert_eq!(headers.get("Content-Type"), Some("text/plain"));
    }

    #[test]
    fn test_normalize_without_matches_is_identity() {
        let headers = Headers::new().with("Accept", "*/*").with("X-Id", "7");
        assert_eq!(normalize_header_name(headers.clone(), CONTENT_TYPE), headers);
    }

    #[test]
    fn test_json_content_type_is_injected_for_records() {
        let headers = process_headers(Headers::new(), record().as_ref());
        assert_eq!(headers.get("Content-Type"), Some(JSON_CONTENT_TYPE));
    }

    #[test]
    fn test_explicit_content_type_is_kept() {
        let headers = process_headers(
            Headers::new().with("Content-Type", "text/plain"),
            record().as_ref(),
        );
        assert_eq!(headers.get("Content-Type"), Some("text/plain"));
    }

    #[test]
    fn test_no_injection_for_other_shapes() {
        for data in [
            None,
            Some(Body::from("raw")),
            Body::from_value(json!([1, 2])),
            Some(Body::Binary(bytes::Bytes::from_static(b"\x00\x01"))),
        ] {
            let headers = process_headers(Headers::new(), data.as_ref());
            assert!(headers.is_empty(), "unexpected headers for {:?}", data);
        }
    }
}
