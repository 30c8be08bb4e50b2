//! Query string serialization.
//!
//! Parameters are encoded the way browsers' `encodeURIComponent` does, with a
//! few characters relaxed to match common query-string conventions: `@`,
//! `:`, `$`, `,`, `[` and `]` stay literal and a space becomes `+`.

use crate::params::{iso_8601, ParamValue, Params};
use crate::Result;
use url::form_urlencoded;

/// Percent-encodes a query key or value.
///
/// # Examples
///
/// ```
/// use plainreq::query::encode;
///
/// assert_eq!(encode("a b&c"), "a+b%26c");
/// assert_eq!(encode("user@host:8080"), "user@host:8080");
/// assert_eq!(encode("ids[]"), "ids[]");
/// ```
pub fn encode(value: &str) -> String {
    // form_urlencoded yields each escaped byte as its own "%XX" chunk
    form_urlencoded::byte_serialize(value.as_bytes())
        .map(|chunk| match chunk {
            "%21" => "!",
            "%27" => "'",
            "%28" => "(",
            "%29" => ")",
            "%7E" => "~",
            "%40" => "@",
            "%3A" => ":",
            "%24" => "$",
            "%2C" => ",",
            "%5B" => "[",
            "%5D" => "]",
            other => other,
        })
        .collect()
}

/// Appends `params` to `url` as a query string.
///
/// Null parameters are skipped, arrays become repeated `key[]` parts, dates
/// are written as ISO-8601 and objects as compact JSON. When anything is
/// appended, the fragment of `url` is dropped and the query is joined with
/// `?` or `&` depending on whether `url` already has one.
///
/// # Errors
///
/// Returns [`Error::SerializationFailed`](crate::Error::SerializationFailed)
/// if an object value cannot be serialized.
///
/// # Examples
///
/// ```
/// use plainreq::{query::build_url, Params};
///
/// let params = Params::new().with("a", vec![1, 2]).with("skip", None::<&str>);
/// assert_eq!(
///     build_url("http://a.com#top", Some(&params))?,
///     "http://a.com?a[]=1&a[]=2"
/// );
/// # Ok::<(), plainreq::Error>(())
/// ```
pub fn build_url(url: &str, params: Option<&Params>) -> Result<String> {
    let Some(params) = params else {
        return Ok(url.to_string());
    };

    let mut parts = Vec::new();

    for (key, value) in params.iter() {
        match value {
            ParamValue::Null => continue,
            ParamValue::Array(items) => {
                let key = encode(&format!("{}[]", key));
                for item in items {
                    parts.push(format!("{}={}", key, encode(&serialize_value(item)?)));
                }
            }
            value => parts.push(format!("{}={}", encode(key), encode(&serialize_value(value)?))),
        }
    }

    let serialized = parts.join("&");
    if serialized.is_empty() {
        return Ok(url.to_string());
    }

    let base = match url.find('#') {
        Some(index) => &url[..index],
        None => url,
    };
    let separator = if base.contains('?') { '&' } else { '?' };

    Ok(format!("{}{}{}", base, separator, serialized))
}

/// Renders a single value in its unencoded query form.
fn serialize_value(value: &ParamValue) -> Result<String> {
    Ok(match value {
        // only reachable for array elements
        ParamValue::Null => "null".to_string(),
        ParamValue::Bool(b) => b.to_string(),
        ParamValue::Number(n) => number_to_string(n),
        ParamValue::String(s) => s.clone(),
        ParamValue::Date(date) => iso_8601(date),
        ParamValue::Array(_) => serde_json::to_string(&value.to_json())?,
        ParamValue::Object(map) => serde_json::to_string(map)?,
    })
}

fn number_to_string(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        // f64's Display drops a trailing ".0"
        n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_no_params_returns_url_unchanged() {
        assert_eq!(build_url("http://a.com#x", None).unwrap(), "http://a.com#x");
        assert_eq!(
            build_url("http://a.com#x", Some(&Params::new())).unwrap(),
            "http://a.com#x"
        );
    }

    #[test]
    fn test_all_null_params_return_url_unchanged() {
        let params = Params::new().with("a", ParamValue::Null).with("b", None::<i32>);
        assert_eq!(build_url("http://a.com#x", Some(&params)).unwrap(), "http://a.com#x");
    }

    #[test]
    fn test_null_values_are_skipped() {
        let params = Params::new()
            .with("a", 1)
            .with("b", ParamValue::Null)
            .with("c", "x");
        assert_eq!(
            build_url("http://a.com", Some(&params)).unwrap(),
            "http://a.com?a=1&c=x"
        );
    }

    #[test]
    fn test_array_values() {
        let params = Params::new().with("a", vec![1, 2]);
        assert_eq!(
            build_url("http://a.com", Some(&params)).unwrap(),
            "http://a.com?a[]=1&a[]=2"
        );
    }

    #[test]
    fn test_empty_array_emits_nothing() {
        let params = Params::new().with("a", Vec::<i32>::new()).with("b", 1);
        assert_eq!(build_url("http://a.com", Some(&params)).unwrap(), "http://a.com?b=1");
    }

    #[test]
    fn test_null_inside_array_is_written_as_text() {
        let params = Params::new().with("a", vec![Some(1), None]);
        assert_eq!(
            build_url("http://a.com", Some(&params)).unwrap(),
            "http://a.com?a[]=1&a[]=null"
        );
    }

    #[test]
    fn test_fragment_is_dropped() {
        let params = Params::new().with("a", 1);
        assert_eq!(
            build_url("http://a.com#frag", Some(&params)).unwrap(),
            "http://a.com?a=1"
        );
    }

    #[test]
    fn test_existing_query_is_extended() {
        let params = Params::new().with("a", 1);
        assert_eq!(
            build_url("http://a.com?x=1", Some(&params)).unwrap(),
            "http://a.com?x=1&a=1"
        );
        assert_eq!(
            build_url("http://a.com?x=1#frag", Some(&params)).unwrap(),
            "http://a.com?x=1&a=1"
        );
    }

    #[test]
    fn test_date_value() {
        let date = Utc.with_ymd_and_hms(2019, 4, 1, 5, 55, 39).unwrap();
        let params = Params::new().with("date", date);
        assert_eq!(
            build_url("/base", Some(&params)).unwrap(),
            "/base?date=2019-04-01T05:55:39.000Z"
        );
    }

    #[test]
    fn test_object_value_is_json() {
        let params = Params::new().with("foo", json!({"bar": "baz"}));
        assert_eq!(
            build_url("/base", Some(&params)).unwrap(),
            "/base?foo=%7B%22bar%22:%22baz%22%7D"
        );
    }

    #[test]
    fn test_nested_array_element_is_json() {
        let params = Params::new().with("m", json!([[1, 2]]));
        assert_eq!(build_url("/base", Some(&params)).unwrap(), "/base?m[]=[1,2]");
    }

    #[test]
    fn test_special_characters() {
        let params = Params::new().with("foo", "@:$, []");
        assert_eq!(build_url("/base", Some(&params)).unwrap(), "/base?foo=@:$,+[]");
    }

    #[test]
    fn test_empty_string_value_is_kept() {
        let params = Params::new().with("a", "").with("b", "  ");
        assert_eq!(build_url("/base", Some(&params)).unwrap(), "/base?a=&b=++");
    }

    #[test]
    fn test_numbers_and_booleans() {
        let params = Params::new()
            .with("n", -3)
            .with("f", 1.5)
            .with("whole", 2.0)
            .with("ok", true);
        assert_eq!(
            build_url("/base", Some(&params)).unwrap(),
            "/base?n=-3&f=1.5&whole=2&ok=true"
        );
    }

    #[test]
    fn test_encode_matches_uri_component_rules() {
        assert_eq!(encode("!'()*-._~"), "!'()*-._~");
        assert_eq!(encode("a/b?c=d#e"), "a%2Fb%3Fc%3Dd%23e");
        assert_eq!(encode("é"), "%C3%A9");
        assert_eq!(encode("a+b"), "a%2Bb");
    }
}
