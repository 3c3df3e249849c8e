//! Query string parsing module
//!
//! Decodes the URL query string into a flat string map. Duplicate keys keep
//! the last value; percent-escapes and `+` are decoded.

use std::collections::HashMap;

/// Parse a raw query string (without the leading `?`) into a key/value map.
///
/// `None` or an empty string produce an empty map. Keys without `=` map to
/// an empty value.
pub fn parse_query(query: Option<&str>) -> HashMap<String, String> {
    match query {
        Some(q) if !q.is_empty() => url::form_urlencoded::parse(q.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        _ => HashMap::new(),
    }
}
