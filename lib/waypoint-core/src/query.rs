//! Query string encoding.
//!
//! RFC 3986 reserves the general delimiters `: # [ ] @ ? /` and the
//! sub-delimiters `! $ & ' ( ) * + , ; =`. Section 3.4 allows `?` and `/`
//! inside a query, so they stay as they are while every other reserved
//! character is escaped.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::Parameters;
use crate::parameters::value_text;

/// Bytes escaped in query keys and values.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/')
    .remove(b'?');

/// Percent-encode a single key or value for use in a query string.
///
/// # Example
///
/// ```
/// use waypoint_core::escape_query_component;
///
/// assert_eq!(escape_query_component("a&b=c"), "a%26b%3Dc");
/// assert_eq!(escape_query_component("/path?x"), "/path?x");
/// ```
#[must_use]
pub fn escape_query_component(input: &str) -> String {
    utf8_percent_encode(input, QUERY_COMPONENT).to_string()
}

/// Encode parameters as `key=value` pairs joined by `&`, keys ascending.
///
/// An empty mapping yields an empty string.
///
/// # Example
///
/// ```
/// use waypoint_core::{Parameters, encode_query};
///
/// let params = Parameters::new().with("b", "2").with("a", 1);
/// assert_eq!(encode_query(&params), "a=1&b=2");
/// ```
#[must_use]
pub fn encode_query(parameters: &Parameters) -> String {
    parameters
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                escape_query_component(key),
                escape_query_component(&value_text(value))
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
