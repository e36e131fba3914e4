//! URL-encoded parameters: query string or form body.

use url::Url;

use super::{FORM_CONTENT_TYPE, ParameterEncoder};
use crate::{Error, Method, Parameters, RequestDraft, Result, encode_query};

/// Where [`UrlParameterEncoder`] writes the encoded parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Destination {
    /// Query string for GET/DELETE/HEAD, form body for other methods.
    #[default]
    MethodDependent,
    /// Always the query string.
    QueryString,
    /// Always a form body.
    FormBody,
}

impl Destination {
    const fn uses_query(self, method: Method) -> bool {
        match self {
            Self::MethodDependent => method.encodes_parameters_in_url(),
            Self::QueryString => true,
            Self::FormBody => false,
        }
    }
}

/// Encodes parameters as `application/x-www-form-urlencoded` pairs.
///
/// # Example
///
/// ```
/// use waypoint_core::{Method, ParameterEncoder, Parameters, RequestDraft, UrlParameterEncoder};
///
/// let mut draft = RequestDraft::new(Method::Get, "https://example.com/list?sort=asc".parse().ok());
/// let params = Parameters::new().with("page", 2);
///
/// UrlParameterEncoder::default().encode(&mut draft, &params).expect("encode");
/// assert_eq!(draft.url().and_then(|url| url.query()), Some("sort=asc&page=2"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UrlParameterEncoder {
    destination: Destination,
}

impl UrlParameterEncoder {
    /// Creates an encoder writing to `destination`.
    #[must_use]
    pub const fn new(destination: Destination) -> Self {
        Self { destination }
    }

    /// The configured destination.
    #[must_use]
    pub const fn destination(&self) -> Destination {
        self.destination
    }
}

impl ParameterEncoder for UrlParameterEncoder {
    fn encode(&self, draft: &mut RequestDraft, parameters: &Parameters) -> Result<()> {
        if self.destination.uses_query(draft.method()) {
            let url = draft.url_mut().ok_or(Error::MissingUrl)?;
            if !parameters.is_empty() {
                append_query(url, &encode_query(parameters));
            }
            return Ok(());
        }

        if !parameters.is_empty() {
            draft.set_content_type_if_absent(&format!("{FORM_CONTENT_TYPE}; charset=utf-8"));
            draft.set_body(encode_query(parameters));
        }
        Ok(())
    }
}

/// Append an already-escaped piece to the query, keeping the existing
/// query exactly as it is.
fn append_query(url: &mut Url, encoded: &str) {
    let query = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{existing}&{encoded}"),
        _ => encoded.to_string(),
    };
    url.set_query(Some(&query));
}
