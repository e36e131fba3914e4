//! Parameter encoding onto a [`RequestDraft`].
//!
//! - [`UrlParameterEncoder`] - query string or form body
//! - [`JsonParameterEncoder`] - JSON body
//! - [`ParameterEncoding`] - picks and orders the encoders for a task

mod json;
mod urlencoded;

pub use json::JsonParameterEncoder;
pub use urlencoded::{Destination, UrlParameterEncoder};

use crate::{Parameters, RequestDraft, Result};

/// `Content-Type` for JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// `Content-Type` prefix for form bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Writes a parameter mapping into a request draft.
///
/// Encoders are stateless: the same instance can be shared between
/// threads and used on any number of drafts.
pub trait ParameterEncoder {
    /// Encode `parameters` into `draft`.
    ///
    /// An empty mapping leaves the draft untouched.
    fn encode(&self, draft: &mut RequestDraft, parameters: &Parameters) -> Result<()>;
}

/// How a task's parameters are placed on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParameterEncoding {
    /// Query string for GET/DELETE/HEAD, form body otherwise.
    #[default]
    Url,
    /// JSON body.
    Json,
    /// Query string parameters, then a JSON body.
    UrlAndJson,
}

impl ParameterEncoding {
    /// Encode the task parameters into `draft`.
    ///
    /// A mapping required by the selected encoding that is `None` makes the
    /// whole call a no-op; `UrlAndJson` needs both.
    ///
    /// # Example
    ///
    /// ```
    /// use waypoint_core::{Method, ParameterEncoding, Parameters, RequestDraft};
    ///
    /// let mut draft = RequestDraft::new(Method::Get, "https://example.com/search".parse().ok());
    /// let query = Parameters::new().with("q", "rust");
    ///
    /// ParameterEncoding::Url.encode(&mut draft, None, Some(&query)).expect("encode");
    /// assert_eq!(draft.url().and_then(|url| url.query()), Some("q=rust"));
    /// ```
    pub fn encode(
        self,
        draft: &mut RequestDraft,
        body: Option<&Parameters>,
        query: Option<&Parameters>,
    ) -> Result<()> {
        match (self, body, query) {
            (Self::Url, _, Some(query)) => UrlParameterEncoder::default().encode(draft, query),
            (Self::Json, Some(body), _) => JsonParameterEncoder.encode(draft, body),
            (Self::UrlAndJson, Some(body), Some(query)) => {
                UrlParameterEncoder::new(Destination::QueryString).encode(draft, query)?;
                JsonParameterEncoder.encode(draft, body)
            }
            _ => Ok(()),
        }
    }
}
