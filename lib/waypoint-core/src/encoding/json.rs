//! JSON body encoding.

use super::{FORM_CONTENT_TYPE, JSON_CONTENT_TYPE, ParameterEncoder};
use crate::{Parameters, RequestDraft, Result, encode_query};

/// Encodes parameters as a JSON document body.
///
/// When the draft already declares `application/x-www-form-urlencoded`, the
/// parameters are written as a form body instead.
///
/// # Example
///
/// ```
/// use waypoint_core::{JsonParameterEncoder, Method, ParameterEncoder, Parameters, RequestDraft};
///
/// let mut draft = RequestDraft::new(Method::Post, None);
/// let params = Parameters::new().with("name", "Alice");
///
/// JsonParameterEncoder.encode(&mut draft, &params).expect("encode");
/// assert_eq!(draft.body().map(|b| &b[..]), Some(&br#"{"name":"Alice"}"#[..]));
/// assert_eq!(draft.content_type(), Some("application/json"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonParameterEncoder;

impl ParameterEncoder for JsonParameterEncoder {
    fn encode(&self, draft: &mut RequestDraft, parameters: &Parameters) -> Result<()> {
        if parameters.is_empty() {
            return Ok(());
        }

        if draft
            .content_type()
            .is_some_and(|content_type| content_type.starts_with(FORM_CONTENT_TYPE))
        {
            draft.set_body(encode_query(parameters));
            return Ok(());
        }

        let body = serde_json::to_vec(parameters)?;
        draft.set_body(body);
        draft.set_content_type_if_absent(JSON_CONTENT_TYPE);
        Ok(())
    }
}
