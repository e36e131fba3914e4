//! Core types for the waypoint HTTP convenience layer.
//!
//! This crate turns endpoint descriptions into concrete requests:
//! - [`Parameters`] - key-value request data, always walked in key order
//! - [`encode_query`] and [`escape_query_component`] - query string encoding
//! - [`ParameterEncoding`], [`UrlParameterEncoder`], [`JsonParameterEncoder`] -
//!   parameter encoders working on a [`RequestDraft`]
//! - [`MultipartForm`] - `multipart/form-data` bodies, indexed or flat
//! - [`UploadProgress`] and [`ProgressHandler`] - upload progress reports
//! - [`Endpoint`] and [`Task`] - endpoint descriptors consumed by a router
//! - [`HttpClient`] - the transport seam
//! - [`Error`] and [`Result`] - error handling

mod client;
pub mod encoding;
mod endpoint;
mod error;
mod method;
mod multipart;
mod parameters;
pub mod prelude;
mod progress;
mod query;
mod request;
mod response;

pub use client::HttpClient;
pub use encoding::{
    Destination, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE, JsonParameterEncoder, ParameterEncoder,
    ParameterEncoding, UrlParameterEncoder,
};
pub use endpoint::{AnyEndpoint, Endpoint, Task, Upload, UploadLayout};
pub use error::{Error, Result};
pub use method::Method;
pub use multipart::{Boundary, FilePart, MimeType, MultipartForm, Part};
pub use parameters::Parameters;
pub use progress::{ProgressHandler, UploadProgress};
pub use query::{encode_query, escape_query_component};
pub use request::{CONTENT_TYPE, Headers, Request, RequestDraft};
pub use response::{Response, from_json};
