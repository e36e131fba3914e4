//! HTTP request drafting.
//!
//! A [`RequestDraft`] is the mutable, in-progress request that encoders work
//! on. Once complete it is turned into a [`Request`] with
//! [`RequestDraft::finish`].
//!
//! # Example
//!
//! ```
//! use waypoint_core::{Method, RequestDraft};
//!
//! let url = "https://api.example.com/users".parse().ok();
//! let request = RequestDraft::new(Method::Get, url)
//!     .header("Accept", "application/json")
//!     .finish()
//!     .expect("has a URL");
//! assert_eq!(request.header("Accept"), Some("application/json"));
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use url::Url;

use crate::{Error, Method, ProgressHandler, Result};

/// Header name used by the encoders.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Request headers. Names are case-sensitive at this layer.
pub type Headers = HashMap<String, String>;

/// An outgoing request while it is being built.
#[derive(Debug, Clone)]
pub struct RequestDraft {
    method: Method,
    url: Option<Url>,
    headers: Headers,
    body: Option<Bytes>,
    progress: Option<ProgressHandler>,
}

impl RequestDraft {
    /// Creates a draft with no headers and no body.
    #[must_use]
    pub fn new(method: Method, url: Option<Url>) -> Self {
        Self {
            method,
            url,
            headers: Headers::new(),
            body: None,
            progress: None,
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Target URL, if any.
    #[must_use]
    pub const fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Mutable access to the target URL.
    pub fn url_mut(&mut self) -> Option<&mut Url> {
        self.url.as_mut()
    }

    /// Replaces the target URL.
    pub fn set_url(&mut self, url: Url) {
        self.url = Some(url);
    }

    /// Request headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Single header value by exact name.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Sets a header, replacing a previous value with the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Sets each header in turn.
    pub fn merge_headers<'a>(&mut self, headers: impl IntoIterator<Item = (&'a String, &'a String)>) {
        for (name, value) in headers {
            self.set_header(name.clone(), value.clone());
        }
    }

    /// Current `Content-Type`.
    ///
    /// Any spelling of the name counts, since the HTTP client folds them
    /// into one header. The exact `Content-Type` spelling is preferred.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header_value(CONTENT_TYPE).or_else(|| {
            self.headers
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE))
                .map(|(_, value)| value.as_str())
        })
    }

    /// Sets `Content-Type` unless one is already present in any spelling.
    pub fn set_content_type_if_absent(&mut self, value: &str) {
        if self.content_type().is_none() {
            self.set_header(CONTENT_TYPE, value);
        }
    }

    /// Sets `Content-Type`, dropping it first in every other spelling.
    pub fn set_content_type(&mut self, value: impl Into<String>) {
        self.headers
            .retain(|name, _| !name.eq_ignore_ascii_case(CONTENT_TYPE));
        self.set_header(CONTENT_TYPE, value);
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Replaces the body.
    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = Some(body.into());
    }

    /// Upload progress callback.
    #[must_use]
    pub const fn progress(&self) -> Option<&ProgressHandler> {
        self.progress.as_ref()
    }

    /// Reports body upload progress to `handler`.
    pub fn set_progress(&mut self, handler: ProgressHandler) {
        self.progress = Some(handler);
    }

    /// Turns the draft into a sendable request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingUrl`] if no URL was set.
    pub fn finish(self) -> Result<Request> {
        let url = self.url.ok_or(Error::MissingUrl)?;
        Ok(Request {
            method: self.method,
            url,
            headers: self.headers,
            body: self.body,
            progress: self.progress,
        })
    }
}

/// A fully built HTTP request, ready for an [`HttpClient`](crate::HttpClient).
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: Headers,
    body: Option<Bytes>,
    progress: Option<ProgressHandler>,
}

impl Request {
    /// Creates a request from its parts.
    #[must_use]
    pub fn new(method: Method, url: Url, headers: Headers, body: Option<Bytes>) -> Self {
        Self {
            method,
            url,
            headers,
            body,
            progress: None,
        }
    }

    /// Reports body upload progress to `handler`.
    #[must_use]
    pub fn with_progress(mut self, handler: ProgressHandler) -> Self {
        self.progress = Some(handler);
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Upload progress callback.
    #[must_use]
    pub const fn progress(&self) -> Option<&ProgressHandler> {
        self.progress.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, Url, Headers, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}
