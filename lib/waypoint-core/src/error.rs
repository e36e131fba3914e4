//! Error types for waypoint.

use derive_more::{Display, Error, From};

/// Main error type for waypoint operations.
///
/// Encoding errors come from building a request; transport errors are passed
/// through from the [`HttpClient`](crate::HttpClient) unchanged.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The draft has no URL to carry query parameters.
    #[display("URL is missing")]
    #[from(skip)]
    MissingUrl,

    /// Parameters could not be serialized to JSON.
    #[display("parameter encoding failed: {_0}")]
    #[from]
    EncodingFailed(serde_json::Error),

    /// Base URL and path did not form a valid URL.
    #[display("invalid URL: {_0}")]
    #[from]
    BadUrl(url::ParseError),

    /// A successful response carried no bytes when a payload was expected.
    #[display("empty response body")]
    #[from(skip)]
    EmptyResponseBody,

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The HTTP client rejected the request.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the error was raised by the HTTP client rather than
    /// while building or decoding.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Tls(_) | Self::Timeout | Self::InvalidRequest(_)
        )
    }

    /// Returns `true` if the error was raised while building the request.
    #[must_use]
    pub const fn is_encoding(&self) -> bool {
        matches!(
            self,
            Self::MissingUrl | Self::EncodingFailed(_) | Self::BadUrl(_)
        )
    }
}
