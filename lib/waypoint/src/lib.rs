//! Endpoint router over an HTTP client.
//!
//! Describe an API as an [`Endpoint`], hand it to a [`Router`] and get a
//! [`Response`] or a decoded payload back. Parameters are encoded as a query
//! string, a form body, JSON, or a `multipart/form-data` upload.
//!
//! # Example
//!
//! ```ignore
//! use std::borrow::Cow;
//! use waypoint::prelude::*;
//!
//! enum Search {
//!     Repositories { q: String },
//! }
//!
//! impl Endpoint for Search {
//!     fn base_url(&self) -> Cow<'_, str> {
//!         "https://api.github.com".into()
//!     }
//!
//!     fn path(&self) -> Cow<'_, str> {
//!         "search/repositories".into()
//!     }
//!
//!     fn method(&self) -> Method {
//!         Method::Get
//!     }
//!
//!     fn task(&self) -> Task {
//!         match self {
//!             Self::Repositories { q } => Task::query(Parameters::new().with("q", q.as_str())),
//!         }
//!     }
//! }
//!
//! let router = Router::new(HyperClient::new());
//! let found: serde_json::Value = router.fetch(&Search::Repositories { q: "tower".into() }).await?;
//! ```

mod body;
mod client;
mod config;
mod connector;
pub mod logging;
pub mod prelude;
mod router;

pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder, RouterConfig, RouterConfigBuilder};
pub use logging::{LoggingLayer, Verbosity};
pub use router::Router;

// Re-export tower for layer composition
pub use tower;

pub use waypoint_core::{
    AnyEndpoint, Boundary, CONTENT_TYPE, Destination, Endpoint, Error, FilePart, Headers,
    HttpClient, JsonParameterEncoder, Method, MimeType, MultipartForm, ParameterEncoder,
    ParameterEncoding, Parameters, Part, ProgressHandler, Request, RequestDraft, Response, Result,
    Task, Upload, UploadLayout, UploadProgress, UrlParameterEncoder, encode_query,
    escape_query_component, from_json,
};
