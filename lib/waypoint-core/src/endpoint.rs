//! Endpoint descriptors.
//!
//! An API is usually described as an enum implementing [`Endpoint`], one
//! variant per call:
//!
//! ```
//! use std::borrow::Cow;
//!
//! use waypoint_core::{Endpoint, Method, Parameters, Task};
//!
//! enum UserApi {
//!     Search { name: String },
//!     Delete { id: u64 },
//! }
//!
//! impl Endpoint for UserApi {
//!     fn base_url(&self) -> Cow<'_, str> {
//!         "https://api.example.com".into()
//!     }
//!
//!     fn path(&self) -> Cow<'_, str> {
//!         match self {
//!             Self::Search { .. } => "users".into(),
//!             Self::Delete { id } => format!("users/{id}").into(),
//!         }
//!     }
//!
//!     fn method(&self) -> Method {
//!         match self {
//!             Self::Search { .. } => Method::Get,
//!             Self::Delete { .. } => Method::Delete,
//!         }
//!     }
//!
//!     fn task(&self) -> Task {
//!         match self {
//!             Self::Search { name } => Task::query(Parameters::new().with("name", name.as_str())),
//!             Self::Delete { .. } => Task::Plain,
//!         }
//!     }
//! }
//! ```

use std::borrow::Cow;

use crate::{
    FilePart, Headers, Method, MultipartForm, ParameterEncoding, Parameters, ProgressHandler,
    UploadProgress,
};

/// Describes one API call.
pub trait Endpoint {
    /// Base address, e.g. `https://api.example.com/v1`.
    fn base_url(&self) -> Cow<'_, str>;

    /// Path appended to the base address.
    fn path(&self) -> Cow<'_, str>;

    /// HTTP method.
    fn method(&self) -> Method;

    /// Parameters and body for this call.
    fn task(&self) -> Task;

    /// Headers for this call.
    fn headers(&self) -> Option<Headers> {
        None
    }

    /// Headers shared by every call of this API, applied first.
    fn default_headers(&self) -> Option<Headers> {
        None
    }
}

/// What a call sends besides its URL and method.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Task {
    /// No parameters; `Content-Type: application/json` is set.
    #[default]
    Plain,
    /// Body and/or query parameters.
    Parameters {
        /// Body parameters.
        body: Option<Parameters>,
        /// How the parameters are encoded.
        encoding: ParameterEncoding,
        /// URL parameters.
        query: Option<Parameters>,
    },
    /// Body and/or query parameters plus extra headers.
    ParametersAndHeaders {
        /// Body parameters.
        body: Option<Parameters>,
        /// How the parameters are encoded.
        encoding: ParameterEncoding,
        /// URL parameters.
        query: Option<Parameters>,
        /// Headers applied after the endpoint headers.
        headers: Option<Headers>,
    },
    /// A `multipart/form-data` upload.
    Upload(Upload),
}

impl Task {
    /// URL-encoded parameters (query string for GET/DELETE).
    #[must_use]
    pub fn query(parameters: Parameters) -> Self {
        Self::Parameters {
            body: None,
            encoding: ParameterEncoding::Url,
            query: Some(parameters),
        }
    }

    /// JSON body.
    #[must_use]
    pub fn json(body: Parameters) -> Self {
        Self::Parameters {
            body: Some(body),
            encoding: ParameterEncoding::Json,
            query: None,
        }
    }

    /// Query string parameters and a JSON body.
    #[must_use]
    pub fn query_and_json(query: Parameters, body: Parameters) -> Self {
        Self::Parameters {
            body: Some(body),
            encoding: ParameterEncoding::UrlAndJson,
            query: Some(query),
        }
    }
}

/// Layout of a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadLayout {
    /// Indexed field names, any number of files.
    Indexed {
        /// One mapping per target.
        params: Vec<Parameters>,
        /// Files, grouped by field name when encoded.
        files: Vec<FilePart>,
    },
    /// Bare field names, exactly one file.
    Flat {
        /// Scalar fields.
        params: Parameters,
        /// The file.
        file: FilePart,
    },
}

/// A multipart upload: boundary plus layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    boundary: String,
    layout: UploadLayout,
    progress: Option<ProgressHandler>,
}

impl Upload {
    /// Upload several files with indexed field names.
    #[must_use]
    pub fn indexed(
        boundary: impl Into<String>,
        params: Vec<Parameters>,
        files: Vec<FilePart>,
    ) -> Self {
        Self {
            boundary: boundary.into(),
            layout: UploadLayout::Indexed { params, files },
            progress: None,
        }
    }

    /// Upload one file with bare field names.
    #[must_use]
    pub fn flat(boundary: impl Into<String>, params: Parameters, file: FilePart) -> Self {
        Self {
            boundary: boundary.into(),
            layout: UploadLayout::Flat { params, file },
            progress: None,
        }
    }

    /// Report progress while the body is sent.
    #[must_use]
    pub fn on_progress(mut self, callback: impl Fn(UploadProgress) + Send + Sync + 'static) -> Self {
        self.progress = Some(ProgressHandler::new(callback));
        self
    }

    /// Progress callback, if any.
    #[must_use]
    pub const fn progress(&self) -> Option<&ProgressHandler> {
        self.progress.as_ref()
    }

    /// Boundary token.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Layout.
    #[must_use]
    pub const fn layout(&self) -> &UploadLayout {
        &self.layout
    }

    /// Build the multipart form.
    #[must_use]
    pub fn into_form(self) -> MultipartForm {
        match self.layout {
            UploadLayout::Indexed { params, files } => {
                MultipartForm::indexed(self.boundary, &params, &files)
            }
            UploadLayout::Flat { params, file } => {
                MultipartForm::flat(self.boundary, &params, file)
            }
        }
    }
}

/// A type-erased endpoint, for routers shared between several APIs.
pub struct AnyEndpoint(Box<dyn Endpoint + Send + Sync>);

impl AnyEndpoint {
    /// Wrap an endpoint.
    pub fn new(endpoint: impl Endpoint + Send + Sync + 'static) -> Self {
        Self(Box::new(endpoint))
    }
}

impl std::fmt::Debug for AnyEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyEndpoint")
            .field("method", &self.0.method())
            .field("path", &self.0.path())
            .finish_non_exhaustive()
    }
}

impl Endpoint for AnyEndpoint {
    fn base_url(&self) -> Cow<'_, str> {
        self.0.base_url()
    }

    fn path(&self) -> Cow<'_, str> {
        self.0.path()
    }

    fn method(&self) -> Method {
        self.0.method()
    }

    fn task(&self) -> Task {
        self.0.task()
    }

    fn headers(&self) -> Option<Headers> {
        self.0.headers()
    }

    fn default_headers(&self) -> Option<Headers> {
        self.0.default_headers()
    }
}
