//! Prelude module for convenient imports.
//!
//! ```ignore
//! use waypoint_core::prelude::*;
//! ```

pub use crate::{
    AnyEndpoint, Endpoint, Error, FilePart, HttpClient, Method, MimeType, MultipartForm,
    ParameterEncoding, Parameters, Request, Response, Result, Task, Upload, UploadProgress,
};
