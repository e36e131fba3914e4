//! Prelude module for convenient imports.
//!
//! ```ignore
//! use waypoint::prelude::*;
//! ```

pub use crate::{
    Endpoint, Error, FilePart, HttpClient, HyperClient, Method, MimeType, ParameterEncoding,
    Parameters, Response, Result, Router, RouterConfig, Task, Upload, UploadProgress,
};
