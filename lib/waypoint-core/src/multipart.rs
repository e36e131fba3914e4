//! Multipart form data for file uploads.
//!
//! Two layouts are supported:
//!
//! - [`MultipartForm::indexed`] for several targets at once: scalar fields
//!   become `name[<paramIndex>]` and files `field[<indexWithinGroup>]`.
//! - [`MultipartForm::flat`] for one file: bare field names, file last.
//!
//! # Example
//!
//! ```
//! use waypoint_core::{FilePart, MimeType, MultipartForm, Parameters};
//!
//! let fields = Parameters::new().with("caption", "holiday");
//! let photo = FilePart::new(vec![0xFF, 0xD8], "photo", "beach", "jpg", MimeType::Jpeg);
//!
//! let (content_type, body) = MultipartForm::flat("XyZ", &fields, photo).into_body();
//! assert_eq!(content_type, "multipart/form-data; boundary=XyZ");
//! assert!(body.ends_with(b"--XyZ--\r\n"));
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use crate::Parameters;
use crate::parameters::value_text;

/// Media type of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MimeType {
    /// `image/jpeg`
    Jpeg,
    /// `audio/aac`
    Aac,
    /// `video/mp4`
    Mp4,
    /// Any other media type.
    Other(String),
}

impl MimeType {
    /// Get the MIME type string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Aac => "audio/aac",
            Self::Mp4 => "video/mp4",
            Self::Other(mime) => mime,
        }
    }

    /// Guess the media type from a file extension.
    ///
    /// Unknown extensions map to `application/octet-stream`.
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        let mime = match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => return Self::Jpeg,
            "aac" => return Self::Aac,
            "mp4" => return Self::Mp4,
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "heic" => "image/heic",
            "pdf" => "application/pdf",
            "txt" => "text/plain",
            "json" => "application/json",
            "csv" => "text/csv",
            "zip" => "application/zip",
            "mp3" => "audio/mpeg",
            "wav" => "audio/wav",
            "m4a" => "audio/mp4",
            "mov" => "video/quicktime",
            "webm" => "video/webm",
            _ => "application/octet-stream",
        };
        Self::Other(mime.to_string())
    }
}

impl std::fmt::Display for MimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for MimeType {
    fn from(mime: &str) -> Self {
        match mime {
            "image/jpeg" => Self::Jpeg,
            "audio/aac" => Self::Aac,
            "video/mp4" => Self::Mp4,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    field_name: String,
    file_name: String,
    mime_type: MimeType,
    data: Bytes,
}

impl FilePart {
    /// Create a file part named `<name>.<extension>`.
    #[must_use]
    pub fn new(
        data: impl Into<Bytes>,
        field_name: impl Into<String>,
        name: &str,
        extension: &str,
        mime_type: impl Into<MimeType>,
    ) -> Self {
        Self::with_file_name(data, field_name, format!("{name}.{extension}"), mime_type)
    }

    /// Create a file part with a complete file name.
    #[must_use]
    pub fn with_file_name(
        data: impl Into<Bytes>,
        field_name: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<MimeType>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Form field the file is attached to.
    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// File name sent in the disposition.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Media type.
    #[must_use]
    pub const fn mime_type(&self) -> &MimeType {
        &self.mime_type
    }

    /// File content.
    #[must_use]
    pub const fn data(&self) -> &Bytes {
        &self.data
    }
}

/// A single part in a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// A scalar form field.
    Field {
        /// Disposition name.
        name: String,
        /// Field value.
        value: String,
    },
    /// A file, sent under `name`.
    File {
        /// Disposition name.
        name: String,
        /// The file.
        file: FilePart,
    },
}

impl Part {
    /// Create a scalar field.
    #[must_use]
    pub fn field(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Field {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a file part sent under its own field name.
    #[must_use]
    pub fn file(file: FilePart) -> Self {
        Self::File {
            name: file.field_name.clone(),
            file,
        }
    }

    /// Disposition name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Field { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Boundary token helpers.
#[derive(Debug, Clone, Copy)]
pub struct Boundary;

impl Boundary {
    /// Generate a fresh boundary token.
    #[must_use]
    pub fn generate() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);

        format!("Boundary-{timestamp:032x}")
    }
}

/// A multipart form: a boundary and parts in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<Part>,
}

impl MultipartForm {
    /// Create an empty form with the given boundary.
    ///
    /// The boundary is not validated; it must not occur inside any part.
    #[must_use]
    pub fn new(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    /// Form for uploading to several targets.
    ///
    /// Each scalar of `params[i]` is sent as `name[i]`. Files are grouped by
    /// field name, groups in order of first appearance, and the `n`-th file
    /// of a group is sent as `field[n]`.
    #[must_use]
    pub fn indexed(boundary: impl Into<String>, params: &[Parameters], files: &[FilePart]) -> Self {
        let mut form = Self::new(boundary);

        for (index, param) in params.iter().enumerate() {
            for (key, value) in param.iter() {
                form.push(Part::field(format!("{key}[{index}]"), value_text(value)));
            }
        }

        let mut groups: Vec<(&str, Vec<&FilePart>)> = Vec::new();
        for file in files {
            match groups.iter_mut().find(|(name, _)| *name == file.field_name()) {
                Some((_, group)) => group.push(file),
                None => groups.push((file.field_name(), vec![file])),
            }
        }

        for (field, group) in groups {
            for (index, file) in group.into_iter().enumerate() {
                form.push(Part::File {
                    name: format!("{field}[{index}]"),
                    file: file.clone(),
                });
            }
        }

        form
    }

    /// Form for uploading a single file with its scalar fields.
    #[must_use]
    pub fn flat(boundary: impl Into<String>, params: &Parameters, file: FilePart) -> Self {
        let mut form = Self::new(boundary);
        for (key, value) in params.iter() {
            form.push(Part::field(key, value_text(value)));
        }
        form.push(Part::file(file));
        form
    }

    /// Add a part to the form.
    #[must_use]
    pub fn part(mut self, part: Part) -> Self {
        self.push(part);
        self
    }

    /// Append a part.
    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// Get the boundary string.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Get the parts in this form.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Get the Content-Type header value for this form.
    ///
    /// Returns `multipart/form-data; boundary=<boundary>`.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Convert the form into a body.
    ///
    /// Returns a tuple of (content-type header value, body bytes).
    #[must_use]
    pub fn into_body(self) -> (String, Bytes) {
        let content_type = self.content_type();
        let body = self.encode();
        (content_type, body)
    }

    fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();

        for part in &self.parts {
            buf.put_slice(b"--");
            buf.put_slice(self.boundary.as_bytes());
            buf.put_slice(b"\r\n");

            buf.put_slice(b"Content-Disposition: form-data; name=\"");
            buf.put_slice(part.name().as_bytes());
            buf.put_slice(b"\"");

            match part {
                Part::Field { value, .. } => {
                    buf.put_slice(b"\r\n\r\n");
                    buf.put_slice(value.as_bytes());
                }
                Part::File { file, .. } => {
                    buf.put_slice(b"; filename=\"");
                    buf.put_slice(file.file_name.as_bytes());
                    buf.put_slice(b"\"\r\n");
                    buf.put_slice(b"Content-Type: ");
                    buf.put_slice(file.mime_type.as_str().as_bytes());
                    buf.put_slice(b"\r\n\r\n");
                    buf.put_slice(&file.data);
                }
            }
            buf.put_slice(b"\r\n");
        }

        buf.put_slice(b"--");
        buf.put_slice(self.boundary.as_bytes());
        buf.put_slice(b"--\r\n");

        buf.freeze()
    }
}
