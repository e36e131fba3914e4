//! Upload progress reporting.

use std::fmt;
use std::sync::Arc;

/// Progress of a request body on its way to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    /// Bytes handed to the connection since the previous report.
    pub bytes_sent: u64,
    /// Bytes handed to the connection so far.
    pub total_bytes_sent: u64,
    /// Size of the whole body.
    pub total_bytes_expected: u64,
}

/// Callback receiving [`UploadProgress`] reports.
///
/// Reports arrive on the task driving the request, once per body chunk.
///
/// # Example
///
/// ```
/// use waypoint_core::{ProgressHandler, UploadProgress};
///
/// let handler = ProgressHandler::new(|progress: UploadProgress| {
///     let _percent = progress.total_bytes_sent * 100 / progress.total_bytes_expected.max(1);
/// });
/// handler.report(UploadProgress {
///     bytes_sent: 10,
///     total_bytes_sent: 10,
///     total_bytes_expected: 20,
/// });
/// ```
#[derive(Clone)]
pub struct ProgressHandler(Arc<dyn Fn(UploadProgress) + Send + Sync>);

impl ProgressHandler {
    /// Wrap a callback.
    pub fn new(callback: impl Fn(UploadProgress) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    /// Deliver a report.
    pub fn report(&self, progress: UploadProgress) {
        (self.0)(progress);
    }
}

impl fmt::Debug for ProgressHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressHandler").finish_non_exhaustive()
    }
}

/// Two handlers are equal when they share the same callback.
impl PartialEq for ProgressHandler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
