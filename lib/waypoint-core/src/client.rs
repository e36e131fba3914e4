//! HTTP client trait.
//!
//! [`HttpClient`] is the seam to whatever actually moves bytes over the
//! network. Implement it directly for custom transports or test doubles.

use std::future::Future;
use std::sync::Arc;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// Implementations own connection management, TLS and any retry policy; a
/// request handed to [`execute`](Self::execute) is sent as is.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be completed:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}

impl<C: HttpClient> HttpClient for Arc<C> {
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        self.as_ref().execute(request)
    }
}
