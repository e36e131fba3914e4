//! Request/response logging.
//!
//! Two flavours share this module:
//! - payload traces: [`format_request`] and [`format_response`] render a
//!   human-readable block, [`log_request`] and [`log_response`] emit it at
//!   DEBUG on the `waypoint::outgoing` and `waypoint::incoming` targets
//! - [`LoggingLayer`], a tower layer for [`HyperClient`](crate::HyperClient)
//!   that logs a one-line summary per call, or the payload traces

use std::fmt::Write as _;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Error, Request, Response, Result};

const OUTGOING_BANNER: &str =
    "================================  OUTGOING  =================================";
const INCOMING_BANNER: &str =
    "================================  INCOMING  =================================";
const FINISHED_BANNER: &str =
    "================================  FINISHED  =================================";

/// Tracing target for outgoing request traces.
pub const OUTGOING_TARGET: &str = "waypoint::outgoing";

/// Tracing target for incoming response traces.
pub const INCOMING_TARGET: &str = "waypoint::incoming";

/// Render a request as an OUTGOING trace block.
///
/// Headers are listed by name. The body is included when it is valid,
/// non-empty UTF-8.
#[must_use]
pub fn format_request(request: &Request) -> String {
    let url = request.url();
    let mut out = String::new();

    let _ = writeln!(out, "{OUTGOING_BANNER}");
    let _ = writeln!(out, "{url}");
    let _ = writeln!(out);
    let _ = writeln!(out, "HOST: {}", url.host_str().unwrap_or_default());
    let _ = writeln!(out, "Method: {}", request.method());
    let _ = writeln!(out, "Path: {}?{}", url.path(), url.query().unwrap_or_default());
    let _ = writeln!(out);

    let mut headers: Vec<_> = request.headers().iter().collect();
    headers.sort();
    for (name, value) in headers {
        let _ = writeln!(out, "{name}: {value}");
    }

    if let Some(body) = request.body().and_then(|body| std::str::from_utf8(body).ok())
        && !body.is_empty()
    {
        let _ = writeln!(out, "Request body:");
        let _ = writeln!(out, "{body}");
    }

    out.push_str(FINISHED_BANNER);
    out
}

/// Render a response as an INCOMING trace block.
///
/// JSON bodies are pretty-printed, other bodies are shown as lossy UTF-8.
#[must_use]
pub fn format_response(response: &Response) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{INCOMING_BANNER}");
    let _ = writeln!(out, "Status Code: {}", response.status());

    let mut headers: Vec<_> = response.headers().iter().collect();
    headers.sort();
    for (name, value) in headers {
        let _ = writeln!(out, "{name}: {value}");
    }

    let body = response.body();
    if !body.is_empty() {
        let _ = writeln!(out);
        match serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|json| serde_json::to_string_pretty(&json).ok())
        {
            Some(pretty) => {
                let _ = writeln!(out, "{pretty}");
            }
            None => {
                let _ = writeln!(out, "{}", String::from_utf8_lossy(body));
            }
        }
    }

    out.push_str(FINISHED_BANNER);
    out
}

/// Emit an OUTGOING trace for `request`.
pub fn log_request(request: &Request) {
    debug!(target: OUTGOING_TARGET, "\n{}", format_request(request));
}

/// Emit an INCOMING trace for `response`.
pub fn log_response(response: &Response) {
    debug!(target: INCOMING_TARGET, "\n{}", format_response(response));
}

/// What [`LoggingLayer`] records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Method, URL, status and elapsed time.
    #[default]
    Summary,
    /// Summary plus the full OUTGOING/INCOMING traces.
    Payloads,
}

/// Layer that adds request/response logging to a client.
///
/// # Example
///
/// ```ignore
/// use waypoint::{HyperClient, LoggingLayer};
///
/// let client = HyperClient::builder()
///     .layer(LoggingLayer::payloads())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    verbosity: Verbosity,
}

impl LoggingLayer {
    /// Summary logging.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Summary logging plus payload traces.
    #[must_use]
    pub const fn payloads() -> Self {
        Self {
            verbosity: Verbosity::Payloads,
        }
    }

    /// Configured verbosity.
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            verbosity: self.verbosity,
        }
    }
}

/// Service that logs requests and responses.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    verbosity: Verbosity,
}

impl<S> Service<Request> for Logging<S>
where
    S: Service<Request, Response = Response, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let method = request.method();
        let url = request.url().to_string();
        let verbosity = self.verbosity;

        let span = span!(Level::INFO, "http_request", %method, %url);

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();
                info!("sending request");
                if verbosity == Verbosity::Payloads {
                    log_request(&request);
                }

                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) => {
                        let status = response.status();
                        if response.is_success() {
                            info!(status, elapsed_ms, "request completed");
                        } else {
                            warn!(status, elapsed_ms, "request completed with HTTP error");
                        }
                        if verbosity == Verbosity::Payloads {
                            log_response(response);
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, elapsed_ms, "request failed");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}
