//! Endpoint router.
//!
//! A [`Router`] turns an [`Endpoint`] into a [`Request`], sends it through
//! its [`HttpClient`] and hands the response back. It tracks the last task
//! started with [`Router::request`] so that it can be cancelled.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::de::DeserializeOwned;
use tokio::task::AbortHandle;
use tracing::debug;
use url::{ParseError, Url};
use waypoint_core::{Endpoint, HttpClient, JSON_CONTENT_TYPE, RequestDraft, Task};

use crate::{Request, Response, Result, RouterConfig, logging};

/// Sends endpoint calls through an HTTP client.
///
/// # Example
///
/// ```ignore
/// use waypoint::{HyperClient, Router};
///
/// let router = Router::new(HyperClient::new());
/// let user: User = router.fetch(&UserApi::Get { id: 42 }).await?;
/// ```
pub struct Router<C> {
    client: C,
    config: RouterConfig,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl<C> fmt::Debug for Router<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<C: HttpClient> Router<C> {
    /// Create a router with default configuration.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self::with_config(client, RouterConfig::default())
    }

    /// Create a router with custom configuration.
    #[must_use]
    pub fn with_config(client: C, config: RouterConfig) -> Self {
        Self {
            client,
            config,
            in_flight: Mutex::new(None),
        }
    }

    /// Underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Router configuration.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Build the request for an endpoint without sending it.
    ///
    /// Headers are applied in order: router defaults, endpoint defaults,
    /// endpoint headers, then the task's extra headers. A later value
    /// replaces an earlier one with the same name.
    ///
    /// # Errors
    ///
    /// - [`Error::BadUrl`](crate::Error::BadUrl) if base URL and path do not form a URL
    /// - [`Error::EncodingFailed`](crate::Error::EncodingFailed) if a JSON body cannot be serialized
    pub fn build_request<E: Endpoint + ?Sized>(&self, endpoint: &E) -> Result<Request> {
        let url = join_url(&endpoint.base_url(), &endpoint.path())?;
        let mut draft = RequestDraft::new(endpoint.method(), Some(url));

        draft.merge_headers(&self.config.default_headers);
        if let Some(headers) = endpoint.default_headers() {
            draft.merge_headers(&headers);
        }
        if let Some(headers) = endpoint.headers() {
            draft.merge_headers(&headers);
        }

        match endpoint.task() {
            Task::Plain => draft.set_content_type_if_absent(JSON_CONTENT_TYPE),
            Task::Parameters {
                body,
                encoding,
                query,
            } => encoding.encode(&mut draft, body.as_ref(), query.as_ref())?,
            Task::ParametersAndHeaders {
                body,
                encoding,
                query,
                headers,
            } => {
                if let Some(headers) = &headers {
                    draft.merge_headers(headers);
                }
                encoding.encode(&mut draft, body.as_ref(), query.as_ref())?;
            }
            Task::Upload(upload) => {
                if let Some(handler) = upload.progress() {
                    draft.set_progress(handler.clone());
                }
                let (content_type, body) = upload.into_form().into_body();
                draft.set_content_type(content_type);
                draft.set_body(body);
            }
        }

        draft.finish()
    }

    /// Build and send the request for an endpoint.
    ///
    /// Non-2xx responses are returned, not turned into errors.
    ///
    /// # Errors
    ///
    /// Returns build errors (see [`build_request`](Self::build_request)) and
    /// transport errors from the client.
    pub async fn execute<E: Endpoint + ?Sized>(&self, endpoint: &E) -> Result<Response> {
        let request = self.build_request(endpoint)?;
        send(&self.client, request, self.config.log_payloads).await
    }

    /// Send the request for an endpoint and decode the JSON payload.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute), plus
    /// [`Error::EmptyResponseBody`](crate::Error::EmptyResponseBody) for an empty body and
    /// [`Error::JsonDeserialization`](crate::Error::JsonDeserialization) when the payload does not match `T`.
    pub async fn fetch<T, E>(&self, endpoint: &E) -> Result<T>
    where
        T: DeserializeOwned,
        E: Endpoint + ?Sized,
    {
        self.execute(endpoint).await?.decode()
    }

    /// Send the request for an endpoint in the background.
    ///
    /// `completion` is called exactly once with the outcome, build errors
    /// included, unless the call is cancelled first. The spawned task
    /// becomes the one [`cancel`](Self::cancel) acts on; a previous task is
    /// left running.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn request<E, F>(&self, endpoint: &E, completion: F)
    where
        C: Clone + 'static,
        E: Endpoint + ?Sized,
        F: FnOnce(Result<Response>) + Send + 'static,
    {
        let built = self.build_request(endpoint);
        let client = self.client.clone();
        let log_payloads = self.config.log_payloads;

        let handle = tokio::spawn(async move {
            let result = match built {
                Ok(request) => send(&client, request, log_payloads).await,
                Err(err) => Err(err),
            };
            completion(result);
        });

        let previous = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle.abort_handle());
        if previous.is_some_and(|handle| !handle.is_finished()) {
            debug!("tracking a new request, previous one keeps running");
        }
    }

    /// Cancel the task started by the last [`request`](Self::request).
    ///
    /// Its completion is never called. Does nothing when no task is tracked
    /// or the task already finished.
    pub fn cancel(&self) {
        let handle = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = handle
            && !handle.is_finished()
        {
            handle.abort();
            debug!("cancelled in-flight request");
        }
    }
}

async fn send<C: HttpClient>(client: &C, request: Request, log_payloads: bool) -> Result<Response> {
    if log_payloads {
        logging::log_request(&request);
    }
    let response = client.execute(request).await?;
    if log_payloads {
        logging::log_response(&response);
    }
    Ok(response)
}

/// `path` appended to the path of `base`, one segment per `/`.
///
/// Query and fragment of `base` are kept. Segments are percent-encoded.
fn join_url(base: &str, path: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return Ok(url);
    }

    url.path_segments_mut()
        .map_err(|()| ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(path.split('/'));
    Ok(url)
}
