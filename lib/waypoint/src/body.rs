//! Request bodies handed to hyper.

use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body::{Body, Frame, SizeHint};
use http_body_util::{BodyExt, Full, combinators::BoxBody};
use waypoint_core::{ProgressHandler, UploadProgress};

/// Body type of the hyper client.
pub(crate) type RequestBody = BoxBody<Bytes, Infallible>;

/// Chunk size used when upload progress is reported.
pub(crate) const PROGRESS_CHUNK_SIZE: usize = 16 * 1024;

/// Body for an outgoing request, reporting progress when a handler is set.
pub(crate) fn request_body(body: Option<Bytes>, progress: Option<ProgressHandler>) -> RequestBody {
    match (body, progress) {
        (Some(data), Some(handler)) if !data.is_empty() => {
            ProgressBody::new(data, PROGRESS_CHUNK_SIZE, handler).boxed()
        }
        (body, _) => body.map_or_else(Full::default, Full::new).boxed(),
    }
}

/// Yields a buffer in fixed-size frames and reports each one as it is polled.
#[derive(Debug)]
pub(crate) struct ProgressBody {
    remaining: Bytes,
    chunk_size: usize,
    sent: u64,
    total: u64,
    handler: ProgressHandler,
}

impl ProgressBody {
    pub(crate) fn new(data: Bytes, chunk_size: usize, handler: ProgressHandler) -> Self {
        Self {
            total: byte_count(data.len()),
            remaining: data,
            chunk_size: chunk_size.max(1),
            sent: 0,
            handler,
        }
    }
}

impl Body for ProgressBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        if self.remaining.is_empty() {
            return Poll::Ready(None);
        }

        let size = self.chunk_size.min(self.remaining.len());
        let chunk = self.remaining.split_to(size);
        let bytes_sent = byte_count(size);
        self.sent += bytes_sent;

        self.handler.report(UploadProgress {
            bytes_sent,
            total_bytes_sent: self.sent,
            total_bytes_expected: self.total,
        });

        Poll::Ready(Some(Ok(Frame::data(chunk))))
    }

    fn is_end_stream(&self) -> bool {
        self.remaining.is_empty()
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::with_exact(byte_count(self.remaining.len()))
    }
}

fn byte_count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}
