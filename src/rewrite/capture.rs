//! In-memory capture of a downstream response body.
//!
//! The body is drained frame by frame, in order, before any byte reaches the
//! client. Trailers are dropped.

use axum::body::{Body, Bytes, HttpBody};
use futures_util::StreamExt;
use tower::BoxError;

/// Accumulates body chunks exactly as written.
#[derive(Debug, Default)]
pub struct CaptureBuffer {
    buf: Vec<u8>,
    chunks: usize,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chunk.
    pub fn write(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
        self.chunks += 1;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Number of `write` calls so far.
    pub fn chunks(&self) -> usize {
        self.chunks
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Drain `body` into a fresh [`CaptureBuffer`].
///
/// A stream error aborts the capture and the partial buffer is dropped.
pub async fn capture_body<B>(body: B) -> Result<CaptureBuffer, BoxError>
where
    B: HttpBody<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    let mut buffer = CaptureBuffer::new();
    let mut stream = Body::new(body).into_data_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(axum::Error::into_inner)?;
        buffer.write(&chunk);
    }

    Ok(buffer)
}
