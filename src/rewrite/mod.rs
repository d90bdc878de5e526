//! Response rewriting subsystem.
//!
//! # Data Flow
//! ```text
//! Downstream response (mobile request, HTML path)
//!     → capture.rs (drain body into memory)
//!     → inject.rs (splice script.rs payload at the last </body>)
//!     → fix Content-Length, emit in one piece
//! ```
//!
//! # Design Decisions
//! - Whole body is buffered: the length header must match the rewritten bytes
//! - Nothing is emitted if the downstream body fails mid-stream
//! - Status and other headers are passed through untouched

pub mod capture;
pub mod inject;
pub mod script;

pub use capture::{capture_body, CaptureBuffer};
pub use inject::{find_body_close, inject_touch_points, Injected, Placement};
pub use script::TOUCH_POINTS_SCRIPT;

use axum::{
    body::{Body, Bytes, HttpBody},
    http::{header::CONTENT_LENGTH, HeaderValue, Response},
};
use tower::BoxError;

use crate::observability::metrics;

/// Paths that look like HTML pages.
pub fn is_html_path(path: &str) -> bool {
    path.ends_with(".html") || path.ends_with('/')
}

/// Capture a downstream response and inject the touch-point script into it.
pub async fn rewrite_response<B>(response: Response<B>) -> Result<Response<Body>, BoxError>
where
    B: HttpBody<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    let (mut parts, body) = response.into_parts();

    let captured = match capture_body(body).await {
        Ok(captured) => captured,
        Err(e) => {
            tracing::warn!(error = %e, "Response body failed during capture, discarding");
            metrics::record_capture_failure();
            return Err(e);
        }
    };

    let injected = inject_touch_points(captured.as_bytes());

    tracing::debug!(
        captured_bytes = captured.len(),
        chunks = captured.chunks(),
        rewritten_bytes = injected.body.len(),
        placement = injected.placement.label(),
        "Injected touch-point script"
    );
    metrics::record_injection(injected.placement, injected.body.len());

    parts
        .headers
        .insert(CONTENT_LENGTH, HeaderValue::from(injected.body.len()));

    Ok(Response::from_parts(parts, Body::from(injected.body)))
}
