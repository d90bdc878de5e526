//! Device validator middleware.
//!
//! # Responsibilities
//! - Classify every request and annotate mobile ones (see `detect`)
//! - For mobile requests to HTML paths, capture the downstream response and
//!   inject the touch-point script (see `rewrite`)
//! - Pass everything else through untouched
//!
//! # Design Decisions
//! - Plain `tower` layer so it composes with any `http` service, not just axum
//! - The next service is called exactly once per request
//! - Errors from the next service or its body are returned, never rendered

use std::task::{Context, Poll};

use axum::{
    body::{Body, Bytes, HttpBody},
    http::{Request, Response},
};
use futures_util::future::BoxFuture;
use tower::{BoxError, Layer, Service};

use crate::detect::{classify, DeviceClass};
use crate::observability::metrics;
use crate::rewrite::{is_html_path, rewrite_response};

/// Applies [`DeviceValidator`] to a service.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceValidatorLayer;

impl DeviceValidatorLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for DeviceValidatorLayer {
    type Service = DeviceValidator<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DeviceValidator::new(inner)
    }
}

/// Mobile classification and touch-point script injection in front of `S`.
#[derive(Debug, Clone)]
pub struct DeviceValidator<S> {
    inner: S,
}

impl<S> DeviceValidator<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for DeviceValidator<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
    ResBody: HttpBody<Data = Bytes> + Send + 'static,
    ResBody::Error: Into<BoxError>,
{
    type Response = Response<Body>;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, mut request: Request<ReqBody>) -> Self::Future {
        let class = classify(request.headers_mut());
        metrics::record_classification(&class);

        let capture = class.is_mobile() && is_html_path(request.uri().path());

        if let DeviceClass::Mobile {
            touch_points,
            suspicious,
        } = class
        {
            tracing::debug!(
                path = %request.uri().path(),
                touch_points,
                suspicious,
                capture,
                "Mobile user agent"
            );
            if suspicious {
                tracing::debug!(path = %request.uri().path(), "Suspicious mobile user agent");
            }
        }

        // The ready service is the one that must be called.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let response = inner.call(request).await.map_err(|e| {
                let e: BoxError = e.into();
                if capture {
                    tracing::warn!(error = %e, "Downstream failed, nothing written");
                }
                e
            })?;

            if capture {
                rewrite_response(response).await
            } else {
                Ok(response.map(Body::new))
            }
        })
    }
}
