//! Forwarding to the upstream origin.
//!
//! # Responsibilities
//! - Rewrite the request URI onto the configured origin (path and query kept)
//! - Let the client set `Host` for the origin
//! - Strip hop-by-hop headers from the origin's response
//!
//! # Design Decisions
//! - Errors are returned, not rendered; the server decides the status code
//! - Response bodies stream through unless a layer above buffers them

use std::task::{Context, Poll};
use std::time::Duration;

use axum::{
    body::Body,
    http::{
        header::{self, HeaderName},
        uri::{Authority, InvalidUri, PathAndQuery, Scheme},
        HeaderMap, Request, Response, Uri,
    },
};
use futures_util::future::BoxFuture;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use tower::Service;

/// Errors produced while forwarding a request.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Configured origin is not a usable absolute URI.
    #[error("invalid upstream origin: {0}")]
    InvalidOrigin(String),

    /// The target URI could not be assembled.
    #[error("invalid upstream URI: {0}")]
    InvalidUri(#[from] axum::http::Error),

    /// Connection or protocol failure talking to the origin.
    #[error("upstream request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),
}

impl From<InvalidUri> for UpstreamError {
    fn from(e: InvalidUri) -> Self {
        UpstreamError::InvalidOrigin(e.to_string())
    }
}

const HOP_BY_HOP: [HeaderName; 7] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
];

/// Forwards every request to a single HTTP origin.
#[derive(Clone, Debug)]
pub struct Upstream {
    client: Client<HttpConnector, Body>,
    scheme: Scheme,
    authority: Authority,
}

impl Upstream {
    /// Build a forwarder for `origin` (e.g. `http://127.0.0.1:3000`).
    pub fn new(origin: &str, connect_timeout: Duration) -> Result<Self, UpstreamError> {
        let uri: Uri = origin.parse()?;
        let (scheme, authority) = match (uri.scheme(), uri.authority()) {
            (Some(scheme), Some(authority)) => (scheme.clone(), authority.clone()),
            _ => return Err(UpstreamError::InvalidOrigin(origin.to_string())),
        };

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(connect_timeout));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            client,
            scheme,
            authority,
        })
    }

    /// Origin this forwarder targets.
    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    fn target_uri(&self, uri: &Uri) -> Result<Uri, UpstreamError> {
        let path_and_query = uri
            .path_and_query()
            .cloned()
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()?)
    }
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
}

impl Service<Request<Body>> for Upstream {
    type Response = Response<Body>;
    type Error = UpstreamError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let target = self.target_uri(request.uri());
        let client = self.client.clone();

        Box::pin(async move {
            let (mut parts, body) = request.into_parts();
            parts.uri = target?;
            parts.headers.remove(header::HOST);
            strip_hop_by_hop(&mut parts.headers);

            tracing::trace!(uri = %parts.uri, method = %parts.method, "Forwarding request");

            let response = client
                .request(Request::from_parts(parts, body))
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Upstream error");
                    UpstreamError::from(e)
                })?;

            let (mut parts, body) = response.into_parts();
            strip_hop_by_hop(&mut parts.headers);
            Ok(Response::from_parts(parts, Body::new(body)))
        })
    }
}
