//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router around the upstream forwarder
//! - Put the device validator in front of the forwarder when enabled
//! - Wire up middleware (tracing, timeout, request ID)
//! - Map pipeline errors to 502 responses
//! - Serve until the shutdown signal fires

use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    http::{HeaderName, StatusCode},
    response::IntoResponse,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::{BoxError, ServiceBuilder};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ValidatorConfig;
use crate::http::layer::DeviceValidatorLayer;
use crate::http::upstream::{Upstream, UpstreamError};

/// Request ID header set on every request and echoed on the response.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// HTTP server hosting the device validator.
pub struct HttpServer {
    router: Router,
    config: ValidatorConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ValidatorConfig) -> Result<Self, UpstreamError> {
        let upstream = Upstream::new(
            &config.upstream.url,
            Duration::from_secs(config.timeouts.connect_secs),
        )?;

        tracing::info!(
            upstream = %upstream.authority(),
            validator_enabled = config.validator.enabled,
            "Upstream configured"
        );

        let router = Self::build_router(&config, upstream);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ValidatorConfig, upstream: Upstream) -> Router {
        let router = if config.validator.enabled {
            Router::new().fallback_service(
                ServiceBuilder::new()
                    .layer(HandleErrorLayer::new(handle_pipeline_error))
                    .layer(DeviceValidatorLayer::new())
                    .service(upstream),
            )
        } else {
            Router::new().fallback_service(
                ServiceBuilder::new()
                    .layer(HandleErrorLayer::new(handle_pipeline_error))
                    .map_err(|e: UpstreamError| -> BoxError { e.into() })
                    .service(upstream),
            )
        };

        router
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}

/// The next stage failed before a response existed; nothing was sent yet.
async fn handle_pipeline_error(err: BoxError) -> impl IntoResponse {
    tracing::error!(error = %err, "Request pipeline failed");
    (StatusCode::BAD_GATEWAY, "Upstream request failed")
}
