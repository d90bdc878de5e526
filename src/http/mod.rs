//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → layer.rs (classify, annotate, capture + inject for mobile HTML)
//!     → upstream.rs (forward to origin)
//!     → back through layer.rs (rewritten or untouched body)
//!     → Send to client
//! ```

pub mod layer;
pub mod server;
pub mod upstream;

pub use layer::{DeviceValidator, DeviceValidatorLayer};
pub use server::{HttpServer, X_REQUEST_ID};
pub use upstream::{Upstream, UpstreamError};
