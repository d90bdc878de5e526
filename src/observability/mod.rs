//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! detect / rewrite / http produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer, RUST_LOG filter)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op, so the layer can be
//!   embedded in other hosts
//! - Request ID flows through the trace span, not through the middleware

pub mod logging;
pub mod metrics;
