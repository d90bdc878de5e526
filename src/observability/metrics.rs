//! Metrics collection and exposition.
//!
//! # Metrics
//! - `device_validator_requests_total` (counter): requests by device class
//! - `device_validator_suspicious_total` (counter): mobile claims with weak touch evidence
//! - `device_validator_injections_total` (counter): rewrites by script placement
//! - `device_validator_capture_failures_total` (counter): bodies that failed mid-capture
//! - `device_validator_rewritten_bytes` (histogram): size of rewritten documents

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::detect::DeviceClass;
use crate::rewrite::Placement;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_classification(class: &DeviceClass) {
    metrics::counter!("device_validator_requests_total", "device" => class.label()).increment(1);
    if let DeviceClass::Mobile { suspicious: true, .. } = class {
        metrics::counter!("device_validator_suspicious_total").increment(1);
    }
}

pub fn record_injection(placement: Placement, rewritten_bytes: usize) {
    metrics::counter!("device_validator_injections_total", "placement" => placement.label())
        .increment(1);
    metrics::histogram!("device_validator_rewritten_bytes").record(rewritten_bytes as f64);
}

pub fn record_capture_failure() {
    metrics::counter!("device_validator_capture_failures_total").increment(1);
}
