//! Device classification subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request headers
//!     → classifier.rs (User-Agent substring check)
//!     → mobile: annotate request with X-DV-* headers
//!     → other:  leave request untouched
//! ```
//!
//! # Design Decisions
//! - Single substring heuristic, no device database
//! - Malformed client input degrades to "suspicious", never to an error
//! - No state survives the request

pub mod classifier;

pub use classifier::{classify, is_mobile_user_agent, is_suspicious, parse_touch_points, DeviceClass};

use axum::http::HeaderName;

/// Copy of the original `User-Agent`, set on mobile requests.
pub const X_DV_UA: HeaderName = HeaderName::from_static("x-dv-ua");

/// Device type annotation. Only ever `mobile`.
pub const X_DV_DEVICE_TYPE: HeaderName = HeaderName::from_static("x-dv-device-type");

/// Touch-point count claimed by the client-side script.
pub const X_DV_TOUCH_POINTS: HeaderName = HeaderName::from_static("x-dv-touch-points");

/// `true` when a mobile claim is backed by too few touch points.
pub const X_DV_SUSPICIOUS_UA: HeaderName = HeaderName::from_static("x-dv-suspicious-ua");

/// Substring that marks a User-Agent as mobile.
pub const MOBILE_MARKER: &str = "Mobile";

/// Touch-point value used when the client did not report one.
pub const MISSING_TOUCH_POINTS: &str = "-1";
