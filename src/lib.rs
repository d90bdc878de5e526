//! Mobile device validator middleware.
//!
//! Classifies requests by User-Agent, annotates mobile ones with `X-DV-*`
//! headers for downstream handlers, and injects a touch-point reporting
//! script into HTML pages served to them.

pub mod config;
pub mod detect;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rewrite;

pub use config::ValidatorConfig;
pub use detect::{classify, DeviceClass};
pub use http::{DeviceValidator, DeviceValidatorLayer, HttpServer};
pub use lifecycle::Shutdown;
pub use rewrite::{inject_touch_points, TOUCH_POINTS_SCRIPT};
