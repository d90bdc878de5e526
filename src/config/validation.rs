//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, the upstream URL, value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ValidatorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ValidatorConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("upstream.url: {0}")]
    InvalidUpstream(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("observability.log_level: unknown level '{0}'")]
    UnknownLogLevel(String),
}

/// Check a parsed configuration.
pub fn validate_config(config: &ValidatorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if let Err(e) = check_upstream(&config.upstream.url) {
        errors.push(e);
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_upstream(raw: &str) -> Result<(), ValidationError> {
    let url = Url::parse(raw).map_err(|e| ValidationError::InvalidUpstream(e.to_string()))?;
    if url.scheme() != "http" {
        return Err(ValidationError::InvalidUpstream(format!(
            "scheme '{}' is not supported, use http",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(ValidationError::InvalidUpstream("missing host".to_string()));
    }
    Ok(())
}
