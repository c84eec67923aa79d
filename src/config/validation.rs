//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and the endpoint URL.
//! All problems are reported at once, not just the first.

use std::fmt;

use crate::config::schema::ClientConfig;

const COMMITMENTS: [&str; 3] = ["processed", "confirmed", "finalized"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidEndpoint { endpoint: String, reason: String },
    UnknownCommitment(String),
    ZeroValue(&'static str),
    EmptyNamespace,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidEndpoint { endpoint, reason } => {
                write!(f, "invalid rpc.endpoint '{}': {}", endpoint, reason)
            }
            ValidationError::UnknownCommitment(c) => {
                write!(f, "unknown rpc.commitment '{}' (expected processed, confirmed or finalized)", c)
            }
            ValidationError::ZeroValue(field) => write!(f, "{} must be greater than zero", field),
            ValidationError::EmptyNamespace => write!(f, "session.namespace must not be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.rpc.endpoint) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::InvalidEndpoint {
            endpoint: config.rpc.endpoint.clone(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidEndpoint {
            endpoint: config.rpc.endpoint.clone(),
            reason: e.to_string(),
        }),
    }

    if !COMMITMENTS.contains(&config.rpc.commitment.as_str()) {
        errors.push(ValidationError::UnknownCommitment(config.rpc.commitment.clone()));
    }

    let positive = [
        ("rpc.request_timeout_secs", config.rpc.request_timeout_secs),
        ("confirmation.target_depth", config.confirmation.target_depth),
        ("confirmation.deadline_ms", config.confirmation.deadline_ms),
        ("confirmation.slot_interval_ms", config.confirmation.slot_interval_ms),
        ("airdrop.lamports", config.airdrop.lamports),
    ];
    for (field, value) in positive {
        if value == 0 {
            errors.push(ValidationError::ZeroValue(field));
        }
    }

    if config.session.namespace.trim().is_empty() {
        errors.push(ValidationError::EmptyNamespace);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
