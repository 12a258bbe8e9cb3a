//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Logging initialization failed: {0}")]
    LoggingInit(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Chart palette must contain at least one color")]
    EmptyPalette,

    #[error("Unavailable token must not be empty")]
    EmptyUnavailableToken,

    #[error("Gauge default color must not be empty")]
    EmptyGaugeColor,

    #[error("Extraction limit {0} must be greater than zero")]
    InvalidExtractionLimit(&'static str),

    #[error("Pending text must not be empty")]
    EmptyPendingText,

    #[error("Transport error text must not be empty")]
    EmptyTransportErrorText,

    #[error("Invalid gateway base URL: must start with http:// or https://")]
    InvalidGatewayUrl,

    #[error("Invalid gateway timeout")]
    InvalidTimeout,

    #[error("Invalid log level directive: {0}")]
    InvalidLogLevel(String),
}
