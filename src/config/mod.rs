//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `MEDIANET` prefix and
//! double underscores between nested keys. Every section has defaults, so
//! an empty environment yields a working configuration.
//!
//! # Example
//!
//! ```no_run
//! use medianet_presentation::config::{init_tracing, AppConfig};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! init_tracing(&config.logging).expect("Failed to install subscriber");
//! ```

mod chat;
mod error;
mod extraction;
mod gateway;
mod logging;
mod theme;

pub use chat::ChatConfig;
pub use error::{ConfigError, ValidationError};
pub use extraction::ExtractionConfig;
pub use gateway::GatewayConfig;
pub use logging::{init_tracing, LoggingConfig, LOG_ENV_VAR};
pub use theme::ThemeConfig;

use serde::Deserialize;

use crate::application::ResponsePresenter;
use crate::domain::insight::InsightExtractor;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Chart palette and fallback tokens
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Fallback insight scanning bounds
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Chat reply texts
    #[serde(default)]
    pub chat: ChatConfig,

    /// Analytics backend connection
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Reads `.env` (if present) and `MEDIANET__*` environment variables.
    ///
    /// Nested keys are joined with `__`:
    /// `MEDIANET__GATEWAY__BASE_URL` sets `gateway.base_url`, and
    /// `MEDIANET__THEME__PALETTE=#000,#fff` sets the palette. Unset keys
    /// take their section defaults.
    ///
    /// # Errors
    ///
    /// `ConfigError::LoadError` if a value cannot be parsed into its field type
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MEDIANET")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.theme.validate()?;
        self.extraction.validate()?;
        self.chat.validate()?;
        self.gateway.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Presenter wired with the configured extraction limits and texts.
    pub fn presenter(&self) -> ResponsePresenter {
        ResponsePresenter::new(
            InsightExtractor::with_limits(self.extraction.limits()),
            self.chat.presenter_settings(),
        )
    }
}
