//! Chat reply texts

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::presenter::{
    default_examples, PresenterSettings, DEFAULT_PENDING_TEXT, DEFAULT_TRANSPORT_ERROR_TEXT,
};
use crate::domain::conversation::ChatSurface;

/// Chat configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Placeholder text while a reply is outstanding
    #[serde(default = "default_pending_text")]
    pub pending_text: String,

    /// Reply when the backend cannot be reached
    #[serde(default = "default_transport_error_text")]
    pub transport_error_text: String,

    /// Publisher example queries (comma-separated)
    pub publisher_examples: Option<String>,

    /// Advertiser example queries (comma-separated)
    pub advertiser_examples: Option<String>,

    /// Content strategy example queries (comma-separated)
    pub content_strategy_examples: Option<String>,
}

impl ChatConfig {
    /// Example queries for a surface; built-in ones when unset.
    pub fn examples(&self, surface: ChatSurface) -> Vec<String> {
        let configured = match surface {
            ChatSurface::Publisher => &self.publisher_examples,
            ChatSurface::Advertiser => &self.advertiser_examples,
            ChatSurface::ContentStrategy => &self.content_strategy_examples,
        };
        match configured {
            Some(list) => list
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => default_examples(surface),
        }
    }

    pub fn presenter_settings(&self) -> PresenterSettings {
        PresenterSettings {
            pending_text: self.pending_text.clone(),
            transport_error_text: self.transport_error_text.clone(),
            publisher_examples: self.examples(ChatSurface::Publisher),
            advertiser_examples: self.examples(ChatSurface::Advertiser),
            content_strategy_examples: self.examples(ChatSurface::ContentStrategy),
        }
    }

    /// Validate chat configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.pending_text.trim().is_empty() {
            return Err(ValidationError::EmptyPendingText);
        }
        if self.transport_error_text.trim().is_empty() {
            return Err(ValidationError::EmptyTransportErrorText);
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            pending_text: default_pending_text(),
            transport_error_text: default_transport_error_text(),
            publisher_examples: None,
            advertiser_examples: None,
            content_strategy_examples: None,
        }
    }
}

fn default_pending_text() -> String {
    DEFAULT_PENDING_TEXT.to_string()
}

fn default_transport_error_text() -> String {
    DEFAULT_TRANSPORT_ERROR_TEXT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_presenter_defaults() {
        assert_eq!(ChatConfig::default().presenter_settings(), PresenterSettings::default());
    }

    #[test]
    fn test_configured_examples_override_builtins() {
        let config = ChatConfig {
            advertiser_examples: Some("spend, roas ,".to_string()),
            ..ChatConfig::default()
        };
        assert_eq!(config.examples(ChatSurface::Advertiser), vec!["spend", "roas"]);
        assert_eq!(
            config.examples(ChatSurface::Publisher),
            default_examples(ChatSurface::Publisher)
        );
    }

    #[test]
    fn test_blank_pending_text_rejected() {
        let config = ChatConfig {
            pending_text: " ".to_string(),
            ..ChatConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyPendingText));
    }
}
