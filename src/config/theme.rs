//! Chart theme configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::chart::{ChartTheme, GaugeBand, Palette, DEFAULT_PALETTE, DEFAULT_UNAVAILABLE_TOKEN};

/// Chart theme configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    /// Palette colors (comma-separated)
    #[serde(default = "default_palette")]
    pub palette: String,

    /// Shown where a value cannot be computed
    #[serde(default = "default_unavailable_token")]
    pub unavailable_token: String,

    /// Gauge color when the value is below every threshold
    #[serde(default = "default_gauge_color")]
    pub gauge_default_color: String,

    /// Gauge label when the value is below every threshold
    #[serde(default = "default_gauge_label")]
    pub gauge_default_label: String,
}

impl ThemeConfig {
    /// Get palette colors as a vector
    pub fn palette_list(&self) -> Vec<String> {
        self.palette
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Builds the renderer theme.
    pub fn to_theme(&self) -> Result<ChartTheme, ValidationError> {
        let palette = Palette::new(self.palette_list()).map_err(|_| ValidationError::EmptyPalette)?;
        Ok(ChartTheme {
            palette,
            unavailable_token: self.unavailable_token.clone(),
            gauge_fallback: GaugeBand {
                color: self.gauge_default_color.clone(),
                label: self.gauge_default_label.clone(),
            },
        })
    }

    /// Validate theme configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.palette_list().is_empty() {
            return Err(ValidationError::EmptyPalette);
        }
        if self.unavailable_token.trim().is_empty() {
            return Err(ValidationError::EmptyUnavailableToken);
        }
        if self.gauge_default_color.trim().is_empty() {
            return Err(ValidationError::EmptyGaugeColor);
        }
        Ok(())
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            unavailable_token: default_unavailable_token(),
            gauge_default_color: default_gauge_color(),
            gauge_default_label: default_gauge_label(),
        }
    }
}

fn default_palette() -> String {
    DEFAULT_PALETTE.join(",")
}

fn default_unavailable_token() -> String {
    DEFAULT_UNAVAILABLE_TOKEN.to_string()
}

fn default_gauge_color() -> String {
    GaugeBand::default().color
}

fn default_gauge_label() -> String {
    GaugeBand::default().label
}
