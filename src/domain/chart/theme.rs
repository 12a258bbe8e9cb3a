//! Chart theme: palette and fallback presentation tokens.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Palette used when a chart carries no colors of its own.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#4285F4", "#34A853", "#FBBC04", "#EA4335", "#A142F4", "#24C1E0",
];

/// Text shown where a value cannot be computed.
pub const DEFAULT_UNAVAILABLE_TOKEN: &str = "N/A";

/// Non-empty list of colors, indexed cyclically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Palette(Vec<String>);

impl Palette {
    /// Creates a palette from colors. Blank entries are dropped; at least
    /// one color must remain.
    pub fn new<I, S>(colors: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors
            .into_iter()
            .map(Into::into)
            .map(|color: String| color.trim().to_string())
            .filter(|color| !color.is_empty())
            .collect();

        if colors.is_empty() {
            return Err(ValidationError::empty_field("palette"));
        }
        Ok(Self(colors))
    }

    /// Color for the `index`-th series, slice or stage.
    pub fn color(&self, index: usize) -> &str {
        &self.0[index % self.0.len()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn colors(&self) -> &[String] {
        &self.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect())
    }
}

impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let colors = Vec::<String>::deserialize(deserializer)?;
        Palette::new(colors).map_err(serde::de::Error::custom)
    }
}

/// Band used by a gauge whose value sits below every threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeBand {
    pub color: String,
    pub label: String,
}

impl Default for GaugeBand {
    fn default() -> Self {
        Self {
            color: "#9AA0A6".to_string(),
            label: "Below range".to_string(),
        }
    }
}

/// Everything the renderer needs beyond the chart itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartTheme {
    pub palette: Palette,
    pub unavailable_token: String,
    pub gauge_fallback: GaugeBand,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            unavailable_token: DEFAULT_UNAVAILABLE_TOKEN.to_string(),
            gauge_fallback: GaugeBand::default(),
        }
    }
}
