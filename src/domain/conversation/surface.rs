//! Dashboard chat surfaces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Which dashboard a chat session belongs to. Each surface has its own
/// session, log and backend query endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatSurface {
    Publisher,
    Advertiser,
    ContentStrategy,
}

impl ChatSurface {
    pub const ALL: [ChatSurface; 3] = [
        ChatSurface::Publisher,
        ChatSurface::Advertiser,
        ChatSurface::ContentStrategy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatSurface::Publisher => "publisher",
            ChatSurface::Advertiser => "advertiser",
            ChatSurface::ContentStrategy => "content_strategy",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ChatSurface::Publisher => "Publisher",
            ChatSurface::Advertiser => "Advertiser",
            ChatSurface::ContentStrategy => "Content Strategy",
        }
    }
}

impl fmt::Display for ChatSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChatSurface {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|surface| surface.as_str() == normalized)
            .ok_or_else(|| ValidationError::invalid_format("surface", format!("unknown surface '{s}'")))
    }
}
