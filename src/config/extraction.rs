//! Insight extraction limits

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::insight::{ExtractionLimits, DEFAULT_MAX_MATCHES_PER_FIELD, DEFAULT_MAX_SCAN_BYTES};

/// Bounds on fallback scanning of malformed insight text
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Bytes of raw text scanned at most
    #[serde(default = "default_max_scan_bytes")]
    pub max_scan_bytes: usize,

    /// Occurrences of one field name tried at most
    #[serde(default = "default_max_matches")]
    pub max_matches_per_field: usize,
}

impl ExtractionConfig {
    pub fn limits(&self) -> ExtractionLimits {
        ExtractionLimits {
            max_scan_bytes: self.max_scan_bytes,
            max_matches_per_field: self.max_matches_per_field,
        }
    }

    /// Validate extraction configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_scan_bytes == 0 {
            return Err(ValidationError::InvalidExtractionLimit("max_scan_bytes"));
        }
        if self.max_matches_per_field == 0 {
            return Err(ValidationError::InvalidExtractionLimit("max_matches_per_field"));
        }
        Ok(())
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_scan_bytes: default_max_scan_bytes(),
            max_matches_per_field: default_max_matches(),
        }
    }
}

fn default_max_scan_bytes() -> usize {
    DEFAULT_MAX_SCAN_BYTES
}

fn default_max_matches() -> usize {
    DEFAULT_MAX_MATCHES_PER_FIELD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractionConfig::default();
        assert_eq!(config.limits(), ExtractionLimits::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let config = ExtractionConfig {
            max_scan_bytes: 0,
            ..ExtractionConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidExtractionLimit("max_scan_bytes"))
        );

        let config = ExtractionConfig {
            max_matches_per_field: 0,
            ..ExtractionConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
