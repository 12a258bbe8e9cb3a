use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Confidence;

/// A single security issue found on an analysed site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityFinding {
    pub issue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

/// A single SEO improvement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoRecommendation {
    pub issue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// A suggested ad slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdPlacement {
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

/// Value of one AI insight field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InsightValue {
    List(Vec<String>),
    Text(String),
}

/// Canonical report shape every analysis or insight payload is reduced to.
///
/// Serializes with camelCase keys for the fixed fields and the canonical
/// snake_case insight names at the top level, which are exactly the
/// canonical names the normalizer resolves first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReport {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security_findings: Vec<SecurityFinding>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seo_recommendations: Vec<SeoRecommendation>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ad_placements: Vec<AdPlacement>,

    /// AI insight fields keyed by canonical name.
    #[serde(flatten)]
    pub insights: BTreeMap<String, InsightValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Original text kept when nothing structured was recoverable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_fallback_text: Option<String>,
}

impl NormalizedReport {
    /// Report carrying only an upstream error.
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Report carrying only unstructured text.
    pub fn from_raw_text(text: impl Into<String>) -> Self {
        Self {
            raw_fallback_text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Returns true if no structured finding or insight is present.
    pub fn has_no_findings(&self) -> bool {
        self.security_findings.is_empty()
            && self.seo_recommendations.is_empty()
            && self.ad_placements.is_empty()
            && self.insights.is_empty()
    }

    /// Returns true if the report holds an error.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Looks up an insight by canonical name.
    pub fn insight(&self, name: &str) -> Option<&InsightValue> {
        self.insights.get(name)
    }

    /// Looks up a list insight by canonical name.
    pub fn insight_list(&self, name: &str) -> Option<&[String]> {
        match self.insights.get(name) {
            Some(InsightValue::List(items)) => Some(items),
            _ => None,
        }
    }

    /// Total number of findings, recommendations, placements and insights.
    pub fn item_count(&self) -> usize {
        let insight_items: usize = self
            .insights
            .values()
            .map(|value| match value {
                InsightValue::List(items) => items.len(),
                InsightValue::Text(_) => 1,
            })
            .sum();
        self.security_findings.len()
            + self.seo_recommendations.len()
            + self.ad_placements.len()
            + insight_items
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;
