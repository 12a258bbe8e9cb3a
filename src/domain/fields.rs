//! Declarative field table shared by insight extraction and report
//! normalization.
//!
//! Upstream endpoints name the same concept differently (`vulns` vs
//! `security_vulnerabilities`, `seo` vs `seo_recommendations`). Each entry
//! lists its raw names in priority order, canonical name first, and lookup is
//! first-match. The canonical name is also the key the normalized report
//! serializes under, so a serialized report resolves back to itself.

use serde_json::{Map, Value};

/// What a field carries once normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Array of `{issue, severity?, remediation?}`.
    SecurityFindings,
    /// Array of `{issue, priority?, recommendation?}`.
    SeoRecommendations,
    /// Array of `{location, format?, reasoning?}`.
    AdPlacements,
    /// AI insight list such as `market_gaps`.
    InsightList,
    /// AI insight prose such as `target_audience`.
    InsightText,
    /// Model confidence, 0-100.
    Confidence,
    /// Upstream error text.
    Error,
    /// Raw text kept when nothing structured was recoverable.
    RawFallback,
}

impl FieldKind {
    /// Returns true if the field holds a JSON array upstream.
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            Self::SecurityFindings | Self::SeoRecommendations | Self::AdPlacements | Self::InsightList
        )
    }
}

/// One row of the alias table.
#[derive(Debug, Clone, Copy)]
pub struct FieldAlias {
    /// Name the field is stored and serialized under.
    pub canonical: &'static str,
    pub kind: FieldKind,
    /// Raw names in priority order; the canonical name is always first.
    pub aliases: &'static [&'static str],
}

impl FieldAlias {
    /// Returns the first alias present on `object` with a non-null value.
    pub fn resolve<'a>(&self, object: &'a Map<String, Value>) -> Option<(&'static str, &'a Value)> {
        self.aliases.iter().find_map(|alias| match object.get(*alias) {
            None | Some(Value::Null) => None,
            Some(value) => Some((*alias, value)),
        })
    }
}

macro_rules! insight_list {
    ($canonical:literal, $camel:literal) => {
        FieldAlias {
            canonical: $canonical,
            kind: FieldKind::InsightList,
            aliases: &[$canonical, $camel],
        }
    };
}

macro_rules! insight_text {
    ($canonical:literal, $camel:literal) => {
        FieldAlias {
            canonical: $canonical,
            kind: FieldKind::InsightText,
            aliases: &[$canonical, $camel],
        }
    };
}

/// The fixed alias table, in resolution order.
pub static FIELD_TABLE: &[FieldAlias] = &[
    FieldAlias {
        canonical: "securityFindings",
        kind: FieldKind::SecurityFindings,
        aliases: &[
            "securityFindings",
            "security_findings",
            "vulns",
            "security_vulnerabilities",
            "vulnerabilities",
        ],
    },
    FieldAlias {
        canonical: "seoRecommendations",
        kind: FieldKind::SeoRecommendations,
        aliases: &["seoRecommendations", "seo_recommendations", "seo"],
    },
    FieldAlias {
        canonical: "adPlacements",
        kind: FieldKind::AdPlacements,
        aliases: &["adPlacements", "ad_placements", "ads"],
    },
    insight_list!("market_gaps", "marketGaps"),
    insight_list!("key_differentiators", "keyDifferentiators"),
    insight_list!("campaign_angles", "campaignAngles"),
    insight_list!("article_ideas", "articleIdeas"),
    insight_list!("content_formats", "contentFormats"),
    insight_list!("seo_keywords", "seoKeywords"),
    insight_list!("content_calendar", "contentCalendar"),
    insight_list!("monetization_opportunities", "monetizationOpportunities"),
    insight_list!("competitor_strengths", "competitorStrengths"),
    insight_list!("optimizations", "optimisations"),
    insight_list!("strategic_recommendations", "strategicRecommendations"),
    insight_list!("top_competitors", "topCompetitors"),
    insight_list!("market_trends", "marketTrends"),
    insight_list!("top_keywords", "topKeywords"),
    insight_text!("bidding_strategy", "biddingStrategy"),
    insight_text!("target_audience", "targetAudience"),
    insight_text!("competitive_advantage", "competitiveAdvantage"),
    insight_text!("executive_summary", "executiveSummary"),
    FieldAlias {
        canonical: "confidence",
        kind: FieldKind::Confidence,
        aliases: &["confidence", "confidence_score"],
    },
    FieldAlias {
        canonical: "error",
        kind: FieldKind::Error,
        aliases: &["error"],
    },
    FieldAlias {
        canonical: "rawFallbackText",
        kind: FieldKind::RawFallback,
        aliases: &["rawFallbackText", "raw_fallback_text", "raw_output"],
    },
];

/// Rows whose upstream value is an array; these are what the fallback
/// scanner looks for in malformed text.
pub fn array_fields() -> impl Iterator<Item = &'static FieldAlias> {
    FIELD_TABLE.iter().filter(|field| field.kind.is_array())
}
