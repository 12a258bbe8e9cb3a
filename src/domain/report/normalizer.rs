//! Report normalization.
//!
//! Turns whatever an analysis or insight endpoint produced into a
//! [`NormalizedReport`]. Normalization is total: every input yields a
//! report, and normalizing the serialized form of a report yields the same
//! report again.

use serde_json::{Map, Value};
use tracing::debug;

use super::model::{AdPlacement, InsightValue, NormalizedReport, SecurityFinding, SeoRecommendation};
use crate::domain::fields::{FieldKind, FIELD_TABLE};
use crate::domain::foundation::Confidence;

const FINDING_ISSUE_KEYS: &[&str] = &["issue", "title", "name", "vulnerability", "description"];
const SEVERITY_KEYS: &[&str] = &["severity", "risk", "level"];
const REMEDIATION_KEYS: &[&str] = &["remediation", "fix", "mitigation"];

const SEO_ISSUE_KEYS: &[&str] = &["issue", "title", "name", "description"];
const PRIORITY_KEYS: &[&str] = &["priority", "importance", "level"];
const RECOMMENDATION_KEYS: &[&str] = &["recommendation", "suggestion", "action"];

const LOCATION_KEYS: &[&str] = &["location", "placement", "position"];
const FORMAT_KEYS: &[&str] = &["format", "size"];
const REASONING_KEYS: &[&str] = &["reasoning", "rationale", "why"];

const INSIGHT_ITEM_KEYS: &[&str] = &["title", "name", "keyword", "domain", "text", "description"];

/// Normalizes raw analysis payloads into [`NormalizedReport`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportNormalizer;

impl ReportNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalizes one payload.
    ///
    /// Non-object input becomes a report holding only its text. For objects
    /// every alias-table row is resolved by first present non-null key. If
    /// nothing structured and no error was found, the input's text is kept
    /// as the raw fallback.
    pub fn normalize(&self, raw: &Value) -> NormalizedReport {
        let Value::Object(object) = raw else {
            return NormalizedReport::from_raw_text(render(raw));
        };

        let report = normalize_object(object);

        if report.has_no_findings() && report.error.is_none() && report.raw_fallback_text.is_none() {
            debug!(keys = object.len(), "No known report fields; keeping raw payload text");
            return NormalizedReport {
                raw_fallback_text: Some(render(raw)),
                ..report
            };
        }
        report
    }
}

fn normalize_object(object: &Map<String, Value>) -> NormalizedReport {
    let mut report = NormalizedReport::default();

    for field in FIELD_TABLE {
        let Some((_, value)) = field.resolve(object) else {
            continue;
        };

        match field.kind {
            FieldKind::SecurityFindings => {
                report.security_findings = elements(value).map(security_finding).collect();
            }
            FieldKind::SeoRecommendations => {
                report.seo_recommendations = elements(value).map(seo_recommendation).collect();
            }
            FieldKind::AdPlacements => {
                report.ad_placements = elements(value).map(ad_placement).collect();
            }
            FieldKind::InsightList => {
                let items: Vec<String> = elements(value).map(insight_item).collect();
                if !items.is_empty() {
                    report
                        .insights
                        .insert(field.canonical.to_string(), InsightValue::List(items));
                }
            }
            FieldKind::InsightText => {
                if let Some(text) = prose(value) {
                    report
                        .insights
                        .insert(field.canonical.to_string(), InsightValue::Text(text));
                }
            }
            FieldKind::Confidence => report.confidence = Confidence::from_json(value),
            FieldKind::Error => report.error = scalar_text(value),
            FieldKind::RawFallback => report.raw_fallback_text = scalar_text(value),
        }
    }

    report
}

/// Array elements, or the value itself as a single element. Nulls are
/// dropped.
fn elements(value: &Value) -> impl Iterator<Item = &Value> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    };
    items.iter().filter(|item| !item.is_null())
}

fn security_finding(element: &Value) -> SecurityFinding {
    match element {
        Value::Object(object) => SecurityFinding {
            issue: first_text(object, FINDING_ISSUE_KEYS).unwrap_or_else(|| render(element)),
            severity: first_text(object, SEVERITY_KEYS),
            remediation: first_text(object, REMEDIATION_KEYS),
        },
        other => SecurityFinding {
            issue: render(other),
            severity: None,
            remediation: None,
        },
    }
}

fn seo_recommendation(element: &Value) -> SeoRecommendation {
    match element {
        Value::Object(object) => SeoRecommendation {
            issue: first_text(object, SEO_ISSUE_KEYS).unwrap_or_else(|| render(element)),
            priority: first_text(object, PRIORITY_KEYS),
            recommendation: first_text(object, RECOMMENDATION_KEYS),
        },
        other => SeoRecommendation {
            issue: render(other),
            priority: None,
            recommendation: None,
        },
    }
}

fn ad_placement(element: &Value) -> AdPlacement {
    match element {
        Value::Object(object) => AdPlacement {
            location: first_text(object, LOCATION_KEYS).unwrap_or_else(|| render(element)),
            format: first_text(object, FORMAT_KEYS),
            reasoning: first_text(object, REASONING_KEYS),
        },
        other => AdPlacement {
            location: render(other),
            format: None,
            reasoning: None,
        },
    }
}

fn insight_item(element: &Value) -> String {
    match element {
        Value::Object(object) => first_text(object, INSIGHT_ITEM_KEYS).unwrap_or_else(|| render(element)),
        other => render(other),
    }
}

/// Insight prose. Lists are joined; blank text counts as absent.
fn prose(value: &Value) -> Option<String> {
    let text = match value {
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(render)
            .collect::<Vec<_>>()
            .join("; "),
        other => scalar_text(other)?,
    };
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// First alias present on `object` with a non-null value, as text.
fn first_text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| object.get(*key).filter(|value| !value.is_null()))
        .map(render)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(render(other)),
    }
}

/// Strings verbatim, everything else as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(raw: Value) -> NormalizedReport {
        ReportNormalizer::new().normalize(&raw)
    }

    mod aliases {
        use super::*;

        #[test]
        fn vulns_alias_maps_to_security_findings() {
            let report = normalize(json!({
                "vulns": [{ "issue": "Outdated TLS", "severity": "high", "fix": "Upgrade" }]
            }));

            assert_eq!(
                report.security_findings,
                vec![SecurityFinding {
                    issue: "Outdated TLS".to_string(),
                    severity: Some("high".to_string()),
                    remediation: Some("Upgrade".to_string()),
                }]
            );
            assert_eq!(report.raw_fallback_text, None);
        }

        #[test]
        fn canonical_key_beats_alias() {
            let report = normalize(json!({
                "seo": ["from alias"],
                "seoRecommendations": ["from canonical"],
            }));
            assert_eq!(report.seo_recommendations[0].issue, "from canonical");
        }

        #[test]
        fn null_value_falls_through_to_next_alias() {
            let report = normalize(json!({
                "security_findings": null,
                "vulnerabilities": ["Open redirect"],
            }));
            assert_eq!(report.security_findings[0].issue, "Open redirect");
        }

        #[test]
        fn ads_alias_maps_to_placements() {
            let report = normalize(json!({
                "ads": [{ "position": "sidebar", "size": "300x250", "rationale": "high dwell" }]
            }));
            assert_eq!(
                report.ad_placements,
                vec![AdPlacement {
                    location: "sidebar".to_string(),
                    format: Some("300x250".to_string()),
                    reasoning: Some("high dwell".to_string()),
                }]
            );
        }
    }

    mod elements {
        use super::*;

        #[test]
        fn bare_string_becomes_issue() {
            let report = normalize(json!({ "seo": ["Missing meta description"] }));
            assert_eq!(
                report.seo_recommendations,
                vec![SeoRecommendation {
                    issue: "Missing meta description".to_string(),
                    priority: None,
                    recommendation: None,
                }]
            );
        }

        #[test]
        fn object_without_issue_uses_its_json() {
            let report = normalize(json!({ "vulns": [{ "severity": "low" }] }));
            let finding = &report.security_findings[0];
            assert_eq!(finding.issue, r#"{"severity":"low"}"#);
            assert_eq!(finding.severity.as_deref(), Some("low"));
        }

        #[test]
        fn single_value_is_treated_as_one_element() {
            let report = normalize(json!({ "vulns": "Clickjacking" }));
            assert_eq!(report.security_findings.len(), 1);
            assert_eq!(report.security_findings[0].issue, "Clickjacking");
        }

        #[test]
        fn null_elements_are_dropped() {
            let report = normalize(json!({ "market_gaps": [null, "gap", null] }));
            assert_eq!(report.insight_list("market_gaps"), Some(&["gap".to_string()][..]));
        }

        #[test]
        fn non_string_scalars_are_rendered() {
            let report = normalize(json!({ "vulns": [{ "issue": 404, "severity": 3 }] }));
            assert_eq!(report.security_findings[0].issue, "404");
            assert_eq!(report.security_findings[0].severity.as_deref(), Some("3"));
        }
    }

    mod insights {
        use super::*;

        #[test]
        fn lists_and_text_are_flattened_by_canonical_name() {
            let report = normalize(json!({
                "marketGaps": ["Video"],
                "target_audience": "Gen Z readers",
                "confidence": 72.5,
            }));

            assert_eq!(report.insight_list("market_gaps"), Some(&["Video".to_string()][..]));
            assert_eq!(
                report.insight("target_audience"),
                Some(&InsightValue::Text("Gen Z readers".to_string()))
            );
            assert_eq!(report.confidence, Some(Confidence::new(72.5)));
        }

        #[test]
        fn empty_list_is_not_recorded() {
            let report = normalize(json!({ "article_ideas": [], "seo": ["x"] }));
            assert!(report.insight("article_ideas").is_none());
        }

        #[test]
        fn blank_text_is_not_recorded() {
            let report = normalize(json!({ "bidding_strategy": "   ", "seo": ["x"] }));
            assert!(report.insight("bidding_strategy").is_none());
        }

        #[test]
        fn object_items_use_title() {
            let report = normalize(json!({
                "article_ideas": [{ "title": "Top 10 CPMs", "angle": "data" }]
            }));
            assert_eq!(
                report.insight_list("article_ideas"),
                Some(&["Top 10 CPMs".to_string()][..])
            );
        }

        #[test]
        fn confidence_string_with_percent_is_read() {
            let report = normalize(json!({ "confidence": "85%", "seo": ["x"] }));
            assert_eq!(report.confidence, Some(Confidence::new(85.0)));
        }
    }

    mod fallback {
        use super::*;

        #[test]
        fn error_only_payload_normalizes_to_error() {
            let report = normalize(json!({ "error": "Site unreachable" }));
            assert_eq!(report, NormalizedReport::from_error("Site unreachable"));
        }

        #[test]
        fn unknown_object_keeps_its_json_as_raw_text() {
            let report = normalize(json!({ "foo": 1 }));
            assert_eq!(report.raw_fallback_text.as_deref(), Some(r#"{"foo":1}"#));
            assert!(report.has_no_findings());
        }

        #[test]
        fn raw_output_is_carried() {
            let report = normalize(json!({ "raw_output": "model said hi" }));
            assert_eq!(report.raw_fallback_text.as_deref(), Some("model said hi"));
        }

        #[test]
        fn string_input_becomes_raw_text() {
            let report = normalize(json!("plain words"));
            assert_eq!(report, NormalizedReport::from_raw_text("plain words"));
        }

        #[test]
        fn null_input_becomes_null_text() {
            let report = normalize(Value::Null);
            assert_eq!(report.raw_fallback_text.as_deref(), Some("null"));
        }
    }

    mod idempotence {
        use super::*;

        fn assert_idempotent(raw: Value) {
            let normalizer = ReportNormalizer::new();
            let once = normalizer.normalize(&raw);
            let twice = normalizer.normalize(&serde_json::to_value(&once).unwrap());
            assert_eq!(once, twice, "input: {raw}");
        }

        #[test]
        fn full_payload_is_stable() {
            assert_idempotent(json!({
                "vulns": [{ "title": "XSS", "risk": "high" }, "CSRF"],
                "seo": [{ "issue": "Slow LCP", "importance": "medium", "suggestion": "Lazy load" }],
                "ads": ["header"],
                "market_gaps": ["a", { "name": "b" }],
                "executive_summary": ["line one", "line two"],
                "confidence": "91",
            }));
        }

        #[test]
        fn fallback_payloads_are_stable() {
            assert_idempotent(json!({ "foo": { "bar": [1, 2] } }));
            assert_idempotent(json!({ "confidence": 50 }));
            assert_idempotent(json!({ "error": "x", "raw_output": 3 }));
            assert_idempotent(json!("just text"));
            assert_idempotent(json!([1, 2, 3]));
        }
    }
}
