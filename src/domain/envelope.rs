//! Classification of backend response envelopes.
//!
//! The analytics backend answers every chat query with a JSON object whose
//! shape depends on what the query hit: a website analysis, an AI insight,
//! a metric lookup, or an error. Classification looks at which keys are
//! present, most specific first.

use serde_json::{Map, Value};

/// Lists the insight endpoints return next to `ai_insights`.
pub const INSIGHT_CONTEXT_KEYS: [&str; 3] = ["top_competitors", "market_trends", "top_keywords"];

/// A metric lookup such as `{"metric": "impressions", "value": 10000}`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricEnvelope {
    pub metric: String,
    pub value: Option<f64>,
    /// Ready-made reply text, if the backend wrote one.
    pub chat_response: Option<String>,
    pub description: Option<String>,
    /// Every field of the envelope, for client-side chart building.
    pub fields: Map<String, Value>,
    pub chart_data: Option<Value>,
}

/// What a backend response turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope {
    /// The backend reported an error. Shown verbatim.
    UpstreamError { message: String },
    WebsiteAnalysis {
        url: Option<String>,
        analysis: Value,
        chart_data: Option<Value>,
    },
    Insight {
        query: Option<String>,
        insights: Value,
        /// Non-null [`INSIGHT_CONTEXT_KEYS`] found on the envelope.
        context: Map<String, Value>,
        chart_data: Option<Value>,
    },
    Metric(MetricEnvelope),
    /// Anything else; shown best-effort.
    Other(Value),
}

impl ResponseEnvelope {
    /// Classifies a raw response.
    ///
    /// Order: `error`, website analysis (`analysis` or `report`, or
    /// `type: website_analysis`), insights (`ai_insights` then `insights`),
    /// metric (`metric`), otherwise [`ResponseEnvelope::Other`].
    pub fn classify(raw: Value) -> Self {
        let Value::Object(object) = raw else {
            return ResponseEnvelope::Other(raw);
        };

        if let Some(message) = error_message(&object) {
            return ResponseEnvelope::UpstreamError { message };
        }

        let chart_data = present(&object, "chart_data").cloned();

        let is_analysis = object.get("type").and_then(Value::as_str) == Some("website_analysis");
        if let Some(analysis) = present(&object, "analysis").or_else(|| present(&object, "report")) {
            return ResponseEnvelope::WebsiteAnalysis {
                url: text(&object, "url"),
                analysis: analysis.clone(),
                chart_data,
            };
        }
        if is_analysis {
            return ResponseEnvelope::WebsiteAnalysis {
                url: text(&object, "url"),
                analysis: Value::Null,
                chart_data,
            };
        }

        if let Some(insights) = present(&object, "ai_insights").or_else(|| present(&object, "insights")) {
            let context = INSIGHT_CONTEXT_KEYS
                .iter()
                .filter_map(|key| present(&object, key).map(|value| (key.to_string(), value.clone())))
                .collect();
            return ResponseEnvelope::Insight {
                query: text(&object, "query"),
                insights: insights.clone(),
                context,
                chart_data,
            };
        }

        if let Some(metric) = text(&object, "metric") {
            return ResponseEnvelope::Metric(MetricEnvelope {
                metric,
                value: object.get("value").and_then(Value::as_f64),
                chat_response: text(&object, "chat_response"),
                description: text(&object, "description"),
                chart_data,
                fields: object,
            });
        }

        ResponseEnvelope::Other(Value::Object(object))
    }

    /// The envelope's `chart_data`, if any.
    pub fn chart_data(&self) -> Option<&Value> {
        match self {
            ResponseEnvelope::UpstreamError { .. } => None,
            ResponseEnvelope::WebsiteAnalysis { chart_data, .. }
            | ResponseEnvelope::Insight { chart_data, .. } => chart_data.as_ref(),
            ResponseEnvelope::Metric(metric) => metric.chart_data.as_ref(),
            ResponseEnvelope::Other(value) => value.get("chart_data").filter(|v| !v.is_null()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResponseEnvelope::UpstreamError { .. })
    }
}

/// A non-blank `error` value. A string is used as-is, anything else is
/// rendered as JSON.
fn error_message(object: &Map<String, Value>) -> Option<String> {
    match present(object, "error")? {
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(false) => None,
        other => Some(other.to_string()),
    }
}

fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

fn text(object: &Map<String, Value>, key: &str) -> Option<String> {
    present(object, key).map(|value| match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_wins_over_everything() {
        let envelope = ResponseEnvelope::classify(json!({
            "error": "No matching publisher metric found.",
            "metric": "x"
        }));
        assert_eq!(
            envelope,
            ResponseEnvelope::UpstreamError {
                message: "No matching publisher metric found.".to_string()
            }
        );
        assert!(envelope.is_error());
    }

    #[test]
    fn blank_or_null_error_is_ignored() {
        let envelope = ResponseEnvelope::classify(json!({ "error": null, "metric": "rpm", "value": 5.0 }));
        assert!(matches!(envelope, ResponseEnvelope::Metric(_)));

        let envelope = ResponseEnvelope::classify(json!({ "error": " ", "insights": "text" }));
        assert!(matches!(envelope, ResponseEnvelope::Insight { .. }));
    }

    #[test]
    fn website_analysis_is_detected() {
        let envelope = ResponseEnvelope::classify(json!({
            "type": "website_analysis",
            "url": "https://example.com",
            "analysis": { "vulns": [] }
        }));
        let ResponseEnvelope::WebsiteAnalysis { url, analysis, chart_data } = envelope else {
            panic!("expected analysis")
        };
        assert_eq!(url.as_deref(), Some("https://example.com"));
        assert_eq!(analysis, json!({ "vulns": [] }));
        assert_eq!(chart_data, None);
    }

    #[test]
    fn website_type_without_analysis_still_classifies() {
        let envelope = ResponseEnvelope::classify(json!({ "type": "website_analysis" }));
        assert!(matches!(
            envelope,
            ResponseEnvelope::WebsiteAnalysis { analysis: Value::Null, .. }
        ));
    }

    #[test]
    fn ai_insights_preferred_over_insights() {
        let envelope = ResponseEnvelope::classify(json!({
            "query": "competitors",
            "ai_insights": "{\"market_gaps\": []}",
            "insights": "ignored",
            "chart_data": { "type": "bar", "data": [1] }
        }));
        let ResponseEnvelope::Insight {
            query,
            insights,
            context,
            chart_data,
        } = envelope
        else {
            panic!("expected insight")
        };
        assert_eq!(query.as_deref(), Some("competitors"));
        assert_eq!(insights, json!("{\"market_gaps\": []}"));
        assert!(context.is_empty());
        assert!(chart_data.is_some());
    }

    #[test]
    fn insight_keeps_competitor_and_trend_lists() {
        let envelope = ResponseEnvelope::classify(json!({
            "service": "advertiser",
            "ai_insights": { "market_gaps": ["gap1"] },
            "top_competitors": [{ "domain": "nike.com", "mentions": 4 }],
            "market_trends": [{ "title": "Running shoes boom", "url": "https://a.example" }],
            "top_keywords": null,
            "total_results": 5
        }));
        let ResponseEnvelope::Insight { context, .. } = envelope else {
            panic!("expected insight")
        };
        let keys: Vec<_> = context.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["top_competitors", "market_trends"]);
    }

    #[test]
    fn metric_keeps_all_fields() {
        let envelope = ResponseEnvelope::classify(json!({
            "type": "publisher_metric",
            "metric": "clicks",
            "value": 500,
            "ctr": 0.05,
            "chat_response": "Here's your clicks data with visualization"
        }));
        let ResponseEnvelope::Metric(metric) = envelope else {
            panic!("expected metric")
        };
        assert_eq!(metric.metric, "clicks");
        assert_eq!(metric.value, Some(500.0));
        assert_eq!(metric.fields.get("ctr"), Some(&json!(0.05)));
        assert!(metric.chat_response.is_some());
    }

    #[test]
    fn unknown_shapes_are_other() {
        assert!(matches!(
            ResponseEnvelope::classify(json!({ "service": "publisher" })),
            ResponseEnvelope::Other(_)
        ));
        assert!(matches!(
            ResponseEnvelope::classify(json!("plain")),
            ResponseEnvelope::Other(_)
        ));
    }

    #[test]
    fn other_exposes_chart_data() {
        let envelope = ResponseEnvelope::classify(json!({ "chart_data": { "type": "pie", "data": [1] } }));
        assert!(envelope.chart_data().is_some());
    }
}
