//! Turns a backend envelope into the bot reply shown in the chat log.
//!
//! Every envelope shape maps to exactly one reply. Nothing here fails:
//! malformed insights fall back to raw text, undecodable charts become
//! unsupported placeholders, and unknown envelopes are shown as JSON.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::chart::{builder, ChartAttachment};
use crate::domain::conversation::{ChatSurface, MessageContent};
use crate::domain::envelope::{MetricEnvelope, ResponseEnvelope};
use crate::domain::fields::FIELD_TABLE;
use crate::domain::insight::{ExtractionStatus, InsightExtractor};
use crate::domain::report::ReportNormalizer;

/// Text shown while a request is outstanding.
pub const DEFAULT_PENDING_TEXT: &str = "Analyzing…";

/// Reply used when the backend could not be reached.
pub const DEFAULT_TRANSPORT_ERROR_TEXT: &str =
    "Sorry, I couldn't reach the analytics service. Please try again.";

/// Keys checked, in order, for a displayable reply in an unrecognised envelope.
const TEXT_KEYS: [&str; 4] = ["chat_response", "response", "message", "answer"];

/// User-facing texts, per surface where they differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenterSettings {
    pub pending_text: String,
    pub transport_error_text: String,
    pub publisher_examples: Vec<String>,
    pub advertiser_examples: Vec<String>,
    pub content_strategy_examples: Vec<String>,
}

impl PresenterSettings {
    /// Example queries suggested after an upstream error.
    pub fn examples(&self, surface: ChatSurface) -> &[String] {
        match surface {
            ChatSurface::Publisher => &self.publisher_examples,
            ChatSurface::Advertiser => &self.advertiser_examples,
            ChatSurface::ContentStrategy => &self.content_strategy_examples,
        }
    }
}

impl Default for PresenterSettings {
    fn default() -> Self {
        Self {
            pending_text: DEFAULT_PENDING_TEXT.to_string(),
            transport_error_text: DEFAULT_TRANSPORT_ERROR_TEXT.to_string(),
            publisher_examples: default_examples(ChatSurface::Publisher),
            advertiser_examples: default_examples(ChatSurface::Advertiser),
            content_strategy_examples: default_examples(ChatSurface::ContentStrategy),
        }
    }
}

/// Built-in example queries for a surface.
pub fn default_examples(surface: ChatSurface) -> Vec<String> {
    let examples: &[&str] = match surface {
        ChatSurface::Publisher => &[
            "impressions",
            "clicks",
            "revenue",
            "RPM",
            "geography",
            "https://example.com",
        ],
        ChatSurface::Advertiser => &[
            "impressions",
            "clicks",
            "conversions",
            "CPC",
            "CPM",
            "CPA",
            "spend",
            "ROI",
        ],
        ChatSurface::ContentStrategy => &[
            "article ideas for tech news",
            "SEO keywords for travel blogs",
            "content calendar for Q3",
        ],
    };
    examples.iter().map(|example| example.to_string()).collect()
}

/// Final content and chart for one bot message.
#[derive(Debug, Clone, PartialEq)]
pub struct BotReply {
    pub content: MessageContent,
    pub chart: Option<ChartAttachment>,
}

impl BotReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: MessageContent::text(text),
            chart: None,
        }
    }
}

/// Assembles bot replies from backend envelopes.
#[derive(Debug, Clone, Default)]
pub struct ResponsePresenter {
    extractor: InsightExtractor,
    normalizer: ReportNormalizer,
    settings: PresenterSettings,
}

impl ResponsePresenter {
    pub fn new(extractor: InsightExtractor, settings: PresenterSettings) -> Self {
        Self {
            extractor,
            normalizer: ReportNormalizer::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &PresenterSettings {
        &self.settings
    }

    /// Builds the reply for a successfully received envelope.
    pub fn present(&self, surface: ChatSurface, raw: Value) -> BotReply {
        let envelope = ResponseEnvelope::classify(raw);
        let chart = envelope.chart_data().and_then(ChartAttachment::from_value);

        match envelope {
            ResponseEnvelope::UpstreamError { message } => {
                debug!(surface = %surface, "Backend reported an error");
                BotReply::text(self.upstream_error_text(surface, &message))
            }
            ResponseEnvelope::WebsiteAnalysis { analysis, .. } => BotReply {
                content: MessageContent::Report(self.normalizer.normalize(&analysis)),
                chart,
            },
            ResponseEnvelope::Insight { insights, context, .. } => {
                let outcome = self.extractor.extract(&insights);
                if outcome.status() == ExtractionStatus::Empty {
                    warn!(surface = %surface, "No insight fields recovered, showing raw text");
                }
                let merged = with_context(outcome.into_value(), context);
                let report = self.normalizer.normalize(&merged);
                BotReply {
                    content: MessageContent::Report(report),
                    chart,
                }
            }
            ResponseEnvelope::Metric(metric) => {
                let chart = chart.or_else(|| {
                    builder::chart_for_metric(&metric.metric, &metric.fields)
                        .map(ChartAttachment::single)
                });
                BotReply {
                    content: MessageContent::text(metric_text(&metric)),
                    chart,
                }
            }
            ResponseEnvelope::Other(value) => BotReply {
                content: MessageContent::text(fallback_text(&value)),
                chart,
            },
        }
    }

    /// Reply for a request that never reached the backend.
    pub fn transport_failure(&self) -> BotReply {
        BotReply::text(self.settings.transport_error_text.clone())
    }

    fn upstream_error_text(&self, surface: ChatSurface, message: &str) -> String {
        let examples = self.settings.examples(surface);
        if examples.is_empty() {
            return message.to_string();
        }
        format!("{}\n\nTry asking about: {}", message, examples.join(", "))
    }
}

/// Adds the envelope's sibling lists to an extracted insight payload.
/// Fields the model already produced win. A non-object payload is kept as
/// the raw fallback text.
fn with_context(extracted: Value, context: Map<String, Value>) -> Value {
    if context.is_empty() {
        return extracted;
    }

    let mut merged = match extracted {
        Value::Object(object) => object,
        Value::String(text) if text.trim().is_empty() => Map::new(),
        Value::String(text) => Map::from_iter([("rawFallbackText".to_string(), Value::String(text))]),
        Value::Null => Map::new(),
        other => Map::from_iter([("rawFallbackText".to_string(), Value::String(other.to_string()))]),
    };
    for (key, value) in context {
        let produced = FIELD_TABLE
            .iter()
            .find(|field| field.canonical == key)
            .is_some_and(|field| field.resolve(&merged).is_some());
        if !produced {
            merged.insert(key, value);
        }
    }
    Value::Object(merged)
}

fn metric_text(metric: &MetricEnvelope) -> String {
    if let Some(reply) = metric.chat_response.as_deref().filter(|r| !r.trim().is_empty()) {
        return reply.to_string();
    }

    let mut text = match metric.value {
        Some(value) => format!("Here's your {} data: {}", metric.metric, value),
        None => format!("Here's your {} data.", metric.metric),
    };
    if let Some(description) = metric.description.as_deref().filter(|d| !d.trim().is_empty()) {
        text.push_str("\n\n");
        text.push_str(description);
    }
    text
}

fn fallback_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(object) => TEXT_KEYS
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_str))
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| pretty(value)),
        other => pretty(other),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
