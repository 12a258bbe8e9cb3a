//! Best-effort recovery of structured insights from model output.
//!
//! Language-model endpoints are asked for JSON but routinely return it
//! wrapped in markdown fences, preceded by prose, or cut off mid-array when
//! the token budget runs out. Extraction tries the cheap paths first and
//! only then falls back to scanning for known array fields.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::scanner::{bounded, field_array_starts, scan_array};
use crate::domain::fields::array_fields;

/// Default number of bytes the fallback scanner will look at.
pub const DEFAULT_MAX_SCAN_BYTES: usize = 100_000;

/// Default number of occurrences of one field name the scanner will try.
pub const DEFAULT_MAX_MATCHES_PER_FIELD: usize = 8;

/// Bounds on fallback scanning work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionLimits {
    pub max_scan_bytes: usize,
    pub max_matches_per_field: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            max_scan_bytes: DEFAULT_MAX_SCAN_BYTES,
            max_matches_per_field: DEFAULT_MAX_MATCHES_PER_FIELD,
        }
    }
}

/// Which path produced an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    Ok,
    Partial,
    Empty,
}

/// Result of extracting an insight payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionOutcome {
    /// The payload was already structured or parsed cleanly.
    Ok { value: Value },
    /// Some known array fields were recovered from malformed text.
    Partial { value: Map<String, Value> },
    /// Nothing structured was recoverable.
    Empty { original: String },
}

impl ExtractionOutcome {
    pub fn status(&self) -> ExtractionStatus {
        match self {
            Self::Ok { .. } => ExtractionStatus::Ok,
            Self::Partial { .. } => ExtractionStatus::Partial,
            Self::Empty { .. } => ExtractionStatus::Empty,
        }
    }

    /// Converts into a value the report normalizer accepts.
    ///
    /// An empty outcome becomes its original text as a JSON string, which
    /// normalizes to a report carrying only that text.
    pub fn into_value(self) -> Value {
        match self {
            Self::Ok { value } => value,
            Self::Partial { value } => Value::Object(value),
            Self::Empty { original } => Value::String(original),
        }
    }
}

/// Recovers structured insight data from already-parsed values or text.
#[derive(Debug, Clone, Default)]
pub struct InsightExtractor {
    limits: ExtractionLimits,
}

impl InsightExtractor {
    /// Creates an extractor with default scan limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor with custom scan limits.
    pub fn with_limits(limits: ExtractionLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> ExtractionLimits {
        self.limits
    }

    /// Extracts from an insight candidate as found in a response envelope.
    ///
    /// Objects and arrays pass through untouched. Strings go through
    /// [`InsightExtractor::extract_text`]. Other scalars cannot carry
    /// insights and come back empty.
    pub fn extract(&self, candidate: &Value) -> ExtractionOutcome {
        match candidate {
            Value::Object(_) | Value::Array(_) => ExtractionOutcome::Ok {
                value: candidate.clone(),
            },
            Value::String(text) => self.extract_text(text),
            Value::Null => ExtractionOutcome::Empty {
                original: String::new(),
            },
            other => ExtractionOutcome::Empty {
                original: other.to_string(),
            },
        }
    }

    /// Extracts from raw text.
    ///
    /// # Steps
    /// 1. Parse the trimmed text as JSON
    /// 2. Parse the body of a markdown code fence
    /// 3. Scan for known array fields and keep their complete elements
    ///
    /// Bracketed fragments inside prose are never taken as the payload.
    pub fn extract_text(&self, raw: &str) -> ExtractionOutcome {
        let trimmed = raw.trim();

        if let Some(value) = self.parse_strict(trimmed) {
            debug!(bytes = raw.len(), "Insight payload parsed as JSON");
            return ExtractionOutcome::Ok { value };
        }

        let recovered = self.scan_known_fields(trimmed);
        if !recovered.is_empty() {
            warn!(
                fields = ?recovered.keys().collect::<Vec<_>>(),
                "Insight payload was malformed; recovered partial fields"
            );
            return ExtractionOutcome::Partial { value: recovered };
        }

        warn!(bytes = raw.len(), "No structured insights recoverable from payload");
        ExtractionOutcome::Empty {
            original: raw.to_string(),
        }
    }

    fn parse_strict(&self, trimmed: &str) -> Option<Value> {
        if let Ok(value) = serde_json::from_str(trimmed) {
            return Some(value);
        }

        extract_from_code_block(trimmed).and_then(|body| serde_json::from_str(body).ok())
    }

    fn scan_known_fields(&self, text: &str) -> Map<String, Value> {
        let window = bounded(text, self.limits.max_scan_bytes);
        let mut recovered = Map::new();

        for field in array_fields() {
            if recovered.contains_key(field.canonical) {
                continue;
            }
            let found = field.aliases.iter().find_map(|alias| {
                field_array_starts(window, alias)
                    .take(self.limits.max_matches_per_field)
                    .find_map(|open| {
                        let candidate = scan_array(window, open).recoverable()?;
                        match serde_json::from_str::<Vec<Value>>(&candidate) {
                            Ok(items) if !items.is_empty() => Some(items),
                            _ => None,
                        }
                    })
            });

            if let Some(items) = found {
                debug!(field = field.canonical, count = items.len(), "Recovered insight field");
                recovered.insert(field.canonical.to_string(), Value::Array(items));
            }
        }

        recovered
    }
}

/// Body of the first ```` ```json ```` or bare ```` ``` ```` fence in `text`.
fn extract_from_code_block(text: &str) -> Option<&str> {
    let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

    for pattern in patterns {
        if let Some(start) = text.find(pattern) {
            let body_start = start + pattern.len();
            if let Some(end) = text[body_start..].find("```") {
                return Some(text[body_start..body_start + end].trim());
            }
        }
    }
    None
}
