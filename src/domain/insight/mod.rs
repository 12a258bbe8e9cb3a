//! Insight extraction - recovering structured data from model output.

mod extractor;
mod scanner;

pub use extractor::{
    ExtractionLimits, ExtractionOutcome, ExtractionStatus, InsightExtractor,
    DEFAULT_MAX_MATCHES_PER_FIELD, DEFAULT_MAX_SCAN_BYTES,
};
pub use scanner::{scan_array, ArraySpan};
