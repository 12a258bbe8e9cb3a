//! Report module - canonical analysis reports.
//!
//! Website analyses and AI insights arrive under many field spellings. The
//! normalizer folds them into one [`NormalizedReport`] shape.

mod model;
mod normalizer;

pub use model::{AdPlacement, InsightValue, NormalizedReport, SecurityFinding, SeoRecommendation};
pub use normalizer::ReportNormalizer;
