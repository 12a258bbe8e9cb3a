//! Domain layer containing the presentation-normalization logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `fields` - Alias table shared by extraction and normalization
//! - `insight` - Recovery of structured insights from model output
//! - `report` - Canonical report model and normalizer
//! - `chart` - Chart specifications, decoding and render dispatch
//! - `envelope` - Classification of backend responses
//! - `conversation` - Chat sessions and message logs

pub mod chart;
pub mod conversation;
pub mod envelope;
pub mod fields;
pub mod foundation;
pub mod insight;
pub mod report;
