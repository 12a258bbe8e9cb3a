//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types used across the
//! extraction, report, chart and conversation modules.

mod confidence;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use confidence::Confidence;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{MessageId, SessionId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
