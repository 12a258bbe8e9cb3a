//! Analytics Gateway Port - Interface for the analytics backend.
//!
//! Each chat surface sends the user's query to its own backend endpoint and
//! receives a loosely-typed JSON envelope back. This port hides how that
//! happens so the send cycle can be driven against HTTP or an in-memory
//! double.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct FixedGateway;
//!
//! #[async_trait]
//! impl AnalyticsGateway for FixedGateway {
//!     async fn query(&self, _surface: ChatSurface, _text: &str) -> Result<Value, TransportError> {
//!         Ok(json!({ "metric": "impressions", "value": 10000 }))
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::conversation::ChatSurface;

/// Port for backend queries.
///
/// Implementations return the decoded envelope as-is. An envelope carrying
/// an `error` field is still a successful transport; only failures to reach
/// the backend or to decode its body are errors here.
#[async_trait]
pub trait AnalyticsGateway: Send + Sync {
    /// Sends one query for the given surface.
    async fn query(&self, surface: ChatSurface, text: &str) -> Result<Value, TransportError>;
}

/// Failures reaching the backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Connection or protocol failure.
    #[error("network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status.
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Body was not valid JSON.
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

impl TransportError {
    /// Returns true if the same request might succeed later.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Timeout { .. } | TransportError::Network(_) => true,
            TransportError::Status { status, .. } => *status >= 500 || *status == 429,
            TransportError::InvalidBody(_) => false,
        }
    }
}
