//! Mock analytics gateway for testing.
//!
//! Responses are queued and consumed in order; every call is recorded.
//!
//! ```ignore
//! let gateway = MockAnalyticsGateway::new()
//!     .with_response(json!({ "metric": "impressions", "value": 10000 }))
//!     .with_error(TransportError::Timeout { timeout_secs: 60 });
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::conversation::ChatSurface;
use crate::ports::{AnalyticsGateway, TransportError};

/// In-memory gateway returning pre-configured results.
#[derive(Debug, Clone, Default)]
pub struct MockAnalyticsGateway {
    responses: Arc<Mutex<VecDeque<Result<Value, TransportError>>>>,
    calls: Arc<Mutex<Vec<(ChatSurface, String)>>>,
}

impl MockAnalyticsGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful envelope.
    pub fn with_response(self, response: Value) -> Self {
        self.push(Ok(response));
        self
    }

    /// Queues a transport failure.
    pub fn with_error(self, error: TransportError) -> Self {
        self.push(Err(error));
        self
    }

    /// Queues a result after construction.
    pub fn push(&self, result: Result<Value, TransportError>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(result);
        }
    }

    /// Recorded `(surface, text)` pairs, oldest first.
    pub fn calls(&self) -> Vec<(ChatSurface, String)> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    /// Number of queued results not yet consumed.
    pub fn remaining(&self) -> usize {
        self.responses.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl AnalyticsGateway for MockAnalyticsGateway {
    async fn query(&self, surface: ChatSurface, text: &str) -> Result<Value, TransportError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((surface, text.to_string()));
        }

        let next = self
            .responses
            .lock()
            .map_err(|_| TransportError::Network("mock gateway lock poisoned".to_string()))?
            .pop_front();

        next.unwrap_or_else(|| {
            Err(TransportError::Network(
                "mock gateway has no queued response".to_string(),
            ))
        })
    }
}
