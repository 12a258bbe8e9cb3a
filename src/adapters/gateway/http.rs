//! HTTP gateway to the analytics backend.
//!
//! ```ignore
//! let config = HttpGatewayConfig::new("http://localhost:8000")
//!     .with_timeout(Duration::from_secs(30));
//! let gateway = HttpAnalyticsGateway::new(config)?;
//! let raw = gateway.query(ChatSurface::Publisher, "impressions").await?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::domain::conversation::ChatSurface;
use crate::ports::{AnalyticsGateway, TransportError};

/// Connection settings for [`HttpAnalyticsGateway`].
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    /// Backend root, without trailing slash (e.g. `http://localhost:8000`).
    pub base_url: String,
    pub timeout: Duration,
}

impl HttpGatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
}

/// Sends chat queries to the analytics backend over HTTP.
pub struct HttpAnalyticsGateway {
    config: HttpGatewayConfig,
    client: Client,
}

impl HttpAnalyticsGateway {
    /// Creates a gateway. Fails only if the TLS backend cannot initialise.
    pub fn new(config: HttpGatewayConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Endpoint URL for a surface.
    pub fn endpoint(&self, surface: ChatSurface) -> String {
        format!("{}/{}", self.config.base_url, surface_path(surface))
    }

    async fn send(&self, surface: ChatSurface, text: &str) -> Result<Response, TransportError> {
        self.client
            .post(self.endpoint(surface))
            .json(&QueryRequest { query: text })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    TransportError::Network(format!("Connection failed: {}", e))
                } else {
                    TransportError::Network(e.to_string())
                }
            })
    }

    async fn handle_response_status(response: Response) -> Result<Response, TransportError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(TransportError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

fn surface_path(surface: ChatSurface) -> &'static str {
    match surface {
        ChatSurface::Publisher => "publisher/query",
        ChatSurface::Advertiser => "advertiser/query",
        ChatSurface::ContentStrategy => "publisher/exa-content-strategy",
    }
}

#[async_trait]
impl AnalyticsGateway for HttpAnalyticsGateway {
    async fn query(&self, surface: ChatSurface, text: &str) -> Result<Value, TransportError> {
        tracing::debug!(surface = %surface, "Sending analytics query");

        let response = self.send(surface, text).await?;
        let response = Self::handle_response_status(response).await?;

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::InvalidBody(format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_trims_trailing_slash() {
        let config = HttpGatewayConfig::new("http://localhost:8000/");
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn with_timeout_overrides_default() {
        let config = HttpGatewayConfig::new("http://x").with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn endpoints_per_surface() {
        let gateway = HttpAnalyticsGateway::new(HttpGatewayConfig::new("http://api.test")).unwrap();
        assert_eq!(
            gateway.endpoint(ChatSurface::Publisher),
            "http://api.test/publisher/query"
        );
        assert_eq!(
            gateway.endpoint(ChatSurface::Advertiser),
            "http://api.test/advertiser/query"
        );
        assert_eq!(
            gateway.endpoint(ChatSurface::ContentStrategy),
            "http://api.test/publisher/exa-content-strategy"
        );
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let config = HttpGatewayConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2));
        let gateway = HttpAnalyticsGateway::new(config).unwrap();

        let result = gateway.query(ChatSurface::Publisher, "impressions").await;

        assert!(matches!(
            result,
            Err(TransportError::Network(_)) | Err(TransportError::Timeout { .. })
        ));
    }
}
