//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AnalyticsGateway` - Port for querying the analytics backend

mod analytics_gateway;

pub use analytics_gateway::{AnalyticsGateway, TransportError};
