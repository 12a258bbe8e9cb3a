//! Adapters - Implementations of port interfaces.
//!
//! - `gateway` - analytics backend transport (reqwest, in-memory mock)

pub mod gateway;

pub use gateway::{HttpAnalyticsGateway, HttpGatewayConfig, MockAnalyticsGateway};
