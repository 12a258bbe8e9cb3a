//! Analytics gateway adapters.

mod http;
mod mock;

pub use http::{HttpAnalyticsGateway, HttpGatewayConfig};
pub use mock::MockAnalyticsGateway;
