//! Authorize.Net provider.
//!
//! Card transactions (authorize, sale, settle, refund, void) go through the
//! form-POST gateway and are answered with a delimited line. Subscription
//! management and transaction lookups go through the JSON API.

mod api;
pub mod fields;
mod request;
pub mod response;
pub mod rpc;

pub use api::AuthorizeNetApi;
pub use request::{
    default_endpoints, required_fields, transaction_type, AuthorizeNetRequest, FORM_URL,
    LIVE_RPC_URL, TEST_RPC_URL,
};

use std::sync::Arc;

use super::{FeatureSet, GatewayApi, GatewayProvider, GatewayType};
use crate::config::GatewayConfig;
use crate::request::GatewayRequest;
use crate::Result;

/// Capability flags.
pub const FEATURES: FeatureSet = FeatureSet {
    purchase: true,
    capture: true,
    credit: true,
    void: true,
};

/// Registry entry for Authorize.Net.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuthorizeNetProvider;

impl AuthorizeNetProvider {
    pub fn new() -> Self {
        Self
    }
}

impl GatewayProvider for AuthorizeNetProvider {
    fn gateway_type(&self) -> GatewayType {
        GatewayType::AuthorizeNet
    }

    fn display_name(&self) -> &str {
        "Authorize.Net"
    }

    fn features(&self) -> FeatureSet {
        FEATURES
    }

    fn create_request(&self, config: &GatewayConfig) -> Box<dyn GatewayRequest> {
        Box::new(AuthorizeNetRequest::from_config(config))
    }

    fn create_api(&self, config: &GatewayConfig) -> Result<Arc<dyn GatewayApi>> {
        Ok(Arc::new(AuthorizeNetApi::new(config.transport.clone())?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayAuth;

    #[test]
    fn test_provider_builds_triple() {
        let provider = AuthorizeNetProvider::new();
        let config = GatewayConfig::new(GatewayType::AuthorizeNet, GatewayAuth::new("l", "k"));

        let request = provider.create_request(&config);
        assert_eq!(request.gateway_type(), GatewayType::AuthorizeNet);
        assert_eq!(request.fields().get(fields::LOGIN), Some("l"));
        assert!(provider.create_api(&config).is_ok());
        assert_eq!(provider.features(), FEATURES);
    }
}
