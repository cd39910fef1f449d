//! Gateway facade.
//!
//! Resolves the configured provider from a [`ProviderRegistry`], holds the
//! credentials and mode fixed at construction, and hands built requests to
//! the provider's dispatcher.

use std::fmt;
use std::sync::Arc;

use crate::config::{GatewayAuth, GatewayConfig, ServiceMode};
use crate::providers::{FeatureSet, GatewayApi, GatewayProvider, GatewayType, ProviderRegistry};
use crate::request::GatewayRequest;
use crate::{GatewayError, GatewayResponse, Result};

/// Entry point for building and sending gateway requests.
///
/// # Example
///
/// ```ignore
/// use paygate_lib::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let config = GatewayConfig::new(GatewayType::AuthorizeNet, GatewayAuth::new("login", "key"));
/// let mut gateway = Gateway::new(config)?;
///
/// gateway
///     .create_request()
///     .add_invoice("INV-1001")
///     .sale("4111111111111111", "1225", "123", dec!(19.99));
/// let response = gateway.send().await?;
/// assert!(response.approved);
/// ```
pub struct Gateway {
    config: GatewayConfig,
    provider: Arc<dyn GatewayProvider>,
    api: Arc<dyn GatewayApi>,
    request: Box<dyn GatewayRequest>,
}

impl Gateway {
    /// Build a gateway over the built-in providers.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        Self::with_registry(config, &ProviderRegistry::with_defaults())
    }

    /// Build a gateway resolving its provider from `registry`.
    pub fn with_registry(config: GatewayConfig, registry: &ProviderRegistry) -> Result<Self> {
        let provider = registry.get_required(config.gateway_type)?;
        let api = provider.create_api(&config)?;
        let request = provider.create_request(&config);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            gateway = %config.gateway_type,
            mode = config.mode.as_str(),
            "gateway created"
        );

        Ok(Self {
            config,
            provider,
            api,
            request,
        })
    }

    /// The live request builder, for fluent chaining.
    pub fn create_request(&mut self) -> &mut dyn GatewayRequest {
        self.request.as_mut()
    }

    /// A fresh request builder, independent of the live one.
    pub fn new_request(&self) -> Box<dyn GatewayRequest> {
        self.provider.create_request(&self.config)
    }

    /// Discard the live builder and start a fresh one.
    pub fn reset_request(&mut self) -> &mut dyn GatewayRequest {
        self.request = self.new_request();
        self.request.as_mut()
    }

    /// Dispatch the live builder.
    ///
    /// Sending is terminal: the live builder is replaced with a fresh one
    /// whatever the outcome.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(gateway = %self.config.gateway_type)))]
    pub async fn send(&mut self) -> Result<GatewayResponse> {
        let fresh = self.new_request();
        let request = std::mem::replace(&mut self.request, fresh);
        self.send_request(request.as_ref()).await
    }

    /// Dispatch a request built by [`new_request`](Self::new_request).
    pub async fn send_request(&self, request: &dyn GatewayRequest) -> Result<GatewayResponse> {
        if request.gateway_type() != self.config.gateway_type {
            return Err(GatewayError::UnsupportedOperation(format!(
                "{} request sent through {} gateway",
                request.gateway_type(),
                self.config.gateway_type
            )));
        }
        self.api.send(request).await
    }

    /// Provider capability flags.
    pub fn features(&self) -> FeatureSet {
        self.provider.features()
    }

    /// Provider display name.
    pub fn display_name(&self) -> &str {
        self.provider.display_name()
    }

    pub fn gateway_type(&self) -> GatewayType {
        self.config.gateway_type
    }

    pub fn mode(&self) -> ServiceMode {
        self.config.mode
    }

    pub fn auth(&self) -> &GatewayAuth {
        &self.config.auth
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("config", &self.config)
            .field("provider", &self.provider.display_name())
            .field("request", &self.request)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestAction;
    use rust_decimal_macros::dec;

    fn config() -> GatewayConfig {
        GatewayConfig::new(GatewayType::AuthorizeNet, GatewayAuth::new("login", "key"))
    }

    #[test]
    fn test_gateway_exposes_provider_and_settings() {
        let gateway = Gateway::new(config().with_mode(ServiceMode::Live)).unwrap();
        assert_eq!(gateway.gateway_type(), GatewayType::AuthorizeNet);
        assert_eq!(gateway.mode(), ServiceMode::Live);
        assert_eq!(gateway.auth().login, "login");
        assert_eq!(gateway.display_name(), "Authorize.Net");
        assert!(gateway.features().capture);
    }

    #[test]
    fn test_missing_provider() {
        let err = Gateway::with_registry(config(), &ProviderRegistry::new()).unwrap_err();
        assert!(matches!(err, GatewayError::ProviderNotRegistered(_)));
    }

    #[test]
    fn test_live_builder_and_fresh_builders_are_independent() {
        let mut gateway = Gateway::new(config()).unwrap();
        gateway
            .create_request()
            .add_invoice("INV-1")
            .sale("4111111111111111", "1225", "123", dec!(1));
        assert_eq!(gateway.create_request().action(), Some(RequestAction::Sale));

        let fresh = gateway.new_request();
        assert!(fresh.action().is_none());
        assert_eq!(gateway.create_request().action(), Some(RequestAction::Sale));

        assert!(gateway.reset_request().action().is_none());
    }

    #[test]
    fn test_debug_hides_credentials() {
        let gateway = Gateway::new(config()).unwrap();
        let printed = format!("{:?}", gateway);
        assert!(printed.contains("Authorize.Net"));
        assert!(!printed.contains("\"key\""));
    }
}
