//! Provider registry.
//!
//! Maps a [`GatewayType`] tag to the provider that builds its request,
//! feature set and dispatcher. Adding a provider means registering one more
//! entry here; the facade itself has no per-provider branches.

use super::traits::{GatewayInfo, GatewayProvider, GatewayType};
use crate::{GatewayError, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Registry of wired-in providers.
///
/// # Example
///
/// ```ignore
/// use paygate_lib::providers::{ProviderRegistry, GatewayType};
///
/// let registry = ProviderRegistry::with_defaults();
/// assert!(registry.get_required(GatewayType::AuthorizeNet).is_ok());
/// ```
pub struct ProviderRegistry {
    providers: RwLock<HashMap<GatewayType, Arc<dyn GatewayProvider>>>,
}

impl ProviderRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry with every built-in provider.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(Box::new(super::authorize_net::AuthorizeNetProvider::new()));
        registry
    }

    /// Registers a provider, replacing any provider with the same tag.
    pub fn register(&self, provider: Box<dyn GatewayProvider>) {
        let gateway_type = provider.gateway_type();
        let mut providers = self.providers.write().unwrap_or_else(|e| e.into_inner());
        providers.insert(gateway_type, Arc::from(provider));
    }

    /// Gets a provider by tag.
    pub fn get(&self, gateway_type: GatewayType) -> Option<Arc<dyn GatewayProvider>> {
        let providers = self.providers.read().unwrap_or_else(|e| e.into_inner());
        providers.get(&gateway_type).cloned()
    }

    /// Gets a provider, returning an error if it is not registered.
    pub fn get_required(&self, gateway_type: GatewayType) -> Result<Arc<dyn GatewayProvider>> {
        self.get(gateway_type)
            .ok_or_else(|| GatewayError::ProviderNotRegistered(gateway_type.to_string()))
    }

    /// Lists registered providers with their features, ordered by tag.
    pub fn gateways(&self) -> Vec<GatewayInfo> {
        let providers = self.providers.read().unwrap_or_else(|e| e.into_inner());
        let mut types: Vec<_> = providers.keys().copied().collect();
        types.sort();
        types
            .into_iter()
            .enumerate()
            .filter_map(|(id, gateway_type)| {
                providers.get(&gateway_type).map(|provider| GatewayInfo {
                    id,
                    gateway_type,
                    features: provider.features(),
                })
            })
            .collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_include_authorize_net() {
        let registry = ProviderRegistry::with_defaults();
        let provider = registry.get(GatewayType::AuthorizeNet).unwrap();
        assert_eq!(provider.display_name(), "Authorize.Net");
    }

    #[test]
    fn test_empty_registry_reports_missing_provider() {
        let registry = ProviderRegistry::new();
        assert!(registry.gateways().is_empty());

        let err = match registry.get_required(GatewayType::AuthorizeNet) {
            Ok(_) => panic!("expected missing provider"),
            Err(e) => e,
        };
        assert!(matches!(err, GatewayError::ProviderNotRegistered(_)));
    }

    #[test]
    fn test_register_replaces_same_tag() {
        let registry = ProviderRegistry::with_defaults();
        registry.register(Box::new(
            crate::providers::authorize_net::AuthorizeNetProvider::new(),
        ));
        assert_eq!(registry.gateways().len(), 1);
    }

    #[test]
    fn test_gateway_listing() {
        let gateways = ProviderRegistry::with_defaults().gateways();
        assert_eq!(gateways.len(), 1);
        assert_eq!(gateways[0].id, 0);
        assert_eq!(gateways[0].gateway_type, GatewayType::AuthorizeNet);
        assert!(gateways[0].features.purchase);
        assert!(gateways[0].features.void);
    }
}
