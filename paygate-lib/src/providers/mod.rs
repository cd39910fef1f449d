//! Wired-in payment providers.
//!
//! # Architecture
//!
//! - **Traits**: [`GatewayProvider`] builds the request/features/dispatcher
//!   triple, [`GatewayApi`] sends a built request.
//! - **Registry**: [`ProviderRegistry`] maps a [`GatewayType`] tag to its provider.
//! - **Built-in providers**: [`authorize_net`].

pub mod authorize_net;
mod registry;
mod traits;

pub use registry::ProviderRegistry;
pub use traits::{FeatureSet, GatewayApi, GatewayInfo, GatewayProvider, GatewayType};

/// Lists the built-in providers and their capability flags.
pub fn available_gateways() -> Vec<GatewayInfo> {
    ProviderRegistry::with_defaults().gateways()
}
