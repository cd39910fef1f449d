//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use paygate_lib::prelude::*;
//! ```
//!
//! ## What's Included
//!
//! - Facade and configuration: `Gateway`, `GatewayConfig`, `GatewayAuth`, `ServiceMode`
//! - Error types: `GatewayError`, `GatewayErrorCode`, `Result`
//! - Builder trait and inputs: `GatewayRequest`, `Customer`, `Subscription`, ...
//! - Providers: `GatewayType`, `ProviderRegistry`

// Facade and configuration
pub use crate::config::{Endpoints, GatewayAuth, GatewayConfig, ServiceMode};
pub use crate::gateway::Gateway;

// Error handling
pub use crate::errors::{GatewayError, GatewayErrorCode};
pub use crate::Result;

// Requests
pub use crate::model::{
    BillingInterval, CreditCard, Customer, Shipping, Subscription, SubscriptionUpdate, Trial,
};
pub use crate::request::{GatewayRequest, RequestAction};
pub use crate::response::GatewayResponse;

// Providers
pub use crate::providers::{
    available_gateways, FeatureSet, GatewayApi, GatewayProvider, GatewayType, ProviderRegistry,
};

// Transport
pub use crate::transport::TransportConfig;
