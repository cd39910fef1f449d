//! Provider traits.
//!
//! A provider is a factory for the triple a [`Gateway`](crate::Gateway) needs:
//! a request builder, a feature set, and a dispatcher.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::request::GatewayRequest;
use crate::{GatewayResponse, Result};

/// Tag selecting a wired-in provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayType {
    /// Authorize.Net.
    #[default]
    AuthorizeNet,
}

impl GatewayType {
    /// Every known provider tag.
    pub const ALL: [GatewayType; 1] = [GatewayType::AuthorizeNet];

    /// Get the tag name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorizeNet => "authorize_net",
        }
    }
}

impl fmt::Display for GatewayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Informational capability flags. Not enforced at call time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// One-step authorize and capture.
    pub purchase: bool,
    /// Capture of a prior authorization.
    pub capture: bool,
    /// Refunds.
    pub credit: bool,
    /// Voids.
    pub void: bool,
}

/// Listing entry for a registered provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayInfo {
    /// Position in the listing, unique within one registry.
    pub id: usize,
    pub gateway_type: GatewayType,
    pub features: FeatureSet,
}

/// Sends a built request and normalizes the reply.
#[async_trait]
pub trait GatewayApi: Send + Sync {
    /// Dispatch the request's declared operation.
    ///
    /// Validation, transport and normalization failures are returned as
    /// errors; no response is fabricated on failure.
    async fn send(&self, request: &dyn GatewayRequest) -> Result<GatewayResponse>;
}

/// Factory for one provider's request builder, features and dispatcher.
pub trait GatewayProvider: Send + Sync {
    /// Tag this provider answers to.
    fn gateway_type(&self) -> GatewayType;

    /// Human-readable provider name.
    fn display_name(&self) -> &str;

    /// Capability flags.
    fn features(&self) -> FeatureSet;

    /// Create a request builder seeded with credentials and defaults.
    fn create_request(&self, config: &GatewayConfig) -> Box<dyn GatewayRequest>;

    /// Create the dispatcher.
    fn create_api(&self, config: &GatewayConfig) -> Result<Arc<dyn GatewayApi>>;
}
