//! Gateway configuration: provider, credentials, mode, endpoints and transport.
//!
//! # Environment Variables
//!
//! [`GatewayConfig::from_env`] reads:
//! - `PAYGATE_LOGIN` - API login id (required)
//! - `PAYGATE_TRANSACTION_KEY` - transaction key (required)
//! - `PAYGATE_SIGNATURE` - signature key (optional)
//! - `PAYGATE_MODE` - `test` or `live` (default `test`)
//! - `PAYGATE_TIMEOUT_SECS` - request timeout (default 30)
//! - `PAYGATE_FORM_URL` / `PAYGATE_RPC_URL` - endpoint overrides, both or neither

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::providers::GatewayType;
use crate::transport::TransportConfig;
use crate::{GatewayError, Result};

/// Which of the provider's two environments requests are sent to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceMode {
    /// Requests are flagged as tests.
    #[default]
    Test,
    /// Real charges.
    Live,
}

impl ServiceMode {
    /// Returns true in test mode.
    pub fn is_test(&self) -> bool {
        matches!(self, Self::Test)
    }

    /// Get the mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Live => "live",
        }
    }
}

impl FromStr for ServiceMode {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "test" => Ok(Self::Test),
            "live" => Ok(Self::Live),
            other => Err(GatewayError::Configuration(format!(
                "unknown service mode '{}', expected 'test' or 'live'",
                other
            ))),
        }
    }
}

/// Merchant credentials. Fixed once the gateway is built.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayAuth {
    /// API login id.
    pub login: String,
    /// Transaction key.
    pub transaction_key: String,
    /// Signature key, for providers that sign replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl GatewayAuth {
    /// Create credentials without a signature key.
    pub fn new(login: impl Into<String>, transaction_key: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            transaction_key: transaction_key.into(),
            signature: None,
        }
    }

    /// Set the signature key.
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }
}

impl fmt::Debug for GatewayAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayAuth")
            .field("login", &self.login)
            .field("transaction_key", &"<redacted>")
            .field("signature", &self.signature.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Endpoint pair for one environment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// Form-POST endpoint for card transactions.
    pub form_url: String,
    /// Structured endpoint for lookups and subscriptions.
    pub rpc_url: String,
}

impl Endpoints {
    /// Create an endpoint pair.
    pub fn new(form_url: impl Into<String>, rpc_url: impl Into<String>) -> Self {
        Self {
            form_url: form_url.into(),
            rpc_url: rpc_url.into(),
        }
    }
}

/// Complete configuration for a [`Gateway`](crate::Gateway).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Provider to wire in.
    #[serde(default)]
    pub gateway_type: GatewayType,

    /// Merchant credentials.
    pub auth: GatewayAuth,

    /// Test or live environment.
    #[serde(default)]
    pub mode: ServiceMode,

    /// Endpoint override. `None` uses the provider's endpoints for `mode`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Endpoints>,

    /// HTTP transport settings.
    #[serde(default)]
    pub transport: TransportConfig,
}

impl GatewayConfig {
    /// Create a test-mode configuration for the given provider.
    pub fn new(gateway_type: GatewayType, auth: GatewayAuth) -> Self {
        Self {
            gateway_type,
            auth,
            mode: ServiceMode::default(),
            endpoints: None,
            transport: TransportConfig::default(),
        }
    }

    /// Set the service mode.
    pub fn with_mode(mut self, mode: ServiceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Override the provider endpoints.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Set the transport configuration.
    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.transport.timeout_secs = secs;
        self
    }

    /// Load configuration from `PAYGATE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| GatewayError::Configuration(format!("{} is not set", key)))
        };

        let mut auth = GatewayAuth::new(
            required("PAYGATE_LOGIN")?,
            required("PAYGATE_TRANSACTION_KEY")?,
        );
        if let Some(signature) = lookup("PAYGATE_SIGNATURE").filter(|v| !v.is_empty()) {
            auth = auth.with_signature(signature);
        }

        let mut config = Self::new(GatewayType::default(), auth);

        if let Some(mode) = lookup("PAYGATE_MODE") {
            config.mode = mode.parse()?;
        }

        if let Some(timeout) = lookup("PAYGATE_TIMEOUT_SECS") {
            config.transport.timeout_secs = timeout.trim().parse().map_err(|_| {
                GatewayError::Configuration(format!(
                    "PAYGATE_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    timeout
                ))
            })?;
        }

        match (lookup("PAYGATE_FORM_URL"), lookup("PAYGATE_RPC_URL")) {
            (Some(form_url), Some(rpc_url)) => {
                config.endpoints = Some(Endpoints::new(form_url, rpc_url));
            }
            (None, None) => {}
            _ => {
                return Err(GatewayError::Configuration(
                    "PAYGATE_FORM_URL and PAYGATE_RPC_URL must be set together".to_string(),
                ))
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_minimal() {
        let config = GatewayConfig::from_lookup(lookup_from(&[
            ("PAYGATE_LOGIN", "login"),
            ("PAYGATE_TRANSACTION_KEY", "key"),
        ]))
        .unwrap();

        assert_eq!(config.auth.login, "login");
        assert_eq!(config.mode, ServiceMode::Test);
        assert_eq!(config.transport.timeout_secs, 30);
        assert!(config.endpoints.is_none());
    }

    #[test]
    fn test_from_lookup_full() {
        let config = GatewayConfig::from_lookup(lookup_from(&[
            ("PAYGATE_LOGIN", "login"),
            ("PAYGATE_TRANSACTION_KEY", "key"),
            ("PAYGATE_SIGNATURE", "sig"),
            ("PAYGATE_MODE", "LIVE"),
            ("PAYGATE_TIMEOUT_SECS", "10"),
            ("PAYGATE_FORM_URL", "http://localhost:1/form"),
            ("PAYGATE_RPC_URL", "http://localhost:1/rpc"),
        ]))
        .unwrap();

        assert_eq!(config.mode, ServiceMode::Live);
        assert_eq!(config.auth.signature.as_deref(), Some("sig"));
        assert_eq!(config.transport.timeout_secs, 10);
        assert_eq!(
            config.endpoints,
            Some(Endpoints::new("http://localhost:1/form", "http://localhost:1/rpc"))
        );
    }

    #[test]
    fn test_from_lookup_errors() {
        assert!(GatewayConfig::from_lookup(lookup_from(&[("PAYGATE_LOGIN", "login")])).is_err());
        assert!(GatewayConfig::from_lookup(lookup_from(&[
            ("PAYGATE_LOGIN", "login"),
            ("PAYGATE_TRANSACTION_KEY", "key"),
            ("PAYGATE_MODE", "sandbox"),
        ]))
        .is_err());
        assert!(GatewayConfig::from_lookup(lookup_from(&[
            ("PAYGATE_LOGIN", "login"),
            ("PAYGATE_TRANSACTION_KEY", "key"),
            ("PAYGATE_FORM_URL", "http://localhost:1/form"),
        ]))
        .is_err());
    }

    #[test]
    fn test_auth_debug_redacts_key() {
        let auth = GatewayAuth::new("login", "secret-key").with_signature("sig");
        let printed = format!("{:?}", auth);
        assert!(printed.contains("login"));
        assert!(!printed.contains("secret-key"));
        assert!(!printed.contains("\"sig\""));
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: GatewayConfig = serde_json::from_str(
            r#"{"auth": {"login": "l", "transaction_key": "k"}, "mode": "live"}"#,
        )
        .unwrap();
        assert_eq!(config.gateway_type, GatewayType::AuthorizeNet);
        assert_eq!(config.mode, ServiceMode::Live);
        assert_eq!(config.transport, TransportConfig::default());
    }
}
