//! `reqwest`-backed transport for the gateway endpoints.

use serde::Serialize;
use std::time::Duration;

use super::config::TransportConfig;
use crate::{GatewayError, Result};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP transport for the gateway endpoints. One request, one reply, no retries.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    config: TransportConfig,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from the given configuration.
    pub fn new(config: TransportConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str());

        if config.accept_invalid_certs {
            #[cfg(feature = "tracing")]
            tracing::warn!("TLS certificate validation disabled for gateway transport");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|e| {
            GatewayError::Configuration(format!("failed to build HTTP client: {}", e))
        })?;

        Ok(Self { config, client })
    }

    /// Get the configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// POST a URL-encoded form body and return the reply text.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, body), fields(body_len = body.len())))]
    pub async fn post_form(&self, url: &str, body: String) -> Result<String> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(url, e))?;

        self.read_body(response).await
    }

    /// POST a JSON body and return the reply text.
    ///
    /// A body that cannot be encoded fails with
    /// [`GatewayError::Serialization`] before anything is sent.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, body)))]
    pub async fn post_json<B>(&self, url: &str, body: &B) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        let payload = serde_json::to_vec(body)?;
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(payload)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(url, e))?;

        self.read_body(response).await
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }

    fn map_reqwest_error(&self, url: &str, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::ConnectionTimeout {
                operation: format!("POST {}", url),
                timeout_ms: self.config.timeout_secs * 1000,
            }
        } else if e.is_connect() {
            GatewayError::ConnectionFailed {
                target: url.to_string(),
                reason: e.to_string(),
            }
        } else {
            GatewayError::Transport(format!("request to {} failed: {}", url, e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_builds_with_defaults() {
        let transport = HttpTransport::new(TransportConfig::default()).unwrap();
        assert_eq!(transport.config().timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_unencodable_json_body_fails_before_sending() {
        let transport = HttpTransport::new(TransportConfig::default()).unwrap();
        let mut body = std::collections::BTreeMap::new();
        body.insert((1, 2), "map keys must be strings");

        let err = transport
            .post_json("http://127.0.0.1:9/rpc", &body)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Serialization(_)), "{:?}", err);
        assert_eq!(err.code(), crate::GatewayErrorCode::Serialization);
    }

    #[test]
    fn test_transport_builds_with_cert_override() {
        let config = TransportConfig::default().danger_accept_invalid_certs(true);
        let transport = HttpTransport::new(config).unwrap();
        assert!(transport.config().accept_invalid_certs);
    }
}
