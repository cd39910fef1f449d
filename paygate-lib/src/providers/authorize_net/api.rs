//! Authorize.Net dispatcher.

use async_trait::async_trait;

use super::response::{normalize_reply, parse_delimited};
use super::rpc::{build_request, decode_reply};
use crate::providers::{GatewayApi, GatewayType};
use crate::request::{GatewayRequest, Protocol, RequestAction};
use crate::transport::{HttpTransport, TransportConfig};
use crate::{GatewayError, GatewayResponse, Result};

/// Sends Authorize.Net requests over the form-POST or JSON API, depending on
/// the declared operation.
#[derive(Clone, Debug)]
pub struct AuthorizeNetApi {
    transport: HttpTransport,
}

impl AuthorizeNetApi {
    /// Create a dispatcher with its own HTTP client.
    pub fn new(config: TransportConfig) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
        })
    }

    /// Create a dispatcher over an existing transport.
    pub fn with_transport(transport: HttpTransport) -> Self {
        Self { transport }
    }

    async fn send_form(
        &self,
        request: &dyn GatewayRequest,
        url: &str,
    ) -> Result<GatewayResponse> {
        request.validate()?;
        let body = request.to_post_string();

        let raw = self.transport.post_form(url, body).await?;
        parse_delimited(&raw, request.fields())
    }

    async fn send_rpc(
        &self,
        request: &dyn GatewayRequest,
        action: RequestAction,
        url: &str,
    ) -> Result<GatewayResponse> {
        request.validate()?;
        let payload = build_request(action, request.fields())?;

        let raw = self.transport.post_json(url, &payload).await?;
        let reply = decode_reply(action, &raw)?;

        #[cfg(feature = "tracing")]
        if !reply.messages.is_ok() {
            tracing::debug!(
                action = %action,
                code = reply.messages.message.first().map(|m| m.code.as_str()).unwrap_or(""),
                "structured call returned an error result"
            );
        }

        Ok(normalize_reply(action, reply, request.fields()))
    }
}

#[async_trait]
impl GatewayApi for AuthorizeNetApi {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            skip(self, request),
            fields(action = tracing::field::Empty, url = tracing::field::Empty)
        )
    )]
    async fn send(&self, request: &dyn GatewayRequest) -> Result<GatewayResponse> {
        if request.gateway_type() != GatewayType::AuthorizeNet {
            return Err(GatewayError::UnsupportedOperation(format!(
                "{} request sent to {} dispatcher",
                request.gateway_type(),
                GatewayType::AuthorizeNet
            )));
        }

        let pending = request.pending_action().ok_or_else(|| {
            GatewayError::UnsupportedOperation("no operation declared on request".to_string())
        })?;

        #[cfg(feature = "tracing")]
        {
            let span = tracing::Span::current();
            span.record("action", pending.action.as_str());
            span.record("url", pending.url.as_str());
            tracing::debug!("dispatching gateway request");
        }

        match pending.action.protocol() {
            Protocol::Form => self.send_form(request, &pending.url).await,
            Protocol::Rpc => self.send_rpc(request, pending.action, &pending.url).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GatewayAuth, ServiceMode};
    use crate::providers::authorize_net::AuthorizeNetRequest;

    fn api() -> AuthorizeNetApi {
        AuthorizeNetApi::new(TransportConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_send_without_action_is_unsupported() {
        let request = AuthorizeNetRequest::new(&GatewayAuth::new("l", "k"), ServiceMode::Test);
        let err = api().send(&request).await.unwrap_err();
        assert!(matches!(err, GatewayError::UnsupportedOperation(_)));
    }

    #[tokio::test]
    async fn test_validation_runs_before_network() {
        // The endpoint is unroutable; a validation failure proves no call was made.
        let mut request = AuthorizeNetRequest::with_endpoints(
            &GatewayAuth::new("l", "k"),
            ServiceMode::Test,
            crate::config::Endpoints::new("http://127.0.0.1:9/form", "http://127.0.0.1:9/rpc"),
        );
        request.void("");

        let err = api().send(&request).await.unwrap_err();
        assert!(matches!(err, GatewayError::Validation { .. }));
    }
}
