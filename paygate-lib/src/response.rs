//! Provider-agnostic result of a dispatched request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Normalized gateway response.
///
/// Produced only from a fully parsed reply; there is no partial form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// True when the provider accepted the operation.
    pub approved: bool,
    /// Amount of the request, or the provider's figure when the request carried none.
    pub amount: Decimal,
    pub transaction_id: String,
    pub authorization_code: String,
    pub response_code: String,
    /// Human-readable reason text.
    pub message: String,
    /// Raw reply line, or the joined message list for structured replies.
    pub full_response: String,
    pub avs_code: String,
    /// Description of `avs_code`.
    pub avs_response: String,
    pub ccv_code: String,
    /// Description of `ccv_code`.
    pub ccv_response: String,
    /// Set by subscription operations that produced or targeted an id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    /// Every provider message of a subscription operation, in order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_messages: Option<Vec<String>>,
}

impl GatewayResponse {
    /// Returns true when the provider declined or rejected the operation.
    pub fn is_declined(&self) -> bool {
        !self.approved
    }
}
