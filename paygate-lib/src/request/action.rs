//! Operation kinds and the wire protocol each one travels over.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The logical transaction type a request declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestAction {
    /// Authorize only; funds are captured by a later settle.
    Authorize,
    /// Capture a prior authorization.
    Settle,
    /// Authorize and capture in one step.
    Sale,
    /// Credit back a settled transaction.
    Refund,
    /// Cancel an unsettled transaction.
    Void,
    /// List the transactions in a settlement batch.
    GetTransactions,
    /// Look up a single transaction.
    GetTransactionDetails,
    /// Start recurring billing.
    CreateSubscription,
    /// Change an existing recurring billing.
    UpdateSubscription,
    /// Stop recurring billing.
    CancelSubscription,
}

/// How a request reaches the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protocol {
    /// URL-encoded form POST answered with a delimited line.
    Form,
    /// Authenticated structured call answered with a structured reply.
    Rpc,
}

impl RequestAction {
    /// Every operation kind, in declaration order.
    pub const ALL: [RequestAction; 10] = [
        Self::Authorize,
        Self::Settle,
        Self::Sale,
        Self::Refund,
        Self::Void,
        Self::GetTransactions,
        Self::GetTransactionDetails,
        Self::CreateSubscription,
        Self::UpdateSubscription,
        Self::CancelSubscription,
    ];

    /// The protocol family this operation is dispatched over.
    pub fn protocol(&self) -> Protocol {
        match self {
            Self::Authorize | Self::Settle | Self::Sale | Self::Refund | Self::Void => {
                Protocol::Form
            }
            Self::GetTransactions
            | Self::GetTransactionDetails
            | Self::CreateSubscription
            | Self::UpdateSubscription
            | Self::CancelSubscription => Protocol::Rpc,
        }
    }

    /// Stable name for logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authorize => "authorize",
            Self::Settle => "settle",
            Self::Sale => "sale",
            Self::Refund => "refund",
            Self::Void => "void",
            Self::GetTransactions => "get_transactions",
            Self::GetTransactionDetails => "get_transaction_details",
            Self::CreateSubscription => "create_subscription",
            Self::UpdateSubscription => "update_subscription",
            Self::CancelSubscription => "cancel_subscription",
        }
    }
}

impl fmt::Display for RequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation kind and endpoint, always set together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingAction {
    /// Declared operation.
    pub action: RequestAction,
    /// Endpoint the operation is sent to.
    pub url: String,
}
