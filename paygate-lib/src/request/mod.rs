//! Pending requests and the fluent builder interface.
//!
//! A request accumulates wire fields for exactly one operation. Each
//! operation-declaring method sets the operation kind and endpoint together,
//! so a second declaration replaces the first rather than stacking with it.
//! Required-field checks are deferred to [`GatewayRequest::validate`], which
//! the dispatcher runs right before serializing a form POST.
//!
//! # Example
//!
//! ```ignore
//! use paygate_lib::{Gateway, GatewayConfig};
//! use rust_decimal_macros::dec;
//!
//! let mut gateway = Gateway::new(config)?;
//! gateway
//!     .create_request()
//!     .add_invoice("INV-1001")
//!     .sale("4111111111111111", "1225", "123", dec!(19.99));
//! let response = gateway.send().await?;
//! ```

mod action;
mod fields;

pub use action::{PendingAction, Protocol, RequestAction};
pub use fields::FieldMap;

use rust_decimal::Decimal;
use std::fmt;

use crate::model::{Customer, Shipping, Subscription, SubscriptionUpdate};
use crate::providers::GatewayType;
use crate::Result;

/// Fluent request builder implemented once per provider.
///
/// Every builder method returns the same request so calls can be chained.
/// A request is owned by one logical transaction; build a fresh one for each
/// operation rather than sharing it.
pub trait GatewayRequest: fmt::Debug + Send + Sync {
    /// Provider this request is shaped for.
    fn gateway_type(&self) -> GatewayType;

    /// Queued wire fields.
    fn fields(&self) -> &FieldMap;

    /// Mutable access to the queued wire fields.
    fn fields_mut(&mut self) -> &mut FieldMap;

    /// Declared operation and endpoint, if any.
    fn pending_action(&self) -> Option<&PendingAction>;

    /// Queue billing customer fields. Does not declare an operation.
    fn add_customer(&mut self, customer: &Customer) -> &mut dyn GatewayRequest;

    /// Queue shipping fields. Does not declare an operation.
    fn add_shipping(&mut self, shipping: &Shipping) -> &mut dyn GatewayRequest;

    /// Queue a raw field under a caller-chosen name.
    fn add_merchant_value(&mut self, key: &str, value: &str) -> &mut dyn GatewayRequest;

    /// Queue the merchant invoice number.
    fn add_invoice(&mut self, invoice_number: &str) -> &mut dyn GatewayRequest;

    /// Set the currency. Empty means `USD`. Providers may ignore it.
    fn add_currency(&mut self, currency: &str) -> &mut dyn GatewayRequest;

    /// Authorize `amount` on the card without capturing it.
    fn authorize(
        &mut self,
        card_number: &str,
        expiration: &str,
        cvv: &str,
        amount: Decimal,
    ) -> &mut dyn GatewayRequest;

    /// Authorize and capture `amount` in one step.
    fn sale(
        &mut self,
        card_number: &str,
        expiration: &str,
        cvv: &str,
        amount: Decimal,
    ) -> &mut dyn GatewayRequest;

    /// Capture a prior authorization. A zero amount captures the full authorized amount.
    fn settle(&mut self, transaction_id: &str, amount: Decimal) -> &mut dyn GatewayRequest;

    /// Cancel an unsettled transaction.
    fn void(&mut self, transaction_id: &str) -> &mut dyn GatewayRequest;

    /// Refund a settled transaction. The card number is required again by the provider.
    fn refund(
        &mut self,
        transaction_id: &str,
        amount: Decimal,
        card_number: &str,
    ) -> &mut dyn GatewayRequest;

    /// List the transactions of a settlement batch.
    fn get_transactions(&mut self, batch_id: &str) -> &mut dyn GatewayRequest;

    /// Look up one transaction.
    fn get_transaction_details(&mut self, transaction_id: &str) -> &mut dyn GatewayRequest;

    /// Start recurring billing.
    fn subscribe(&mut self, subscription: &Subscription) -> &mut dyn GatewayRequest;

    /// Change recurring billing. Schedule fields are never sent.
    fn update_subscription(&mut self, update: &SubscriptionUpdate) -> &mut dyn GatewayRequest;

    /// Stop recurring billing.
    fn cancel_subscription(&mut self, subscription_id: &str) -> &mut dyn GatewayRequest;

    /// Check that every field required by the declared operation is present and non-empty.
    ///
    /// Fails with [`GatewayError::Validation`](crate::GatewayError::Validation)
    /// naming all offending fields at once.
    fn validate(&self) -> Result<()>;

    /// Declared operation kind.
    fn action(&self) -> Option<RequestAction> {
        self.pending_action().map(|pending| pending.action)
    }

    /// Endpoint the declared operation is sent to.
    fn post_url(&self) -> Option<&str> {
        self.pending_action().map(|pending| pending.url.as_str())
    }

    /// Insert or overwrite a field. Always returns `true`.
    fn queue(&mut self, key: &str, value: &str) -> bool {
        self.fields_mut().queue(key, value)
    }

    /// URL-encoded form body of the queued fields.
    fn to_post_string(&self) -> String {
        self.fields().to_post_string()
    }

    /// Capture the full authorized amount.
    fn settle_full(&mut self, transaction_id: &str) -> &mut dyn GatewayRequest {
        self.settle(transaction_id, Decimal::ZERO)
    }
}
