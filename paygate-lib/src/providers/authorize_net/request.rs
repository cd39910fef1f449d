//! Authorize.Net request builder.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::fields::{self, transaction_type as tx_type};
use crate::config::{Endpoints, GatewayAuth, GatewayConfig, ServiceMode};
use crate::model::{CreditCard, Customer, Shipping, Subscription, SubscriptionUpdate, Trial};
use crate::providers::GatewayType;
use crate::request::{FieldMap, GatewayRequest, PendingAction, Protocol, RequestAction};
use crate::{GatewayError, Result};

/// Form-POST endpoint. The provider uses one host for both modes and relies
/// on `x_test_request` to flag test traffic.
pub const FORM_URL: &str = "https://secure.authorize.net/gateway/transact.dll";

/// Structured API endpoint, sandbox.
pub const TEST_RPC_URL: &str = "https://apitest.authorize.net/xml/v1/request.api";

/// Structured API endpoint, production.
pub const LIVE_RPC_URL: &str = "https://api.authorize.net/xml/v1/request.api";

/// Provider endpoints for a service mode.
pub fn default_endpoints(mode: ServiceMode) -> Endpoints {
    match mode {
        ServiceMode::Test => Endpoints::new(FORM_URL, TEST_RPC_URL),
        ServiceMode::Live => Endpoints::new(FORM_URL, LIVE_RPC_URL),
    }
}

/// The provider's `x_type` value for an operation kind.
pub fn transaction_type(action: RequestAction) -> &'static str {
    match action {
        RequestAction::Sale => tx_type::AUTH_CAPTURE,
        RequestAction::Authorize => tx_type::AUTH_ONLY,
        RequestAction::Settle => tx_type::PRIOR_AUTH_CAPTURE,
        RequestAction::Refund => tx_type::CREDIT,
        RequestAction::Void => tx_type::VOID,
        RequestAction::GetTransactions => tx_type::GET_TRANSACTIONS,
        RequestAction::GetTransactionDetails => tx_type::GET_TRANSACTION_DETAILS,
        RequestAction::CreateSubscription => tx_type::CREATE_SUBSCRIPTION,
        RequestAction::UpdateSubscription => tx_type::UPDATE_SUBSCRIPTION,
        RequestAction::CancelSubscription => tx_type::CANCEL_SUBSCRIPTION,
    }
}

/// Fields an operation needs on top of the credentials.
pub fn required_fields(action: RequestAction) -> &'static [&'static str] {
    match action {
        RequestAction::Sale | RequestAction::Authorize => {
            &[fields::CARD_NUMBER, fields::EXPIRATION, fields::AMOUNT]
        }
        RequestAction::Settle | RequestAction::Void => &[fields::TRANSACTION_ID],
        RequestAction::Refund => &[fields::TRANSACTION_ID, fields::AMOUNT, fields::CARD_NUMBER],
        RequestAction::GetTransactions => &[fields::BATCH_ID],
        RequestAction::GetTransactionDetails => &[fields::TRANSACTION_ID],
        RequestAction::CreateSubscription => &[
            fields::AMOUNT,
            fields::CARD_NUMBER,
            fields::EXPIRATION,
            fields::BILLING_CYCLES,
            fields::BILLING_INTERVAL,
            fields::TOTAL_OCCURRENCES,
            fields::START_DATE,
        ],
        RequestAction::UpdateSubscription => &[fields::SUBSCRIPTION_ID, fields::AMOUNT],
        RequestAction::CancelSubscription => &[fields::SUBSCRIPTION_ID],
    }
}

/// Wire form of an amount: two decimal places.
///
/// Finer amounts are written out exactly, never truncated; `validate`
/// rejects them.
pub(crate) fn format_amount(amount: Decimal) -> String {
    let amount = amount.normalize();
    if amount.scale() <= 2 {
        format!("{:.2}", amount)
    } else {
        amount.to_string()
    }
}

/// Amount fields, and whether zero is an acceptable value.
const AMOUNT_FIELDS: [(&str, bool); 2] = [(fields::AMOUNT, false), (fields::TRIAL_AMOUNT, true)];

fn check_amount(key: &str, value: &str, allow_zero: bool) -> Result<()> {
    let amount = Decimal::from_str(value).map_err(|_| {
        GatewayError::invalid_data(key, format!("'{}' is not a decimal amount", value))
    })?;
    if amount.normalize().scale() > 2 {
        return Err(GatewayError::invalid_data(
            key,
            format!("{} has more than two decimal places", value),
        ));
    }
    if amount < Decimal::ZERO || (amount.is_zero() && !allow_zero) {
        return Err(GatewayError::invalid_data(
            key,
            format!("{} is not a chargeable amount", value),
        ));
    }
    Ok(())
}

const SCHEDULE_FIELDS: [&str; 4] = [
    fields::BILLING_CYCLES,
    fields::BILLING_INTERVAL,
    fields::TOTAL_OCCURRENCES,
    fields::START_DATE,
];

const TRIAL_FIELDS: [&str; 2] = [fields::TRIAL_AMOUNT, fields::TRIAL_OCCURRENCES];

/// Pending Authorize.Net request.
///
/// Seeded with credentials and the provider defaults; owned by one logical
/// transaction.
#[derive(Clone, Debug)]
pub struct AuthorizeNetRequest {
    fields: FieldMap,
    pending: Option<PendingAction>,
    endpoints: Endpoints,
}

impl AuthorizeNetRequest {
    /// Create a request against the provider's endpoints for `mode`.
    pub fn new(auth: &GatewayAuth, mode: ServiceMode) -> Self {
        Self::with_endpoints(auth, mode, default_endpoints(mode))
    }

    /// Create a request against explicit endpoints.
    pub fn with_endpoints(auth: &GatewayAuth, mode: ServiceMode, endpoints: Endpoints) -> Self {
        let mut map = FieldMap::new();
        map.queue(fields::LOGIN, auth.login.as_str());
        map.queue(fields::TRAN_KEY, auth.transaction_key.as_str());
        if mode.is_test() {
            map.queue(fields::TEST_REQUEST, "TRUE");
        }
        map.queue(fields::DELIM_DATA, "TRUE");
        map.queue(fields::DELIM_CHAR, fields::DELIMITER.to_string());
        map.queue(fields::RELAY_RESPONSE, "FALSE");
        map.queue(fields::EMAIL_CUSTOMER, "FALSE");
        map.queue(fields::METHOD, "CC");
        map.queue(fields::COUNTRY, "US");
        map.queue(fields::SHIP_COUNTRY, "US");
        map.queue(fields::DUPLICATE_WINDOW, fields::DUPLICATE_WINDOW_SECS.to_string());

        Self {
            fields: map,
            pending: None,
            endpoints,
        }
    }

    /// Create a request from a gateway configuration.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let endpoints = config
            .endpoints
            .clone()
            .unwrap_or_else(|| default_endpoints(config.mode));
        Self::with_endpoints(&config.auth, config.mode, endpoints)
    }

    /// Endpoints this request resolves operations against.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Declare the operation: kind, endpoint and `x_type` together.
    fn set_api_action(&mut self, action: RequestAction) {
        let url = match action.protocol() {
            Protocol::Form => self.endpoints.form_url.clone(),
            Protocol::Rpc => self.endpoints.rpc_url.clone(),
        };
        self.pending = Some(PendingAction { action, url });
        self.fields
            .queue(fields::TRANSACTION_TYPE, transaction_type(action));
    }

    fn queue_present(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            self.fields.queue(key, value);
        }
    }

    fn queue_card(&mut self, number: &str, expiration: &str, cvv: &str) {
        self.fields.queue(fields::CARD_NUMBER, number);
        self.fields.queue(fields::EXPIRATION, expiration);
        if cvv.is_empty() {
            self.fields.remove(fields::CARD_CODE);
        } else {
            self.fields.queue(fields::CARD_CODE, cvv);
        }
    }

    fn queue_trial(&mut self, trial: Option<&Trial>) {
        match trial {
            Some(trial) => {
                self.fields
                    .queue(fields::TRIAL_AMOUNT, format_amount(trial.amount));
                self.fields
                    .queue(fields::TRIAL_OCCURRENCES, trial.occurrences.to_string());
            }
            None => {
                for key in TRIAL_FIELDS {
                    self.fields.remove(key);
                }
            }
        }
    }

    fn charge(&mut self, action: RequestAction, card: &CreditCard, amount: Decimal) {
        self.set_api_action(action);
        self.queue_card(&card.number, &card.expiration, &card.cvv);
        self.fields.queue(fields::AMOUNT, format_amount(amount));
    }
}

impl GatewayRequest for AuthorizeNetRequest {
    fn gateway_type(&self) -> GatewayType {
        GatewayType::AuthorizeNet
    }

    fn fields(&self) -> &FieldMap {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut FieldMap {
        &mut self.fields
    }

    fn pending_action(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    fn add_customer(&mut self, customer: &Customer) -> &mut dyn GatewayRequest {
        self.queue_present(fields::CUSTOMER_ID, &customer.id);
        self.queue_present(fields::FIRST_NAME, &customer.first_name);
        self.queue_present(fields::LAST_NAME, &customer.last_name);
        self.queue_present(fields::COMPANY, &customer.company);
        self.queue_present(fields::ADDRESS, &customer.address);
        self.queue_present(fields::CITY, &customer.city);
        self.queue_present(fields::STATE, &customer.state);
        self.queue_present(fields::ZIP, &customer.zip);
        self.queue_present(fields::PHONE, &customer.phone);
        self.queue_present(fields::EMAIL, &customer.email);
        self.queue_present(fields::FAX, &customer.fax);
        self.queue_present(fields::COUNTRY, &customer.country);
        self
    }

    fn add_shipping(&mut self, shipping: &Shipping) -> &mut dyn GatewayRequest {
        self.queue_present(fields::SHIP_FIRST_NAME, &shipping.first_name);
        self.queue_present(fields::SHIP_LAST_NAME, &shipping.last_name);
        self.queue_present(fields::SHIP_COMPANY, &shipping.company);
        self.queue_present(fields::SHIP_ADDRESS, &shipping.address);
        self.queue_present(fields::SHIP_CITY, &shipping.city);
        self.queue_present(fields::SHIP_STATE, &shipping.state);
        self.queue_present(fields::SHIP_ZIP, &shipping.zip);
        self.queue_present(fields::SHIP_COUNTRY, &shipping.country);
        self
    }

    fn add_merchant_value(&mut self, key: &str, value: &str) -> &mut dyn GatewayRequest {
        self.fields.queue(key, value);
        self
    }

    fn add_invoice(&mut self, invoice_number: &str) -> &mut dyn GatewayRequest {
        self.fields.queue(fields::INVOICE_NUMBER, invoice_number);
        self
    }

    // Not sent: the form API settles in the merchant account's currency.
    fn add_currency(&mut self, _currency: &str) -> &mut dyn GatewayRequest {
        self
    }

    fn authorize(
        &mut self,
        card_number: &str,
        expiration: &str,
        cvv: &str,
        amount: Decimal,
    ) -> &mut dyn GatewayRequest {
        let card = CreditCard::new(card_number, expiration, cvv);
        self.charge(RequestAction::Authorize, &card, amount);
        self
    }

    fn sale(
        &mut self,
        card_number: &str,
        expiration: &str,
        cvv: &str,
        amount: Decimal,
    ) -> &mut dyn GatewayRequest {
        let card = CreditCard::new(card_number, expiration, cvv);
        self.charge(RequestAction::Sale, &card, amount);
        self
    }

    fn settle(&mut self, transaction_id: &str, amount: Decimal) -> &mut dyn GatewayRequest {
        self.set_api_action(RequestAction::Settle);
        self.fields.queue(fields::TRANSACTION_ID, transaction_id);
        if amount > Decimal::ZERO {
            self.fields.queue(fields::AMOUNT, format_amount(amount));
        } else {
            self.fields.remove(fields::AMOUNT);
        }
        self
    }

    fn void(&mut self, transaction_id: &str) -> &mut dyn GatewayRequest {
        self.set_api_action(RequestAction::Void);
        self.fields.queue(fields::TRANSACTION_ID, transaction_id);
        self
    }

    fn refund(
        &mut self,
        transaction_id: &str,
        amount: Decimal,
        card_number: &str,
    ) -> &mut dyn GatewayRequest {
        self.set_api_action(RequestAction::Refund);
        self.fields.queue(fields::TRANSACTION_ID, transaction_id);
        self.fields.queue(fields::CARD_NUMBER, card_number);
        self.fields.queue(fields::AMOUNT, format_amount(amount));
        self
    }

    fn get_transactions(&mut self, batch_id: &str) -> &mut dyn GatewayRequest {
        self.set_api_action(RequestAction::GetTransactions);
        self.fields.queue(fields::BATCH_ID, batch_id);
        self
    }

    fn get_transaction_details(&mut self, transaction_id: &str) -> &mut dyn GatewayRequest {
        self.set_api_action(RequestAction::GetTransactionDetails);
        self.fields.queue(fields::TRANSACTION_ID, transaction_id);
        self
    }

    fn subscribe(&mut self, subscription: &Subscription) -> &mut dyn GatewayRequest {
        self.set_api_action(RequestAction::CreateSubscription);
        self.fields
            .queue(fields::SUBSCRIPTION_NAME, subscription.name.as_str());
        self.fields
            .queue(fields::DESCRIPTION, subscription.description.as_str());
        self.fields
            .queue(fields::AMOUNT, format_amount(subscription.amount));
        let card = &subscription.card;
        self.queue_card(&card.number, &card.expiration, &card.cvv);
        self.fields
            .queue(fields::BILLING_CYCLES, subscription.billing_cycles.to_string());
        self.fields
            .queue(fields::BILLING_INTERVAL, subscription.billing_interval.as_str());
        self.fields.queue(
            fields::TOTAL_OCCURRENCES,
            subscription.total_occurrences.to_string(),
        );
        self.fields.queue(
            fields::START_DATE,
            subscription.starts_on.format("%Y-%m-%d").to_string(),
        );
        self.queue_trial(subscription.trial.as_ref());
        self
    }

    fn update_subscription(&mut self, update: &SubscriptionUpdate) -> &mut dyn GatewayRequest {
        self.set_api_action(RequestAction::UpdateSubscription);
        self.fields.queue(fields::SUBSCRIPTION_ID, update.id.as_str());
        self.fields
            .queue(fields::SUBSCRIPTION_NAME, update.name.as_str());
        self.fields
            .queue(fields::DESCRIPTION, update.description.as_str());
        self.fields.queue(fields::AMOUNT, format_amount(update.amount));
        let card = &update.card;
        self.queue_card(&card.number, &card.expiration, &card.cvv);
        // The provider rejects schedule changes after creation.
        for key in SCHEDULE_FIELDS {
            self.fields.remove(key);
        }
        self.queue_trial(update.trial.as_ref());
        self
    }

    fn cancel_subscription(&mut self, subscription_id: &str) -> &mut dyn GatewayRequest {
        self.set_api_action(RequestAction::CancelSubscription);
        self.fields.queue(fields::SUBSCRIPTION_ID, subscription_id);
        self
    }

    fn validate(&self) -> Result<()> {
        let action = self.action().ok_or_else(|| {
            GatewayError::UnsupportedOperation("no operation declared on request".to_string())
        })?;

        let mut missing = self.fields.missing(&fields::CREDENTIALS);
        missing.extend(self.fields.missing(required_fields(action)));
        if !missing.is_empty() {
            return Err(GatewayError::Validation { fields: missing });
        }

        // The reply is split on this character; the provider substitutes its
        // own default when it is empty.
        match self.fields.get(fields::DELIM_CHAR) {
            Some(delimiter) if delimiter.chars().count() == 1 => {}
            other => {
                return Err(GatewayError::invalid_data(
                    fields::DELIM_CHAR,
                    format!("expected a single character, got {:?}", other.unwrap_or("")),
                ))
            }
        }

        for (key, allow_zero) in AMOUNT_FIELDS {
            if let Some(value) = self.fields.get_non_empty(key) {
                check_amount(key, value, allow_zero)?;
            }
        }
        Ok(())
    }

    fn to_post_string(&self) -> String {
        self.fields.to_post_string_without(&fields::INTERNAL)
    }
}
