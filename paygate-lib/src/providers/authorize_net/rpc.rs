//! Wire types for the Authorize.Net JSON API.
//!
//! Requests are built from the pending request's field buffer; field order
//! in every struct follows the provider's schema order, which the API
//! enforces.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::fields;
use crate::request::{FieldMap, RequestAction};
use crate::{GatewayError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantAuthentication {
    pub name: String,
    pub transaction_key: String,
}

/// One structured call. Serializes as `{"<operationName>": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ApiRequest {
    #[serde(rename = "ARBCreateSubscriptionRequest")]
    CreateSubscription(CreateSubscriptionRequest),
    #[serde(rename = "ARBUpdateSubscriptionRequest")]
    UpdateSubscription(UpdateSubscriptionRequest),
    #[serde(rename = "ARBCancelSubscriptionRequest")]
    CancelSubscription(CancelSubscriptionRequest),
    #[serde(rename = "getTransactionListRequest")]
    TransactionList(TransactionListRequest),
    #[serde(rename = "getTransactionDetailsRequest")]
    TransactionDetails(TransactionDetailsRequest),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    pub merchant_authentication: MerchantAuthentication,
    pub subscription: ArbSubscription,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionRequest {
    pub merchant_authentication: MerchantAuthentication,
    pub subscription_id: String,
    pub subscription: ArbSubscription,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelSubscriptionRequest {
    pub merchant_authentication: MerchantAuthentication,
    pub subscription_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListRequest {
    pub merchant_authentication: MerchantAuthentication,
    pub batch_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetailsRequest {
    pub merchant_authentication: MerchantAuthentication,
    #[serde(rename = "transId")]
    pub transaction_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbSubscription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_schedule: Option<PaymentSchedule>,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_to: Option<NameAndAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_to: Option<NameAndAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSchedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_occurrences: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_occurrences: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interval {
    pub length: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub credit_card: CreditCardBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardBlock {
    pub card_number: String,
    pub expiration_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameAndAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

// Replies

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ResultCode {
    #[default]
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessages {
    pub result_code: ResultCode,
    #[serde(default)]
    pub message: Vec<ResponseMessage>,
}

impl ResponseMessages {
    pub fn is_ok(&self) -> bool {
        self.result_code == ResultCode::Ok
    }

    /// Message texts in reply order.
    pub fn texts(&self) -> Vec<String> {
        self.message.iter().map(|m| m.text.clone()).collect()
    }
}

/// Transaction block of a details lookup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlock {
    #[serde(default, rename = "transId")]
    pub transaction_id: String,
    #[serde(default)]
    pub response_code: Option<serde_json::Value>,
    #[serde(default)]
    pub auth_code: Option<String>,
    #[serde(default, rename = "AVSResponse")]
    pub avs_response: Option<String>,
    #[serde(default)]
    pub card_code_response: Option<String>,
    #[serde(default)]
    pub auth_amount: Option<serde_json::Value>,
    #[serde(default)]
    pub settle_amount: Option<serde_json::Value>,
}

impl TransactionBlock {
    /// Settled amount if present, otherwise the authorized amount.
    pub fn amount(&self) -> Option<Decimal> {
        self.settle_amount
            .as_ref()
            .and_then(decimal_from_json)
            .filter(|amount| !amount.is_zero())
            .or_else(|| self.auth_amount.as_ref().and_then(decimal_from_json))
    }

    pub fn response_code(&self) -> String {
        match &self.response_code {
            Some(serde_json::Value::String(code)) => code.clone(),
            Some(serde_json::Value::Number(code)) => code.to_string(),
            _ => String::new(),
        }
    }
}

/// Any structured reply. Operation-specific members are optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiReply {
    pub messages: ResponseMessages,
    #[serde(default)]
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub transaction: Option<TransactionBlock>,
}

fn decimal_from_json(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        serde_json::Value::String(s) => Decimal::from_str(s).ok(),
        _ => None,
    }
}

/// Parse a structured reply.
///
/// The provider prefixes replies with a UTF-8 byte order mark, which is
/// stripped first. Unparseable text is a normalization failure; a reply
/// without a result block is a fault.
pub fn decode_reply(action: RequestAction, raw: &str) -> Result<ApiReply> {
    let body = raw.trim_start_matches('\u{feff}');

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| GatewayError::normalization(format!("invalid JSON reply: {}", e), raw))?;

    if value.get("messages").is_none() {
        return Err(GatewayError::RpcFault {
            operation: action.to_string(),
            reason: format!("reply has no result block: {}", body),
        });
    }

    serde_json::from_value(value)
        .map_err(|e| GatewayError::normalization(format!("unexpected reply shape: {}", e), raw))
}

fn require<'a>(map: &'a FieldMap, key: &str) -> Result<&'a str> {
    map.get_non_empty(key).ok_or_else(|| GatewayError::Validation {
        fields: vec![key.to_string()],
    })
}

fn optional(map: &FieldMap, key: &str) -> Option<String> {
    map.get_non_empty(key).map(str::to_string)
}

fn authentication(map: &FieldMap) -> Result<MerchantAuthentication> {
    let missing = map.missing(&fields::CREDENTIALS);
    if !missing.is_empty() {
        return Err(GatewayError::Validation { fields: missing });
    }
    Ok(MerchantAuthentication {
        name: require(map, fields::LOGIN)?.to_string(),
        transaction_key: require(map, fields::TRAN_KEY)?.to_string(),
    })
}

/// Name and address block, or `None` when no part beyond the default
/// country was queued.
fn name_and_address(map: &FieldMap, keys: [&str; 8]) -> Option<NameAndAddress> {
    let [first_name, last_name, company, address, city, state, zip, country] = keys;
    let block = NameAndAddress {
        first_name: optional(map, first_name),
        last_name: optional(map, last_name),
        company: optional(map, company),
        address: optional(map, address),
        city: optional(map, city),
        state: optional(map, state),
        zip: optional(map, zip),
        country: None,
    };
    if block == NameAndAddress::default() {
        return None;
    }
    Some(NameAndAddress {
        country: optional(map, country),
        ..block
    })
}

const BILL_TO: [&str; 8] = [
    fields::FIRST_NAME,
    fields::LAST_NAME,
    fields::COMPANY,
    fields::ADDRESS,
    fields::CITY,
    fields::STATE,
    fields::ZIP,
    fields::COUNTRY,
];

const SHIP_TO: [&str; 8] = [
    fields::SHIP_FIRST_NAME,
    fields::SHIP_LAST_NAME,
    fields::SHIP_COMPANY,
    fields::SHIP_ADDRESS,
    fields::SHIP_CITY,
    fields::SHIP_STATE,
    fields::SHIP_ZIP,
    fields::SHIP_COUNTRY,
];

/// Subscription body shared by create and update. The schedule is filled in
/// by the caller.
fn subscription_body(map: &FieldMap) -> Result<ArbSubscription> {
    let payment = match map.get_non_empty(fields::CARD_NUMBER) {
        Some(number) => Some(Payment {
            credit_card: CreditCardBlock {
                card_number: number.to_string(),
                expiration_date: require(map, fields::EXPIRATION)?.to_string(),
                card_code: optional(map, fields::CARD_CODE),
            },
        }),
        None => None,
    };

    let order = Order {
        invoice_number: optional(map, fields::INVOICE_NUMBER),
        description: optional(map, fields::DESCRIPTION),
    };

    let customer = CustomerBlock {
        id: optional(map, fields::CUSTOMER_ID),
        email: optional(map, fields::EMAIL),
        phone_number: optional(map, fields::PHONE),
        fax_number: optional(map, fields::FAX),
    };

    let trial_amount = optional(map, fields::TRIAL_AMOUNT);

    Ok(ArbSubscription {
        name: optional(map, fields::SUBSCRIPTION_NAME),
        payment_schedule: None,
        amount: require(map, fields::AMOUNT)?.to_string(),
        trial_amount,
        payment,
        order: (order != Order::default()).then_some(order),
        customer: (customer != CustomerBlock::default()).then_some(customer),
        bill_to: name_and_address(map, BILL_TO),
        ship_to: name_and_address(map, SHIP_TO),
    })
}

/// Trial occurrences travel with the trial amount or not at all.
fn trial_occurrences(map: &FieldMap) -> Option<String> {
    optional(map, fields::TRIAL_AMOUNT).and(optional(map, fields::TRIAL_OCCURRENCES))
}

/// Build the structured call for an RPC operation from the field buffer.
pub fn build_request(action: RequestAction, map: &FieldMap) -> Result<ApiRequest> {
    let merchant_authentication = authentication(map)?;

    match action {
        RequestAction::CreateSubscription => {
            let mut subscription = subscription_body(map)?;
            subscription.payment_schedule = Some(PaymentSchedule {
                interval: Some(Interval {
                    length: require(map, fields::BILLING_CYCLES)?.to_string(),
                    unit: require(map, fields::BILLING_INTERVAL)?.to_string(),
                }),
                start_date: Some(require(map, fields::START_DATE)?.to_string()),
                total_occurrences: Some(require(map, fields::TOTAL_OCCURRENCES)?.to_string()),
                trial_occurrences: trial_occurrences(map),
            });
            Ok(ApiRequest::CreateSubscription(CreateSubscriptionRequest {
                merchant_authentication,
                subscription,
            }))
        }
        RequestAction::UpdateSubscription => {
            let mut subscription = subscription_body(map)?;
            // Only the trial length may change after creation.
            subscription.payment_schedule = trial_occurrences(map).map(|occurrences| PaymentSchedule {
                trial_occurrences: Some(occurrences),
                ..Default::default()
            });
            Ok(ApiRequest::UpdateSubscription(UpdateSubscriptionRequest {
                merchant_authentication,
                subscription_id: require(map, fields::SUBSCRIPTION_ID)?.to_string(),
                subscription,
            }))
        }
        RequestAction::CancelSubscription => {
            Ok(ApiRequest::CancelSubscription(CancelSubscriptionRequest {
                merchant_authentication,
                subscription_id: require(map, fields::SUBSCRIPTION_ID)?.to_string(),
            }))
        }
        RequestAction::GetTransactions => Ok(ApiRequest::TransactionList(TransactionListRequest {
            merchant_authentication,
            batch_id: require(map, fields::BATCH_ID)?.to_string(),
        })),
        RequestAction::GetTransactionDetails => {
            Ok(ApiRequest::TransactionDetails(TransactionDetailsRequest {
                merchant_authentication,
                transaction_id: require(map, fields::TRANSACTION_ID)?.to_string(),
            }))
        }
        other => Err(GatewayError::UnsupportedOperation(format!(
            "{} is not a structured operation",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_fields() -> FieldMap {
        let mut map = FieldMap::new();
        map.queue(fields::LOGIN, "login");
        map.queue(fields::TRAN_KEY, "key");
        map.queue(fields::COUNTRY, "US");
        map.queue(fields::SHIP_COUNTRY, "US");
        map
    }

    fn subscription_fields() -> FieldMap {
        let mut map = base_fields();
        map.queue(fields::SUBSCRIPTION_NAME, "Gold");
        map.queue(fields::DESCRIPTION, "Monthly gold");
        map.queue(fields::AMOUNT, "9.99");
        map.queue(fields::CARD_NUMBER, "4111111111111111");
        map.queue(fields::EXPIRATION, "2025-12");
        map.queue(fields::BILLING_CYCLES, "1");
        map.queue(fields::BILLING_INTERVAL, "months");
        map.queue(fields::TOTAL_OCCURRENCES, "12");
        map.queue(fields::START_DATE, "2026-01-15");
        map
    }

    #[test]
    fn test_create_subscription_payload() {
        let request = build_request(RequestAction::CreateSubscription, &subscription_fields()).unwrap();
        let value = serde_json::to_value(&request).unwrap();

        let body = &value["ARBCreateSubscriptionRequest"];
        assert_eq!(body["merchantAuthentication"]["name"], "login");
        assert_eq!(body["merchantAuthentication"]["transactionKey"], "key");
        assert_eq!(body["subscription"]["name"], "Gold");
        assert_eq!(body["subscription"]["amount"], "9.99");
        assert_eq!(
            body["subscription"]["paymentSchedule"],
            json!({
                "interval": {"length": "1", "unit": "months"},
                "startDate": "2026-01-15",
                "totalOccurrences": "12"
            })
        );
        assert!(body["subscription"].get("trialAmount").is_none());
        assert_eq!(body["subscription"]["order"]["description"], "Monthly gold");
        assert!(body["subscription"].get("billTo").is_none());
        assert!(body["subscription"]["payment"]["creditCard"].get("cardCode").is_none());
    }

    #[test]
    fn test_create_subscription_field_order() {
        let request = build_request(RequestAction::CreateSubscription, &subscription_fields()).unwrap();
        let text = serde_json::to_string(&request).unwrap();

        let auth = text.find("merchantAuthentication").unwrap();
        let name = text.find("\"name\":\"Gold\"").unwrap();
        let schedule = text.find("paymentSchedule").unwrap();
        let amount = text.find("\"amount\"").unwrap();
        let payment = text.find("\"payment\"").unwrap();
        assert!(auth < name && name < schedule && schedule < amount && amount < payment);
    }

    #[test]
    fn test_create_subscription_with_trial_and_billing() {
        let mut map = subscription_fields();
        map.queue(fields::TRIAL_AMOUNT, "0.00");
        map.queue(fields::TRIAL_OCCURRENCES, "2");
        map.queue(fields::FIRST_NAME, "Ada");
        map.queue(fields::EMAIL, "ada@example.com");

        let value = serde_json::to_value(
            build_request(RequestAction::CreateSubscription, &map).unwrap(),
        )
        .unwrap();
        let subscription = &value["ARBCreateSubscriptionRequest"]["subscription"];
        assert_eq!(subscription["trialAmount"], "0.00");
        assert_eq!(subscription["paymentSchedule"]["trialOccurrences"], "2");
        assert_eq!(subscription["billTo"], json!({"firstName": "Ada", "country": "US"}));
        assert_eq!(subscription["customer"], json!({"email": "ada@example.com"}));
        assert!(subscription.get("shipTo").is_none());
    }

    #[test]
    fn test_fax_and_company_reach_their_blocks() {
        let mut map = subscription_fields();
        map.queue(fields::FAX, "555-0199");
        map.queue(fields::COMPANY, "Analytical Engines Ltd");
        map.queue(fields::ADDRESS, "1 Main");
        map.queue(fields::SHIP_COMPANY, "Difference Works");

        let text = serde_json::to_string(
            &build_request(RequestAction::CreateSubscription, &map).unwrap(),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let subscription = &value["ARBCreateSubscriptionRequest"]["subscription"];

        assert_eq!(subscription["customer"], json!({"faxNumber": "555-0199"}));
        assert_eq!(
            subscription["billTo"],
            json!({"company": "Analytical Engines Ltd", "address": "1 Main", "country": "US"})
        );
        assert_eq!(
            subscription["shipTo"],
            json!({"company": "Difference Works", "country": "US"})
        );

        // Schema order: company sits between the name and the address.
        let company = text.find("\"company\":\"Analytical").unwrap();
        let address = text.find("\"address\":\"1 Main\"").unwrap();
        assert!(company < address);
    }

    #[test]
    fn test_update_payload_never_carries_schedule() {
        let mut map = subscription_fields();
        map.queue(fields::SUBSCRIPTION_ID, "100");

        let value = serde_json::to_value(
            build_request(RequestAction::UpdateSubscription, &map).unwrap(),
        )
        .unwrap();
        let body = &value["ARBUpdateSubscriptionRequest"];
        assert_eq!(body["subscriptionId"], "100");
        assert!(body["subscription"].get("paymentSchedule").is_none());

        map.queue(fields::TRIAL_AMOUNT, "1.00");
        map.queue(fields::TRIAL_OCCURRENCES, "3");
        let value = serde_json::to_value(
            build_request(RequestAction::UpdateSubscription, &map).unwrap(),
        )
        .unwrap();
        assert_eq!(
            value["ARBUpdateSubscriptionRequest"]["subscription"]["paymentSchedule"],
            json!({"trialOccurrences": "3"})
        );
    }

    #[test]
    fn test_lookup_payloads() {
        let mut map = base_fields();
        map.queue(fields::TRANSACTION_ID, "60001");
        map.queue(fields::BATCH_ID, "777");

        let details = serde_json::to_value(
            build_request(RequestAction::GetTransactionDetails, &map).unwrap(),
        )
        .unwrap();
        assert_eq!(details["getTransactionDetailsRequest"]["transId"], "60001");

        let list = serde_json::to_value(build_request(RequestAction::GetTransactions, &map).unwrap())
            .unwrap();
        assert_eq!(list["getTransactionListRequest"]["batchId"], "777");
    }

    #[test]
    fn test_build_rejects_form_operations_and_missing_fields() {
        assert!(matches!(
            build_request(RequestAction::Sale, &base_fields()),
            Err(GatewayError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            build_request(RequestAction::CancelSubscription, &base_fields()),
            Err(GatewayError::Validation { .. })
        ));
        assert!(matches!(
            build_request(RequestAction::CancelSubscription, &FieldMap::new()),
            Err(GatewayError::Validation { .. })
        ));
    }

    #[test]
    fn test_decode_strips_bom() {
        let raw = "\u{feff}{\"subscriptionId\":\"100\",\"messages\":{\"resultCode\":\"Ok\",\"message\":[{\"code\":\"I00001\",\"text\":\"Successful.\"}]}}";
        let reply = decode_reply(RequestAction::CreateSubscription, raw).unwrap();
        assert!(reply.messages.is_ok());
        assert_eq!(reply.subscription_id.as_deref(), Some("100"));
        assert_eq!(reply.messages.texts(), vec!["Successful.".to_string()]);
    }

    #[test]
    fn test_decode_failures() {
        assert!(matches!(
            decode_reply(RequestAction::CancelSubscription, "<html>"),
            Err(GatewayError::Normalization { .. })
        ));
        assert!(matches!(
            decode_reply(RequestAction::CancelSubscription, "{\"ok\":true}"),
            Err(GatewayError::RpcFault { .. })
        ));
    }

    #[test]
    fn test_transaction_block_amounts() {
        let block: TransactionBlock = serde_json::from_value(json!({
            "transId": "60001",
            "responseCode": 1,
            "authAmount": 19.99,
            "settleAmount": 0
        }))
        .unwrap();
        assert_eq!(block.response_code(), "1");
        assert_eq!(block.amount(), Some(Decimal::new(1999, 2)));
    }
}
