//! Test fixtures and reply builders.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::{Endpoints, GatewayAuth, GatewayConfig, ServiceMode};
use crate::model::{
    BillingInterval, CreditCard, Customer, Shipping, Subscription, SubscriptionUpdate, Trial,
};
use crate::providers::authorize_net::response::column;
use crate::providers::GatewayType;

/// Collection of commonly used test fixtures.
pub struct TestFixtures;

impl TestFixtures {
    pub const VISA: &'static str = "4111111111111111";
    pub const EXPIRATION: &'static str = "1225";
    pub const CVV: &'static str = "123";

    pub const LOGIN: &'static str = "test-login";
    pub const TRANSACTION_KEY: &'static str = "test-transaction-key";

    pub fn card() -> CreditCard {
        CreditCard::new(Self::VISA, "2025-12", Self::CVV)
    }
}

/// Credentials used throughout the tests.
pub fn test_auth() -> GatewayAuth {
    GatewayAuth::new(TestFixtures::LOGIN, TestFixtures::TRANSACTION_KEY)
}

/// Test-mode configuration pointed at a stub server.
pub fn test_config(base_url: &str) -> GatewayConfig {
    GatewayConfig::new(GatewayType::AuthorizeNet, test_auth())
        .with_mode(ServiceMode::Test)
        .with_endpoints(Endpoints::new(
            format!("{}/gateway/transact.dll", base_url),
            format!("{}/xml/v1/request.api", base_url),
        ))
        .with_timeout(5)
}

fn delimited_reply(
    response_code: &str,
    reason_text: &str,
    transaction_id: &str,
    amount: &str,
    card_code: &str,
) -> String {
    let mut cols = vec![""; 40];
    cols[column::RESPONSE_CODE] = response_code;
    cols[1] = "1";
    cols[2] = response_code;
    cols[column::REASON_TEXT] = reason_text;
    cols[column::AUTHORIZATION_CODE] = if response_code == "1" { "000000" } else { "" };
    cols[column::AVS_CODE] = "Y";
    cols[column::TRANSACTION_ID] = transaction_id;
    cols[column::AMOUNT] = amount;
    cols[column::CARD_CODE] = card_code;
    let mut line = cols.join("|");
    line.push('|');
    line
}

/// Full-width approved form reply.
pub fn approved_reply(transaction_id: &str, amount: &str) -> String {
    delimited_reply(
        "1",
        "This transaction has been approved.",
        transaction_id,
        amount,
        "M",
    )
}

/// Full-width declined form reply.
pub fn declined_reply(transaction_id: &str, amount: &str) -> String {
    delimited_reply(
        "2",
        "This transaction has been declined.",
        transaction_id,
        amount,
        "N",
    )
}

/// Structured reply with the given result code and `(code, text)` messages.
pub fn structured_reply(ok: bool, messages: &[(&str, &str)]) -> serde_json::Value {
    let message: Vec<_> = messages
        .iter()
        .map(|(code, text)| serde_json::json!({"code": code, "text": text}))
        .collect();
    serde_json::json!({
        "messages": {
            "resultCode": if ok { "Ok" } else { "Error" },
            "message": message
        }
    })
}

/// Successful subscription creation reply.
pub fn subscription_created_reply(subscription_id: &str) -> serde_json::Value {
    let mut reply = structured_reply(true, &[("I00001", "Successful.")]);
    reply["subscriptionId"] = serde_json::Value::from(subscription_id);
    reply
}

pub fn sample_customer() -> Customer {
    Customer {
        id: "CUST-1".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        company: String::new(),
        address: "12 St James's Square".to_string(),
        city: "London".to_string(),
        state: "LND".to_string(),
        zip: "SW1Y 4JH".to_string(),
        phone: "555-0100".to_string(),
        email: "ada@example.com".to_string(),
        fax: String::new(),
        country: String::new(),
    }
}

pub fn sample_shipping() -> Shipping {
    Shipping {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        company: String::new(),
        address: "1 Analytical Way".to_string(),
        city: "London".to_string(),
        state: "LND".to_string(),
        zip: "EC1A 1BB".to_string(),
        country: "GB".to_string(),
    }
}

pub fn sample_subscription(trial: Option<Trial>) -> Subscription {
    Subscription {
        name: "Gold plan".to_string(),
        description: "Monthly gold membership".to_string(),
        amount: Decimal::new(999, 2),
        card: TestFixtures::card(),
        billing_cycles: 1,
        billing_interval: BillingInterval::Months,
        total_occurrences: 12,
        starts_on: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap_or_default(),
        trial,
    }
}

pub fn sample_update(subscription_id: &str, trial: Option<Trial>) -> SubscriptionUpdate {
    SubscriptionUpdate {
        id: subscription_id.to_string(),
        name: "Gold plan".to_string(),
        description: "Monthly gold membership".to_string(),
        amount: Decimal::new(1299, 2),
        card: TestFixtures::card(),
        trial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replies_are_full_width() {
        let approved = approved_reply("12345", "19.99");
        assert_eq!(approved.split('|').count(), 41);
        assert!(approved.starts_with("1|1|1|This transaction has been approved.|000000|Y|12345|"));
        assert!(declined_reply("1", "1.00").starts_with("2|"));
    }
}
