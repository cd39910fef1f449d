//! Normalization of Authorize.Net replies.
//!
//! Form POSTs are answered with one delimited line in the provider's fixed
//! column order. Structured calls are answered with a result code and a
//! message list, plus operation-specific members.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::fields;
use super::rpc::ApiReply;
use crate::request::{FieldMap, RequestAction};
use crate::{GatewayError, GatewayResponse, Result};

/// Zero-based column positions of the delimited reply.
pub mod column {
    pub const RESPONSE_CODE: usize = 0;
    pub const REASON_TEXT: usize = 3;
    pub const AUTHORIZATION_CODE: usize = 4;
    pub const AVS_CODE: usize = 5;
    pub const TRANSACTION_ID: usize = 6;
    pub const AMOUNT: usize = 9;
    pub const CARD_CODE: usize = 38;
}

/// Replies shorter than this cannot carry a transaction id.
pub const MIN_COLUMNS: usize = column::TRANSACTION_ID + 1;

/// Response code of an approved transaction.
pub const APPROVED: &str = "1";

/// Description of an address verification result code.
pub fn avs_description(code: &str) -> &'static str {
    match code {
        "A" => "Address (Street) matches, ZIP does not",
        "B" => "Address information not provided for AVS check",
        "E" => "AVS error",
        "G" => "Non-U.S. Card Issuing Bank",
        "N" => "No Match on Address (Street) or ZIP",
        "P" => "AVS not applicable for this transaction",
        "R" => "Retry - System unavailable or timed out",
        "S" => "Service not supported by issuer",
        "U" => "Address information is unavailable",
        "W" => "Nine digit ZIP matches, Address (Street) does not",
        "X" => "Address (Street) and nine digit ZIP match",
        "Y" => "Address (Street) and five digit ZIP match",
        "Z" => "Five digit ZIP matches, Address (Street) does not",
        _ => "",
    }
}

/// Description of a card code (CVV) result code.
pub fn card_code_description(code: &str) -> &'static str {
    match code {
        "M" => "Match",
        "N" => "No Match",
        "P" => "Not Processed",
        "S" => "Should have been present",
        "U" => "Issuer unable to process request",
        _ => "",
    }
}

/// Delimiter the request asked the provider to use.
pub fn delimiter_of(request: &FieldMap) -> char {
    request
        .get(fields::DELIM_CHAR)
        .and_then(|d| d.chars().next())
        .unwrap_or(fields::DELIMITER)
}

fn request_amount(request: &FieldMap) -> Option<Decimal> {
    request
        .get_non_empty(fields::AMOUNT)
        .and_then(|amount| Decimal::from_str(amount).ok())
}

/// Normalize a delimited form reply.
///
/// The amount is the request's own amount when it carried one; the
/// provider's echo is used only otherwise.
pub fn parse_delimited(raw: &str, request: &FieldMap) -> Result<GatewayResponse> {
    let delimiter = delimiter_of(request);
    let line = raw.trim_end_matches(['\r', '\n']);
    let columns: Vec<&str> = line.split(delimiter).collect();

    if line.is_empty() || columns.len() < MIN_COLUMNS {
        return Err(GatewayError::normalization(
            format!(
                "expected at least {} delimited columns, got {}",
                MIN_COLUMNS,
                if line.is_empty() { 0 } else { columns.len() }
            ),
            raw,
        ));
    }

    let col = |index: usize| columns.get(index).map(|c| c.trim()).unwrap_or("");

    let amount = request_amount(request)
        .or_else(|| Decimal::from_str(col(column::AMOUNT)).ok())
        .unwrap_or(Decimal::ZERO);

    let avs_code = col(column::AVS_CODE);
    let ccv_code = col(column::CARD_CODE);

    Ok(GatewayResponse {
        approved: col(column::RESPONSE_CODE) == APPROVED,
        amount,
        transaction_id: col(column::TRANSACTION_ID).to_string(),
        authorization_code: col(column::AUTHORIZATION_CODE).to_string(),
        response_code: col(column::RESPONSE_CODE).to_string(),
        message: col(column::REASON_TEXT).to_string(),
        full_response: line.trim_end_matches(delimiter).to_string(),
        avs_code: avs_code.to_string(),
        avs_response: avs_description(avs_code).to_string(),
        ccv_code: ccv_code.to_string(),
        ccv_response: card_code_description(ccv_code).to_string(),
        subscription_id: None,
        subscription_messages: None,
    })
}

/// Normalize a structured reply for the operation that produced it.
pub fn normalize_reply(action: RequestAction, reply: ApiReply, request: &FieldMap) -> GatewayResponse {
    let delimiter = delimiter_of(request).to_string();
    let texts = reply.messages.texts();
    let first = reply.messages.message.first();

    let mut response = GatewayResponse {
        approved: reply.messages.is_ok(),
        amount: request_amount(request).unwrap_or(Decimal::ZERO),
        response_code: first.map(|m| m.code.clone()).unwrap_or_default(),
        message: first.map(|m| m.text.clone()).unwrap_or_default(),
        full_response: texts.join(&delimiter),
        ..Default::default()
    };

    match action {
        RequestAction::CreateSubscription => {
            if response.approved {
                if let Some(id) = reply.subscription_id.filter(|id| !id.is_empty()) {
                    response.transaction_id = id.clone();
                    response.subscription_id = Some(id);
                }
            }
            response.subscription_messages = Some(texts);
        }
        RequestAction::UpdateSubscription | RequestAction::CancelSubscription => {
            let id = request
                .get_non_empty(fields::SUBSCRIPTION_ID)
                .map(str::to_string);
            if response.approved {
                response.transaction_id = id.clone().unwrap_or_default();
            }
            response.subscription_id = id;
            response.subscription_messages = Some(texts);
        }
        RequestAction::GetTransactionDetails => {
            if let Some(transaction) = reply.transaction {
                let code = transaction.response_code();
                if !code.is_empty() {
                    response.approved = response.approved && code == APPROVED;
                    response.response_code = code;
                }
                if let Some(amount) = transaction.amount() {
                    response.amount = amount;
                }
                response.authorization_code = transaction.auth_code.unwrap_or_default();
                response.avs_code = transaction.avs_response.unwrap_or_default();
                response.avs_response = avs_description(&response.avs_code).to_string();
                response.ccv_code = transaction.card_code_response.unwrap_or_default();
                response.ccv_response = card_code_description(&response.ccv_code).to_string();
                response.transaction_id = transaction.transaction_id;
            }
        }
        _ => {}
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::authorize_net::rpc::decode_reply;
    use rust_decimal_macros::dec;

    fn reply_line(code: &str, trans_id: &str, amount: &str, cvv: &str) -> String {
        let mut cols = vec![""; 40];
        cols[column::RESPONSE_CODE] = code;
        cols[1] = "1";
        cols[2] = if code == "1" { "1" } else { "2" };
        cols[column::REASON_TEXT] = if code == "1" {
            "This transaction has been approved."
        } else {
            "This transaction has been declined."
        };
        cols[column::AUTHORIZATION_CODE] = "AUTH01";
        cols[column::AVS_CODE] = "Y";
        cols[column::TRANSACTION_ID] = trans_id;
        cols[column::AMOUNT] = amount;
        cols[column::CARD_CODE] = cvv;
        let mut line = cols.join("|");
        line.push('|');
        line
    }

    fn request_with_amount(amount: Option<&str>) -> FieldMap {
        let mut map = FieldMap::new();
        map.queue(fields::DELIM_CHAR, "|");
        if let Some(amount) = amount {
            map.queue(fields::AMOUNT, amount);
        }
        map
    }

    #[test]
    fn test_approved_reply() {
        let raw = reply_line("1", "12345", "19.99", "M");
        let response = parse_delimited(&raw, &request_with_amount(Some("19.99"))).unwrap();

        assert!(response.approved);
        assert_eq!(response.transaction_id, "12345");
        assert_eq!(response.authorization_code, "AUTH01");
        assert_eq!(response.response_code, "1");
        assert_eq!(response.message, "This transaction has been approved.");
        assert_eq!(response.amount, dec!(19.99));
        assert_eq!(response.avs_code, "Y");
        assert_eq!(response.avs_response, "Address (Street) and five digit ZIP match");
        assert_eq!(response.ccv_code, "M");
        assert_eq!(response.ccv_response, "Match");
        assert_eq!(response.full_response, raw.trim_end_matches('|'));
    }

    #[test]
    fn test_short_approved_line() {
        let raw = "1|1|1|This transaction has been approved.|000000|Y|12345|";
        let response = parse_delimited(raw, &request_with_amount(Some("19.99"))).unwrap();

        assert!(response.approved);
        assert_eq!(response.transaction_id, "12345");
        assert_eq!(response.authorization_code, "000000");
        assert_eq!(response.amount, dec!(19.99));
        assert_eq!(
            response.full_response,
            "1|1|1|This transaction has been approved.|000000|Y|12345"
        );
        assert_eq!(response.ccv_code, "");
    }

    #[test]
    fn test_declined_reply_still_parsed() {
        let raw = reply_line("2", "12346", "5.00", "N");
        let response = parse_delimited(&raw, &request_with_amount(Some("5.00"))).unwrap();

        assert!(!response.approved);
        assert!(response.is_declined());
        assert_eq!(response.transaction_id, "12346");
        assert_eq!(response.response_code, "2");
        assert_eq!(response.ccv_response, "No Match");
    }

    #[test]
    fn test_amount_prefers_request() {
        let raw = reply_line("1", "1", "99.00", "");
        let response = parse_delimited(&raw, &request_with_amount(Some("19.99"))).unwrap();
        assert_eq!(response.amount, dec!(19.99));

        let response = parse_delimited(&raw, &request_with_amount(None)).unwrap();
        assert_eq!(response.amount, dec!(99.00));
    }

    #[test]
    fn test_short_reply_is_normalization_error() {
        let raw = "1|1|1|approved|";
        match parse_delimited(raw, &request_with_amount(None)) {
            Err(GatewayError::Normalization { raw: kept, .. }) => assert_eq!(kept, raw),
            other => panic!("expected normalization error, got {:?}", other),
        }
        assert!(parse_delimited("", &request_with_amount(None)).is_err());
    }

    #[test]
    fn test_custom_delimiter_and_trailing_newline() {
        let mut request = request_with_amount(None);
        request.queue(fields::DELIM_CHAR, ",");
        let raw = "1,1,1,ok,A1,P,777,,,10.00\r\n";

        let response = parse_delimited(raw, &request).unwrap();
        assert_eq!(response.transaction_id, "777");
        assert_eq!(response.amount, dec!(10.00));
        assert_eq!(response.avs_response, "AVS not applicable for this transaction");
        assert_eq!(response.ccv_code, "");
        assert_eq!(response.full_response, "1,1,1,ok,A1,P,777,,,10.00");
    }

    #[test]
    fn test_unknown_codes_have_empty_descriptions() {
        assert_eq!(avs_description("Q"), "");
        assert_eq!(card_code_description(""), "");
    }

    fn reply(json: &str) -> ApiReply {
        decode_reply(RequestAction::CreateSubscription, json).unwrap()
    }

    #[test]
    fn test_create_subscription_success() {
        let reply = reply(
            r#"{"subscriptionId":"100","messages":{"resultCode":"Ok","message":[{"code":"I00001","text":"Successful."}]}}"#,
        );
        let response = normalize_reply(RequestAction::CreateSubscription, reply, &request_with_amount(Some("9.99")));

        assert!(response.approved);
        assert_eq!(response.transaction_id, "100");
        assert_eq!(response.subscription_id.as_deref(), Some("100"));
        assert_eq!(response.response_code, "I00001");
        assert_eq!(response.message, "Successful.");
        assert_eq!(response.amount, dec!(9.99));
        assert_eq!(response.subscription_messages, Some(vec!["Successful.".to_string()]));
    }

    #[test]
    fn test_create_subscription_failure_joins_messages() {
        let reply = reply(
            r#"{"messages":{"resultCode":"Error","message":[{"code":"E00012","text":"Duplicate."},{"code":"E00013","text":"Bad card."}]}}"#,
        );
        let response = normalize_reply(RequestAction::CreateSubscription, reply, &request_with_amount(None));

        assert!(!response.approved);
        assert_eq!(response.transaction_id, "");
        assert!(response.subscription_id.is_none());
        assert_eq!(response.full_response, "Duplicate.|Bad card.");
        assert_eq!(
            response.subscription_messages,
            Some(vec!["Duplicate.".to_string(), "Bad card.".to_string()])
        );
    }

    #[test]
    fn test_empty_message_list() {
        let reply = reply(r#"{"messages":{"resultCode":"Ok","message":[]}}"#);
        let mut request = request_with_amount(None);
        request.queue(fields::SUBSCRIPTION_ID, "55");
        let response = normalize_reply(RequestAction::CancelSubscription, reply, &request);

        assert!(response.approved);
        assert_eq!(response.full_response, "");
        assert_eq!(response.message, "");
        assert_eq!(response.subscription_id.as_deref(), Some("55"));
        assert_eq!(response.subscription_messages, Some(vec![]));
    }

    #[test]
    fn test_transaction_details() {
        let reply = reply(
            r#"{"transaction":{"transId":"60001","responseCode":1,"authCode":"ABC123","AVSResponse":"Y","cardCodeResponse":"M","authAmount":19.99},"messages":{"resultCode":"Ok","message":[{"code":"I00001","text":"Successful."}]}}"#,
        );
        let mut request = request_with_amount(None);
        request.queue(fields::TRANSACTION_ID, "60001");
        let response = normalize_reply(RequestAction::GetTransactionDetails, reply, &request);

        assert!(response.approved);
        assert_eq!(response.transaction_id, "60001");
        assert_eq!(response.authorization_code, "ABC123");
        assert_eq!(response.response_code, "1");
        assert_eq!(response.amount, dec!(19.99));
        assert_eq!(response.ccv_response, "Match");
        assert!(response.subscription_messages.is_none());
    }
}
