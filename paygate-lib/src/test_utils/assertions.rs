//! Test assertions and verification helpers.

use crate::{GatewayError, GatewayResponse, Result};

/// Assert that a send produced an approved response.
///
/// # Panics
/// Panics on an error or a declined response.
pub fn assert_approved(result: &Result<GatewayResponse>) {
    match result {
        Ok(response) => assert!(
            response.approved,
            "Expected approval, got code {:?}: {}",
            response.response_code, response.message
        ),
        Err(e) => panic!("Send failed with error: {}", e),
    }
}

/// Assert that a send produced a declined response, not an error.
///
/// # Panics
/// Panics on an error or an approved response.
pub fn assert_declined(result: &Result<GatewayResponse>) {
    match result {
        Ok(response) => assert!(
            !response.approved,
            "Expected a decline, but transaction {} was approved",
            response.transaction_id
        ),
        Err(e) => panic!("Send failed with error: {}", e),
    }
}

/// Assert that a send failed validation naming exactly `expected` fields.
///
/// # Panics
/// Panics on any other outcome.
pub fn assert_validation_error<T: std::fmt::Debug>(result: &Result<T>, expected: &[&str]) {
    match result {
        Err(GatewayError::Validation { fields }) => {
            assert_eq!(fields, expected, "Unexpected missing-field list");
        }
        other => panic!("Expected validation error, got {:?}", other),
    }
}

/// Decode a form body into `(name, value)` pairs in body order.
///
/// # Panics
/// Panics if the body is not valid percent-encoded UTF-8.
pub fn decode_post_string(body: &str) -> Vec<(String, String)> {
    if body.is_empty() {
        return Vec::new();
    }
    body.split('&')
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = urlencoding::decode(key).expect("key is percent-encoded UTF-8");
            let value = urlencoding::decode(value).expect("value is percent-encoded UTF-8");
            (key.into_owned(), value.into_owned())
        })
        .collect()
}
