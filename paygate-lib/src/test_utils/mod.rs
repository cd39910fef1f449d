//! Test utilities for the gateway.
//!
//! This module provides:
//! - Fixtures: credentials, cards, customers and subscriptions
//! - Reply builders for both the delimited and structured protocols
//! - Assertion helpers for responses and validation failures
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paygate_lib::test_utils::{approved_reply, assert_approved, test_config};
//!
//! let mut gateway = Gateway::new(test_config(&server.uri()))?;
//! gateway.create_request().sale(TestFixtures::VISA, "1225", "123", dec!(19.99));
//! assert_approved(&gateway.send().await);
//! ```

mod assertions;
mod fixtures;

pub use fixtures::{
    approved_reply, declined_reply, sample_customer, sample_shipping, sample_subscription,
    sample_update, structured_reply, subscription_created_reply, test_auth, test_config,
    TestFixtures,
};

pub use assertions::{
    assert_approved, assert_declined, assert_validation_error, decode_post_string,
};
