//! Paygate library.
//!
//! A thin adapter over a card payment provider: a fluent request builder,
//! a dispatcher choosing between the provider's form-POST and structured
//! APIs, and a normalizer turning either reply into one response shape.
//!
//! # Features
//!
//! - **Request Builder**: Fluent operations with per-operation field validation
//! - **Provider Registry**: Providers selected by tag, each supplying builder, features and dispatcher
//! - **Response Normalization**: Delimited and structured replies mapped to [`GatewayResponse`]
//!
//! # Example
//!
//! ```ignore
//! use paygate_lib::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let config = GatewayConfig::from_env()?;
//! let mut gateway = Gateway::new(config)?;
//!
//! gateway
//!     .create_request()
//!     .add_customer(&Customer { first_name: "Ada".into(), ..Default::default() })
//!     .sale("4111111111111111", "1225", "123", dec!(19.99));
//!
//! let response = gateway.send().await?;
//! println!("{} {}", response.transaction_id, response.message);
//! ```

pub mod config;
pub mod errors;
pub mod gateway;
pub mod model;
pub mod prelude;
pub mod providers;
pub mod request;
pub mod response;
pub mod transport;

/// Test utilities for gateway testing.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{Endpoints, GatewayAuth, GatewayConfig, ServiceMode};
pub use errors::{GatewayError, GatewayErrorCode};
pub use gateway::Gateway;
pub use providers::{FeatureSet, GatewayInfo, GatewayType};
pub use request::{GatewayRequest, RequestAction};
pub use response::GatewayResponse;

/// Common result alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
