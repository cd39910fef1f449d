//! Caller-facing inputs for the fluent request methods.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::GatewayError;

/// Billing customer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Merchant-assigned customer id.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    /// Street address.
    pub address: String,
    pub city: String,
    /// State or province.
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub email: String,
    pub fax: String,
    /// Two-letter country code. Empty keeps the request default.
    pub country: String,
}

/// Shipping recipient.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipping {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    /// Street address.
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// Two-letter country code. Empty keeps the request default.
    pub country: String,
}

/// Card details for subscription requests.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCard {
    pub number: String,
    /// Expiration as the provider accepts it, e.g. `1225` or `2025-12`.
    pub expiration: String,
    pub cvv: String,
}

impl CreditCard {
    /// Create card details.
    pub fn new(
        number: impl Into<String>,
        expiration: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            expiration: expiration.into(),
            cvv: cvv.into(),
        }
    }

    /// Last four digits, for logs.
    pub fn last_four(&self) -> &str {
        let len = self.number.len();
        self.number.get(len.saturating_sub(4)..).unwrap_or("")
    }
}

impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCard")
            .field("number", &format_args!("****{}", self.last_four()))
            .field("expiration", &self.expiration)
            .finish_non_exhaustive()
    }
}

/// Unit of a recurring billing interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Days,
    Months,
}

impl BillingInterval {
    /// Wire name of the unit.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Months => "months",
        }
    }
}

impl fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingInterval {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "days" => Ok(Self::Days),
            "months" => Ok(Self::Months),
            other => Err(GatewayError::invalid_data(
                "billing_interval",
                format!("unknown unit '{}'", other),
            )),
        }
    }
}

/// Introductory billing period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    /// Number of payments billed at the trial amount.
    pub occurrences: u16,
    pub amount: Decimal,
}

/// New recurring billing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub name: String,
    pub description: String,
    /// Amount billed each interval.
    pub amount: Decimal,
    pub card: CreditCard,
    /// Interval length, in `billing_interval` units.
    pub billing_cycles: u16,
    pub billing_interval: BillingInterval,
    pub total_occurrences: u16,
    pub starts_on: NaiveDate,
    /// `None` leaves the trial unspecified; it is not the same as a zero trial.
    pub trial: Option<Trial>,
}

/// Changes to an existing recurring billing.
///
/// The schedule (interval, start date, occurrences) cannot be changed after
/// creation, so it has no place here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionUpdate {
    /// Provider subscription id.
    pub id: String,
    pub name: String,
    pub description: String,
    pub amount: Decimal,
    pub card: CreditCard,
    pub trial: Option<Trial>,
}
