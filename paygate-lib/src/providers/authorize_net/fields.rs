//! Authorize.Net wire field names and transaction type values.
//!
//! The `x_*` names are the provider's form-POST names. Structured operations
//! reuse the same buffer, so a few internal names (subscription and batch
//! fields) live here too. Those are listed in [`INTERNAL`] and stripped from
//! form bodies.

pub const LOGIN: &str = "x_login";
pub const TRAN_KEY: &str = "x_tran_key";
pub const TEST_REQUEST: &str = "x_test_request";
pub const DELIM_DATA: &str = "x_delim_data";
pub const DELIM_CHAR: &str = "x_delim_char";
pub const RELAY_RESPONSE: &str = "x_relay_response";
pub const EMAIL_CUSTOMER: &str = "x_email_customer";
pub const METHOD: &str = "x_method";
pub const TRANSACTION_TYPE: &str = "x_type";
pub const DUPLICATE_WINDOW: &str = "x_duplicate_window";
pub const CURRENCY_CODE: &str = "x_currency_code";

pub const CARD_NUMBER: &str = "x_card_num";
pub const EXPIRATION: &str = "x_exp_date";
pub const CARD_CODE: &str = "x_card_code";
pub const AMOUNT: &str = "x_amount";
pub const TRANSACTION_ID: &str = "x_trans_id";
pub const INVOICE_NUMBER: &str = "x_invoice_num";
pub const DESCRIPTION: &str = "x_description";

pub const CUSTOMER_ID: &str = "x_cust_id";
pub const FIRST_NAME: &str = "x_first_name";
pub const LAST_NAME: &str = "x_last_name";
pub const COMPANY: &str = "x_company";
pub const ADDRESS: &str = "x_address";
pub const CITY: &str = "x_city";
pub const STATE: &str = "x_state";
pub const ZIP: &str = "x_zip";
pub const COUNTRY: &str = "x_country";
pub const PHONE: &str = "x_phone";
pub const EMAIL: &str = "x_email";
pub const FAX: &str = "x_fax";

pub const SHIP_FIRST_NAME: &str = "x_ship_to_first_name";
pub const SHIP_LAST_NAME: &str = "x_ship_to_last_name";
pub const SHIP_COMPANY: &str = "x_ship_to_company";
pub const SHIP_ADDRESS: &str = "x_ship_to_address";
pub const SHIP_CITY: &str = "x_ship_to_city";
pub const SHIP_STATE: &str = "x_ship_to_state";
pub const SHIP_ZIP: &str = "x_ship_to_zip";
pub const SHIP_COUNTRY: &str = "x_ship_to_country";

// Internal: structured operations only.
pub const SUBSCRIPTION_ID: &str = "x_subscription_id";
pub const SUBSCRIPTION_NAME: &str = "x_subscription_name";
pub const BILLING_CYCLES: &str = "x_billing_cycles";
pub const BILLING_INTERVAL: &str = "x_billing_interval";
pub const TOTAL_OCCURRENCES: &str = "x_total_occurrences";
pub const START_DATE: &str = "x_start_date";
pub const TRIAL_AMOUNT: &str = "x_trial_amount";
pub const TRIAL_OCCURRENCES: &str = "x_trial_occurrences";
pub const BATCH_ID: &str = "x_batch_id";

/// Internal names, never posted to the form gateway.
pub const INTERNAL: [&str; 9] = [
    SUBSCRIPTION_ID,
    SUBSCRIPTION_NAME,
    BILLING_CYCLES,
    BILLING_INTERVAL,
    TOTAL_OCCURRENCES,
    START_DATE,
    TRIAL_AMOUNT,
    TRIAL_OCCURRENCES,
    BATCH_ID,
];

/// Values of [`TRANSACTION_TYPE`].
pub mod transaction_type {
    pub const AUTH_CAPTURE: &str = "AUTH_CAPTURE";
    pub const AUTH_ONLY: &str = "AUTH_ONLY";
    pub const PRIOR_AUTH_CAPTURE: &str = "PRIOR_AUTH_CAPTURE";
    pub const CREDIT: &str = "CREDIT";
    pub const VOID: &str = "VOID";
    pub const GET_TRANSACTIONS: &str = "GET_TRANS";
    pub const GET_TRANSACTION_DETAILS: &str = "GET_TRANS_DETAILS";
    pub const CREATE_SUBSCRIPTION: &str = "CREATE_SUBSCRIPTION";
    pub const UPDATE_SUBSCRIPTION: &str = "UPDATE_SUBSCRIPTION";
    pub const CANCEL_SUBSCRIPTION: &str = "CANCEL_SUBSCRIPTION";
}

/// Delimiter requested for form replies and used to join structured messages.
pub const DELIMITER: char = '|';

/// Duplicate-transaction window, in seconds.
pub const DUPLICATE_WINDOW_SECS: u32 = 120;

/// Fields every request must carry.
pub const CREDENTIALS: [&str; 2] = [LOGIN, TRAN_KEY];
