//! HTTP plumbing shared by the form-POST and structured protocols.
//!
//! Timeouts are explicit and configurable. Certificate validation is on
//! unless the caller sets [`TransportConfig::accept_invalid_certs`] for a
//! specific gateway configuration; the override is never process-wide.

mod config;
mod http;

pub use config::TransportConfig;
pub use http::HttpTransport;
