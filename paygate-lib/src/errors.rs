//! Error types for gateway operations.
//!
//! Every failure surfaces synchronously from `send`. Nothing here is retried
//! by the adapter; [`GatewayError::is_retryable`] is a hint for callers only.

use thiserror::Error;

/// Numeric error codes for callers that need a stable classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum GatewayErrorCode {
    /// Operation kind not wired into the dispatcher
    UnsupportedOperation = 1000,
    /// No provider registered for the requested gateway type
    ProviderNotRegistered = 1001,
    /// Transport/network layer error
    Transport = 2000,
    /// Connection failed
    ConnectionFailed = 2001,
    /// Connection timeout
    ConnectionTimeout = 2002,
    /// Non-success HTTP status
    HttpStatus = 2003,
    /// Structured call rejected by the provider
    RpcFault = 2004,
    /// Required field missing or empty
    Validation = 5000,
    /// Field present but unusable
    InvalidData = 5001,
    /// Serialization error
    Serialization = 5002,
    /// Reply could not be normalized
    Normalization = 5003,
    /// Invalid configuration
    Configuration = 6000,
}

/// Error type for every gateway operation.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// One or more required fields are missing or empty.
    #[error("can't submit to gateway - missing these input fields: {}", .fields.join(", "))]
    Validation {
        /// Every offending field name, in check order
        fields: Vec<String>,
    },

    /// A field is present but cannot be used.
    #[error("invalid {field}: {reason}")]
    InvalidData {
        /// Field or parameter name
        field: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Transport/network layer error.
    #[error("transport error: {0}")]
    Transport(String),

    /// Connection failed.
    #[error("connection to {target} failed: {reason}")]
    ConnectionFailed {
        /// Target endpoint
        target: String,
        /// Underlying error message
        reason: String,
    },

    /// Connection timeout.
    #[error("{operation} timed out after {timeout_ms}ms")]
    ConnectionTimeout {
        /// Operation that timed out
        operation: String,
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// The endpoint answered with a non-success status.
    #[error("gateway returned HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The structured endpoint rejected the call outright.
    #[error("remote call {operation} failed: {reason}")]
    RpcFault {
        /// Remote operation name
        operation: String,
        /// Fault text
        reason: String,
    },

    /// The reply could not be split into the expected schema.
    #[error("could not normalize gateway reply: {reason} (raw: {raw:?})")]
    Normalization {
        /// What was wrong with the reply
        reason: String,
        /// The untouched reply text
        raw: String,
    },

    /// The request declares no operation, or one the dispatcher does not handle.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// No provider registered for the gateway type.
    #[error("no provider registered for gateway type {0}")]
    ProviderNotRegistered(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl GatewayError {
    /// Get the numeric error code.
    pub fn code(&self) -> GatewayErrorCode {
        match self {
            Self::Validation { .. } => GatewayErrorCode::Validation,
            Self::InvalidData { .. } => GatewayErrorCode::InvalidData,
            Self::Transport(_) => GatewayErrorCode::Transport,
            Self::ConnectionFailed { .. } => GatewayErrorCode::ConnectionFailed,
            Self::ConnectionTimeout { .. } => GatewayErrorCode::ConnectionTimeout,
            Self::HttpStatus { .. } => GatewayErrorCode::HttpStatus,
            Self::RpcFault { .. } => GatewayErrorCode::RpcFault,
            Self::Normalization { .. } => GatewayErrorCode::Normalization,
            Self::UnsupportedOperation(_) => GatewayErrorCode::UnsupportedOperation,
            Self::ProviderNotRegistered(_) => GatewayErrorCode::ProviderNotRegistered,
            Self::Serialization(_) => GatewayErrorCode::Serialization,
            Self::Configuration(_) => GatewayErrorCode::Configuration,
        }
    }

    /// Returns true for network-class failures a caller may choose to retry.
    ///
    /// Settle, void and refund rely on the provider's transaction-id keyed
    /// deduplication; the caller owns at-most-once delivery.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::ConnectionFailed { .. } | Self::ConnectionTimeout { .. } => {
                true
            }
            Self::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Create an invalid data error.
    pub fn invalid_data(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidData {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a normalization error carrying the raw reply.
    pub fn normalization(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::Normalization {
            reason: reason.into(),
            raw: raw.into(),
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
