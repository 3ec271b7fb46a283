//! # LNURL Error Types
//!
//! Two layers of errors:
//! - `BackendError` is what a `WalletBackend` returns from its remote calls.
//! - `LnurlError` is the protocol-level failure reported to the wallet.
//!
//! Every `LnurlError` is reported in-band (`{"status":"ERROR","reason":...}`)
//! with HTTP 200. Its `Display` text is the `reason` string verbatim.

use crate::model::ErrorResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level error returned by the backend alongside a rejected mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationError {
    pub message: String,
}

impl ApplicationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised by a wallet backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend understood the request but rejected it (e.g. amount out of range)
    #[error("{}", first_message(.0))]
    Application(Vec<ApplicationError>),

    /// The requested account does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Could not reach the backend
    #[error("{0}")]
    Transport(String),

    /// Backend answered with a non-success HTTP status
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Top-level GraphQL errors (query could not be executed)
    #[error("{0}")]
    GraphQl(String),

    /// Response body did not match the expected shape
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Response parsed but a required field was null or absent
    #[error("Missing field in backend response: {0}")]
    MissingData(&'static str),

    /// Backend client could not be configured
    #[error("Configuration error: {0}")]
    Configuration(String),
}

fn first_message(errors: &[ApplicationError]) -> &str {
    errors
        .first()
        .map(|e| e.message.as_str())
        .unwrap_or("unknown application error")
}

impl BackendError {
    /// First application error message, if the backend rejected the request
    pub fn application_message(&self) -> Option<&str> {
        match self {
            BackendError::Application(errors) => errors.first().map(|e| e.message.as_str()),
            _ => None,
        }
    }
}

/// Result type alias for backend calls
pub type BackendResult<T> = Result<T, BackendError>;

/// Protocol-level failures of the LNURL-pay handshake
#[derive(Debug, Error)]
pub enum LnurlError {
    /// Identifier could not be resolved. Unknown user and unreachable backend
    /// are reported identically.
    #[error("Couldn't find user '{username}'.")]
    UserNotFound { username: String },

    /// Backend rejected invoice creation
    #[error("Failed to get invoice: {message}")]
    InvoiceRejected { message: String },

    /// Unexpected failure while requesting the invoice
    #[error("{0}")]
    InvoiceFailed(String),

    /// The requested amount does not fit in a millisatoshi count
    #[error("Amount '{amount}' is out of range.")]
    AmountOutOfRange { amount: String },
}

impl LnurlError {
    /// Map a failed invoice request onto the protocol taxonomy
    pub fn from_invoice_error(err: BackendError) -> Self {
        match err.application_message() {
            Some(message) => LnurlError::InvoiceRejected {
                message: message.to_string(),
            },
            None => LnurlError::InvoiceFailed(err.to_string()),
        }
    }

    /// The in-band error body for this failure
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.to_string())
    }
}

impl From<LnurlError> for ErrorResponse {
    fn from(err: LnurlError) -> Self {
        err.to_response()
    }
}

/// Result type alias for handshake operations
pub type LnurlResult<T> = Result<T, LnurlError>;
