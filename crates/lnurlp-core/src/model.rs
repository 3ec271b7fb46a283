//! # Protocol Model
//!
//! Request-scoped values and the JSON payloads of the LNURL-pay handshake.
//! Nothing here outlives a single request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Amount in millisatoshi (1 sat = 1000 msat)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MilliSatoshi(pub u64);

impl MilliSatoshi {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MilliSatoshi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} msat", self.0)
    }
}

impl FromStr for MilliSatoshi {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// Sendable range advertised in phase 1. Static configuration, never derived
/// from the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentBounds {
    pub min_sendable: MilliSatoshi,
    pub max_sendable: MilliSatoshi,
}

impl PaymentBounds {
    pub const DEFAULT_MIN_SENDABLE: u64 = 500_000_000;
    pub const DEFAULT_MAX_SENDABLE: u64 = 1_000;

    pub fn new(min_sendable: u64, max_sendable: u64) -> Self {
        Self {
            min_sendable: MilliSatoshi(min_sendable),
            max_sendable: MilliSatoshi(max_sendable),
        }
    }
}

impl Default for PaymentBounds {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_SENDABLE, Self::DEFAULT_MAX_SENDABLE)
    }
}

/// Backend wallet id the username resolved to. Opaque here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountReference(String);

impl AccountReference {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// BOLT11 payment request issued by the backend, returned verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    pub payment_request: String,
}

impl Invoice {
    pub fn new(payment_request: impl Into<String>) -> Self {
        Self {
            payment_request: payment_request.into(),
        }
    }
}

// =============================================================================
// Wire payloads
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayTag {
    #[serde(rename = "payRequest")]
    PayRequest,
}

/// Phase-1 discovery payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRequest {
    pub callback: String,
    pub max_sendable: MilliSatoshi,
    pub min_sendable: MilliSatoshi,
    pub metadata: String,
    pub tag: PayTag,
}

impl PayRequest {
    pub fn new(callback: impl Into<String>, bounds: PaymentBounds, metadata: String) -> Self {
        Self {
            callback: callback.into(),
            max_sendable: bounds.max_sendable,
            min_sendable: bounds.min_sendable,
            metadata,
            tag: PayTag::PayRequest,
        }
    }
}

/// Phase-2 success payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceResponse {
    pub pr: String,
    /// Always empty: no route hints are computed here
    pub routes: Vec<serde_json::Value>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            pr: invoice.payment_request,
            routes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorStatus {
    #[serde(rename = "ERROR")]
    Error,
}

/// In-band LNURL error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: ErrorStatus,
    pub reason: String,
}

impl ErrorResponse {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            status: ErrorStatus::Error,
            reason: reason.into(),
        }
    }
}

/// Any body the responder can produce. Serialized without a wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LnurlPayResponse {
    PayRequest(PayRequest),
    Invoice(InvoiceResponse),
    Error(ErrorResponse),
}

impl From<ErrorResponse> for LnurlPayResponse {
    fn from(err: ErrorResponse) -> Self {
        LnurlPayResponse::Error(err)
    }
}
