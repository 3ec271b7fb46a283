//! # lnurlp-core
//!
//! Core types and handshake logic for the lnurlp-rs LNURL-pay responder.
//!
//! This crate provides:
//! - `WalletBackend` trait for the remote account/invoice service
//! - `Metadata` and `MetadataCommitment` for the description hash
//! - `PayPhase` for discovery vs. invoice dispatch
//! - `PayResponder`, the stateless two-phase handshake
//! - `LnurlError` / `BackendError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use lnurlp_core::{PayPhase, PayResponder, PaymentBounds};
//!
//! let responder = PayResponder::new(backend, PaymentBounds::default());
//!
//! let phase = PayPhase::select(query.amount.as_deref(), || callback_url);
//! let body = responder.respond("alice", phase).await;
//!
//! // Serialize `body` as JSON with HTTP 200, whatever the outcome
//! ```

pub mod backend;
pub mod dispatch;
pub mod error;
pub mod metadata;
pub mod model;
pub mod responder;

// Re-exports for convenience
pub use backend::{SharedWalletBackend, WalletBackend};
pub use dispatch::{parse_amount, AmountParam, PayPhase};
pub use error::{ApplicationError, BackendError, BackendResult, LnurlError, LnurlResult};
pub use metadata::{Metadata, MetadataCommitment};
pub use model::{
    AccountReference, ErrorResponse, Invoice, InvoiceResponse, LnurlPayResponse, MilliSatoshi,
    PayRequest, PaymentBounds,
};
pub use responder::PayResponder;
