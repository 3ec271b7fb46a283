//! # lnurlp-galoy
//!
//! Galoy GraphQL wallet backend for lnurlp-rs.
//!
//! Implements `WalletBackend` with two GraphQL operations:
//!
//! 1. **userDefaultWalletId** - username → default wallet id
//! 2. **lnInvoiceCreateOnBehalfOfRecipient** - invoice for a wallet,
//!    committing to a caller-supplied description hash
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lnurlp_galoy::GaloyClient;
//! use lnurlp_core::{PayResponder, PaymentBounds};
//! use std::sync::Arc;
//!
//! // GRAPHQL_URI=https://api.example.com/graphql
//! let backend = GaloyClient::from_env()?;
//! let responder = PayResponder::new(Arc::new(backend), PaymentBounds::default());
//! ```

pub mod client;
pub mod config;
pub mod graphql;

// Re-exports
pub use client::GaloyClient;
pub use config::GaloyConfig;
