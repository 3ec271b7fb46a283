//! # Wallet Backend Trait
//!
//! The responder owns no accounts and issues no invoices itself. Both are
//! remote operations on a wallet backend, modelled as a trait so the
//! GraphQL client can be swapped for a fake in tests.
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │              WalletBackend (trait)             │
//! │  ├── resolve_default_wallet_id()               │
//! │  ├── create_invoice_on_behalf_of()             │
//! │  └── backend_name()                            │
//! └────────────────────────────────────────────────┘
//!                        ▲
//!                ┌───────┴───────┐
//!                │  GaloyClient  │
//!                │ (lnurlp-galoy)│
//!                └───────────────┘
//! ```

use crate::error::BackendResult;
use crate::metadata::MetadataCommitment;
use crate::model::{AccountReference, Invoice, MilliSatoshi};
use async_trait::async_trait;
use std::sync::Arc;

/// Remote account resolution and invoice issuance.
///
/// One instance is shared by every in-flight request, so implementations
/// must not keep per-call mutable state.
#[async_trait]
pub trait WalletBackend: Send + Sync {
    /// Resolve a public username to the account's default wallet.
    async fn resolve_default_wallet_id(&self, username: &str) -> BackendResult<AccountReference>;

    /// Ask the backend for a fresh invoice paying `account`, whose
    /// description hash is `description_hash`.
    ///
    /// Application-level rejections come back as `BackendError::Application`.
    async fn create_invoice_on_behalf_of(
        &self,
        account: &AccountReference,
        amount: MilliSatoshi,
        description_hash: &MetadataCommitment,
    ) -> BackendResult<Invoice>;

    /// Backend name (for logging)
    fn backend_name(&self) -> &'static str;
}

/// Shared handle to the process-wide backend
pub type SharedWalletBackend = Arc<dyn WalletBackend>;
