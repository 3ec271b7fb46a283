//! # Pay Responder
//!
//! The LNURL-pay handshake:
//!
//! 1. Resolve the username to a wallet (fails fast for unknown users).
//! 2. Phase 1: return bounds, metadata and the callback URL.
//! 3. Phase 2: recompute the metadata, hash it, and ask the backend for an
//!    invoice committing to that hash.
//!
//! Every outcome is a `LnurlPayResponse`; failures never escape as errors.

use crate::backend::SharedWalletBackend;
use crate::dispatch::PayPhase;
use crate::error::{LnurlError, LnurlResult};
use crate::metadata::Metadata;
use crate::model::{
    AccountReference, InvoiceResponse, LnurlPayResponse, MilliSatoshi, PayRequest, PaymentBounds,
};
use tracing::{debug, error, info, instrument, warn};

/// Stateless handshake over a shared wallet backend
#[derive(Clone)]
pub struct PayResponder {
    backend: SharedWalletBackend,
    bounds: PaymentBounds,
}

impl PayResponder {
    pub fn new(backend: SharedWalletBackend, bounds: PaymentBounds) -> Self {
        Self { backend, bounds }
    }

    pub fn bounds(&self) -> PaymentBounds {
        self.bounds
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    /// Answer one LNURL-pay request.
    #[instrument(skip(self, phase), fields(backend = self.backend.backend_name()))]
    pub async fn respond(&self, username: &str, phase: PayPhase) -> LnurlPayResponse {
        match self.handle(username, phase).await {
            Ok(response) => response,
            Err(err) => err.to_response().into(),
        }
    }

    async fn handle(&self, username: &str, phase: PayPhase) -> LnurlResult<LnurlPayResponse> {
        let account = self.resolve(username).await?;
        let metadata = Metadata::for_username(username);

        match phase {
            PayPhase::Discovery { callback } => {
                let metadata = metadata.to_canonical_string();
                debug!(%callback, "Answering discovery request");
                Ok(LnurlPayResponse::PayRequest(PayRequest::new(
                    callback,
                    self.bounds,
                    metadata,
                )))
            }
            PayPhase::Invoice { amount } => {
                let invoice = self.request_invoice(&account, amount, &metadata).await?;
                Ok(LnurlPayResponse::Invoice(invoice))
            }
            PayPhase::OutOfRange { amount } => Err(LnurlError::AmountOutOfRange { amount }),
        }
    }

    async fn resolve(&self, username: &str) -> LnurlResult<AccountReference> {
        self.backend
            .resolve_default_wallet_id(username)
            .await
            .map_err(|e| {
                debug!(error = %e, "Username resolution failed");
                LnurlError::UserNotFound {
                    username: username.to_string(),
                }
            })
    }

    async fn request_invoice(
        &self,
        account: &AccountReference,
        amount: MilliSatoshi,
        metadata: &Metadata,
    ) -> LnurlResult<InvoiceResponse> {
        let description_hash = metadata.commitment();

        let invoice = self
            .backend
            .create_invoice_on_behalf_of(account, amount, &description_hash)
            .await
            .map_err(|e| {
                let err = LnurlError::from_invoice_error(e);
                match &err {
                    LnurlError::InvoiceRejected { .. } => warn!("Error getting invoice: {}", err),
                    _ => error!("Unexpected error getting invoice: {}", err),
                }
                err
            })?;

        info!(%amount, %description_hash, "Issued invoice");
        Ok(invoice.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::WalletBackend;
    use crate::error::{ApplicationError, BackendError, BackendResult};
    use crate::metadata::MetadataCommitment;
    use crate::model::{ErrorResponse, Invoice};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    enum InvoiceOutcome {
        Issued(&'static str),
        Rejected(&'static str),
        Unreachable(&'static str),
    }

    struct FakeBackend {
        known_user: &'static str,
        outcome: InvoiceOutcome,
        calls: Mutex<Vec<(String, u64, String)>>,
    }

    impl FakeBackend {
        fn new(known_user: &'static str, outcome: InvoiceOutcome) -> Arc<Self> {
            Arc::new(Self {
                known_user,
                outcome,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl WalletBackend for FakeBackend {
        async fn resolve_default_wallet_id(
            &self,
            username: &str,
        ) -> BackendResult<AccountReference> {
            if username == self.known_user {
                Ok(AccountReference::new(format!("wallet-{}", username)))
            } else {
                Err(BackendError::NotFound(username.to_string()))
            }
        }

        async fn create_invoice_on_behalf_of(
            &self,
            account: &AccountReference,
            amount: MilliSatoshi,
            description_hash: &MetadataCommitment,
        ) -> BackendResult<Invoice> {
            self.calls.lock().unwrap().push((
                account.to_string(),
                amount.as_u64(),
                description_hash.to_hex(),
            ));
            match self.outcome {
                InvoiceOutcome::Issued(pr) => Ok(Invoice::new(pr)),
                InvoiceOutcome::Rejected(msg) => {
                    Err(BackendError::Application(vec![ApplicationError::new(msg)]))
                }
                InvoiceOutcome::Unreachable(msg) => Err(BackendError::Transport(msg.into())),
            }
        }

        fn backend_name(&self) -> &'static str {
            "fake"
        }
    }

    fn responder(backend: Arc<FakeBackend>) -> PayResponder {
        PayResponder::new(backend, PaymentBounds::default())
    }

    fn discovery() -> PayPhase {
        PayPhase::Discovery {
            callback: "https://pay.example.com/lnurlp/alice".to_string(),
        }
    }

    fn invoice(amount: u64) -> PayPhase {
        PayPhase::Invoice {
            amount: MilliSatoshi(amount),
        }
    }

    #[tokio::test]
    async fn test_discovery_payload() {
        let backend = FakeBackend::new("alice", InvoiceOutcome::Issued("lnbc1"));
        let response = responder(backend).respond("alice", discovery()).await;

        assert_eq!(
            response,
            LnurlPayResponse::PayRequest(PayRequest::new(
                "https://pay.example.com/lnurlp/alice",
                PaymentBounds::new(500_000_000, 1_000),
                r#"[["text/plain","Payment to alice"]]"#.to_string(),
            ))
        );
    }

    #[tokio::test]
    async fn test_unknown_user_in_both_phases() {
        let backend = FakeBackend::new("alice", InvoiceOutcome::Issued("lnbc1"));
        let responder = responder(backend.clone());
        let expected = LnurlPayResponse::Error(ErrorResponse::new("Couldn't find user 'bob'."));

        assert_eq!(responder.respond("bob", discovery()).await, expected);
        assert_eq!(responder.respond("bob", invoice(2000)).await, expected);
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invoice_success() {
        let backend = FakeBackend::new("alice", InvoiceOutcome::Issued("lnbc20n1..."));
        let response = responder(backend).respond("alice", invoice(2000)).await;

        assert_eq!(
            response,
            LnurlPayResponse::Invoice(InvoiceResponse {
                pr: "lnbc20n1...".to_string(),
                routes: vec![],
            })
        );
    }

    #[tokio::test]
    async fn test_invoice_commits_to_discovery_metadata() {
        let backend = FakeBackend::new("alice", InvoiceOutcome::Issued("lnbc1"));
        let responder = responder(backend.clone());

        let metadata = match responder.respond("alice", discovery()).await {
            LnurlPayResponse::PayRequest(body) => body.metadata,
            other => panic!("expected discovery payload, got {:?}", other),
        };
        responder.respond("alice", invoice(2000)).await;

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (account, amount, hash) = &calls[0];
        assert_eq!(account, "wallet-alice");
        assert_eq!(*amount, 2000);
        assert_eq!(hash, &MetadataCommitment::of(metadata.as_bytes()).to_hex());
    }

    #[tokio::test]
    async fn test_application_error() {
        let backend = FakeBackend::new("alice", InvoiceOutcome::Rejected("amount too low"));
        let response = responder(backend).respond("alice", invoice(2000)).await;

        assert_eq!(
            response,
            LnurlPayResponse::Error(ErrorResponse::new("Failed to get invoice: amount too low"))
        );
    }

    #[tokio::test]
    async fn test_transport_error_surfaces_detail() {
        let backend = FakeBackend::new("alice", InvoiceOutcome::Unreachable("connection reset"));
        let response = responder(backend).respond("alice", invoice(2000)).await;

        assert_eq!(
            response,
            LnurlPayResponse::Error(ErrorResponse::new("connection reset"))
        );
    }

    #[tokio::test]
    async fn test_out_of_range_amount_is_rejected_without_invoice() {
        let backend = FakeBackend::new("alice", InvoiceOutcome::Issued("lnbc1"));
        let responder = responder(backend.clone());
        let phase = PayPhase::OutOfRange {
            amount: "99999999999999999999".to_string(),
        };

        assert_eq!(
            responder.respond("alice", phase.clone()).await,
            LnurlPayResponse::Error(ErrorResponse::new(
                "Amount '99999999999999999999' is out of range."
            ))
        );
        assert_eq!(
            responder.respond("bob", phase).await,
            LnurlPayResponse::Error(ErrorResponse::new("Couldn't find user 'bob'."))
        );
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_each_invoice_request_hits_backend() {
        let backend = FakeBackend::new("alice", InvoiceOutcome::Issued("lnbc1"));
        let responder = responder(backend.clone());

        responder.respond("alice", invoice(2000)).await;
        responder.respond("alice", invoice(2000)).await;

        assert_eq!(backend.calls.lock().unwrap().len(), 2);
    }
}
