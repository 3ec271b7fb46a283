//! # Galoy GraphQL Client
//!
//! `WalletBackend` over a Galoy-style GraphQL API. One client is built at
//! startup and shared by every request; `reqwest::Client` pools connections
//! internally and carries no per-call state.

use crate::config::GaloyConfig;
use crate::graphql::{
    join_messages, GraphQlRequest, GraphQlResponse, InvoiceCreateData, InvoiceCreateVariables,
    UserDefaultWalletIdData, UserDefaultWalletIdVariables, LN_INVOICE_CREATE_ON_BEHALF_OF_RECIPIENT,
    USER_DEFAULT_WALLET_ID,
};
use async_trait::async_trait;
use lnurlp_core::{
    AccountReference, BackendError, BackendResult, Invoice, MetadataCommitment, MilliSatoshi,
    WalletBackend,
};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info, instrument};

/// GraphQL wallet backend
pub struct GaloyClient {
    config: GaloyConfig,
    client: Client,
}

impl GaloyClient {
    /// Create a new client
    pub fn new(config: GaloyConfig) -> BackendResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                BackendError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> BackendResult<Self> {
        let config = GaloyConfig::from_env()?;
        Self::new(config)
    }

    /// POST one GraphQL document and return its `data`.
    ///
    /// Request-level GraphQL errors take precedence over partial data.
    async fn execute<V, T>(&self, query: &str, variables: V) -> BackendResult<Option<T>>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let mut request = self
            .client
            .post(&self.config.graphql_uri)
            .json(&GraphQlRequest { query, variables });

        if let Some(auth) = self.config.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        // GraphQL servers answer 400 for invalid documents with a normal
        // errors body, so try the envelope before giving up on the status.
        let parsed = serde_json::from_str::<GraphQlResponse<T>>(&body);

        if !status.is_success() {
            error!("GraphQL API error: status={}, body={}", status, body);
            if let Ok(envelope) = &parsed {
                if !envelope.request_errors().is_empty() {
                    return Err(BackendError::GraphQl(join_messages(
                        envelope.request_errors(),
                    )));
                }
            }
            return Err(BackendError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let envelope = parsed.map_err(|e| {
            BackendError::Serialization(format!("Failed to parse GraphQL response: {}", e))
        })?;

        if !envelope.request_errors().is_empty() {
            return Err(BackendError::GraphQl(join_messages(envelope.request_errors())));
        }

        Ok(envelope.data)
    }
}

#[async_trait]
impl WalletBackend for GaloyClient {
    #[instrument(skip(self))]
    async fn resolve_default_wallet_id(&self, username: &str) -> BackendResult<AccountReference> {
        let data: Option<UserDefaultWalletIdData> = self
            .execute(USER_DEFAULT_WALLET_ID, UserDefaultWalletIdVariables { username })
            .await?;

        let wallet_id = data
            .and_then(|d| d.user_default_wallet_id)
            .ok_or_else(|| BackendError::NotFound(username.to_string()))?;

        debug!("Resolved default wallet: {}", wallet_id);
        Ok(AccountReference::new(wallet_id))
    }

    #[instrument(skip(self, account, description_hash), fields(wallet_id = %account))]
    async fn create_invoice_on_behalf_of(
        &self,
        account: &AccountReference,
        amount: MilliSatoshi,
        description_hash: &MetadataCommitment,
    ) -> BackendResult<Invoice> {
        let variables = InvoiceCreateVariables {
            wallet_id: account.as_str(),
            amount: amount.as_u64(),
            h: description_hash.to_hex(),
        };

        let data: Option<InvoiceCreateData> = self
            .execute(LN_INVOICE_CREATE_ON_BEHALF_OF_RECIPIENT, variables)
            .await?;

        let payload = data
            .and_then(|d| d.mutation_data)
            .ok_or(BackendError::MissingData("mutationData"))?;

        if let Some(errors) = payload.errors.filter(|errors| !errors.is_empty()) {
            return Err(BackendError::Application(errors));
        }

        let invoice = payload
            .invoice
            .ok_or(BackendError::MissingData("invoice"))?;

        info!("Created invoice for {}", account);
        Ok(Invoice::new(invoice.payment_request))
    }

    fn backend_name(&self) -> &'static str {
        "galoy"
    }
}
