//! # GraphQL Documents & Envelopes
//!
//! The two operations this backend needs, plus the generic request and
//! response envelopes of a GraphQL-over-HTTP exchange.

use lnurlp_core::ApplicationError;
use serde::{Deserialize, Serialize};

pub const USER_DEFAULT_WALLET_ID: &str = r#"query userDefaultWalletId($username: Username!) {
  userDefaultWalletId(username: $username)
}"#;

pub const LN_INVOICE_CREATE_ON_BEHALF_OF_RECIPIENT: &str = r#"mutation lnInvoiceCreateOnBehalfOfRecipient($walletId: WalletId!, $amount: SatAmount!, $h: Hex32Bytes!) {
  mutationData: lnInvoiceCreateOnBehalfOfRecipient(
    input: { recipientWalletId: $walletId, amount: $amount, descriptionHash: $h }
  ) {
    errors {
      message
    }
    invoice {
      paymentRequest
    }
  }
}"#;

/// POST body
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

/// Response body. `errors` here are request-level (parse, validation,
/// resolver exceptions), not the mutation's own `errors` field.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

impl<T> GraphQlResponse<T> {
    pub fn request_errors(&self) -> &[GraphQlError] {
        self.errors.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Join request-level error messages into a single detail string
pub fn join_messages(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// userDefaultWalletId
// =============================================================================

#[derive(Debug, Serialize)]
pub struct UserDefaultWalletIdVariables<'a> {
    pub username: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDefaultWalletIdData {
    pub user_default_wallet_id: Option<String>,
}

// =============================================================================
// lnInvoiceCreateOnBehalfOfRecipient
// =============================================================================

#[derive(Debug, Serialize)]
pub struct InvoiceCreateVariables<'a> {
    #[serde(rename = "walletId")]
    pub wallet_id: &'a str,
    pub amount: u64,
    pub h: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceCreateData {
    pub mutation_data: Option<InvoicePayload>,
}

#[derive(Debug, Deserialize)]
pub struct InvoicePayload {
    #[serde(default)]
    pub errors: Option<Vec<ApplicationError>>,
    #[serde(default)]
    pub invoice: Option<InvoiceObject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceObject {
    pub payment_request: String,
}
