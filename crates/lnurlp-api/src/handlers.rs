//! # Request Handlers
//!
//! Axum request handlers for the LNURL-pay endpoint.
//! Every LNURL response is HTTP 200; failures travel in the JSON body.

use crate::callback::original_url;
use crate::state::AppState;
use axum::{
    extract::{rejection::PathRejection, OriginalUri, Path, Query, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use lnurlp_core::{ErrorResponse, LnurlPayResponse, PayPhase};
use tracing::{info, instrument, warn};

/// LNURL-pay endpoint (`/lnurlp/{username}` and `/.well-known/lnurlp/{username}`)
///
/// Query pairs are taken as a raw list so that duplicate or odd keys never
/// turn into an extractor rejection.
#[instrument(skip_all)]
pub async fn lnurlp(
    State(state): State<AppState>,
    username: Result<Path<String>, PathRejection>,
    Query(params): Query<Vec<(String, String)>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Json<LnurlPayResponse> {
    let username = match username {
        Ok(Path(username)) if !username.is_empty() => username,
        Ok(_) => return Json(ErrorResponse::new("Missing username.").into()),
        Err(rejection) => {
            warn!("Rejected username path: {}", rejection);
            return Json(ErrorResponse::new("Invalid username.").into());
        }
    };

    let raw_amount = params
        .iter()
        .find(|(key, _)| key == "amount")
        .map(|(_, value)| value.as_str());

    let phase = PayPhase::select(raw_amount, || original_url(&headers, &uri));
    info!(username = %username, phase = phase.name(), "LNURL-pay request");

    Json(state.responder.respond(&username, phase).await)
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "lnurlp",
        "backend": state.responder.backend_name(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
