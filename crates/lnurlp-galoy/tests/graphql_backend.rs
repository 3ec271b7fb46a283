use lnurlp_core::{
    AccountReference, BackendError, Metadata, MetadataCommitment, MilliSatoshi, WalletBackend,
};
use lnurlp_galoy::{GaloyClient, GaloyConfig};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> GaloyClient {
    let config = GaloyConfig::new(format!("{}/graphql", server.uri()));
    GaloyClient::new(config).unwrap()
}

fn alice_hash() -> MetadataCommitment {
    Metadata::for_username("alice").commitment()
}

#[tokio::test]
async fn resolves_default_wallet_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({"variables": {"username": "alice"}})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"userDefaultWalletId": "wallet-alice"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let account = client_for(&server)
        .await
        .resolve_default_wallet_id("alice")
        .await
        .unwrap();

    assert_eq!(account, AccountReference::new("wallet-alice"));
}

#[tokio::test]
async fn unknown_user_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{"message": "Account does not exist for username bob"}]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .resolve_default_wallet_id("bob")
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::GraphQl(_)));
    assert_eq!(err.to_string(), "Account does not exist for username bob");
}

#[tokio::test]
async fn null_wallet_id_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"userDefaultWalletId": null}})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .resolve_default_wallet_id("ghost")
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::NotFound(_)));
}

#[tokio::test]
async fn sends_description_hash_and_amount() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "variables": {
                "walletId": "wallet-alice",
                "amount": 2000,
                "h": alice_hash().to_hex()
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "mutationData": {
                    "errors": [],
                    "invoice": {"paymentRequest": "lnbc20n1pexample"}
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let invoice = client_for(&server)
        .await
        .create_invoice_on_behalf_of(
            &AccountReference::new("wallet-alice"),
            MilliSatoshi(2000),
            &alice_hash(),
        )
        .await
        .unwrap();

    assert_eq!(invoice.payment_request, "lnbc20n1pexample");
}

#[tokio::test]
async fn mutation_errors_are_application_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "mutationData": {
                    "errors": [{"message": "amount too low"}, {"message": "second"}],
                    "invoice": null
                }
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .create_invoice_on_behalf_of(
            &AccountReference::new("wallet-alice"),
            MilliSatoshi(1),
            &alice_hash(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.application_message(), Some("amount too low"));
}

#[tokio::test]
async fn missing_invoice_without_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"mutationData": {"errors": null, "invoice": null}}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .create_invoice_on_behalf_of(
            &AccountReference::new("wallet-alice"),
            MilliSatoshi(2000),
            &alice_hash(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::MissingData("invoice")));
}

#[tokio::test]
async fn server_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .resolve_default_wallet_id("alice")
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::HttpStatus { status: 502, .. }));
}

#[tokio::test]
async fn malformed_body_is_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .resolve_default_wallet_id("alice")
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::Serialization(_)));
}

#[tokio::test]
async fn sends_bearer_token_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"userDefaultWalletId": "wallet-alice"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = GaloyConfig::new(format!("{}/graphql", server.uri())).with_auth_token("secret");
    let client = GaloyClient::new(config).unwrap();

    assert!(client.resolve_default_wallet_id("alice").await.is_ok());
}

#[tokio::test]
async fn times_out_as_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({"data": {"userDefaultWalletId": "wallet-alice"}})),
        )
        .mount(&server)
        .await;

    let config = GaloyConfig::new(format!("{}/graphql", server.uri()))
        .with_timeout(Duration::from_millis(50));
    let client = GaloyClient::new(config).unwrap();

    let err = client.resolve_default_wallet_id("alice").await.unwrap_err();
    assert!(matches!(err, BackendError::Transport(_)));
}
