/*
[INPUT]:  Mock nonce/verify/me responses and a local EVM wallet
[OUTPUT]: Test results for the sign-in flow
[POS]:    Integration tests - authentication
[UPDATE]: When auth endpoints or flow changes
*/

mod common;

use common::{TEST_ADDRESS, TEST_PRIVATE_KEY, mock_me, providers_for, setup_mock_server};
use siwe_session_adapter::{
    AuthenticationStatus, EvmWalletSigner, MockWalletSigner, SessionError, WalletSigner,
};
use tokio_test::assert_ok;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_nonce(server: &MockServer, nonce: &str) {
    Mock::given(method("GET"))
        .and(path("/nonce"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "nonce": nonce,
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_sign_in_happy_path() {
    let server = setup_mock_server().await;
    mock_nonce(&server, "Qx7sk2LmP0aZ").await;
    Mock::given(method("POST"))
        .and(path("/verify"))
        .and(body_partial_json(serde_json::json!({
            "message": {
                "domain": "localhost:3000",
                "address": TEST_ADDRESS,
                "uri": "http://localhost:3000",
                "version": "1",
                "chainId": 10,
                "nonce": "Qx7sk2LmP0aZ",
            },
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mock_me(&server, Some(TEST_ADDRESS), 1).await;

    let providers = providers_for(&server);
    let wallet = assert_ok!(EvmWalletSigner::new(TEST_PRIVATE_KEY));

    let outcome = assert_ok!(providers.sign_in(&wallet, 10).await);
    assert!(outcome.verified);
    assert_eq!(providers.status(), AuthenticationStatus::Authenticated);

    let text = outcome.message.prepare_message();
    assert!(text.starts_with("localhost:3000 wants you to sign in with your Ethereum account:\n"));

    let bytes = hex::decode(outcome.signature.trim_start_matches("0x")).unwrap();
    let signature = alloy_primitives::Signature::try_from(bytes.as_slice()).unwrap();
    assert_eq!(
        signature.recover_address_from_msg(text.as_bytes()).unwrap(),
        wallet.address()
    );
}

#[tokio::test]
async fn test_sign_in_rejected_keeps_status() {
    let server = setup_mock_server().await;
    mock_nonce(&server, "abcdefgh12345678").await;
    Mock::given(method("POST"))
        .and(path("/verify"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "ok": true,
        })))
        .expect(1)
        .mount(&server)
        .await;
    mock_me(&server, None, 0).await;

    let providers = providers_for(&server);
    let wallet = MockWalletSigner::new(TEST_ADDRESS.parse().unwrap(), "0xdeadbeef");

    let outcome = assert_ok!(providers.sign_in(&wallet, 1).await);
    assert!(!outcome.verified);
    assert_eq!(outcome.signature, "0xdeadbeef");
    assert_eq!(providers.status(), AuthenticationStatus::Loading);
}

#[tokio::test]
async fn test_sign_in_unsupported_chain_makes_no_requests() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let providers = providers_for(&server);
    let wallet = MockWalletSigner::new(TEST_ADDRESS.parse().unwrap(), "0xdeadbeef");

    let err = providers.sign_in(&wallet, 56).await.unwrap_err();
    assert!(matches!(err, SessionError::UnsupportedChain { chain_id: 56 }));
}

#[tokio::test]
async fn test_sign_in_bad_nonce_from_server() {
    let server = setup_mock_server().await;
    mock_nonce(&server, "x").await;

    let providers = providers_for(&server);
    let wallet = MockWalletSigner::new(TEST_ADDRESS.parse().unwrap(), "0xdeadbeef");

    let err = providers.sign_in(&wallet, 1).await.unwrap_err();
    assert!(matches!(err, SessionError::Message(_)));
}

#[tokio::test]
async fn test_sign_out_does_not_reset_status() {
    let server = setup_mock_server().await;
    mock_me(&server, Some(TEST_ADDRESS), 1).await;
    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let providers = providers_for(&server);
    assert_eq!(
        providers.refresh_status().await,
        AuthenticationStatus::Authenticated
    );

    providers.sign_out().await;
    assert_eq!(providers.status(), AuthenticationStatus::Authenticated);
}
