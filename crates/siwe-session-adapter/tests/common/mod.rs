/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for siwe-session-adapter tests

use siwe_session_adapter::{ClientConfig, PageLocation, Providers, SessionClient, WalletConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Hardhat account #0
#[allow(dead_code)]
pub const TEST_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

#[allow(dead_code)]
pub const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Session client pointed at the mock server
pub fn client_for(server: &MockServer) -> SessionClient {
    SessionClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("mock server uri is a valid base url")
}

/// Provider stack with default wallet config, backed by the mock server
#[allow(dead_code)]
pub fn providers_for(server: &MockServer) -> Providers {
    let location = PageLocation::parse("http://localhost:3000").expect("valid page url");
    Providers::from_parts(WalletConfig::default(), client_for(server), location)
}

/// Mount a `/me` mock answering with `address`
#[allow(dead_code)]
pub async fn mock_me(server: &MockServer, address: Option<&str>, expected_calls: u64) {
    let body = match address {
        Some(address) => serde_json::json!({ "address": address }),
        None => serde_json::json!({}),
    };
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}
