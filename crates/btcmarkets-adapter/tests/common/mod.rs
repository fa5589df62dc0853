/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for btcmarkets-adapter tests

use btcmarkets_adapter::{BtcMarketsClient, ClientConfig, Credentials};
use wiremock::MockServer;

/// API key used across the test suite
#[allow(dead_code)]
pub const TEST_API_KEY: &str = "test-api-key";

/// base64 of b"btcmarkets-test-secret"
pub const TEST_SECRET_B64: &str = "YnRjbWFya2V0cy10ZXN0LXNlY3JldA==";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Deterministic test credentials
pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_API_KEY, TEST_SECRET_B64).expect("test secret decodes")
}

/// Client wired to a mock server with default configuration
pub fn test_client(base_url: &str) -> BtcMarketsClient {
    BtcMarketsClient::with_config_and_base_url(
        test_credentials(),
        ClientConfig::default(),
        base_url,
    )
    .expect("client init")
}

/// Client with custom configuration against a mock server
#[allow(dead_code)]
pub fn test_client_with_config(base_url: &str, config: ClientConfig) -> BtcMarketsClient {
    BtcMarketsClient::with_config_and_base_url(test_credentials(), config, base_url)
        .expect("client init")
}
