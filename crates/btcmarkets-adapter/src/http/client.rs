/*
[INPUT]:  HTTP configuration (base URL, timeouts, credentials)
[OUTPUT]: Configured client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::{Client, Url};

use crate::http::error::{BtcMarketsError, Result};
use crate::http::request::RequestBuilder;

/// Production REST endpoint for BTC Markets
const REST_URL: &str = "https://api.btcmarkets.net";

/// v3 API paths
pub(crate) const MARKETS_PATH: &str = "/v3/markets";
pub(crate) const BALANCES_PATH: &str = "/v3/accounts/me/balances";
pub(crate) const TRADES_PATH: &str = "/v3/trades";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub trade_page_size: u32,
    pub rate_limit_cooldown: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            trade_page_size: 100,
            rate_limit_cooldown: Duration::from_secs(61),
        }
    }
}

/// API credentials with the secret decoded at load time
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub secret_key: Vec<u8>,
}

impl Credentials {
    /// Create credentials from an API key and a base64-encoded secret
    pub fn new(api_key: impl Into<String>, secret_b64: &str) -> Result<Self> {
        let secret_key = BASE64.decode(secret_b64).map_err(|err| {
            BtcMarketsError::InvalidCredentials {
                message: format!("secret is not valid base64: {err}"),
            }
        })?;

        Ok(Self {
            api_key: api_key.into(),
            secret_key,
        })
    }
}

/// Main HTTP client for the BTC Markets v3 API
#[derive(Debug)]
pub struct BtcMarketsClient {
    pub(crate) http_client: Client,
    pub(crate) base_url: Url,
    pub(crate) config: ClientConfig,
    builder: RequestBuilder,
    credentials: Credentials,
}

impl BtcMarketsClient {
    /// Create a new client with default configuration
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(credentials, config, REST_URL)
    }

    /// Create a new client against an alternate base URL
    pub fn with_config_and_base_url(
        credentials: Credentials,
        config: ClientConfig,
        base_url: &str,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
            config,
            builder: RequestBuilder::new(&credentials),
            credentials,
        })
    }

    /// Credentials this client authenticates with
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub(crate) fn request_builder(&self) -> &RequestBuilder {
        &self.builder
    }
}
