/*
[INPUT]:  Built requests and raw transport responses
[OUTPUT]: Parsed payloads or typed failures
[POS]:    HTTP layer - dispatch, deadline, response classification
[UPDATE]: When classification policy or transport handling changes
*/

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::http::client::BtcMarketsClient;
use crate::http::error::{BtcMarketsError, Result};
use crate::http::request::{RequestSpec, RestRequest};

/// Error code the exchange uses to report throttling
const RATE_LIMIT_CODE: &str = "TooManyRequests";

/// One transport response: status code plus raw body bytes
#[derive(Debug, Clone)]
pub struct RestResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RestResponse {
    /// Parse the body as JSON
    pub fn as_json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|err| BtcMarketsError::MalformedResponse(err.to_string()))
    }

    /// Body as text, lossily decoded
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Classify a transport response into a payload or a typed failure
///
/// Statuses in [200, 400) parse as JSON. Rate-limit responses map to
/// `RateLimited` regardless of `return_errors_as_data`. Other error
/// statuses fail with `RequestFailed` unless the caller opted into
/// receiving the parsed error body as data.
pub(crate) fn classify(response: RestResponse, return_errors_as_data: bool) -> Result<Value> {
    if (200..400).contains(&response.status) {
        return response.as_json();
    }

    let error_body: Option<Value> = response.as_json().ok();
    if is_rate_limited(response.status, error_body.as_ref()) {
        return Err(BtcMarketsError::RateLimited);
    }

    if return_errors_as_data {
        return error_body.ok_or_else(|| {
            BtcMarketsError::MalformedResponse("error body is not JSON".to_string())
        });
    }

    let text = response.as_text();
    // Large HTML error pages are reported as "N/A" instead of echoed
    let message = if text.contains("<html") {
        "N/A".to_string()
    } else {
        text.into_owned()
    };

    Err(BtcMarketsError::RequestFailed {
        status: response.status,
        message,
    })
}

fn is_rate_limited(status: u16, body: Option<&Value>) -> bool {
    status == 429
        || body
            .and_then(|value| value.get("code"))
            .and_then(Value::as_str)
            == Some(RATE_LIMIT_CODE)
}

impl BtcMarketsClient {
    /// Send one built request over the transport, bounded by the
    /// configured deadline
    pub(crate) async fn dispatch(&self, request: &RestRequest) -> Result<RestResponse> {
        let url = self.base_url.join(&request.path)?;
        debug!(method = request.method.as_str(), path = %request.path, "dispatching request");

        let mut builder = self.http_client.request(request.method.into(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let deadline = self.config.timeout;
        let exchange = async {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>(RestResponse {
                status,
                body: body.to_vec(),
            })
        };

        match tokio::time::timeout(deadline, exchange).await {
            Ok(result) => result.map_err(|err| {
                if err.is_timeout() {
                    BtcMarketsError::Timeout {
                        duration: deadline.as_secs(),
                    }
                } else {
                    err.into()
                }
            }),
            Err(_) => Err(BtcMarketsError::Timeout {
                duration: deadline.as_secs(),
            }),
        }
    }

    /// Execute a spec and return the raw JSON payload
    ///
    /// With `return_errors_as_data` the parsed error body of a 4xx/5xx
    /// answer is returned as a normal payload, for callers that inspect
    /// structured error codes.
    pub async fn request_value(
        &self,
        spec: RequestSpec,
        return_errors_as_data: bool,
    ) -> Result<Value> {
        let request = self.request_builder().build(spec)?;
        let response = self.dispatch(&request).await?;
        classify(response, return_errors_as_data)
    }

    /// Execute a spec and deserialize the payload
    pub(crate) async fn request_json<T: DeserializeOwned>(&self, spec: RequestSpec) -> Result<T> {
        let value = self.request_value(spec, false).await?;
        serde_json::from_value(value)
            .map_err(|err| BtcMarketsError::MalformedResponse(err.to_string()))
    }
}
