/*
[INPUT]:  Endpoint specs (method, path, params, body, auth flag)
[OUTPUT]: Ready-to-send requests with auth headers applied
[POS]:    HTTP layer - request construction, no network I/O
[UPDATE]: When header policy or the auth scheme changes
*/

use serde_json::Value;

use crate::http::client::Credentials;
use crate::http::error::Result;
use crate::http::signature::{RequestSigner, timestamp_ms};

/// HTTP methods accepted by the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl RestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestMethod::Get => "GET",
            RestMethod::Post => "POST",
            RestMethod::Put => "PUT",
            RestMethod::Delete => "DELETE",
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        match method {
            RestMethod::Get => reqwest::Method::GET,
            RestMethod::Post => reqwest::Method::POST,
            RestMethod::Put => reqwest::Method::PUT,
            RestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Caller-facing description of one API call
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: RestMethod,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    pub requires_auth: bool,
}

impl RequestSpec {
    pub fn new(method: RestMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            body: None,
            headers: Vec::new(),
            requires_auth: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(RestMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(RestMethod::Post, path)
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn authenticated(mut self) -> Self {
        self.requires_auth = true;
        self
    }
}

/// A fully built request, ready for dispatch
#[derive(Debug, Clone)]
pub struct RestRequest {
    pub method: RestMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl RestRequest {
    /// Look up a header by name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Builds canonical requests and injects auth headers
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    api_key: String,
    signer: RequestSigner,
}

impl RequestBuilder {
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            api_key: credentials.api_key.clone(),
            signer: RequestSigner::new(credentials.secret_key.clone()),
        }
    }

    /// Build a request stamped with a fresh nonce
    pub fn build(&self, spec: RequestSpec) -> Result<RestRequest> {
        self.build_with_nonce(spec, timestamp_ms())
    }

    /// Build a request with an explicit nonce
    ///
    /// GET requests never carry a body on the wire and always sign the
    /// empty body string, regardless of any body set on the spec.
    pub fn build_with_nonce(&self, spec: RequestSpec, nonce: i64) -> Result<RestRequest> {
        let is_get = spec.method == RestMethod::Get;

        let body = match (&spec.body, is_get) {
            (Some(value), false) => Some(serde_json::to_string(value)?),
            _ => None,
        };
        let signed_body = body.as_deref().unwrap_or("");

        let mut headers: Vec<(String, String)> = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("Accept-Charset".to_string(), "UTF-8".to_string()),
            (
                "Content-Type".to_string(),
                if is_get {
                    "application/x-www-form-urlencoded".to_string()
                } else {
                    "application/json".to_string()
                },
            ),
        ];

        if spec.requires_auth {
            let signature = self.signer.sign(spec.method, &spec.path, nonce, signed_body);
            headers.push(("BM-AUTH-APIKEY".to_string(), self.api_key.clone()));
            headers.push(("BM-AUTH-TIMESTAMP".to_string(), nonce.to_string()));
            headers.push(("BM-AUTH-SIGNATURE".to_string(), signature));
        }

        // Caller headers merge on top: override by name, never dropped
        for (name, value) in spec.headers {
            if let Some(existing) = headers
                .iter_mut()
                .find(|(key, _)| key.eq_ignore_ascii_case(&name))
            {
                existing.1 = value;
            } else {
                headers.push((name, value));
            }
        }

        Ok(RestRequest {
            method: spec.method,
            path: spec.path,
            query: spec.params,
            body,
            headers,
        })
    }
}
