//! JSON-over-HTTP transport shared by both vendor dialects

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{GatewayError, GatewayResult, Result};

/// Overall request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Connection timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// How a vendor expects the method name to be carried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Single endpoint, `method` key inside the JSON body (Nexusggr)
    MethodField,
    /// Method appended to the base URL as a path segment (Telo)
    PathRouted,
}

impl Dialect {
    /// Target URL for `method` under `endpoint`
    pub fn url(&self, endpoint: &str, method: &str) -> String {
        match self {
            Self::MethodField => endpoint.to_string(),
            Self::PathRouted => format!("{}/{}", endpoint.trim_end_matches('/'), method),
        }
    }

    /// Whether the payload carries a `method` discriminator
    pub fn has_method_field(&self) -> bool {
        matches!(self, Self::MethodField)
    }
}

/// Single-shot JSON POST client
///
/// Idle connections are not kept, so every call opens its own connection
/// and releases it before returning.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the vendor's fixed timeouts
    pub fn new() -> Result<Self> {
        Self::with_timeouts(DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a transport with custom timeouts
    pub fn with_timeouts(timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        // gzip(true) sends `Accept-Encoding: gzip` and decodes compressed bodies
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .gzip(true)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| GatewayError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// POST a pre-serialized JSON body and decode the JSON reply.
    ///
    /// The HTTP status is not interpreted; any JSON body is a success.
    pub async fn post_json(&self, url: &str, body: Vec<u8>) -> GatewayResult {
        let response = match self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("HTTP transport error: {}", e);
                return Err(e.into());
            }
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("HTTP transport error while reading body: {}", e);
                return Err(e.into());
            }
        };

        debug!(status = status.as_u16(), len = bytes.len(), "Received response");
        decode_body(&bytes)
    }
}

/// Decode a response body; `null` and malformed JSON are both decode failures
pub(crate) fn decode_body(bytes: &[u8]) -> GatewayResult {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Null) => {
            error!("JSON decode error: response body is null");
            Err(GatewayError::Decode)
        }
        Ok(value) => Ok(value),
        Err(e) => {
            error!("JSON decode error: {}", e);
            Err(GatewayError::Decode)
        }
    }
}
