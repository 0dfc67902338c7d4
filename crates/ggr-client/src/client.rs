//! Shared request core for the vendor façades

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{GatewayResult, Result};
use crate::payload::Payload;
use crate::transport::{Dialect, HttpTransport};

/// Credentials, transport and dialect for one vendor integration
///
/// Each call encodes a fresh payload from the current configuration, so a
/// [`Gateway::set_config`] only affects calls made after it.
#[derive(Debug, Clone)]
pub struct Gateway {
    config: ClientConfig,
    transport: HttpTransport,
    dialect: Dialect,
}

impl Gateway {
    /// Create a gateway with the default transport
    pub fn new(dialect: Dialect, config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(dialect, config, HttpTransport::new()?))
    }

    /// Create a gateway over an existing transport
    pub fn with_transport(dialect: Dialect, config: ClientConfig, transport: HttpTransport) -> Self {
        Self {
            config,
            transport,
            dialect,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Replace agent, token and endpoint for subsequent calls
    pub fn set_config(&mut self, config: ClientConfig) {
        self.config = config;
    }

    /// URL a call to `method` is sent to
    pub fn url_for(&self, method: &str) -> String {
        self.dialect.url(&self.config.endpoint, method)
    }

    /// Encode the body a call to `method` would send
    pub fn payload<P: Serialize + ?Sized>(&self, method: &str, params: &P) -> Result<Payload> {
        Payload::encode(self.dialect, method, &self.config, params)
    }

    /// Encode `params` and send them to `method`
    pub async fn call<P: Serialize + ?Sized>(&self, method: &str, params: &P) -> GatewayResult {
        let payload = self.payload(method, params)?;
        self.send(method, &payload).await
    }

    /// Like [`Gateway::call`], then append caller-supplied parameters
    pub async fn call_with_extra<P: Serialize + ?Sized>(
        &self,
        method: &str,
        params: &P,
        extra: Option<&Map<String, Value>>,
    ) -> GatewayResult {
        let mut payload = self.payload(method, params)?;
        if let Some(extra) = extra {
            payload.merge_extra(extra);
        }
        self.send(method, &payload).await
    }

    /// Send an already-encoded payload
    pub async fn send(&self, method: &str, payload: &Payload) -> GatewayResult {
        let url = self.url_for(method);
        debug!(method, url = %url, "Dispatching request");

        let body = payload.to_bytes()?;
        self.transport.post_json(&url, body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::NoParams;

    #[test]
    fn test_gateway_creation() {
        let gateway = Gateway::new(Dialect::MethodField, ClientConfig::default());
        assert!(gateway.is_ok());
    }

    #[test]
    fn test_set_config_changes_url_and_payload() {
        let mut gateway = Gateway::new(
            Dialect::PathRouted,
            ClientConfig::new("A", "T", "http://one.test/api"),
        )
        .unwrap();
        assert_eq!(gateway.url_for("info"), "http://one.test/api/info");

        gateway.set_config(ClientConfig::new("B", "U", "http://two.test/api"));
        assert_eq!(gateway.url_for("info"), "http://two.test/api/info");

        let payload = gateway.payload("info", &NoParams {}).unwrap();
        assert_eq!(payload.get("agent_code"), Some(&Value::from("B")));
        assert_eq!(payload.get("agent_token"), Some(&Value::from("U")));
    }
}
