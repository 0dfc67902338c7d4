//! Request payload encoding
//!
//! Every outbound body is built here: credentials first (preceded by the
//! `method` key for [`Dialect::MethodField`]), then the operation's typed
//! parameters in declaration order.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::config::ClientConfig;
use crate::error::{GatewayError, Result};
use crate::transport::Dialect;

/// Keys owned by the encoder; parameters may not replace them
pub const RESERVED_KEYS: [&str; 3] = ["method", "agent_code", "agent_token"];

/// Parameters for operations that send credentials only
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoParams {}

/// An encoded, ordered request body
#[derive(Debug, Clone, PartialEq)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Merge credentials (and the method for dialect A) with `params`
    pub fn encode<P: Serialize + ?Sized>(
        dialect: Dialect,
        method: &str,
        config: &ClientConfig,
        params: &P,
    ) -> Result<Self> {
        let mut fields = Map::new();
        if dialect.has_method_field() {
            fields.insert("method".to_string(), Value::String(method.to_string()));
        }
        fields.insert(
            "agent_code".to_string(),
            Value::String(config.agent_code.clone()),
        );
        fields.insert(
            "agent_token".to_string(),
            Value::String(config.agent_token.clone()),
        );

        let mut payload = Self(fields);
        match serde_json::to_value(params).map_err(|e| GatewayError::Encode(e.to_string()))? {
            Value::Object(params) => {
                for (key, value) in params {
                    if RESERVED_KEYS.contains(&key.as_str()) {
                        warn!(key = %key, method, "Dropping parameter that collides with a reserved key");
                        continue;
                    }
                    payload.0.insert(key, value);
                }
            }
            Value::Null => {}
            other => {
                return Err(GatewayError::Encode(format!(
                    "parameters for {} must be a JSON object, got {}",
                    method,
                    json_kind(&other)
                )))
            }
        }

        Ok(payload)
    }

    /// Merge caller-supplied parameters over the typed ones.
    ///
    /// A replaced key keeps its position; new keys are appended. Reserved
    /// keys are never replaced.
    pub fn merge_extra(&mut self, extra: &Map<String, Value>) {
        for (key, value) in extra {
            if RESERVED_KEYS.contains(&key.as_str()) {
                warn!(key = %key, "Ignoring extra parameter that collides with a reserved key");
                continue;
            }
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Serialize to the JSON request body
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.0).map_err(|e| GatewayError::Encode(e.to_string()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Serialize)]
    struct Register<'a> {
        user_code: &'a str,
    }

    fn config() -> ClientConfig {
        ClientConfig::new("A", "T", "http://vendor.test")
    }

    #[test]
    fn test_method_field_payload() {
        let payload = Payload::encode(
            Dialect::MethodField,
            "user_create",
            &config(),
            &Register { user_code: "player1" },
        )
        .unwrap();

        assert_eq!(
            payload.into_value(),
            json!({
                "method": "user_create",
                "agent_code": "A",
                "agent_token": "T",
                "user_code": "player1"
            })
        );
    }

    #[test]
    fn test_path_routed_payload_has_no_method() {
        let payload = Payload::encode(
            Dialect::PathRouted,
            "user_create",
            &config(),
            &Register { user_code: "player1" },
        )
        .unwrap();

        assert!(payload.get("method").is_none());
        assert_eq!(payload.get("agent_code"), Some(&json!("A")));
        assert_eq!(payload.get("agent_token"), Some(&json!("T")));
    }

    #[test]
    fn test_key_order() {
        let payload =
            Payload::encode(Dialect::MethodField, "provider_list", &config(), &NoParams {})
                .unwrap();
        let keys: Vec<&str> = payload.as_map().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["method", "agent_code", "agent_token"]);

        let bytes = payload.to_bytes().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"method":"provider_list","agent_code":"A","agent_token":"T"}"#
        );
    }

    #[test]
    fn test_reserved_keys_cannot_be_overridden() {
        let params = json!({ "agent_code": "evil", "method": "other", "amount": 5 });
        let payload =
            Payload::encode(Dialect::MethodField, "user_deposit", &config(), &params).unwrap();

        assert_eq!(payload.get("agent_code"), Some(&json!("A")));
        assert_eq!(payload.get("method"), Some(&json!("user_deposit")));
        assert_eq!(payload.get("amount"), Some(&json!(5)));
    }

    #[test]
    fn test_non_object_params_rejected() {
        let err = Payload::encode(Dialect::PathRouted, "info", &config(), &[1, 2]).unwrap_err();
        assert!(matches!(err, GatewayError::Encode(_)));
    }

    #[test]
    fn test_merge_extra_overrides_typed_keys() {
        let mut payload = Payload::encode(
            Dialect::MethodField,
            "game_launch",
            &config(),
            &json!({ "lang": "en", "game_code": "" }),
        )
        .unwrap();

        let extra = json!({ "lang": "ko", "agent_token": "x", "method": "info", "currency": "KRW" });
        payload.merge_extra(extra.as_object().unwrap());

        assert_eq!(
            payload.into_value(),
            json!({
                "method": "game_launch",
                "agent_code": "A",
                "agent_token": "T",
                "lang": "ko",
                "game_code": "",
                "currency": "KRW"
            })
        );
    }
}
