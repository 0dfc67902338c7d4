//! Error types for gateway client operations

use serde_json::{json, Value};
use thiserror::Error;

/// Result type alias for construction and helper operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Outcome of a single vendor call: the decoded body or a tagged error
pub type GatewayResult = std::result::Result<Value, GatewayError>;

/// Message returned when the vendor body is not valid JSON
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON response";

/// Message returned by bulk RTP when the info call lists no users
pub const NO_USERS_MESSAGE: &str = "Not found any user";

/// Errors that can occur during gateway client operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Network or HTTP failure; carries the transport's own message
    #[error("{0}")]
    Transport(String),

    /// Response body was not valid JSON
    #[error("Invalid JSON response")]
    Decode,

    /// Bulk RTP found no enumerable user collection
    #[error("Not found any user")]
    NoUsers,

    /// Request parameters could not be encoded as a JSON object
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl GatewayError {
    /// Render the error in the vendor-compatible `{"error": "<message>"}` shape
    pub fn to_value(&self) -> Value {
        json!({ "error": self.to_string() })
    }

    /// Whether the failure happened before a usable response arrived
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_value() {
        assert_eq!(
            GatewayError::Decode.to_value(),
            json!({ "error": "Invalid JSON response" })
        );
        assert_eq!(GatewayError::Decode.to_string(), INVALID_JSON_MESSAGE);
    }

    #[test]
    fn test_no_users_value() {
        assert_eq!(
            GatewayError::NoUsers.to_value(),
            json!({ "error": "Not found any user" })
        );
        assert_eq!(GatewayError::NoUsers.to_string(), NO_USERS_MESSAGE);
    }

    #[test]
    fn test_transport_message_passthrough() {
        let err = GatewayError::Transport("connection refused".to_string());
        assert!(err.is_transport());
        assert_eq!(err.to_value(), json!({ "error": "connection refused" }));
    }
}
