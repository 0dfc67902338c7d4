//! Command implementations for ggr-cli

pub mod nexus;
pub mod telo;

use serde_json::Value;

pub use nexus::NexusCommand;
pub use telo::TeloCommand;

/// Parse a `key=value` pair; the value is read as JSON when it parses, else as a string
pub fn parse_key_val(s: &str) -> Result<(String, Value), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid parameter: {} (expected key=value)", s))?;
    if key.is_empty() {
        return Err(format!("Invalid parameter: {} (empty key)", s));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("lobby_url=https://lobby.test").unwrap(),
            ("lobby_url".to_string(), json!("https://lobby.test"))
        );
        assert_eq!(
            parse_key_val("bet_limit=100").unwrap(),
            ("bet_limit".to_string(), json!(100))
        );
        assert_eq!(
            parse_key_val("mobile=true").unwrap(),
            ("mobile".to_string(), json!(true))
        );
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }
}
