//! Client configuration and environment-backed resolution
//!
//! The façades only ever see a resolved [`ClientConfig`]. Where the values
//! come from (explicit arguments, process environment, a `.env` file) is the
//! job of a [`ConfigSource`], injected at construction.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default base URL for the Telo API
pub const TELO_DEFAULT_ENDPOINT: &str = "https://api.telo.is/api/v2";

/// Credentials and endpoint used for every outbound request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Agent (tenant) identifier, sent as `agent_code`
    pub agent_code: String,
    /// Agent secret, sent as `agent_token`
    pub agent_token: String,
    /// Base endpoint URL
    pub endpoint: String,
}

impl ClientConfig {
    /// Create a configuration from already-resolved values
    pub fn new(
        agent_code: impl Into<String>,
        agent_token: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            agent_code: agent_code.into(),
            agent_token: agent_token.into(),
            endpoint: endpoint.into(),
        }
    }
}

/// Per-field values that take precedence over any other source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl ConfigOverrides {
    /// Fill every unset field from `fallback`
    pub fn or(self, fallback: ConfigOverrides) -> Self {
        Self {
            agent: self.agent.or(fallback.agent),
            token: self.token.or(fallback.token),
            endpoint: self.endpoint.or(fallback.endpoint),
        }
    }
}

/// Something that can produce a resolved [`ClientConfig`]
pub trait ConfigSource {
    /// Resolve the configuration
    fn load(&self) -> ClientConfig;
}

impl ConfigSource for ClientConfig {
    fn load(&self) -> ClientConfig {
        self.clone()
    }
}

/// Environment-backed configuration for one vendor integration
///
/// Resolution order per field: override, then `{PREFIX}_AGENT` /
/// `{PREFIX}_TOKEN` / `{PREFIX}_ENDPOINT`, then the integration default.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    prefix: &'static str,
    default_endpoint: &'static str,
    load_dotenv: bool,
    overrides: ConfigOverrides,
}

impl EnvConfig {
    /// `NEXUSGGR_*` variables, no default endpoint
    pub fn nexusggr() -> Self {
        Self::new("NEXUSGGR", "")
    }

    /// `TELO_*` variables, falling back to [`TELO_DEFAULT_ENDPOINT`]
    pub fn telo() -> Self {
        Self::new("TELO", TELO_DEFAULT_ENDPOINT)
    }

    fn new(prefix: &'static str, default_endpoint: &'static str) -> Self {
        Self {
            prefix,
            default_endpoint,
            load_dotenv: false,
            overrides: ConfigOverrides::default(),
        }
    }

    /// Load `.env` from the working directory before reading variables.
    ///
    /// Variables already present in the process environment are kept.
    pub fn with_dotenv(mut self) -> Self {
        self.load_dotenv = true;
        self
    }

    /// Apply explicit values that win over the environment
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Variable prefix, e.g. `TELO`
    pub fn prefix(&self) -> &str {
        self.prefix
    }

    fn var(&self, suffix: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, suffix)).ok()
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> ClientConfig {
        if self.load_dotenv {
            match dotenvy::dotenv() {
                Ok(path) => debug!("Loaded environment from {}", path.display()),
                Err(e) => debug!("No .env file loaded: {}", e),
            }
        }

        let overrides = self.overrides.clone();
        ClientConfig {
            agent_code: overrides
                .agent
                .or_else(|| self.var("AGENT"))
                .unwrap_or_default(),
            agent_token: overrides
                .token
                .or_else(|| self.var("TOKEN"))
                .unwrap_or_default(),
            endpoint: overrides
                .endpoint
                .or_else(|| self.var("ENDPOINT"))
                .unwrap_or_else(|| self.default_endpoint.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear(prefix: &str) {
        for suffix in ["AGENT", "TOKEN", "ENDPOINT"] {
            std::env::remove_var(format!("{}_{}", prefix, suffix));
        }
    }

    #[test]
    #[serial]
    fn test_nexusggr_from_env() {
        clear("NEXUSGGR");
        std::env::set_var("NEXUSGGR_AGENT", "agent-env");
        std::env::set_var("NEXUSGGR_TOKEN", "token-env");
        std::env::set_var("NEXUSGGR_ENDPOINT", "http://vendor.test/api");

        let config = EnvConfig::nexusggr().load();
        assert_eq!(
            config,
            ClientConfig::new("agent-env", "token-env", "http://vendor.test/api")
        );
        clear("NEXUSGGR");
    }

    #[test]
    #[serial]
    fn test_missing_env_falls_back_to_empty() {
        clear("NEXUSGGR");
        let config = EnvConfig::nexusggr().load();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    #[serial]
    fn test_telo_default_endpoint() {
        clear("TELO");
        let config = EnvConfig::telo().load();
        assert_eq!(config.endpoint, TELO_DEFAULT_ENDPOINT);
        assert!(config.agent_code.is_empty());
    }

    #[test]
    #[serial]
    fn test_overrides_win_per_field() {
        clear("TELO");
        std::env::set_var("TELO_AGENT", "agent-env");
        std::env::set_var("TELO_TOKEN", "token-env");

        let config = EnvConfig::telo()
            .with_overrides(ConfigOverrides {
                agent: Some("agent-arg".to_string()),
                ..Default::default()
            })
            .load();

        assert_eq!(config.agent_code, "agent-arg");
        assert_eq!(config.agent_token, "token-env");
        assert_eq!(config.endpoint, TELO_DEFAULT_ENDPOINT);
        clear("TELO");
    }

    #[test]
    fn test_overrides_or() {
        let cli = ConfigOverrides {
            agent: Some("a".to_string()),
            ..Default::default()
        };
        let file = ConfigOverrides {
            agent: Some("b".to_string()),
            token: Some("t".to_string()),
            endpoint: None,
        };
        let merged = cli.or(file);
        assert_eq!(merged.agent.as_deref(), Some("a"));
        assert_eq!(merged.token.as_deref(), Some("t"));
        assert_eq!(merged.endpoint, None);
    }
}
